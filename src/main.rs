use anyhow::{Context, Result};
use fit_plan::cli::{parse_args, Command};
use fit_plan::config::Config;
use fit_plan::meal::RamenPolicy;
use fit_plan::meal_import::{export_meals_csv, ImportMode};
use fit_plan::state::{PlanSettings, PlanState};
use fit_plan::storage::{load_state, save_state};
use tokio::fs;
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_targets(state: &PlanState) {
    match state.targets() {
        Some(t) => {
            println!("BMR:          {} kcal", t.bmr);
            println!("TDEE:         {} kcal", t.tdee);
            println!("Goal base:    {} kcal ({})", t.base, state.profile.goal);
            println!("Training day: {} kcal", t.training);
            println!("Rest day:     {} kcal", t.rest);
            println!("Protein:      {} g/day", t.protein);
        }
        None => println!("Not enough data: enter weight, height and age (all positive)."),
    }
}

/// Applies one command to the state. Returns the state to persist, if it changed.
async fn run(command: Command, state: &PlanState) -> Result<Option<PlanState>> {
    let next = match command {
        Command::Profile { weight, height, age, sex, activity, goal, days_per_week, dinner_ratio } => {
            let mut profile = state.profile.clone();
            profile.weight_kg = weight.or(profile.weight_kg);
            profile.height_cm = height.or(profile.height_cm);
            profile.age_years = age.or(profile.age_years);
            profile.sex = sex.unwrap_or(profile.sex);
            profile.activity_factor = activity.unwrap_or(profile.activity_factor);
            profile.goal = goal.unwrap_or(profile.goal);
            let settings = PlanSettings {
                days_per_week: days_per_week.unwrap_or(state.settings.days_per_week),
                dinner_ratio: dinner_ratio.unwrap_or(state.settings.dinner_ratio),
            };
            let next = state.with_profile(profile, settings);
            print_targets(&next);
            next
        }
        Command::Targets => {
            print_targets(state);
            return Ok(None);
        }
        Command::Import { file, replace } => {
            let text = fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read meal CSV '{}'", file.display()))?;
            let mode = if replace { ImportMode::Replace } else { ImportMode::Append };
            let next = state.import_meals(&text, mode)?;
            println!("Imported meals. Pool now holds {} meals.", next.meals.len());
            next
        }
        Command::Export { file } => {
            let csv_text = export_meals_csv(&state.meals)?;
            match file {
                Some(path) => {
                    fs::write(&path, csv_text)
                        .await
                        .with_context(|| format!("Failed to write '{}'", path.display()))?;
                    println!("Exported {} meals to {}", state.meals.len(), path.display());
                }
                None => print!("{}", csv_text),
            }
            return Ok(None);
        }
        Command::Meals => {
            if state.meals.is_empty() {
                println!("No meals yet. Import a CSV first.");
            }
            for meal in state.meals.iter() {
                println!("{}  {:<8} {:>5} kcal {:>4} g  {}", meal.id, meal.meal_type, meal.kcal, meal.protein, meal.name);
            }
            return Ok(None);
        }
        Command::Ramen { count, kcal, protein } => {
            let policy = RamenPolicy::new(
                count,
                kcal.unwrap_or(state.ramen.kcal),
                protein.unwrap_or(state.ramen.protein),
            );
            println!("Ramen: {} dinner(s) at {} kcal / {} g protein", policy.count, policy.kcal, policy.protein);
            state.with_ramen_policy(policy)
        }
        Command::Assign => {
            let next = state.auto_assign()?;
            println!(
                "Assigned week: {} ramen, {} slot(s) left empty.",
                next.assignments.ramen_count(),
                next.assignments.unassigned_count()
            );
            print!("{}", next.summary());
            next
        }
        Command::DeleteMeal { id } => {
            let next = state.delete_meal(&id)?;
            println!("Deleted meal {}", id);
            next
        }
        Command::Done { day, slot, undo } => state.set_completed(day, slot, !undo),
        Command::Show => {
            print!("{}", state.summary());
            return Ok(None);
        }
        Command::Clear => state.clear_assignments(),
        Command::Reset => PlanState::reset(),
    };
    Ok(Some(next))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env for FIT_PLAN_STATE / RUST_LOG

    let cli_args = parse_args();
    let config = Config::from_env();
    init_tracing(&config.log_filter);

    let state_file = cli_args.state_file_path();
    let state = load_state(&state_file)
        .await
        .with_context(|| format!("Failed to load plan state from {:?}", state_file))?;

    if let Some(next) = run(cli_args.command, &state).await? {
        save_state(&state_file, &next).await?;
    }
    Ok(())
}
