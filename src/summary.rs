use serde::Serialize;
use std::fmt;

use crate::assign::{Assignment, AssignmentMap};
use crate::energy::{compute_targets, protein_target, split_training_rest, EnergyTargets, SlotTargets, WeekTargets};
use crate::meal::{MealPool, RamenPolicy};
use crate::profile::UserProfile;
use crate::week::{meal_guidance, Day, Slot, WeekTemplate, RECOVERY_HINT};

/// Resolved content of one slot.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SlotView {
    Meal { name: String, kcal: i64, protein: i64 },
    Ramen { kcal: i64, protein: i64 },
    None,
}

impl fmt::Display for SlotView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotView::Meal { name, kcal, protein } => write!(f, "{} ({} kcal, {} g protein)", name, kcal, protein),
            SlotView::Ramen { kcal, protein } => write!(f, "Ramen ({} kcal, {} g protein)", kcal, protein),
            SlotView::None => f.write_str("none"),
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SlotSummary {
    pub slot: Slot,
    pub target_kcal: Option<i64>,
    pub assigned: SlotView,
    pub completed: bool,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DaySummary {
    pub day: Day,
    pub is_training: bool,
    pub workout: Option<&'static str>,
    pub guidance: &'static str,
    pub target_kcal: Option<i64>,
    pub lunch: SlotSummary,
    pub dinner: SlotSummary,
}

/// Read-only view of a week: targets, per-day plan and what each slot resolves to.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PlanSummary {
    pub training_days: Vec<Day>,
    pub protein_baseline: Option<i64>,
    pub targets: Option<EnergyTargets>,
    pub days: Vec<DaySummary>,
}

/// Inputs the summary is built from.
pub struct SummaryInput<'a> {
    pub profile: &'a UserProfile,
    pub template: &'a WeekTemplate,
    pub pool: &'a MealPool,
    pub assignments: &'a AssignmentMap,
    pub ramen: &'a RamenPolicy,
    pub dinner_ratio: f64,
    pub is_completed: &'a dyn Fn(Day, Slot) -> bool,
}

fn resolve(assignment: Option<&Assignment>, pool: &MealPool, ramen: &RamenPolicy) -> SlotView {
    match assignment {
        Some(Assignment::Ramen) => SlotView::Ramen { kcal: ramen.kcal, protein: ramen.protein },
        // A dangling id reads as empty; deletes cascade, so this only guards stale data.
        Some(Assignment::Meal { meal_id }) => match pool.get(meal_id) {
            Some(meal) => SlotView::Meal {
                name: meal.name.clone(),
                kcal: meal.kcal,
                protein: meal.protein,
            },
            None => SlotView::None,
        },
        None => SlotView::None,
    }
}

pub fn build_summary(input: &SummaryInput<'_>) -> PlanSummary {
    let targets = compute_targets(input.profile);
    let week_targets = targets
        .map(|t| WeekTargets::build(input.template, split_training_rest(t.base), input.dinner_ratio));

    let days = Day::ALL
        .iter()
        .map(|&day| {
            let is_training = input.template.is_training_day(day);
            let day_target = week_targets.as_ref().map(|w| w.day(day));
            let slot_targets: Option<SlotTargets> = day_target.map(|d| d.slots);
            let slot_summary = |slot: Slot| SlotSummary {
                slot,
                target_kcal: slot_targets.map(|s| match slot {
                    Slot::Lunch => s.lunch,
                    Slot::Dinner => s.dinner,
                }),
                assigned: resolve(input.assignments.get(day, slot), input.pool, input.ramen),
                completed: (input.is_completed)(day, slot),
            };
            DaySummary {
                day,
                is_training,
                workout: input.template.workout(day).map(|w| w.title),
                guidance: meal_guidance(is_training, input.profile.goal),
                target_kcal: day_target.map(|d| d.daily),
                lunch: slot_summary(Slot::Lunch),
                dinner: slot_summary(Slot::Dinner),
            }
        })
        .collect();

    PlanSummary {
        training_days: input.template.training_days(),
        protein_baseline: protein_target(input.profile.weight_kg),
        targets,
        days,
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let training: Vec<&str> = self.training_days.iter().map(|d| d.label()).collect();
        write!(f, "Training days: {}", training.join(", "))?;
        if let Some(p) = self.protein_baseline {
            write!(f, " · Protein target (baseline): ~ {} g/day", p)?;
        }
        if let Some(t) = &self.targets {
            write!(f, " · Training day: {} kcal · Rest day: {} kcal", t.training, t.rest)?;
        }
        writeln!(f)?;

        for day in &self.days {
            let kind = if day.is_training { "Training" } else { "Rest" };
            write!(f, "\n{} - {}", day.day, kind)?;
            if let Some(kcal) = day.target_kcal {
                write!(f, " ({} kcal)", kcal)?;
            }
            writeln!(f)?;
            match day.workout {
                Some(title) => writeln!(f, "  Workout: {}", title)?,
                None => writeln!(f, "  {}", RECOVERY_HINT)?,
            }
            writeln!(f, "  {}", day.guidance)?;
            for slot in [&day.lunch, &day.dinner] {
                let tick = if slot.completed { "x" } else { " " };
                write!(f, "  [{}] {:<6} {}", tick, slot.slot, slot.assigned)?;
                if let Some(target) = slot.target_kcal {
                    write!(f, " / target {} kcal", target)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::{Meal, MealType};
    use crate::profile::{Goal, Sex};

    fn profile() -> UserProfile {
        UserProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age_years: Some(30.0),
            sex: Sex::Male,
            activity_factor: 1.375,
            goal: Goal::Recomp,
        }
    }

    #[test]
    fn test_summary_resolves_slots() {
        let meal = Meal::new("Chicken rice", MealType::Training, 700, 55, "csv");
        let pool = MealPool::from_meals(vec![meal.clone()]);
        let mut assignments = AssignmentMap::new();
        assignments.set(Day::Mon, Slot::Lunch, Some(Assignment::meal(meal.id.clone())));
        assignments.set(Day::Mon, Slot::Dinner, Some(Assignment::meal("deleted-id")));
        assignments.set(Day::Sun, Slot::Dinner, Some(Assignment::Ramen));
        let ramen = RamenPolicy::new(1, 520, 20);
        let template = WeekTemplate::for_days_per_week(3);
        let user = profile();

        let summary = build_summary(&SummaryInput {
            profile: &user,
            template: &template,
            pool: &pool,
            assignments: &assignments,
            ramen: &ramen,
            dinner_ratio: 0.5,
            is_completed: &|day, slot| day == Day::Mon && slot == Slot::Lunch,
        });

        assert_eq!(summary.training_days, vec![Day::Mon, Day::Wed, Day::Fri]);
        assert_eq!(summary.protein_baseline, Some(112));
        let mon = &summary.days[0];
        assert_eq!(mon.target_kcal, Some(2561));
        assert_eq!(mon.lunch.target_kcal, Some(1281));
        assert_eq!(mon.dinner.target_kcal, Some(1280));
        assert_eq!(mon.lunch.assigned, SlotView::Meal { name: "Chicken rice".into(), kcal: 700, protein: 55 });
        assert!(mon.lunch.completed);
        assert_eq!(mon.dinner.assigned, SlotView::None);
        assert_eq!(summary.days[6].dinner.assigned, SlotView::Ramen { kcal: 520, protein: 20 });
        assert_eq!(summary.days[1].target_kcal, Some(2061));

        let text = summary.to_string();
        assert!(text.starts_with("Training days: Mon, Wed, Fri · Protein target (baseline): ~ 112 g/day"));
        assert!(text.contains("Chicken rice (700 kcal, 55 g protein)"));
    }

    #[test]
    fn test_summary_without_metrics_has_no_targets() {
        let user = UserProfile { weight_kg: Some(80.0), ..UserProfile::default() };
        let template = WeekTemplate::for_days_per_week(4);
        let summary = build_summary(&SummaryInput {
            profile: &user,
            template: &template,
            pool: &MealPool::new(),
            assignments: &AssignmentMap::new(),
            ramen: &RamenPolicy::default(),
            dinner_ratio: 0.5,
            is_completed: &|_, _| false,
        });
        assert_eq!(summary.targets, None);
        assert_eq!(summary.protein_baseline, Some(128));
        assert!(summary.days.iter().all(|d| d.target_kcal.is_none() && d.lunch.target_kcal.is_none()));
        assert_eq!(summary.days[0].workout, Some("Upper A (Push + Pull)"));
    }
}
