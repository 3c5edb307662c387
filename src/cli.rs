use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::profile::{Goal, Sex};
use crate::storage::DEFAULT_STATE_FILE;
use crate::week::{Day, Slot};

/// Environment variable naming the state file when `--state-file` is not given.
pub const STATE_FILE_ENV_VAR: &str = "FIT_PLAN_STATE";

#[derive(Parser, Debug)]
#[command(author, version, about = "Weekly training and meal plan generator", long_about = None)]
pub struct Cli {
    /// Path to the plan state file (defaults to $FIT_PLAN_STATE, then ./fit_plan_v2.json)
    #[arg(long, global = true, env = STATE_FILE_ENV_VAR)]
    pub state_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Update body metrics, goal and training frequency
    Profile {
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        age: Option<f64>,
        #[arg(long)]
        sex: Option<Sex>,
        /// Activity multiplier, typically 1.2 to 1.9
        #[arg(long)]
        activity: Option<f64>,
        #[arg(long)]
        goal: Option<Goal>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(3..=4))]
        days_per_week: Option<u8>,
        /// Share of the daily kcal that goes to dinner (0 to 1)
        #[arg(long)]
        dinner_ratio: Option<f64>,
    },
    /// Print the energy targets for the current profile
    Targets,
    /// Import meals from a CSV file with name,type,kcal,protein columns
    Import {
        file: PathBuf,
        /// Replace the current pool instead of appending to it
        #[arg(long)]
        replace: bool,
    },
    /// Write the meal pool as CSV (stdout when no file is given)
    Export { file: Option<PathBuf> },
    /// List the meal pool
    Meals,
    /// Configure ramen placeholder dinners
    Ramen {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
        count: u8,
        #[arg(long)]
        kcal: Option<i64>,
        #[arg(long)]
        protein: Option<i64>,
    },
    /// Regenerate the week's meal assignments
    Assign,
    /// Delete a meal and any assignment using it
    DeleteMeal { id: String },
    /// Tick (or untick) a meal slot as done
    Done {
        day: Day,
        slot: Slot,
        #[arg(long)]
        undo: bool,
    },
    /// Show the weekly plan
    Show,
    /// Clear all meal assignments
    Clear,
    /// Reset everything to defaults
    Reset,
}

impl Cli {
    /// The state file to use; a missing or blank value falls back to the default.
    pub fn state_file_path(&self) -> PathBuf {
        self.state_file
            .clone()
            .filter(|p| !p.to_string_lossy().trim().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE))
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
