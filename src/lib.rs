pub mod assign;
pub mod cli;
pub mod config;
pub mod energy;
pub mod error;
pub mod meal;
pub mod meal_import;
pub mod profile;
pub mod state;
pub mod storage;
pub mod summary;
pub mod week;

pub use assign::{auto_assign, Assignment, AssignmentMap};
pub use energy::{compute_targets, EnergyTargets};
pub use error::{ImportError, PlanError};
pub use meal::{Meal, MealPool, MealType, RamenPolicy};
pub use meal_import::{import_meals, ImportMode};
pub use profile::{Goal, Sex, UserProfile};
pub use state::{delete_meal, CompletionMap, PlanSettings, PlanState};
pub use summary::PlanSummary;
pub use week::{Day, Slot, WeekTemplate};
