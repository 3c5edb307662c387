pub mod assigner;
pub mod assignment;
pub mod scoring;

pub use assigner::{assign_meals, auto_assign, auto_assign_with_ratio, select_ramen_days};
pub use assignment::{Assignment, AssignmentMap, DaySlots};
pub use scoring::{best_candidate, score_meal};
