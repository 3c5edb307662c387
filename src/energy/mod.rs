pub mod targets;
pub mod week_targets;

pub use targets::{
    apply_goal, compute_bmr, compute_targets, compute_tdee, protein_target, slot_targets, split_training_rest,
    DayTypeTargets, EnergyTargets, SlotTargets, DEFAULT_DINNER_RATIO,
};
pub use week_targets::{DayTarget, WeekTargets};
