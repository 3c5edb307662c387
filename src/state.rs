use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::assign::{assign_meals, AssignmentMap};
use crate::energy::{compute_targets, split_training_rest, EnergyTargets, WeekTargets, DEFAULT_DINNER_RATIO};
use crate::error::PlanError;
use crate::meal::{MealPool, RamenPolicy};
use crate::meal_import::{import_meals, ImportMode};
use crate::profile::UserProfile;
use crate::summary::{build_summary, PlanSummary, SummaryInput};
use crate::week::{Day, Slot, WeekTemplate};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PlanSettings {
    pub days_per_week: u8,
    /// Share of a day's kcal that goes to dinner.
    pub dinner_ratio: f64,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            days_per_week: 3,
            dinner_ratio: DEFAULT_DINNER_RATIO,
        }
    }
}

/// Done ticks keyed `"{Day}_{slot}"`, e.g. `Mon_lunch`. Lives independently of the
/// assignments: regenerating a week keeps the ticks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct CompletionMap(BTreeMap<String, bool>);

impl CompletionMap {
    pub fn key(day: Day, slot: Slot) -> String {
        format!("{}_{}", day.label(), slot.label())
    }

    pub fn set(&mut self, day: Day, slot: Slot, done: bool) {
        self.0.insert(Self::key(day, slot), done);
    }

    pub fn is_done(&self, day: Day, slot: Slot) -> bool {
        self.0.get(&Self::key(day, slot)).copied().unwrap_or(false)
    }
}

/// Removes a meal from the pool and clears every assignment that referenced it.
pub fn delete_meal(pool: &MealPool, assignments: &AssignmentMap, id: &str) -> (MealPool, AssignmentMap) {
    let mut pool = pool.clone();
    let mut assignments = assignments.clone();
    if pool.remove(id).is_some() {
        let cleared = assignments.remove_meal(id);
        info!(meal_id = id, cleared, "deleted meal");
    }
    (pool, assignments)
}

/// Everything the planner remembers between runs.
///
/// Transitions borrow the current state and hand back a new one, so a failed
/// transition leaves the caller's state as it was.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PlanState {
    pub profile: UserProfile,
    pub settings: PlanSettings,
    pub ramen: RamenPolicy,
    pub meals: MealPool,
    pub assignments: AssignmentMap,
    pub completed: CompletionMap,
}

impl PlanState {
    pub fn week_template(&self) -> WeekTemplate {
        WeekTemplate::for_days_per_week(self.settings.days_per_week)
    }

    pub fn targets(&self) -> Option<EnergyTargets> {
        compute_targets(&self.profile)
    }

    /// Form submit: new profile and settings. Assignments and ticks are kept.
    pub fn with_profile(&self, profile: UserProfile, settings: PlanSettings) -> Self {
        Self {
            profile,
            settings,
            ..self.clone()
        }
    }

    pub fn with_ramen_policy(&self, ramen: RamenPolicy) -> Self {
        Self {
            ramen: RamenPolicy::new(ramen.count, ramen.kcal, ramen.protein),
            ..self.clone()
        }
    }

    /// Imports CSV meals. After a replace, assignments pointing at meals that are no
    /// longer in the pool are cleared.
    pub fn import_meals(&self, csv_text: &str, mode: ImportMode) -> Result<Self, PlanError> {
        let meals = import_meals(&self.meals, csv_text, mode)?;
        let mut assignments = self.assignments.clone();
        let cleared = assignments.retain_meals(|id| meals.contains(id));
        if cleared > 0 {
            info!(cleared, "cleared assignments to replaced meals");
        }
        Ok(Self {
            meals,
            assignments,
            ..self.clone()
        })
    }

    /// Regenerates the whole week of assignments from the current profile and pool.
    pub fn auto_assign(&self) -> Result<Self, PlanError> {
        let energy = self.targets().ok_or(PlanError::InsufficientProfile)?;
        let template = self.week_template();
        let week_targets = WeekTargets::build(&template, split_training_rest(energy.base), self.settings.dinner_ratio);
        let assignments = assign_meals(&template, &self.meals, &week_targets, self.ramen.count);
        Ok(Self {
            assignments,
            ..self.clone()
        })
    }

    pub fn delete_meal(&self, id: &str) -> Result<Self, PlanError> {
        if !self.meals.contains(id) {
            return Err(PlanError::UnknownMeal(id.to_string()));
        }
        let (meals, assignments) = delete_meal(&self.meals, &self.assignments, id);
        Ok(Self {
            meals,
            assignments,
            ..self.clone()
        })
    }

    pub fn set_completed(&self, day: Day, slot: Slot, done: bool) -> Self {
        let mut next = self.clone();
        next.completed.set(day, slot, done);
        next
    }

    pub fn clear_assignments(&self) -> Self {
        Self {
            assignments: AssignmentMap::new(),
            ..self.clone()
        }
    }

    pub fn reset() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> PlanSummary {
        let template = self.week_template();
        build_summary(&SummaryInput {
            profile: &self.profile,
            template: &template,
            pool: &self.meals,
            assignments: &self.assignments,
            ramen: &self.ramen,
            dinner_ratio: self.settings.dinner_ratio,
            is_completed: &|day, slot| self.completed.is_done(day, slot),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::Assignment;
    use crate::profile::{Goal, Sex};

    const MEALS_CSV: &str = "name,type,kcal,protein\n\
        Chicken rice,training,1250,65\n\
        Beef burrito,training,1300,70\n\
        Salmon bowl,rest,1000,55\n\
        Lentil curry,rest,980,40\n";

    fn ready_state() -> PlanState {
        let profile = UserProfile {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age_years: Some(30.0),
            sex: Sex::Male,
            activity_factor: 1.375,
            goal: Goal::Recomp,
        };
        PlanState::default()
            .with_profile(profile, PlanSettings::default())
            .import_meals(MEALS_CSV, ImportMode::Append)
            .unwrap()
    }

    #[test]
    fn test_auto_assign_needs_profile() {
        let state = PlanState::default().import_meals(MEALS_CSV, ImportMode::Append).unwrap();
        assert!(matches!(state.auto_assign(), Err(PlanError::InsufficientProfile)));
    }

    #[test]
    fn test_delete_meal_cascades() {
        let state = ready_state().auto_assign().unwrap();
        let victim = state.assignments.get(Day::Mon, Slot::Lunch).and_then(Assignment::meal_id).unwrap().to_string();
        let before = state.assignments.clone();

        let after = state.delete_meal(&victim).unwrap();
        assert!(!after.meals.contains(&victim));
        for (day, slot, assignment) in after.assignments.slots() {
            let old = before.get(day, slot);
            if old.and_then(Assignment::meal_id) == Some(victim.as_str()) {
                assert_eq!(assignment, None);
            } else {
                assert_eq!(assignment, old);
            }
        }
    }

    #[test]
    fn test_delete_unknown_meal() {
        let state = ready_state();
        assert!(matches!(state.delete_meal("nope"), Err(PlanError::UnknownMeal(id)) if id == "nope"));
    }

    #[test]
    fn test_replace_import_clears_stale_assignments() {
        let state = ready_state().with_ramen_policy(RamenPolicy::new(1, 520, 20)).auto_assign().unwrap();
        let replaced = state
            .import_meals("name,type,kcal,protein\nNew meal,either,900,60\n", ImportMode::Replace)
            .unwrap();
        assert_eq!(replaced.meals.len(), 1);
        assert_eq!(replaced.assignments.meal_ids().len(), 0);
        assert_eq!(replaced.assignments.get(Day::Sun, Slot::Dinner), Some(&Assignment::Ramen));
    }

    #[test]
    fn test_failed_import_keeps_state() {
        let state = ready_state();
        let err = state.import_meals("name,type\nx,rest\n", ImportMode::Replace).unwrap_err();
        assert_eq!(err.to_string(), "Missing required headers. Need: name,type,kcal,protein");
        assert_eq!(state.meals.len(), 4);
    }

    #[test]
    fn test_completion_survives_regeneration_but_not_reset() {
        let state = ready_state().set_completed(Day::Tue, Slot::Dinner, true);
        let regenerated = state.auto_assign().unwrap();
        assert!(regenerated.completed.is_done(Day::Tue, Slot::Dinner));
        assert!(!regenerated.completed.is_done(Day::Tue, Slot::Lunch));
        assert_eq!(CompletionMap::key(Day::Tue, Slot::Dinner), "Tue_dinner");
        assert!(!PlanState::reset().completed.is_done(Day::Tue, Slot::Dinner));
    }

    #[test]
    fn test_state_json_round_trip_and_defaults() {
        let state = ready_state().auto_assign().unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: PlanState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let sparse: PlanState = serde_json::from_str(r#"{"settings": {"days_per_week": 4}}"#).unwrap();
        assert_eq!(sparse.settings.days_per_week, 4);
        assert_eq!(sparse.settings.dinner_ratio, 0.5);
        assert_eq!(sparse.assignments.slots().count(), 14);
    }
}
