use crate::profile::{Goal, Sex, UserProfile};
use serde::{Deserialize, Serialize};

/// Protein per kg bodyweight used for the daily baseline.
pub const PROTEIN_G_PER_KG: f64 = 1.6;
/// kcal moved from rest days onto training days.
pub const TRAINING_REST_OFFSET: i64 = 250;
pub const TRAINING_DAY_FLOOR: i64 = 1600;
pub const REST_DAY_FLOOR: i64 = 1400;
pub const DEFAULT_DINNER_RATIO: f64 = 0.5;

// Only exact halves round up; the cast saturates out-of-range values.
pub(crate) fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        (floor + 1.0) as i64
    } else {
        floor as i64
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Energy targets derived from a complete profile.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct EnergyTargets {
    pub bmr: i64,
    pub tdee: i64,
    pub base: i64,
    pub training: i64,
    pub rest: i64,
    pub protein: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DayTypeTargets {
    pub training: i64,
    pub rest: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SlotTargets {
    pub lunch: i64,
    pub dinner: i64,
}

/// Mifflin-St Jeor basal metabolic rate.
///
/// Returns `None` unless weight, height and age are all finite and strictly positive.
pub fn compute_bmr(weight_kg: Option<f64>, height_cm: Option<f64>, age_years: Option<f64>, sex: Sex) -> Option<i64> {
    let w = positive(weight_kg)?;
    let h = positive(height_cm)?;
    let a = positive(age_years)?;
    let sex_offset = match sex {
        Sex::Female => -161.0,
        Sex::Male => 5.0,
    };
    Some(round_half_up(10.0 * w + 6.25 * h - 5.0 * a + sex_offset))
}

/// Scales BMR by the activity factor. A zero BMR or a zero/non-finite factor yields `None`.
pub fn compute_tdee(bmr: Option<i64>, activity_factor: f64) -> Option<i64> {
    let bmr = bmr.filter(|b| *b != 0)?;
    if !activity_factor.is_finite() || activity_factor == 0.0 {
        return None;
    }
    Some(round_half_up(bmr as f64 * activity_factor))
}

pub fn apply_goal(tdee: Option<i64>, goal: Goal) -> Option<i64> {
    tdee.map(|t| round_half_up(t as f64 * goal.calorie_multiplier()))
}

/// Splits a base intake into training-day and rest-day intakes, with safety floors
/// applied whatever the base.
pub fn split_training_rest(base: i64) -> DayTypeTargets {
    DayTypeTargets {
        training: base.saturating_add(TRAINING_REST_OFFSET).max(TRAINING_DAY_FLOOR),
        rest: base.saturating_sub(TRAINING_REST_OFFSET).max(REST_DAY_FLOOR),
    }
}

/// Splits a daily intake across lunch and dinner. The two always sum to `daily_kcal`;
/// on an exact half the odd kcal goes to lunch.
pub fn slot_targets(daily_kcal: i64, dinner_ratio: f64) -> SlotTargets {
    let ratio = if dinner_ratio.is_finite() {
        dinner_ratio.clamp(0.0, 1.0)
    } else {
        DEFAULT_DINNER_RATIO
    };
    let dinner = (daily_kcal as f64 * ratio - 0.5).ceil() as i64;
    SlotTargets {
        lunch: daily_kcal - dinner,
        dinner,
    }
}

pub fn protein_target(weight_kg: Option<f64>) -> Option<i64> {
    positive(weight_kg).map(|w| round_half_up(w * PROTEIN_G_PER_KG))
}

/// Runs the whole chain BMR -> TDEE -> goal -> training/rest split for a profile.
/// `None` marks insufficient profile data.
pub fn compute_targets(profile: &UserProfile) -> Option<EnergyTargets> {
    let bmr = compute_bmr(profile.weight_kg, profile.height_cm, profile.age_years, profile.sex)?;
    let tdee = compute_tdee(Some(bmr), profile.activity_factor)?;
    let base = apply_goal(Some(tdee), profile.goal)?;
    let split = split_training_rest(base);
    let protein = protein_target(profile.weight_kg)?;
    Some(EnergyTargets {
        bmr,
        tdee,
        base,
        training: split.training,
        rest: split.rest,
        protein,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn reference_profile() -> UserProfile {
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
    fn test_compute_targets_reference_profile() {
        let targets = compute_targets(&reference_profile()).unwrap();
        // 10*70 + 6.25*175 - 5*30 + 5 = 1680.75
        assert_eq!(targets.bmr, 1681);
        assert_eq!(targets.tdee, 2311);
        assert_eq!(targets.base, 2311);
        assert_eq!(targets.training, 2561);
        assert_eq!(targets.rest, 2061);
        assert_eq!(targets.protein, 112);
    }

    #[test]
    fn test_bmr_female_offset() {
        assert_eq!(compute_bmr(Some(60.0), Some(165.0), Some(40.0), Sex::Female), Some(1270));
    }

    #[test]
    fn test_bmr_requires_all_positive_finite_inputs() {
        assert_eq!(compute_bmr(None, Some(175.0), Some(30.0), Sex::Male), None);
        assert_eq!(compute_bmr(Some(70.0), Some(0.0), Some(30.0), Sex::Male), None);
        assert_eq!(compute_bmr(Some(70.0), Some(175.0), Some(-1.0), Sex::Male), None);
        assert_eq!(compute_bmr(Some(f64::NAN), Some(175.0), Some(30.0), Sex::Male), None);
        assert_eq!(compute_bmr(Some(70.0), Some(f64::INFINITY), Some(30.0), Sex::Male), None);
    }

    #[test]
    fn test_tdee_rejects_falsy_inputs() {
        assert_eq!(compute_tdee(None, 1.5), None);
        assert_eq!(compute_tdee(Some(0), 1.5), None);
        assert_eq!(compute_tdee(Some(1500), 0.0), None);
        assert_eq!(compute_tdee(Some(1500), f64::NAN), None);
        assert_eq!(compute_tdee(Some(1500), 1.2), Some(1800));
    }

    #[test]
    fn test_apply_goal_multipliers() {
        assert_eq!(apply_goal(Some(2000), Goal::Cut), Some(1700));
        assert_eq!(apply_goal(Some(2000), Goal::Bulk), Some(2200));
        assert_eq!(apply_goal(Some(2000), Goal::Recomp), Some(2000));
        assert_eq!(apply_goal(None, Goal::Bulk), None);
    }

    #[test]
    fn test_split_floors_hold_for_any_base() {
        assert_eq!(split_training_rest(1000), DayTypeTargets { training: 1600, rest: 1400 });
        assert_eq!(split_training_rest(-50_000), DayTypeTargets { training: 1600, rest: 1400 });
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            for base in [rng.gen_range(-100_000..100_000), rng.gen::<i64>()] {
                let split = split_training_rest(base);
                assert!(split.training >= TRAINING_DAY_FLOOR);
                assert!(split.rest >= REST_DAY_FLOOR);
            }
        }
    }

    #[test]
    fn test_split_at_integer_extremes() {
        assert_eq!(split_training_rest(i64::MIN), DayTypeTargets { training: 1600, rest: 1400 });
        let top = split_training_rest(i64::MAX);
        assert_eq!(top.training, i64::MAX);
        assert_eq!(top.rest, i64::MAX - TRAINING_REST_OFFSET);
    }

    #[test]
    fn test_compute_targets_extreme_weight_saturates() {
        let mut profile = reference_profile();
        profile.weight_kg = Some(1e300);
        let targets = compute_targets(&profile).unwrap();
        assert_eq!(targets.bmr, i64::MAX);
        assert_eq!(targets.training, i64::MAX);
        assert!(targets.rest >= REST_DAY_FLOOR);
        assert_eq!(targets.protein, i64::MAX);
    }

    #[test]
    fn test_round_half_up_only_on_exact_halves() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(1680.75), 1681);
        assert_eq!(round_half_up(2.4), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(1e300), i64::MAX);
    }

    #[test]
    fn test_slot_targets_tie_goes_to_lunch() {
        assert_eq!(slot_targets(2561, 0.5), SlotTargets { lunch: 1281, dinner: 1280 });
        assert_eq!(slot_targets(2000, 0.5), SlotTargets { lunch: 1000, dinner: 1000 });
        assert_eq!(slot_targets(2000, 0.6), SlotTargets { lunch: 800, dinner: 1200 });
    }

    #[test]
    fn test_slot_targets_always_sum_to_daily() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let daily: i64 = rng.gen_range(0..10_000);
            let ratio: f64 = rng.gen_range(0.0..=1.0);
            let slots = slot_targets(daily, ratio);
            assert_eq!(slots.lunch + slots.dinner, daily, "daily={} ratio={}", daily, ratio);
        }
        assert_eq!(slot_targets(0, 0.5), SlotTargets { lunch: 0, dinner: 0 });
        assert_eq!(slot_targets(1999, 1.0), SlotTargets { lunch: 0, dinner: 1999 });
        assert_eq!(slot_targets(1999, 0.0), SlotTargets { lunch: 1999, dinner: 0 });
    }

    #[test]
    fn test_protein_target() {
        assert_eq!(protein_target(Some(70.0)), Some(112));
        assert_eq!(protein_target(Some(82.5)), Some(132));
        assert_eq!(protein_target(Some(0.0)), None);
        assert_eq!(protein_target(Some(-3.0)), None);
        assert_eq!(protein_target(Some(f64::NAN)), None);
        assert_eq!(protein_target(None), None);
    }

    #[test]
    fn test_compute_targets_missing_metric() {
        let mut profile = reference_profile();
        profile.age_years = None;
        assert_eq!(compute_targets(&profile), None);
    }
}
