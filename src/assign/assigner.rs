use std::collections::BTreeSet;
use tracing::{debug, info};

use super::assignment::{Assignment, AssignmentMap};
use super::scoring::best_candidate;
use crate::energy::{compute_targets, split_training_rest, WeekTargets, DEFAULT_DINNER_RATIO};
use crate::meal::{Meal, MealPool, MealType, RamenPolicy};
use crate::profile::UserProfile;
use crate::week::{Day, Slot, WeekTemplate};

/// Where a slot's meal came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickSource {
    /// Not yet used this week.
    Pool,
    /// Pool exhausted for this type; reusing from the full pool.
    Reuse,
}

/// Rest days whose dinner goes to ramen: the last `ramen_count` rest days in Mon..Sun
/// order, capped at the number of rest days.
pub fn select_ramen_days(template: &WeekTemplate, ramen_count: u8) -> BTreeSet<Day> {
    let rest_days = template.rest_days();
    let take = (ramen_count as usize).min(rest_days.len());
    rest_days[rest_days.len() - take..].iter().copied().collect()
}

fn pick_meal<'a>(remaining: &[&'a Meal], full_pool: &'a MealPool, desired: MealType, target: i64) -> Option<(&'a Meal, i64, PickSource)> {
    if let Some((meal, score)) = best_candidate(remaining.iter().copied(), desired, target) {
        return Some((meal, score, PickSource::Pool));
    }
    best_candidate(full_pool.iter(), desired, target).map(|(meal, score)| (meal, score, PickSource::Reuse))
}

/// Greedy weekly assignment.
///
/// Ramen dinners are placed first. Every other slot, in Mon..Sun and lunch-then-dinner
/// order, takes the best-scoring compatible meal not yet used this week; once none is
/// left it reuses the best compatible meal from the whole pool. A slot with no
/// compatible meal at all stays empty. The returned map is always a fresh one.
pub fn assign_meals(template: &WeekTemplate, pool: &MealPool, targets: &WeekTargets, ramen_count: u8) -> AssignmentMap {
    let ramen_days = select_ramen_days(template, ramen_count);
    let mut remaining: Vec<&Meal> = pool.iter().collect();
    let mut map = AssignmentMap::new();

    for day in Day::ALL {
        let desired = if template.is_training_day(day) { MealType::Training } else { MealType::Rest };
        for slot in Slot::ALL {
            if slot == Slot::Dinner && ramen_days.contains(&day) {
                map.set(day, slot, Some(Assignment::Ramen));
                continue;
            }

            let target = targets.slot(day, slot);
            match pick_meal(&remaining, pool, desired, target) {
                Some((meal, score, source)) => {
                    debug!(%day, %slot, meal = %meal.name, score, target, ?source, "assigned meal");
                    if source == PickSource::Pool {
                        remaining.retain(|m| m.id != meal.id);
                    }
                    map.set(day, slot, Some(Assignment::meal(meal.id.clone())));
                }
                None => debug!(%day, %slot, ?desired, "no compatible meal, leaving slot empty"),
            }
        }
    }

    info!(
        ramen = map.ramen_count(),
        unassigned = map.unassigned_count(),
        pool_size = pool.len(),
        "auto-assigned week"
    );
    map
}

/// Computes targets from the profile and assigns the week with an even lunch/dinner
/// split. `None` when the profile lacks the metrics to compute targets.
pub fn auto_assign(profile: &UserProfile, template: &WeekTemplate, pool: &MealPool, ramen: &RamenPolicy) -> Option<AssignmentMap> {
    auto_assign_with_ratio(profile, template, pool, ramen, DEFAULT_DINNER_RATIO)
}

pub fn auto_assign_with_ratio(
    profile: &UserProfile,
    template: &WeekTemplate,
    pool: &MealPool,
    ramen: &RamenPolicy,
    dinner_ratio: f64,
) -> Option<AssignmentMap> {
    let energy = compute_targets(profile)?;
    let week_targets = WeekTargets::build(template, split_training_rest(energy.base), dinner_ratio);
    Some(assign_meals(template, pool, &week_targets, ramen.count))
}
