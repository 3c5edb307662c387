use crate::meal::{Meal, MealType};

/// Meals below this much protein pay a penalty per missing gram.
pub const PROTEIN_FLOOR_G: i64 = 60;
pub const PROTEIN_PENALTY_PER_G: i64 = 3;

/// Lower is better: kcal distance from the slot target plus a protein shortfall penalty.
pub fn score_meal(meal: &Meal, target_kcal: i64) -> i64 {
    let kcal_gap = meal.kcal.saturating_sub(target_kcal).saturating_abs();
    let protein_gap = PROTEIN_FLOOR_G.saturating_sub(meal.protein).max(0);
    kcal_gap.saturating_add(PROTEIN_PENALTY_PER_G.saturating_mul(protein_gap))
}

/// Lowest-scoring meal compatible with `desired`. On equal scores the first one seen wins.
pub fn best_candidate<'a>(
    meals: impl IntoIterator<Item = &'a Meal>,
    desired: MealType,
    target_kcal: i64,
) -> Option<(&'a Meal, i64)> {
    let mut best: Option<(&'a Meal, i64)> = None;
    for meal in meals.into_iter().filter(|m| m.meal_type.fits(desired)) {
        let score = score_meal(meal, target_kcal);
        match best {
            Some((_, best_score)) if best_score <= score => {}
            _ => best = Some((meal, score)),
        }
    }
    best
}
