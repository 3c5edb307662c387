use serde::{Deserialize, Serialize};
use std::fmt;

/// Day type a meal is suited for.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Training,
    Rest,
    Either,
}

impl MealType {
    /// Normalizes a CSV type cell. Unknown spellings yield `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "training" | "train" => Some(MealType::Training),
            "rest" | "recovery" => Some(MealType::Rest),
            "either" | "any" => Some(MealType::Either),
            _ => None,
        }
    }

    /// `Either` meals fit any day; the others only fit their own day type.
    pub fn fits(self, desired: MealType) -> bool {
        self == desired || self == MealType::Either
    }

    pub fn label(self) -> &'static str {
        match self {
            MealType::Training => "training",
            MealType::Rest => "rest",
            MealType::Either => "either",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Meal {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub kcal: i64,
    pub protein: i64,
    pub source: String, // e.g. "csv"
}

impl Meal {
    pub fn new(name: impl Into<String>, meal_type: MealType, kcal: i64, protein: i64, source: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            meal_type,
            kcal,
            protein,
            source: source.into(),
        }
    }
}

/// Imported candidate meals, keyed by id.
///
/// Stored as a vector so iteration order is stable: the assignment scorer breaks ties
/// by first match.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct MealPool {
    meals: Vec<Meal>,
}

impl MealPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_meals(meals: Vec<Meal>) -> Self {
        let mut pool = Self::new();
        for meal in meals {
            pool.insert(meal);
        }
        pool
    }

    /// Inserts a meal, replacing any meal that already carries the same id.
    pub fn insert(&mut self, meal: Meal) {
        match self.meals.iter_mut().find(|m| m.id == meal.id) {
            Some(existing) => *existing = meal,
            None => self.meals.push(meal),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Meal> {
        let idx = self.meals.iter().position(|m| m.id == id)?;
        Some(self.meals.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn extend(&mut self, other: MealPool) {
        for meal in other.meals {
            self.insert(meal);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Meal> {
        self.meals.iter()
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// Synthetic placeholder meal that fills rest-day dinners without consuming the pool.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RamenPolicy {
    pub count: u8,
    pub kcal: i64,
    pub protein: i64,
}

impl RamenPolicy {
    pub const MAX_COUNT: u8 = 7;

    pub fn new(count: u8, kcal: i64, protein: i64) -> Self {
        Self {
            count: count.min(Self::MAX_COUNT),
            kcal,
            protein,
        }
    }
}

impl Default for RamenPolicy {
    fn default() -> Self {
        Self { count: 0, kcal: 520, protein: 20 }
    }
}
