use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::profile::Goal;

/// Day of the week. The derived ordering is the fixed Mon..Sun planning order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat, Day::Sun];

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Day::ALL
            .iter()
            .copied()
            .find(|d| d.label().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown day '{}', expected Mon..Sun", s.trim()))
    }
}

/// One of the two daily meal occasions, in planning order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Lunch,
    Dinner,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Lunch, Slot::Dinner];

    pub fn label(self) -> &'static str {
        match self {
            Slot::Lunch => "lunch",
            Slot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lunch" => Ok(Slot::Lunch),
            "dinner" => Ok(Slot::Dinner),
            other => Err(format!("unknown slot '{}', expected lunch or dinner", other)),
        }
    }
}

/// Session label for a training day. Exercise content lives outside the engine.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Workout {
    pub title: &'static str,
}

const FULL_BODY_A: Workout = Workout { title: "Full Body A (Push + Legs + Core)" };
const FULL_BODY_B: Workout = Workout { title: "Full Body B (Pull + Single-leg + Shoulder)" };
const FULL_BODY_C: Workout = Workout { title: "Full Body C (Glutes + Push/Pull + Core)" };
const UPPER_A: Workout = Workout { title: "Upper A (Push + Pull)" };
const LOWER_A: Workout = Workout { title: "Lower A (Squat focus)" };
const UPPER_B: Workout = Workout { title: "Upper B (Shoulder + Back)" };
const LOWER_B: Workout = Workout { title: "Lower B (Hinge + Glutes)" };

/// Which days of the week are training days, and with which session.
/// Days missing from the map are rest days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTemplate {
    sessions: BTreeMap<Day, Workout>,
}

impl WeekTemplate {
    /// 3 days per week gives a Mon/Wed/Fri full-body split; any other value falls back to
    /// the 4-day Mon/Tue/Thu/Sat upper/lower split.
    pub fn for_days_per_week(days_per_week: u8) -> Self {
        let sessions = if days_per_week == 3 {
            vec![(Day::Mon, FULL_BODY_A), (Day::Wed, FULL_BODY_B), (Day::Fri, FULL_BODY_C)]
        } else {
            vec![(Day::Mon, UPPER_A), (Day::Tue, LOWER_A), (Day::Thu, UPPER_B), (Day::Sat, LOWER_B)]
        };
        Self { sessions: sessions.into_iter().collect() }
    }

    /// Builds a template from an explicit set of training days (labelled generically).
    pub fn from_training_days(days: &[Day]) -> Self {
        let sessions = days
            .iter()
            .map(|&d| (d, Workout { title: "Training session" }))
            .collect();
        Self { sessions }
    }

    pub fn is_training_day(&self, day: Day) -> bool {
        self.sessions.contains_key(&day)
    }

    pub fn workout(&self, day: Day) -> Option<&Workout> {
        self.sessions.get(&day)
    }

    pub fn training_days(&self) -> Vec<Day> {
        self.sessions.keys().copied().collect()
    }

    pub fn rest_days(&self) -> Vec<Day> {
        Day::ALL.iter().copied().filter(|d| !self.is_training_day(*d)).collect()
    }
}

pub fn meal_guidance(is_training_day: bool, goal: Goal) -> &'static str {
    match (is_training_day, goal) {
        (true, Goal::Cut) => "Training-day meal: high protein + moderate carbs (keep it controlled).",
        (true, Goal::Bulk) => "Training-day meal: high protein + carbs a bit higher (fuel performance).",
        (true, Goal::Recomp) => "Training-day meal: high protein + don't go too low-carb (better strength).",
        (false, Goal::Cut) => "Rest-day meal: high protein + lighter carbs/fats (easy deficit).",
        (false, Goal::Bulk) => "Rest-day meal: high protein + balanced (don't skip calories).",
        (false, Goal::Recomp) => "Rest-day meal: high protein + lighter overall (but not starving).",
    }
}

pub const RECOVERY_HINT: &str = "Recovery idea: 20-40 min walk + light mobility (hips/shoulders).";
