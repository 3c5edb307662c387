use std::collections::BTreeMap;

use super::targets::{slot_targets, DayTypeTargets, SlotTargets};
use crate::week::{Day, Slot, WeekTemplate};

/// Daily and per-slot kcal targets for every day of a week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekTargets {
    days: BTreeMap<Day, DayTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTarget {
    pub is_training: bool,
    pub daily: i64,
    pub slots: SlotTargets,
}

impl WeekTargets {
    /// Each day's targets depend only on whether the template marks it as a training day.
    pub fn build(template: &WeekTemplate, day_types: DayTypeTargets, dinner_ratio: f64) -> Self {
        let days = Day::ALL
            .iter()
            .map(|&day| {
                let is_training = template.is_training_day(day);
                let daily = if is_training { day_types.training } else { day_types.rest };
                (day, DayTarget { is_training, daily, slots: slot_targets(daily, dinner_ratio) })
            })
            .collect();
        Self { days }
    }

    pub fn day(&self, day: Day) -> DayTarget {
        // build() always fills all seven days
        self.days[&day]
    }

    pub fn slot(&self, day: Day, slot: Slot) -> i64 {
        let slots = self.day(day).slots;
        match slot {
            Slot::Lunch => slots.lunch,
            Slot::Dinner => slots.dinner,
        }
    }
}
