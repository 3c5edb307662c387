use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::week::{Day, Slot};

/// What fills one lunch or dinner slot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Assignment {
    Meal { meal_id: String },
    Ramen,
}

impl Assignment {
    pub fn meal(id: impl Into<String>) -> Self {
        Assignment::Meal { meal_id: id.into() }
    }

    pub fn meal_id(&self) -> Option<&str> {
        match self {
            Assignment::Meal { meal_id } => Some(meal_id),
            Assignment::Ramen => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DaySlots {
    pub lunch: Option<Assignment>,
    pub dinner: Option<Assignment>,
}

impl DaySlots {
    pub fn get(&self, slot: Slot) -> Option<&Assignment> {
        match slot {
            Slot::Lunch => self.lunch.as_ref(),
            Slot::Dinner => self.dinner.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Assignment> {
        match slot {
            Slot::Lunch => &mut self.lunch,
            Slot::Dinner => &mut self.dinner,
        }
    }
}

/// Day -> lunch/dinner assignments. Every day is always present; an empty slot is `None`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "BTreeMap<Day, DaySlots>", into = "BTreeMap<Day, DaySlots>")]
pub struct AssignmentMap {
    days: BTreeMap<Day, DaySlots>,
}

impl Default for AssignmentMap {
    fn default() -> Self {
        Self {
            days: Day::ALL.iter().map(|&d| (d, DaySlots::default())).collect(),
        }
    }
}

impl From<BTreeMap<Day, DaySlots>> for AssignmentMap {
    fn from(mut days: BTreeMap<Day, DaySlots>) -> Self {
        for day in Day::ALL {
            days.entry(day).or_default();
        }
        Self { days }
    }
}

impl From<AssignmentMap> for BTreeMap<Day, DaySlots> {
    fn from(map: AssignmentMap) -> Self {
        map.days
    }
}

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, day: Day) -> Option<&DaySlots> {
        self.days.get(&day)
    }

    pub fn get(&self, day: Day, slot: Slot) -> Option<&Assignment> {
        self.days.get(&day).and_then(|d| d.get(slot))
    }

    pub fn set(&mut self, day: Day, slot: Slot, assignment: Option<Assignment>) {
        *self.days.entry(day).or_default().slot_mut(slot) = assignment;
    }

    /// All 14 slots in Mon..Sun, lunch-then-dinner order.
    pub fn slots(&self) -> impl Iterator<Item = (Day, Slot, Option<&Assignment>)> + '_ {
        Day::ALL
            .into_iter()
            .flat_map(|day| Slot::ALL.into_iter().map(move |slot| (day, slot)))
            .map(move |(day, slot)| (day, slot, self.get(day, slot)))
    }

    /// Clears every slot that points at `meal_id`. Returns how many were cleared.
    pub fn remove_meal(&mut self, meal_id: &str) -> usize {
        let mut removed = 0;
        for slots in self.days.values_mut() {
            for slot in Slot::ALL {
                let target = slots.slot_mut(slot);
                if target.as_ref().and_then(Assignment::meal_id) == Some(meal_id) {
                    *target = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Clears meal slots whose id fails `keep`. Ramen slots are never touched.
    pub fn retain_meals(&mut self, keep: impl Fn(&str) -> bool) -> usize {
        let mut removed = 0;
        for slots in self.days.values_mut() {
            for slot in Slot::ALL {
                let target = slots.slot_mut(slot);
                if matches!(target.as_ref().and_then(Assignment::meal_id), Some(id) if !keep(id)) {
                    *target = None;
                    removed += 1;
                }
            }
        }
        removed
    }

    pub fn unassigned_count(&self) -> usize {
        self.slots().filter(|(_, _, a)| a.is_none()).count()
    }

    pub fn ramen_count(&self) -> usize {
        self.slots().filter(|(_, _, a)| matches!(a, Some(Assignment::Ramen))).count()
    }

    pub fn meal_ids(&self) -> Vec<&str> {
        self.slots().filter_map(|(_, _, a)| a.and_then(Assignment::meal_id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_map_covers_all_slots() {
        let map = AssignmentMap::new();
        assert_eq!(map.slots().count(), 14);
        assert_eq!(map.unassigned_count(), 14);
    }

    #[test]
    fn test_remove_meal_only_touches_matching_slots() {
        let mut map = AssignmentMap::new();
        map.set(Day::Mon, Slot::Lunch, Some(Assignment::meal("a")));
        map.set(Day::Tue, Slot::Dinner, Some(Assignment::meal("a")));
        map.set(Day::Wed, Slot::Lunch, Some(Assignment::meal("b")));
        map.set(Day::Sun, Slot::Dinner, Some(Assignment::Ramen));

        assert_eq!(map.remove_meal("a"), 2);
        assert_eq!(map.get(Day::Mon, Slot::Lunch), None);
        assert_eq!(map.get(Day::Tue, Slot::Dinner), None);
        assert_eq!(map.get(Day::Wed, Slot::Lunch), Some(&Assignment::meal("b")));
        assert_eq!(map.get(Day::Sun, Slot::Dinner), Some(&Assignment::Ramen));
        assert_eq!(map.remove_meal("a"), 0);
    }

    #[test]
    fn test_serialized_shape() {
        let mut map = AssignmentMap::new();
        map.set(Day::Fri, Slot::Lunch, Some(Assignment::meal("m1")));
        map.set(Day::Sat, Slot::Dinner, Some(Assignment::Ramen));
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["Fri"]["lunch"], serde_json::json!({"kind": "meal", "meal_id": "m1"}));
        assert_eq!(json["Sat"]["dinner"], serde_json::json!({"kind": "ramen"}));
        assert!(json["Mon"]["lunch"].is_null());

        let partial: AssignmentMap = serde_json::from_str(r#"{"Tue": {"lunch": {"kind": "ramen"}}}"#).unwrap();
        assert_eq!(partial.slots().count(), 14);
        assert_eq!(partial.get(Day::Tue, Slot::Lunch), Some(&Assignment::Ramen));
        assert_eq!(partial.get(Day::Tue, Slot::Dinner), None);
    }
}
