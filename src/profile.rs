use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Cut,
    Bulk,
    #[default]
    Recomp,
}

impl Goal {
    /// Multiplier applied to TDEE for this goal.
    pub fn calorie_multiplier(self) -> f64 {
        match self {
            Goal::Cut => 0.85,
            Goal::Bulk => 1.10,
            Goal::Recomp => 1.0,
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(format!("unknown sex '{}', expected male or female", other)),
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(Goal::Cut),
            "bulk" => Ok(Goal::Bulk),
            "recomp" => Ok(Goal::Recomp),
            other => Err(format!("unknown goal '{}', expected cut, bulk or recomp", other)),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Goal::Cut => "cut",
            Goal::Bulk => "bulk",
            Goal::Recomp => "recomp",
        };
        f.write_str(label)
    }
}

/// Body metrics and goal entered by the user.
///
/// Numeric metrics are optional: a profile with missing or non-positive values is still
/// valid to store, the energy model simply yields no targets for it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age_years: Option<f64>,
    pub sex: Sex,
    pub activity_factor: f64,
    pub goal: Goal,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            weight_kg: None,
            height_cm: None,
            age_years: None,
            sex: Sex::Male,
            activity_factor: 1.375,
            goal: Goal::Recomp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sex_and_goal_case_insensitive() {
        assert_eq!("Female".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!(" m ".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("BULK".parse::<Goal>(), Ok(Goal::Bulk));
        assert!("maintain".parse::<Goal>().is_err());
    }

    #[test]
    fn test_profile_deserializes_onto_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"weight_kg": 80.0, "goal": "cut"}"#).unwrap();
        assert_eq!(profile.weight_kg, Some(80.0));
        assert_eq!(profile.goal, Goal::Cut);
        assert_eq!(profile.activity_factor, 1.375);
        assert_eq!(profile.height_cm, None);
    }
}
