// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personalized daily goal calculation.
//!
//! Pure function from a biometric snapshot to a daily fluid goal in ml.
//! Runs at profile-save time; the result is snapshotted into the profile as
//! `daily_goal` and from there into each day's record.

use crate::models::user::{ActivityLevel, Climate, Gender, Profile};

const DEFAULT_WEIGHT_KG: f64 = 70.0;
const DEFAULT_AGE_YEARS: u32 = 30;
const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_ACTIVITY: ActivityLevel = ActivityLevel::Light;
const DEFAULT_GENDER: Gender = Gender::Other;
const DEFAULT_CLIMATE: Climate = Climate::Moderate;

/// Biometric inputs; any missing value falls back to a population default.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalInputs {
    pub weight: Option<f64>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub activity: Option<ActivityLevel>,
    pub gender: Option<Gender>,
    pub climate: Option<Climate>,
}

impl From<&Profile> for GoalInputs {
    fn from(profile: &Profile) -> Self {
        Self {
            weight: profile.weight,
            age: profile.age,
            height: profile.height,
            activity: profile.activity,
            gender: profile.gender,
            climate: profile.climate,
        }
    }
}

/// Compute the daily fluid goal in ml, rounded to the nearest 50 ml.
///
/// Base rate per kg varies by age band (younger bodies carry more water),
/// then a multiplicative adjustment stacks age, gender, height, activity and
/// climate factors. Always positive.
pub fn calculate_daily_goal(inputs: &GoalInputs) -> u32 {
    let weight = inputs.weight.unwrap_or(DEFAULT_WEIGHT_KG);
    let age = inputs.age.unwrap_or(DEFAULT_AGE_YEARS);
    let height = inputs.height.unwrap_or(DEFAULT_HEIGHT_CM);
    let activity = inputs.activity.unwrap_or(DEFAULT_ACTIVITY);
    let gender = inputs.gender.unwrap_or(DEFAULT_GENDER);
    let climate = inputs.climate.unwrap_or(DEFAULT_CLIMATE);

    let rate_per_kg = if age < 30 {
        35.0
    } else if age > 60 {
        30.0
    } else {
        33.0
    };
    let base = weight * rate_per_kg;

    let age_factor = ((40.0 - f64::from(age)) / 200.0).clamp(-0.1, 0.1);

    let gender_factor = match gender {
        Gender::Male => 0.05,
        Gender::Female => -0.03,
        Gender::Other => 0.0,
    };

    let height_factor = ((height - 170.0) / 170.0) * 0.06;

    let activity_factor = match activity {
        ActivityLevel::Sedentary => -0.10,
        ActivityLevel::Light => 0.0,
        ActivityLevel::Moderate => 0.12,
        ActivityLevel::Very => 0.25,
        ActivityLevel::Extreme => 0.40,
    };

    let climate_factor = match climate {
        Climate::Hot => 0.10,
        Climate::Humid => 0.08,
        Climate::Dry => 0.05,
        Climate::Cold => -0.05,
        Climate::Moderate => 0.0,
    };

    let adjustment_factor =
        1.0 + age_factor + gender_factor + height_factor + activity_factor + climate_factor;

    // Round to the nearest 50 ml
    ((base * adjustment_factor / 50.0).round() * 50.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_defaults() {
        // base 70*33 = 2310, factor 1 + 0.05 (age) = 1.05,
        // 2310 * 1.05 = 2425.5, round(2425.5/50) = 49 -> 2450
        let goal = calculate_daily_goal(&GoalInputs::default());
        assert_eq!(goal, 2450);
    }

    #[test]
    fn test_deterministic_and_multiple_of_50() {
        let inputs = GoalInputs {
            weight: Some(82.5),
            age: Some(44),
            height: Some(183.0),
            activity: Some(ActivityLevel::Moderate),
            gender: Some(Gender::Male),
            climate: Some(Climate::Dry),
        };
        let first = calculate_daily_goal(&inputs);
        for _ in 0..10 {
            assert_eq!(calculate_daily_goal(&inputs), first);
        }
        assert_eq!(first % 50, 0);
        assert!(first > 0);
    }

    #[test]
    fn test_age_bands_change_base_rate() {
        let young = calculate_daily_goal(&GoalInputs {
            age: Some(25),
            ..Default::default()
        });
        let mid = calculate_daily_goal(&GoalInputs {
            age: Some(45),
            ..Default::default()
        });
        let old = calculate_daily_goal(&GoalInputs {
            age: Some(70),
            ..Default::default()
        });

        // 25y: 70*35 * (1 + 0.075) = 2633.75 -> 2650
        assert_eq!(young, 2650);
        // 45y: 70*33 * (1 - 0.025) = 2252.25 -> 2250
        assert_eq!(mid, 2250);
        // 70y: 70*30 * (1 - 0.1, clamped) = 1890 -> 1900
        assert_eq!(old, 1900);
    }

    #[test]
    fn test_age_factor_is_clamped() {
        // Age 5 would give (40-5)/200 = 0.175 without the clamp
        let goal = calculate_daily_goal(&GoalInputs {
            age: Some(5),
            ..Default::default()
        });
        // 70*35 * 1.1 = 2695 -> 2700
        assert_eq!(goal, 2700);
    }

    #[test]
    fn test_activity_levels_are_ordered() {
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Very,
            ActivityLevel::Extreme,
        ];
        let goals: Vec<u32> = levels
            .iter()
            .map(|&activity| {
                calculate_daily_goal(&GoalInputs {
                    activity: Some(activity),
                    ..Default::default()
                })
            })
            .collect();
        for pair in goals.windows(2) {
            assert!(pair[0] < pair[1], "goals not increasing: {:?}", goals);
        }
    }

    #[test]
    fn test_gender_and_climate_shift_goal() {
        let male_hot = calculate_daily_goal(&GoalInputs {
            gender: Some(Gender::Male),
            climate: Some(Climate::Hot),
            ..Default::default()
        });
        let female_cold = calculate_daily_goal(&GoalInputs {
            gender: Some(Gender::Female),
            climate: Some(Climate::Cold),
            ..Default::default()
        });
        // 2310 * (1 + 0.05 + 0.05 + 0.10) = 2772 -> 2750
        assert_eq!(male_hot, 2750);
        // 2310 * (1 + 0.05 - 0.03 - 0.05) = 2240.7 -> 2250
        assert_eq!(female_cold, 2250);
    }

    #[test]
    fn test_height_factor() {
        let tall = calculate_daily_goal(&GoalInputs {
            height: Some(204.0),
            ..Default::default()
        });
        // height factor (34/170)*0.06 = 0.012; 2310 * 1.062 = 2453.22 -> 2450
        assert_eq!(tall, 2450);

        let short = calculate_daily_goal(&GoalInputs {
            height: Some(136.0),
            ..Default::default()
        });
        // height factor -0.012; 2310 * 1.038 = 2397.78 -> 2400
        assert_eq!(short, 2400);
    }
}
