//! The goal engine: Mifflin-St Jeor BMR/TDEE plus macro gram targets derived
//! from a protein-per-kilogram allowance and carb/fat energy splits.
//!
//! Computing needs is a pure, read-only preview; overwriting the shared goal
//! is a separate, explicit commit on [`crate::Session`].

use serde::{Deserialize, Serialize};

use crate::models::Goal;
use crate::numeric::{round1, round_to};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[default]
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub fn parse(s: &str) -> Option<Sex> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Activity multiplier applied to BMR.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise (×1.2).
    Sedentary,
    /// 1-3 days/week (×1.375).
    Light,
    /// 3-5 days/week (×1.55).
    #[default]
    Moderate,
    /// 6-7 days/week (×1.725).
    VeryActive,
    /// Physical job (×1.9).
    ExtraActive,
}

impl ActivityLevel {
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<ActivityLevel> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "very-active" | "very" => Some(ActivityLevel::VeryActive),
            "extra-active" | "extra" => Some(ActivityLevel::ExtraActive),
            _ => None,
        }
    }
}

/// Biometric and dietary inputs for the needs computation. Session-only;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricProfile {
    pub sex: Sex,
    pub age: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    /// Protein allowance in g per kg of body weight. Mass-based, not a
    /// share of energy, so carb % + fat % need not sum to 100.
    pub protein_per_kg: f64,
    /// Share of TDEE from carbohydrate, in percent.
    pub carb_pct: f64,
    /// Share of TDEE from fat, in percent.
    pub fat_pct: f64,
}

impl Default for BiometricProfile {
    fn default() -> Self {
        BiometricProfile {
            sex: Sex::Male,
            age: 25.0,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity: ActivityLevel::Moderate,
            protein_per_kg: 1.6,
            carb_pct: 50.0,
            fat_pct: 25.0,
        }
    }
}

/// Read-only output of the goal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyNeeds {
    pub bmr: f64,
    pub tdee: f64,
    pub goal: Goal,
}

impl BiometricProfile {
    /// Basal metabolic rate per Mifflin-St Jeor. Degenerate inputs (zero or
    /// negative weight, NaN age) produce degenerate numbers, never an error.
    #[must_use]
    pub fn bmr(&self) -> f64 {
        let base = 10.0 * self.weight_kg + 6.25 * self.height_cm - 5.0 * self.age;
        match self.sex {
            Sex::Male => base + 5.0,
            Sex::Female => base - 161.0,
        }
    }

    /// Total daily energy expenditure: BMR scaled by activity.
    #[must_use]
    pub fn tdee(&self) -> f64 {
        self.bmr() * self.activity.multiplier()
    }

    /// Compute energy and macro targets without touching any shared state.
    ///
    /// Protein is weight-based (g/kg); fat and carbs take their percentage
    /// share of TDEE at 9 and 4 kcal per gram. Non-finite results are
    /// guarded to 0 so callers can always render them.
    #[must_use]
    pub fn daily_needs(&self) -> DailyNeeds {
        fn finite(v: f64) -> f64 {
            if v.is_finite() { v } else { 0.0 }
        }

        let bmr = finite(self.bmr());
        let tdee = finite(self.tdee());
        DailyNeeds {
            bmr,
            tdee,
            goal: Goal {
                kcal: round_to(tdee, 0),
                protein: finite(round1(self.weight_kg * self.protein_per_kg)),
                carbs: finite(round1(self.carb_pct / 100.0 * tdee / 4.0)),
                fat: finite(round1(self.fat_pct / 100.0 * tdee / 9.0)),
            },
        }
    }
}
