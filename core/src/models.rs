use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric::round1;

/// The shape shared by portion scaling, log totals, and the daily goal:
/// energy plus the three macronutrients, grams except for kcal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A food in the catalog. All nutrient values are per 100 g.
///
/// Records are immutable once created; user submissions are prepended to the
/// catalog rather than edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub name: String,
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodRecord {
    /// Scale the per-100 g values to a portion of `grams`, each field
    /// rounded to one decimal.
    #[must_use]
    pub fn portion(&self, grams: f64) -> Macros {
        let factor = grams / 100.0;
        Macros {
            kcal: round1(self.kcal * factor),
            protein: round1(self.protein * factor),
            carbs: round1(self.carbs * factor),
            fat: round1(self.fat * factor),
        }
    }
}

/// Draft of a user-submitted food: a name plus free-form numeric strings as
/// typed, coerced on add (unparseable fields become 0).
#[derive(Debug, Clone, Default)]
pub struct FoodDraft {
    pub name: String,
    pub kcal: String,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meal {
    #[default]
    Any,
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Meal {
    pub const ALL: &'static [Meal] = &[
        Meal::Any,
        Meal::Breakfast,
        Meal::Lunch,
        Meal::Dinner,
        Meal::Snack,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Meal::Any => "Any",
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
            Meal::Snack => "Snack",
        }
    }

    /// Case-insensitive parse of a meal name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Meal> {
        Meal::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged portion. The macro fields are pre-scaled absolute values, not
/// per-100 g; they always equal `record.portion(grams)` at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub name: String,
    pub meal: Meal,
    pub grams: f64,
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub created_at: String,
}

impl LogEntry {
    #[must_use]
    pub fn macros(&self) -> Macros {
        Macros {
            kcal: self.kcal,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }
}

/// Daily intake targets, compared against log totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Default for Goal {
    fn default() -> Self {
        Goal {
            kcal: 2200.0,
            protein: 120.0,
            carbs: 250.0,
            fat: 70.0,
        }
    }
}

/// Per-field progress percentages against a goal, capped at 100 for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub kcal: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Goal {
    /// Percentage of each target covered by `totals`.
    ///
    /// A zero or non-finite target counts as a denominator of 1, so an unset
    /// goal never divides by zero.
    #[must_use]
    pub fn progress(&self, totals: Macros) -> Progress {
        fn pct(total: f64, goal: f64) -> f64 {
            let denom = if goal == 0.0 || !goal.is_finite() {
                1.0
            } else {
                goal
            };
            (total / denom * 100.0).min(100.0)
        }
        Progress {
            kcal: pct(totals.kcal, self.kcal),
            protein: pct(totals.protein, self.protein),
            carbs: pct(totals.carbs, self.carbs),
            fat: pct(totals.fat, self.fat),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "serving")]
    Serving,
}

impl Unit {
    #[must_use]
    pub fn parse(s: &str) -> Option<Unit> {
        match s.trim().to_lowercase().as_str() {
            "g" | "grams" => Some(Unit::Grams),
            "serving" => Some(Unit::Serving),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Grams => "g",
            Unit::Serving => "serving",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Display preferences, persisted alongside the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub theme: Theme,
}
