//! The consumption log: an ordered, newest-first collection of portions with
//! on-demand totals.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{FoodRecord, LogEntry, Macros, Meal};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Log {
    entries: Vec<LogEntry>,
}

impl Log {
    /// Log a portion of `record`, scaled to `grams`, with a fresh id and
    /// timestamp. The new entry goes to the front (newest first).
    pub fn add(&mut self, record: &FoodRecord, grams: f64, meal: Meal) -> &LogEntry {
        let macros = record.portion(grams);
        let entry = LogEntry {
            id: Uuid::new_v4().to_string(),
            name: record.name.clone(),
            meal,
            grams,
            kcal: macros.kcal,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
            created_at: Utc::now().to_rfc3339(),
        };
        self.entries.insert(0, entry);
        &self.entries[0]
    }

    /// Remove the entry with `id`. An absent id is a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert already-built entries (a CSV import) ahead of the existing
    /// ones, keeping their given order.
    pub fn prepend(&mut self, entries: Vec<LogEntry>) {
        self.entries.splice(0..0, entries);
    }

    /// Sum of all entry macros; all-zero for an empty log.
    #[must_use]
    pub fn totals(&self) -> Macros {
        self.entries.iter().fold(Macros::default(), |acc, e| Macros {
            kcal: acc.kcal + e.kcal,
            protein: acc.protein + e.protein,
            carbs: acc.carbs + e.carbs,
            fat: acc.fat + e.fat,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
