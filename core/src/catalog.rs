//! The searchable food catalog: a seed set of common foods plus
//! user-submitted entries, newest first. Records are never edited or
//! deleted in place.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{FoodDraft, FoodRecord};
use crate::numeric::coerce;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<FoodRecord>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog { records: seed() }
    }
}

impl Catalog {
    /// Case-insensitive substring match over food names, in catalog order.
    /// An empty (or all-whitespace) query returns the full catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&FoodRecord> {
        let q = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&q))
            .collect()
    }

    /// Add a user-submitted food to the front of the catalog.
    ///
    /// The name is trimmed and must be non-empty; nutrient fields are
    /// coerced, so blank or junk input becomes 0.
    pub fn add_custom(&mut self, draft: &FoodDraft) -> Result<&FoodRecord> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::Validation("food name must not be empty".into()));
        }
        let record = FoodRecord {
            name: name.to_string(),
            kcal: coerce(&draft.kcal),
            protein: coerce(&draft.protein),
            carbs: coerce(&draft.carbs),
            fat: coerce(&draft.fat),
        };
        self.records.insert(0, record);
        Ok(&self.records[0])
    }

    #[must_use]
    pub fn records(&self) -> &[FoodRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

macro_rules! food {
    ($name:literal, $kcal:literal, $protein:literal, $carbs:literal, $fat:literal) => {
        FoodRecord {
            name: $name.to_string(),
            kcal: $kcal,
            protein: $protein,
            carbs: $carbs,
            fat: $fat,
        }
    };
}

/// The built-in database, per 100 g.
fn seed() -> Vec<FoodRecord> {
    vec![
        food!("Egg, whole", 155.0, 13.0, 1.1, 11.0),
        food!("Chicken breast, skinless", 165.0, 31.0, 0.0, 3.6),
        food!("Rice, white, cooked", 130.0, 2.4, 28.0, 0.3),
        food!("Rice, basmati, cooked", 121.0, 3.5, 25.2, 0.4),
        food!("Chapati/roti (atta)", 297.0, 9.6, 54.0, 3.2),
        food!("Dal (lentils), cooked", 116.0, 9.0, 20.0, 0.4),
        food!("Beef, lean", 250.0, 26.0, 0.0, 15.0),
        food!("Mutton, lean", 294.0, 25.0, 0.0, 21.0),
        food!("Fish, rohu", 97.0, 17.0, 0.0, 3.0),
        food!("Milk, cow, 3.5%", 64.0, 3.4, 4.8, 3.6),
        food!("Yogurt, plain", 59.0, 10.0, 3.6, 0.4),
        food!("Banana", 89.0, 1.1, 23.0, 0.3),
        food!("Apple", 52.0, 0.3, 14.0, 0.2),
        food!("Dates, dried", 282.0, 2.5, 75.0, 0.4),
        food!("Peanut butter", 588.0, 25.0, 20.0, 50.0),
        food!("Almonds", 579.0, 21.0, 22.0, 50.0),
        food!("Oil, vegetable", 884.0, 0.0, 0.0, 100.0),
        food!("Potato, boiled", 87.0, 1.9, 20.0, 0.1),
        food!("Biryani (avg)", 185.0, 6.5, 22.0, 7.0),
        food!("Samosa (avg)", 308.0, 7.0, 34.0, 17.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_size() {
        assert_eq!(Catalog::default().len(), 20);
    }

    #[test]
    fn test_search_rice_returns_both_variants_in_order() {
        let catalog = Catalog::default();
        let hits = catalog.search("rice");
        let names: Vec<&str> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Rice, white, cooked", "Rice, basmati, cooked"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::default();
        assert_eq!(catalog.search("RICE").len(), 2);
        assert_eq!(catalog.search("  Egg ").len(), 1);
    }

    #[test]
    fn test_empty_query_returns_full_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.search("").len(), catalog.len());
        assert_eq!(catalog.search("   ").len(), catalog.len());
    }

    #[test]
    fn test_add_custom_prepends() {
        let mut catalog = Catalog::default();
        let draft = FoodDraft {
            name: "Halwa".into(),
            kcal: "350".into(),
            protein: "4".into(),
            carbs: "55".into(),
            fat: "12".into(),
        };
        catalog.add_custom(&draft).unwrap();
        assert_eq!(catalog.records()[0].name, "Halwa");
        assert_eq!(catalog.len(), 21);
    }

    #[test]
    fn test_add_custom_defaults_blank_fields_to_zero() {
        let mut catalog = Catalog::default();
        let draft = FoodDraft {
            name: "Test Bar".into(),
            kcal: "400".into(),
            ..FoodDraft::default()
        };
        catalog.add_custom(&draft).unwrap();
        let hits = catalog.search("test");
        assert_eq!(hits.len(), 1);
        assert!((hits[0].kcal - 400.0).abs() < f64::EPSILON);
        assert!(hits[0].protein.abs() < f64::EPSILON);
        assert!(hits[0].carbs.abs() < f64::EPSILON);
        assert!(hits[0].fat.abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_custom_rejects_empty_name() {
        let mut catalog = Catalog::default();
        let draft = FoodDraft {
            name: "   ".into(),
            ..FoodDraft::default()
        };
        let err = catalog.add_custom(&draft).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(catalog.len(), 20);
    }

    #[test]
    fn test_add_custom_trims_name() {
        let mut catalog = Catalog::default();
        let draft = FoodDraft {
            name: "  Kheer  ".into(),
            ..FoodDraft::default()
        };
        let added = catalog.add_custom(&draft).unwrap();
        assert_eq!(added.name, "Kheer");
    }
}
