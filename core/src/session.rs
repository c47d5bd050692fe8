//! The single active session: owns all shared state and the snapshot store.
//!
//! Every mutating operation persists the touched entity as a synchronous
//! fire-and-forget side effect. Store failures are downgraded to warnings
//! and the in-memory mutation always wins; a corrupt snapshot on load
//! silently falls back to defaults.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::goal::BiometricProfile;
use crate::log::Log;
use crate::log_csv;
use crate::models::{FoodDraft, FoodRecord, Goal, LogEntry, Macros, Meal, Preferences, Progress, Theme, Unit};
use crate::store::SnapshotStore;

pub const KEY_CATALOG: &str = "catalog";
pub const KEY_LOG: &str = "log";
pub const KEY_GOAL: &str = "goal";
pub const KEY_PREFS: &str = "prefs";

/// A partial, per-field edit of the daily goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalPatch {
    pub kcal: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl GoalPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kcal.is_none() && self.protein.is_none() && self.carbs.is_none() && self.fat.is_none()
    }
}

pub struct Session {
    catalog: Catalog,
    log: Log,
    goal: Goal,
    prefs: Preferences,
    store: Box<dyn SnapshotStore>,
}

impl Session {
    /// Load all entities from the store; absent keys, corrupt snapshots, and
    /// read failures all resolve to built-in defaults.
    #[must_use]
    pub fn open(store: Box<dyn SnapshotStore>) -> Self {
        let catalog = load_or_default(store.as_ref(), KEY_CATALOG);
        let log = load_or_default(store.as_ref(), KEY_LOG);
        let goal = load_or_default(store.as_ref(), KEY_GOAL);
        let prefs = load_or_default(store.as_ref(), KEY_PREFS);
        Session {
            catalog,
            log,
            goal,
            prefs,
            store,
        }
    }

    // --- Catalog ---

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&FoodRecord> {
        self.catalog.search(query)
    }

    pub fn add_custom_food(&mut self, draft: &FoodDraft) -> Result<FoodRecord> {
        let added = self.catalog.add_custom(draft)?.clone();
        persist(self.store.as_mut(), KEY_CATALOG, &self.catalog);
        Ok(added)
    }

    // --- Log ---

    pub fn add_entry(&mut self, record: &FoodRecord, grams: f64, meal: Meal) -> LogEntry {
        let entry = self.log.add(record, grams, meal).clone();
        persist(self.store.as_mut(), KEY_LOG, &self.log);
        entry
    }

    pub fn remove_entry(&mut self, id: &str) -> bool {
        let removed = self.log.remove(id);
        if removed {
            persist(self.store.as_mut(), KEY_LOG, &self.log);
        }
        removed
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
        persist(self.store.as_mut(), KEY_LOG, &self.log);
    }

    #[must_use]
    pub fn totals(&self) -> Macros {
        self.log.totals()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.goal.progress(self.log.totals())
    }

    // --- Goal ---

    /// Apply a per-field edit to the daily goal.
    pub fn edit_goal(&mut self, patch: GoalPatch) -> Goal {
        if let Some(kcal) = patch.kcal {
            self.goal.kcal = kcal;
        }
        if let Some(protein) = patch.protein {
            self.goal.protein = protein;
        }
        if let Some(carbs) = patch.carbs {
            self.goal.carbs = carbs;
        }
        if let Some(fat) = patch.fat {
            self.goal.fat = fat;
        }
        persist(self.store.as_mut(), KEY_GOAL, &self.goal);
        self.goal
    }

    /// Overwrite the daily goal with the profile's computed needs.
    ///
    /// This is the explicit commit counterpart of the read-only
    /// [`BiometricProfile::daily_needs`] preview; previewing never writes.
    pub fn commit_goal(&mut self, profile: &BiometricProfile) -> Goal {
        self.goal = profile.daily_needs().goal;
        persist(self.store.as_mut(), KEY_GOAL, &self.goal);
        self.goal
    }

    // --- CSV bridge ---

    #[must_use]
    pub fn export_csv(&self) -> String {
        log_csv::to_csv(self.log.entries())
    }

    /// Import a CSV blob, prepending its entries ahead of the existing log.
    /// A malformed blob leaves the log untouched.
    pub fn import_csv(&mut self, text: &str) -> Result<usize> {
        let entries = log_csv::from_csv(text)?;
        let count = entries.len();
        self.log.prepend(entries);
        persist(self.store.as_mut(), KEY_LOG, &self.log);
        Ok(count)
    }

    // --- Preferences ---

    pub fn set_unit(&mut self, unit: Unit) {
        self.prefs.unit = unit;
        persist(self.store.as_mut(), KEY_PREFS, &self.prefs);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.prefs.theme = theme;
        persist(self.store.as_mut(), KEY_PREFS, &self.prefs);
    }

    // --- Read accessors ---

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn log(&self) -> &Log {
        &self.log
    }

    #[must_use]
    pub fn goal(&self) -> Goal {
        self.goal
    }

    #[must_use]
    pub fn prefs(&self) -> Preferences {
        self.prefs
    }
}

fn load_or_default<T: DeserializeOwned + Default>(store: &dyn SnapshotStore, key: &str) -> T {
    match store.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                debug!(key, error = %e, "corrupt snapshot, falling back to defaults");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "snapshot read failed, falling back to defaults");
            T::default()
        }
    }
}

fn persist<T: Serialize>(store: &mut dyn SnapshotStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(e) = store.save(key, &raw) {
                warn!(key, error = %e, "snapshot write failed, keeping in-memory state");
            }
        }
        Err(e) => warn!(key, error = %e, "snapshot serialize failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::store::{MemoryStore, SqliteStore};

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage(rusqlite::Error::InvalidQuery))
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage(rusqlite::Error::InvalidQuery))
        }
    }

    fn memory_session() -> Session {
        Session::open(Box::new(MemoryStore::default()))
    }

    fn first_match(session: &Session, query: &str) -> FoodRecord {
        session.search(query)[0].clone()
    }

    #[test]
    fn test_fresh_session_has_defaults() {
        let session = memory_session();
        assert_eq!(session.catalog().len(), 20);
        assert!(session.log().is_empty());
        assert_eq!(session.goal(), Goal::default());
        assert_eq!(session.prefs(), Preferences::default());
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nosh.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            let mut session = Session::open(Box::new(store));
            let rice = first_match(&session, "rice");
            session.add_entry(&rice, 200.0, Meal::Lunch);
            session.edit_goal(GoalPatch {
                kcal: Some(1800.0),
                ..GoalPatch::default()
            });
            session.set_theme(Theme::Dark);
        }

        let store = SqliteStore::open(&path).unwrap();
        let session = Session::open(Box::new(store));
        assert_eq!(session.log().len(), 1);
        assert_eq!(session.log().entries()[0].name, "Rice, white, cooked");
        assert!((session.goal().kcal - 1800.0).abs() < f64::EPSILON);
        assert_eq!(session.prefs().theme, Theme::Dark);
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_defaults() {
        let mut store = MemoryStore::default();
        store.save(KEY_GOAL, "not json at all").unwrap();
        store.save(KEY_LOG, "{\"wrong\":\"shape\"}").unwrap();

        let session = Session::open(Box::new(store));
        assert_eq!(session.goal(), Goal::default());
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_failing_store_keeps_in_memory_state() {
        let mut session = Session::open(Box::new(FailingStore));
        assert_eq!(session.catalog().len(), 20);

        let egg = first_match(&session, "egg");
        let entry = session.add_entry(&egg, 100.0, Meal::Breakfast);
        assert_eq!(session.log().len(), 1);
        assert!(session.remove_entry(&entry.id));
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_add_custom_food_is_searchable_and_persisted() {
        let mut session = memory_session();
        let draft = FoodDraft {
            name: "Test Bar".into(),
            kcal: "400".into(),
            ..FoodDraft::default()
        };
        session.add_custom_food(&draft).unwrap();
        assert_eq!(session.search("test").len(), 1);
        // Catalog is prepend-only, newest first
        assert_eq!(session.catalog().records()[0].name, "Test Bar");
    }

    #[test]
    fn test_add_custom_food_rejects_empty_name_without_state_change() {
        let mut session = memory_session();
        let err = session.add_custom_food(&FoodDraft::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(session.catalog().len(), 20);
    }

    #[test]
    fn test_progress_against_goal() {
        let mut session = memory_session();
        session.edit_goal(GoalPatch {
            kcal: Some(310.0),
            protein: Some(26.0),
            carbs: Some(0.0),
            fat: Some(7.2),
        });
        let egg = first_match(&session, "egg");
        session.add_entry(&egg, 100.0, Meal::Any);

        let p = session.progress();
        assert!((p.kcal - 50.0).abs() < f64::EPSILON);
        assert!((p.protein - 50.0).abs() < f64::EPSILON);
        // carbs target is 0, denominator falls back to 1, capped at 100
        assert!((p.carbs - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_commit_goal_overwrites_goal() {
        let mut session = memory_session();
        let before = session.goal();
        let profile = BiometricProfile::default();

        // The preview alone must not write anything.
        let needs = profile.daily_needs();
        assert_eq!(session.goal(), before);

        let committed = session.commit_goal(&profile);
        assert_eq!(committed, needs.goal);
        assert_eq!(session.goal(), needs.goal);
    }

    #[test]
    fn test_import_prepends_in_file_order() {
        let mut session = memory_session();
        let egg = first_match(&session, "egg");
        session.add_entry(&egg, 100.0, Meal::Any);

        let csv = "name,meal,grams,kcal,protein,carbs,fat\n\
                   \"First\",\"Lunch\",100.0,100.0,1.0,1.0,1.0\n\
                   \"Second\",\"Dinner\",100.0,100.0,1.0,1.0,1.0";
        let count = session.import_csv(csv).unwrap();
        assert_eq!(count, 2);
        assert_eq!(session.log().entries()[0].name, "First");
        assert_eq!(session.log().entries()[1].name, "Second");
        assert_eq!(session.log().entries()[2].name, "Egg, whole");
    }

    #[test]
    fn test_malformed_import_leaves_log_unchanged() {
        let mut session = memory_session();
        let egg = first_match(&session, "egg");
        session.add_entry(&egg, 100.0, Meal::Any);
        let before = session.log().entries().to_vec();

        let csv = "name,meal,grams,kcal,protein,carbs,fat\n\
                   \"Good\",\"Lunch\",100.0,100.0,1.0,1.0,1.0\n\
                   \"Bad\",\"Lunch\",oops,100.0,1.0,1.0,1.0";
        assert!(session.import_csv(csv).is_err());
        assert_eq!(session.log().entries(), before.as_slice());
    }

    #[test]
    fn test_export_import_round_trip_through_session() {
        let mut session = memory_session();
        let egg = first_match(&session, "egg");
        let rice = first_match(&session, "basmati");
        session.add_entry(&egg, 120.0, Meal::Breakfast);
        session.add_entry(&rice, 180.0, Meal::Dinner);

        let csv = session.export_csv();
        let mut other = memory_session();
        assert_eq!(other.import_csv(&csv).unwrap(), 2);

        let ours: Vec<_> = session
            .log()
            .entries()
            .iter()
            .map(|e| (e.name.clone(), e.meal, e.grams, e.kcal))
            .collect();
        let theirs: Vec<_> = other
            .log()
            .entries()
            .iter()
            .map(|e| (e.name.clone(), e.meal, e.grams, e.kcal))
            .collect();
        assert_eq!(ours, theirs);
    }

    #[test]
    fn test_export_empty_log_is_empty_string() {
        let session = memory_session();
        assert_eq!(session.export_csv(), "");
    }
}
