//! Saved-locations store with injected persistence.
//!
//! The collection is loaded once when the store is opened and written back
//! on every mutation. Corrupt persisted data is logged and treated as an
//! empty collection, never as a fatal error.

use chrono::Utc;
use std::{fs, path::PathBuf};
use tracing::warn;
use uuid::Uuid;

use crate::{
    config::Config,
    error::{Result, WeatherError},
    model::{CurrentConditions, SavedLocation},
};

/// Persistence collaborator: one JSON blob holding the whole collection.
pub trait FavoritesStorage: Send + Sync {
    fn load(&self) -> Result<Vec<SavedLocation>>;
    fn save(&self, locations: &[SavedLocation]) -> Result<()>;
}

/// File-backed storage under the platform data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage at the default platform location.
    pub fn default_location() -> Result<Self> {
        let path = Config::favorites_file_path()
            .map_err(|err| WeatherError::Storage(err.to_string()))?;
        Ok(Self::new(path))
    }
}

impl FavoritesStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<SavedLocation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(%err, path = %self.path.display(), "could not read favorites, starting empty");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str(&contents) {
            Ok(locations) => Ok(locations),
            Err(err) => {
                warn!(%err, path = %self.path.display(), "corrupt favorites data, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, locations: &[SavedLocation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                WeatherError::Storage(format!(
                    "failed to create favorites directory {}: {err}",
                    parent.display()
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(locations)?;
        fs::write(&self.path, json).map_err(|err| {
            WeatherError::Storage(format!(
                "failed to write favorites file {}: {err}",
                self.path.display()
            ))
        })
    }
}

/// In-memory collection over an injected storage collaborator.
pub struct FavoritesStore {
    storage: Box<dyn FavoritesStorage>,
    locations: Vec<SavedLocation>,
}

impl FavoritesStore {
    /// Load the persisted collection and wrap it.
    pub fn open(storage: Box<dyn FavoritesStorage>) -> Result<Self> {
        let locations = storage.load()?;
        Ok(Self { storage, locations })
    }

    /// Save a location resolved from `current`, keyed by a fresh id.
    /// Always succeeds in memory; the write-through failure propagates.
    pub fn add(&mut self, current: &CurrentConditions, query: &str) -> Result<SavedLocation> {
        let location = SavedLocation {
            id: Uuid::new_v4().to_string(),
            name: current.location.name.clone(),
            query: query.to_string(),
            country: current.location.country.clone(),
            added_at: Utc::now(),
        };

        self.locations.push(location.clone());
        self.storage.save(&self.locations)?;
        Ok(location)
    }

    /// Remove by id; unknown ids are a no-op, not an error.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.locations.len();
        self.locations.retain(|loc| loc.id != id);
        if self.locations.len() != before {
            self.storage.save(&self.locations)?;
        }
        Ok(())
    }

    /// Insertion order.
    pub fn list(&self) -> &[SavedLocation] {
        &self.locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocationInfo;
    use std::sync::{Arc, Mutex};

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            location: LocationInfo {
                name: "London".to_string(),
                country: "United Kingdom".to_string(),
                region: "Greater London".to_string(),
                localtime: "2024-03-15 12:00".to_string(),
                lat: 51.517,
                lon: -0.106,
            },
            temperature_c: 13.0,
            weather_code: 1000,
            weather_descriptions: vec!["Sunny".to_string()],
            weather_icons: vec![],
            wind_speed_kph: 11.0,
            wind_degree: 220,
            wind_dir: "SW".to_string(),
            pressure_mb: 1012.0,
            precip_mm: 0.0,
            humidity_pct: 58.0,
            cloudcover_pct: 0.0,
            feelslike_c: 13.0,
            uv_index: 4.0,
            visibility_km: 10.0,
            is_day: true,
        }
    }

    #[derive(Default, Clone)]
    struct MemoryStorage(Arc<Mutex<Vec<SavedLocation>>>);

    impl FavoritesStorage for MemoryStorage {
        fn load(&self) -> Result<Vec<SavedLocation>> {
            Ok(self.0.lock().expect("lock").clone())
        }

        fn save(&self, locations: &[SavedLocation]) -> Result<()> {
            *self.0.lock().expect("lock") = locations.to_vec();
            Ok(())
        }
    }

    #[test]
    fn add_then_list_contains_entry_with_generated_id() {
        let mut store = FavoritesStore::open(Box::new(MemoryStorage::default())).expect("open");
        let saved = store.add(&sample_current(), "london").expect("add");

        assert!(!saved.id.is_empty());
        assert_eq!(saved.name, "London");
        assert_eq!(saved.query, "london");
        assert_eq!(saved.country, "United Kingdom");

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, saved.id);
    }

    #[test]
    fn remove_deletes_only_the_matching_entry() {
        let mut store = FavoritesStore::open(Box::new(MemoryStorage::default())).expect("open");
        let first = store.add(&sample_current(), "london").expect("add");
        let second = store.add(&sample_current(), "london,uk").expect("add");

        store.remove(&first.id).expect("remove");

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }

    #[test]
    fn remove_unknown_id_is_a_noop() {
        let mut store = FavoritesStore::open(Box::new(MemoryStorage::default())).expect("open");
        store.add(&sample_current(), "london").expect("add");

        store.remove("no-such-id").expect("remove");
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn mutations_write_through_to_storage() {
        let storage = MemoryStorage::default();
        let mut store = FavoritesStore::open(Box::new(storage.clone())).expect("open");
        let saved = store.add(&sample_current(), "london").expect("add");
        assert_eq!(storage.0.lock().expect("lock").len(), 1);

        store.remove(&saved.id).expect("remove");
        assert!(storage.0.lock().expect("lock").is_empty());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = FavoritesStore::open(Box::new(MemoryStorage::default())).expect("open");
        for query in ["a", "b", "c"] {
            store.add(&sample_current(), query).expect("add");
        }
        let queries: Vec<&str> = store.list().iter().map(|l| l.query.as_str()).collect();
        assert_eq!(queries, vec!["a", "b", "c"]);
    }

    #[test]
    fn json_file_storage_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().join("favorites.json"));

        let mut store = FavoritesStore::open(Box::new(storage.clone())).expect("open");
        let saved = store.add(&sample_current(), "london").expect("add");

        let reloaded = storage.load().expect("load");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].id, saved.id);
        assert_eq!(reloaded[0].added_at, saved.added_at);
    }

    #[test]
    fn corrupt_favorites_file_is_treated_as_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("favorites.json");
        fs::write(&path, "{ not valid json ]").expect("write");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().expect("load").is_empty());
    }

    #[test]
    fn missing_favorites_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonFileStorage::new(dir.path().join("does-not-exist.json"));
        assert!(storage.load().expect("load").is_empty());
    }
}
