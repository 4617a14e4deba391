//! In-memory result cache
//!
//! Keys are the exact lookup strings that went over the wire ("25",
//! "pikachu"). A creature reached by both id and name is stored twice; there
//! is no canonical key. Entries are never evicted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::CreatureRecord;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultCache {
    entries: HashMap<String, CreatureRecord>,
}

impl ResultCache {
    pub fn get(&self, key: &str) -> Option<&CreatureRecord> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Store a record under `key`. A second store for the same key replaces
    /// the first (last writer wins).
    pub fn store(&mut self, key: impl Into<String>, record: CreatureRecord) {
        self.entries.insert(key.into(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BaseStats;

    fn record(id: u32, name: &str) -> CreatureRecord {
        CreatureRecord {
            id,
            name: name.to_string(),
            types: vec!["electric".into()],
            sprite: None,
            stats: BaseStats::default(),
            height_m: 0.4,
            weight_kg: 6.0,
            abilities: vec!["static".into()],
        }
    }

    #[test]
    fn test_id_and_name_are_independent_entries() {
        let mut cache = ResultCache::default();
        cache.store("25", record(25, "pikachu"));
        assert!(cache.contains("25"));
        assert!(!cache.contains("pikachu"));

        cache.store("pikachu", record(25, "pikachu"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("pikachu"), cache.get("25"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut cache = ResultCache::default();
        cache.store("pikachu", record(25, "pikachu"));
        assert!(cache.get("Pikachu").is_none());
        assert!(cache.get("pikachu ").is_none());
    }
}
