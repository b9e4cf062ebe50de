//! Short ID system for easier record selection
//!
//! Numeric aliases like `@1`, `VEH@2` map to full entity IDs. The
//! index lives in `.tyredex/shortids.json` and is refreshed by listing
//! commands.

use std::collections::HashMap;
use std::fs;

use crate::core::project::Project;

const INDEX_FILE: &str = ".tyredex/shortids.json";

/// A mapping of short numbers to full entity IDs
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShortIdIndex {
    /// Maps short number to full entity ID string
    entries: HashMap<u32, String>,

    /// Reverse lookup, rebuilt on load
    #[serde(skip)]
    reverse: HashMap<String, u32>,

    /// Next available short number
    next_id: u32,
}

impl ShortIdIndex {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            reverse: HashMap::new(),
            next_id: 1,
        }
    }

    /// Load the index from a catalog, or start empty
    pub fn load(project: &Project) -> Self {
        let path = project.root().join(INDEX_FILE);
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(mut index) = serde_json::from_str::<ShortIdIndex>(&content) {
                index.reverse = index
                    .entries
                    .iter()
                    .map(|(k, v)| (v.clone(), *k))
                    .collect();
                return index;
            }
        }
        Self::new()
    }

    /// Save the index to the catalog
    pub fn save(&self, project: &Project) -> std::io::Result<()> {
        let path = project.root().join(INDEX_FILE);
        fs::write(path, serde_json::to_string_pretty(self)?)
    }

    /// Add an entity ID and return its short number
    pub fn add(&mut self, entity_id: String) -> u32 {
        if let Some(&short) = self.reverse.get(&entity_id) {
            return short;
        }

        let short = self.next_id;
        self.next_id += 1;
        self.entries.insert(short, entity_id.clone());
        self.reverse.insert(entity_id, short);
        short
    }

    /// Ensure every ID in the iterator has a short number
    pub fn ensure_all(&mut self, entity_ids: impl IntoIterator<Item = String>) {
        for id in entity_ids {
            self.add(id);
        }
    }

    /// Resolve a reference to a full entity ID.
    ///
    /// Accepts `@N`, `VEH@N`, a bare number, or any other string
    /// (passed through for partial-ID matching downstream).
    pub fn resolve(&self, reference: &str) -> Option<String> {
        let num_str = if let Some((_, n)) = reference.split_once('@') {
            n
        } else if !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit()) {
            reference
        } else {
            return Some(reference.to_string());
        };

        num_str
            .parse::<u32>()
            .ok()
            .and_then(|n| self.entries.get(&n).cloned())
    }

    /// Get the short number for a full entity ID
    pub fn get_short_id(&self, entity_id: &str) -> Option<u32> {
        self.reverse.get(entity_id).copied()
    }

    /// Display form of an entity's alias, e.g. "@3", or "-" if the
    /// entity has not been listed yet.
    pub fn display(&self, entity_id: &str) -> String {
        match self.get_short_id(entity_id) {
            Some(n) => format!("@{}", n),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_resolve() {
        let mut index = ShortIdIndex::new();

        assert_eq!(index.add("VEH-01A".to_string()), 1);
        assert_eq!(index.add("VEH-02B".to_string()), 2);

        assert_eq!(index.resolve("@1"), Some("VEH-01A".to_string()));
        assert_eq!(index.resolve("2"), Some("VEH-02B".to_string()));
        assert_eq!(index.resolve("VEH@2"), Some("VEH-02B".to_string()));
        assert_eq!(index.resolve("@99"), None);
    }

    #[test]
    fn test_non_numeric_passthrough() {
        let index = ShortIdIndex::new();
        assert_eq!(index.resolve("VEH-01A"), Some("VEH-01A".to_string()));
        assert_eq!(index.resolve("honda-cb350-2021"), Some("honda-cb350-2021".to_string()));
    }

    #[test]
    fn test_duplicate_ids_share_alias() {
        let mut index = ShortIdIndex::new();
        let a = index.add("VEH-01A".to_string());
        let b = index.add("VEH-01A".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        let mut index = ShortIdIndex::new();
        index.add("VEH-01A".to_string());
        assert_eq!(index.display("VEH-01A"), "@1");
        assert_eq!(index.display("VEH-XXX"), "-");
    }
}
