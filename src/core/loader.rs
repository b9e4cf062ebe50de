//! Entity loading utilities
//!
//! Generic helpers for reading entity files out of a catalog
//! directory. Directory contents are processed in sorted filename
//! order; entity filenames start with a ULID-based ID, so that order
//! is creation order, which is the catalog insertion order the size
//! matcher preserves.

use miette::{IntoDiagnostic, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::entity::Entity;
use crate::core::project::{Project, ENTITY_FILE_SUFFIX};

/// List a directory's entity files in sorted filename order.
pub fn entity_files(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(ENTITY_FILE_SUFFIX))
            .collect(),
        Err(_) => Vec::new(),
    };
    paths.sort();
    paths
}

/// Load all entities of type T from a directory.
///
/// Files that fail to parse are silently skipped; `validate` is the
/// place that reports them.
pub fn load_all<T: DeserializeOwned + 'static>(dir: &Path) -> Result<Vec<T>> {
    let mut entities = Vec::new();

    for path in entity_files(dir) {
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(entity) = serde_yml::from_str::<T>(&content) {
                entities.push(entity);
            }
        }
    }

    Ok(entities)
}

/// Load all entities of type T from its catalog directory, oldest
/// first regardless of how files were named.
pub fn load_entities<T: Entity + 'static>(project: &Project) -> Result<Vec<T>> {
    let mut entities: Vec<T> = load_all(&project.entity_dir(T::PREFIX))?;
    entities.sort_by_key(|e| e.created());
    Ok(entities)
}

/// Find an entity file whose name starts with or contains the given
/// ID fragment. Returns the first match in sorted order.
pub fn find_entity_file(dir: &Path, id: &str) -> Option<PathBuf> {
    entity_files(dir).into_iter().find(|path| {
        let filename = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        filename.starts_with(id) || filename.contains(id)
    })
}

/// Load a single entity by ID fragment, returning its path and value.
pub fn load_entity<T: DeserializeOwned + 'static>(dir: &Path, id: &str) -> Result<Option<(PathBuf, T)>> {
    if let Some(path) = find_entity_file(dir, id) {
        let content = fs::read_to_string(&path).into_diagnostic()?;
        let entity: T = serde_yml::from_str(&content).into_diagnostic()?;
        return Ok(Some((path, entity)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_all_empty_dir() {
        let dir = tempdir().unwrap();
        let result: Vec<serde_json::Value> = load_all(dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_load_all_nonexistent_dir() {
        let result: Vec<serde_json::Value> =
            load_all(Path::new("/nonexistent/path")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_entity_files_sorted() {
        let dir = tempdir().unwrap();
        for name in ["VEH-02B.tyredex.yaml", "VEH-01A.tyredex.yaml"] {
            fs::write(dir.path().join(name), "x: 1").unwrap();
        }
        // An unrelated file must be ignored
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let names: Vec<String> = entity_files(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["VEH-01A.tyredex.yaml", "VEH-02B.tyredex.yaml"]);
    }

    #[test]
    fn test_find_entity_file_by_fragment() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("VEH-01J123456789ABCDEF.tyredex.yaml");
        fs::write(&file, "id: VEH-01J123456789ABCDEF").unwrap();

        assert_eq!(find_entity_file(dir.path(), "VEH-01J123"), Some(file));
        assert!(find_entity_file(dir.path(), "SUB-").is_none());
    }
}
