//! Catalog discovery and on-disk layout

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::{EntityId, EntityPrefix};

/// Suffix for entity files within the catalog
pub const ENTITY_FILE_SUFFIX: &str = ".tyredex.yaml";

/// Represents a tyredex catalog on disk
#[derive(Debug)]
pub struct Project {
    /// Root directory of the catalog (parent of .tyredex/)
    root: PathBuf,
}

impl Project {
    /// Find the catalog root by walking up from the current directory
    pub fn discover() -> Result<Self, ProjectError> {
        let current =
            std::env::current_dir().map_err(|e| ProjectError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the catalog root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, ProjectError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        loop {
            if current.join(".tyredex").is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(ProjectError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Resolve a catalog root from an explicit `--project` path, or
    /// discover it from the current directory.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ProjectError> {
        match explicit {
            Some(path) => Self::discover_from(path),
            None => Self::discover(),
        }
    }

    /// Create a new catalog structure at the given path
    pub fn init(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if root.join(".tyredex").exists() {
            return Err(ProjectError::AlreadyExists(root));
        }

        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    /// Initialize even if .tyredex/ already exists
    pub fn init_force(path: &Path) -> Result<Self, ProjectError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::create_structure(&root)?;
        Ok(Self { root })
    }

    fn create_structure(root: &Path) -> Result<(), ProjectError> {
        let config_dir = root.join(".tyredex");
        std::fs::create_dir_all(&config_dir)
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        std::fs::write(config_dir.join("config.yaml"), Self::default_config())
            .map_err(|e| ProjectError::IoError(e.to_string()))?;

        for prefix in EntityPrefix::all() {
            std::fs::create_dir_all(root.join(Self::entity_directory(*prefix)))
                .map_err(|e| ProjectError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# Tyredex catalog configuration

# Default author for new records (overrides the global config)
# author: ""

# Editor used by `tyredex veh edit` (default: $EDITOR)
# editor: ""

# Default output format (auto, yaml, tsv, json, csv, md, id)
# default_format: auto
"#
    }

    /// Get the catalog root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .tyredex configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(".tyredex")
    }

    /// Directory for a given entity type, relative to the root
    pub fn entity_directory(prefix: EntityPrefix) -> &'static str {
        match prefix {
            EntityPrefix::Veh => "catalog/vehicles",
            EntityPrefix::Fit => "catalog/fitments",
            EntityPrefix::Sub => "submissions",
        }
    }

    /// Absolute directory for a given entity type
    pub fn entity_dir(&self, prefix: EntityPrefix) -> PathBuf {
        self.root.join(Self::entity_directory(prefix))
    }

    /// Path for an entity file
    pub fn entity_path(&self, id: &EntityId) -> PathBuf {
        self.entity_dir(id.prefix())
            .join(format!("{}{}", id, ENTITY_FILE_SUFFIX))
    }

    /// Iterate all entity files of a given prefix type
    pub fn iter_entity_files(&self, prefix: EntityPrefix) -> impl Iterator<Item = PathBuf> {
        walkdir::WalkDir::new(self.entity_dir(prefix))
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().to_string_lossy().ends_with(ENTITY_FILE_SUFFIX))
            .map(|e| e.path().to_path_buf())
    }
}

/// Errors that can occur during catalog operations
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("not a tyredex catalog (searched from {searched_from:?}). Run 'tyredex init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("tyredex catalog already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        assert!(project.config_dir().exists());
        assert!(project.config_dir().join("config.yaml").exists());
        assert!(project.root().join("catalog/vehicles").is_dir());
        assert!(project.root().join("catalog/fitments").is_dir());
        assert!(project.root().join("submissions").is_dir());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let err = Project::init(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyExists(_)));
    }

    #[test]
    fn test_discover_from_nested_directory() {
        let tmp = tempdir().unwrap();
        Project::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("catalog/vehicles");
        let project = Project::discover_from(&subdir).unwrap();
        assert_eq!(
            project.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_discover_fails_outside_catalog() {
        let tmp = tempdir().unwrap();
        let err = Project::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, ProjectError::NotFound { .. }));
    }

    #[test]
    fn test_entity_path_uses_prefix_directory() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();

        let id = EntityId::new(EntityPrefix::Veh);
        let path = project.entity_path(&id);
        assert!(path.starts_with(project.root().join("catalog/vehicles")));
        assert!(path.to_string_lossy().ends_with(ENTITY_FILE_SUFFIX));
    }
}
