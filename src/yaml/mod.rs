//! YAML parsing with source-span diagnostics

pub mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde::de::DeserializeOwned;
use std::path::Path;

/// Parse a YAML file into T, attaching a source-span diagnostic when
/// the file does not parse.
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    serde_yml::from_str(&content).map_err(|err| {
        YamlSyntaxError::from_serde_error(&err, &content, &path.display().to_string()).into()
    })
}
