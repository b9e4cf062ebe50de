//! Entity identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityPrefix {
    /// Vehicle
    Veh,
    /// Tyre fitment for a vehicle
    Fit,
    /// User submission awaiting review
    Sub,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Veh => "VEH",
            EntityPrefix::Fit => "FIT",
            EntityPrefix::Sub => "SUB",
        }
    }

    /// All valid prefixes
    pub fn all() -> &'static [EntityPrefix] {
        &[EntityPrefix::Veh, EntityPrefix::Fit, EntityPrefix::Sub]
    }

    /// Determine the entity prefix for a file path, from the filename
    /// or the catalog directory it lives in.
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        if let Some(filename) = path.file_name() {
            let upper = filename.to_string_lossy().to_uppercase();
            for prefix in Self::all() {
                if upper.starts_with(&format!("{}-", prefix.as_str())) {
                    return Some(*prefix);
                }
            }
        }

        for component in path.components() {
            if let std::path::Component::Normal(os_str) = component {
                match os_str.to_string_lossy().to_lowercase().as_str() {
                    "vehicles" => return Some(EntityPrefix::Veh),
                    "fitments" => return Some(EntityPrefix::Fit),
                    "submissions" => return Some(EntityPrefix::Sub),
                    _ => {}
                }
            }
        }
        None
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VEH" => Ok(EntityPrefix::Veh),
            "FIT" => Ok(EntityPrefix::Fit),
            "SUB" => Ok(EntityPrefix::Sub),
            _ => Err(IdParseError::InvalidPrefix(s.to_string())),
        }
    }
}

/// A unique entity identifier combining a type prefix and ULID.
/// ULIDs sort by creation time, so lexicographic ID order is
/// catalog insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Create a fresh ID with the given prefix
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }

    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let prefix = prefix_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { prefix, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid entity prefix: '{0}' (valid: VEH, FIT, SUB)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in entity ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_generation() {
        let id = EntityId::new(EntityPrefix::Veh);
        assert!(id.to_string().starts_with("VEH-"));
        assert_eq!(id.to_string().len(), 30); // VEH- (4) + ULID (26)
    }

    #[test]
    fn test_entity_id_roundtrip() {
        for prefix in EntityPrefix::all() {
            let original = EntityId::new(*prefix);
            let parsed = EntityId::parse(&original.to_string()).unwrap();
            assert_eq!(original, parsed);
            assert_eq!(parsed.prefix(), *prefix);
        }
    }

    #[test]
    fn test_entity_id_invalid_prefix() {
        let err = EntityId::parse("XXX-01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_entity_id_missing_delimiter() {
        let err = EntityId::parse("VEH01HQ3K4N5M6P7R8S9T0UVWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_entity_id_invalid_ulid() {
        let err = EntityId::parse("VEH-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_prefix_from_path() {
        use std::path::Path;

        assert_eq!(
            EntityPrefix::from_path(Path::new("catalog/vehicles/some.yaml")),
            Some(EntityPrefix::Veh)
        );
        assert_eq!(
            EntityPrefix::from_path(Path::new("catalog/fitments/some.yaml")),
            Some(EntityPrefix::Fit)
        );
        assert_eq!(
            EntityPrefix::from_path(Path::new("SUB-01HQ3K4N5M6P7R8S9T0UVWXYZ.tyredex.yaml")),
            Some(EntityPrefix::Sub)
        );
        assert_eq!(EntityPrefix::from_path(Path::new("elsewhere/x.yaml")), None);
    }
}
