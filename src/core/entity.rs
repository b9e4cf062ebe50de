//! Entity trait - common interface for all catalog record types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::identity::{EntityId, EntityPrefix};

/// Common trait for all tyredex entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The entity type prefix, which also names the catalog directory
    const PREFIX: EntityPrefix;

    /// Get the entity's unique ID
    fn id(&self) -> &EntityId;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;

    /// Get the author (who created this record)
    fn author(&self) -> &str;
}
