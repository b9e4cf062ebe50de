//! Vehicle entity type - the catalog's primary record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityPrefix};

/// Vehicle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Car,
    Bike,
    Scooter,
}

impl Default for VehicleCategory {
    fn default() -> Self {
        VehicleCategory::Car
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleCategory::Car => write!(f, "car"),
            VehicleCategory::Bike => write!(f, "bike"),
            VehicleCategory::Scooter => write!(f, "scooter"),
        }
    }
}

impl std::str::FromStr for VehicleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" => Ok(VehicleCategory::Car),
            "bike" => Ok(VehicleCategory::Bike),
            "scooter" => Ok(VehicleCategory::Scooter),
            _ => Err(format!(
                "Invalid category: {}. Use car, bike, or scooter",
                s
            )),
        }
    }
}

/// A vehicle in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier (VEH-...)
    pub id: EntityId,

    /// Manufacturer, e.g. "Honda"
    pub brand: String,

    /// Model name, e.g. "Activa 6G"
    pub model: String,

    /// Model year
    pub year: u16,

    /// Vehicle category
    #[serde(default)]
    pub category: VehicleCategory,

    /// URL-friendly identifier derived from brand, model and year.
    /// Unique across the catalog.
    pub slug: String,

    /// Tags for filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Author (who added this vehicle)
    pub author: String,

    /// Record revision counter
    #[serde(default = "default_revision")]
    pub entity_revision: u32,
}

fn default_revision() -> u32 {
    1
}

impl Entity for Vehicle {
    const PREFIX: EntityPrefix = EntityPrefix::Veh;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Vehicle {
    /// Create a new vehicle with a derived slug
    pub fn new(
        brand: impl Into<String>,
        model: impl Into<String>,
        year: u16,
        category: VehicleCategory,
        author: impl Into<String>,
    ) -> Self {
        let brand = brand.into();
        let model = model.into();
        Self {
            id: EntityId::new(EntityPrefix::Veh),
            slug: slugify(&brand, &model, year),
            brand,
            model,
            year,
            category,
            tags: Vec::new(),
            created: Utc::now(),
            author: author.into(),
            entity_revision: 1,
        }
    }

    /// Display name, e.g. "Honda Activa 6G (2020)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.year)
    }
}

/// Lowercased `brand-model-year` with whitespace collapsed to hyphens
pub fn slugify(brand: &str, model: &str, year: u16) -> String {
    format!("{}-{}-{}", brand.to_lowercase(), model.to_lowercase(), year).replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_creation() {
        let veh = Vehicle::new("Honda", "Activa 6G", 2020, VehicleCategory::Scooter, "test");

        assert!(veh.id.to_string().starts_with("VEH-"));
        assert_eq!(Vehicle::PREFIX, EntityPrefix::Veh);
        assert_eq!(veh.slug, "honda-activa-6g-2020");
        assert_eq!(veh.display_name(), "Honda Activa 6G (2020)");
        assert_eq!(veh.category, VehicleCategory::Scooter);
    }

    #[test]
    fn test_vehicle_roundtrip() {
        let veh = Vehicle::new("Maruti", "Swift", 2022, VehicleCategory::Car, "test");

        let yaml = serde_yml::to_string(&veh).unwrap();
        let parsed: Vehicle = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(veh.id, parsed.id);
        assert_eq!(veh.slug, parsed.slug);
        assert_eq!(veh.year, parsed.year);
        assert_eq!(veh.category, parsed.category);
    }

    #[test]
    fn test_category_serialization() {
        let veh = Vehicle::new("Royal Enfield", "Classic 350", 2021, VehicleCategory::Bike, "test");

        let yaml = serde_yml::to_string(&veh).unwrap();
        assert!(yaml.contains("category: bike"));
        assert!(yaml.contains("slug: royal-enfield-classic-350-2021"));
    }

    #[test]
    fn test_slugify_collapses_spaces() {
        assert_eq!(slugify("Royal Enfield", "Classic 350", 2021), "royal-enfield-classic-350-2021");
        assert_eq!(slugify("Honda", "City", 2019), "honda-city-2019");
    }
}
