//! Catalog snapshot assembly
//!
//! Joins vehicles with their fitments and hands the size matcher a
//! flat, read-only record list. Loaded once per command; records come
//! out in ULID order, which is creation order.

use miette::Result;

use crate::calc::TyreRecord;
use crate::core::identity::EntityId;
use crate::core::{loader, Project};
use crate::entities::{Fitment, Vehicle};

/// An immutable view of the catalog for the duration of one command
#[derive(Debug)]
pub struct CatalogSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub fitments: Vec<Fitment>,
}

impl CatalogSnapshot {
    /// Load every vehicle and fitment in the catalog
    pub fn load(project: &Project) -> Result<Self> {
        Ok(Self {
            vehicles: loader::load_entities(project)?,
            fitments: loader::load_entities(project)?,
        })
    }

    /// Flat records for the size matcher, one per fitment
    pub fn records(&self) -> Vec<TyreRecord> {
        self.fitments.iter().map(Fitment::to_record).collect()
    }

    /// Look up a vehicle by full ID, ID prefix, or slug
    pub fn vehicle_by_ref(&self, reference: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| {
            let id = v.id.to_string();
            id == reference || id.starts_with(reference) || v.slug == reference
        })
    }

    /// Look up a vehicle by its exact ID string
    pub fn vehicle_by_id(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id.to_string() == id)
    }

    /// The fitment recorded for a vehicle, if any
    pub fn fitment_for(&self, vehicle: &EntityId) -> Option<&Fitment> {
        self.fitments.iter().find(|f| &f.vehicle == vehicle)
    }

    /// True if any vehicle already uses the slug
    pub fn has_slug(&self, slug: &str) -> bool {
        self.vehicles.iter().any(|v| v.slug == slug)
    }

    /// Up to `limit` other vehicles sharing the brand or category
    pub fn similar_vehicles<'a>(&'a self, vehicle: &Vehicle, limit: usize) -> Vec<&'a Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.id != vehicle.id)
            .filter(|v| v.brand == vehicle.brand || v.category == vehicle.category)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AxleTyre, VehicleCategory};

    fn snapshot() -> CatalogSnapshot {
        let veh_a = Vehicle::new("Honda", "Activa 6G", 2020, VehicleCategory::Scooter, "t");
        let veh_b = Vehicle::new("Honda", "City", 2019, VehicleCategory::Car, "t");
        let mut fit = Fitment::new(veh_a.id.clone(), "t");
        fit.front = Some(AxleTyre::from_size_text("90/90-12"));
        CatalogSnapshot {
            vehicles: vec![veh_a, veh_b],
            fitments: vec![fit],
        }
    }

    #[test]
    fn test_records_one_per_fitment() {
        let snap = snapshot();
        let records = snap.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vehicle_id, snap.vehicles[0].id.to_string());
        assert_eq!(records[0].front_width, Some(90));
    }

    #[test]
    fn test_vehicle_lookup_by_slug_and_prefix() {
        let snap = snapshot();
        assert!(snap.vehicle_by_ref("honda-activa-6g-2020").is_some());

        let id = snap.vehicles[1].id.to_string();
        assert!(snap.vehicle_by_ref(&id[..12]).is_some());
        assert!(snap.vehicle_by_ref("missing").is_none());
    }

    #[test]
    fn test_fitment_join_and_slug_check() {
        let snap = snapshot();
        assert!(snap.fitment_for(&snap.vehicles[0].id).is_some());
        assert!(snap.fitment_for(&snap.vehicles[1].id).is_none());
        assert!(snap.has_slug("honda-city-2019"));
        assert!(!snap.has_slug("honda-city-2024"));
    }

    #[test]
    fn test_similar_vehicles_excludes_self() {
        let snap = snapshot();
        let similar = snap.similar_vehicles(&snap.vehicles[0], 5);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].slug, "honda-city-2019");
    }
}
