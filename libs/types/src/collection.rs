//! Curated vehicle collections

use crate::ids::{CollectionId, VehicleId};
use serde::{Deserialize, Serialize};

/// A themed set of vehicles users can collect
///
/// Packs are purchased against a collection at `pack_price`; opening one
/// yields cards for vehicles drawn from `vehicles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub image: String,
    pub pack_price: i64,
    pub vehicles: Vec<VehicleId>,
}

impl Collection {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        pack_price: i64,
        vehicles: Vec<VehicleId>,
    ) -> Self {
        Self {
            id: CollectionId::new(),
            name: name.into(),
            image: image.into(),
            pack_price,
            vehicles,
        }
    }

    /// Add a vehicle to the collection, no-op if already present
    pub fn add_vehicle(&mut self, vehicle_id: VehicleId) {
        if !self.vehicles.contains(&vehicle_id) {
            self.vehicles.push(vehicle_id);
        }
    }

    /// Remove a vehicle from the collection, no-op if absent
    pub fn remove_vehicle(&mut self, vehicle_id: VehicleId) {
        self.vehicles.retain(|v| *v != vehicle_id);
    }

    /// Check whether the collection contains a specific vehicle
    pub fn has_vehicle(&self, vehicle_id: VehicleId) -> bool {
        self.vehicles.contains(&vehicle_id)
    }

    /// Number of vehicles in the collection
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
