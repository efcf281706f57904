//! Vehicle definitions backing cards

use crate::errors::DomainError;
use crate::ids::VehicleId;
use serde::{Deserialize, Serialize};

/// A vehicle that cards can depict
///
/// Vehicles carry three performance stats and a base value; cards minted
/// from a pack reference a vehicle and inherit its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub year: String,
    pub make: String,
    pub model: String,
    pub stat1: i32,
    pub stat2: i32,
    pub stat3: i32,
    pub value: i64,
    /// Image URL used by clients, opaque to the backend
    pub image: String,
}

impl Vehicle {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        stat1: i32,
        stat2: i32,
        stat3: i32,
        value: i64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: VehicleId::new(),
            year: year.into(),
            make: make.into(),
            model: model.into(),
            stat1,
            stat2,
            stat3,
            value,
            image: image.into(),
        }
    }

    /// Overall rating, the integer mean of the three stats
    pub fn rating(&self) -> i32 {
        (self.stat1 + self.stat2 + self.stat3) / 3
    }

    /// Human-readable name, e.g. "1999 Nissan Skyline GT-R"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    /// Update the base market value
    pub fn update_value(&mut self, new_value: i64) -> Result<(), DomainError> {
        if new_value < 0 {
            return Err(DomainError::NegativeValue);
        }
        self.value = new_value;
        Ok(())
    }
}
