//! Unopened card packs

use crate::errors::DomainError;
use crate::ids::{CollectionId, PackId, UserId};
use serde::{Deserialize, Serialize};

/// An unopened pack tied to one collection
///
/// Opening a pack consumes it and mints cards for random vehicles from the
/// collection. Only the owner may open it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
    pub id: PackId,
    pub owner_id: UserId,
    pub collection_id: CollectionId,
    /// Purchase value, the base used to price the minted cards
    pub value: i64,
}

impl Pack {
    pub fn new(owner_id: UserId, collection_id: CollectionId, value: i64) -> Self {
        Self {
            id: PackId::new(),
            owner_id,
            collection_id,
            value,
        }
    }

    /// Update the market value of the pack
    pub fn update_value(&mut self, new_value: i64) -> Result<(), DomainError> {
        if new_value < 0 {
            return Err(DomainError::NegativeValue);
        }
        self.value = new_value;
        Ok(())
    }
}
