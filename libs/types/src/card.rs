//! Vehicle card instances

use crate::errors::DomainError;
use crate::grade::Grade;
use crate::ids::{CardId, CollectionId, UserId, VehicleId};
use serde::{Deserialize, Serialize};

/// A trading card owned by a user
///
/// Each card depicts one vehicle from one collection and carries a rarity
/// grade plus a market value in in-game currency. Ownership on the card is
/// the source of truth; the owner's `owned_cards` list is informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub owner_id: UserId,
    pub vehicle_id: VehicleId,
    pub collection_id: CollectionId,
    pub grade: Grade,
    pub value: i64,
}

impl Card {
    /// Create a new card
    pub fn new(
        owner_id: UserId,
        vehicle_id: VehicleId,
        collection_id: CollectionId,
        grade: Grade,
        value: i64,
    ) -> Self {
        Self {
            id: CardId::new(),
            owner_id,
            vehicle_id,
            collection_id,
            grade,
            value,
        }
    }

    /// Update the market value of the card
    pub fn update_value(&mut self, new_value: i64) -> Result<(), DomainError> {
        if new_value < 0 {
            return Err(DomainError::NegativeValue);
        }
        self.value = new_value;
        Ok(())
    }

    /// Upgrade the card to a strictly higher grade
    ///
    /// Downgrades and same-grade "upgrades" are rejected; the operation is
    /// irreversible.
    pub fn upgrade_grade(&mut self, new_grade: Grade) -> Result<(), DomainError> {
        if new_grade <= self.grade {
            return Err(DomainError::GradeNotHigher);
        }
        self.grade = new_grade;
        Ok(())
    }

    /// Reassign ownership, used by trade settlement
    pub fn transfer_to(&mut self, new_owner: UserId) {
        self.owner_id = new_owner;
    }

    /// Check whether the card belongs to the given user
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}
