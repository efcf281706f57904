//! Unique identifier types for marketplace entities
//!
//! All IDs use UUID v7 for time-sortable ordering, so listings sorted by id
//! are also sorted chronologically (used by the trade browser's date sort).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new id with the current timestamp embedded
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id! {
    /// Unique identifier for a user account
    UserId
}

entity_id! {
    /// Unique identifier for a vehicle card
    CardId
}

entity_id! {
    /// Unique identifier for a vehicle definition
    VehicleId
}

entity_id! {
    /// Unique identifier for a collection of vehicles
    CollectionId
}

entity_id! {
    /// Unique identifier for an unopened pack
    PackId
}

entity_id! {
    /// Unique identifier for a trade (open or completed)
    TradeId
}

entity_id! {
    /// Unique identifier for a claimable reward
    RewardId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
        assert_ne!(CardId::new(), CardId::new());
        assert_ne!(TradeId::new(), TradeId::new());
    }

    #[test]
    fn test_id_serialization_is_transparent() {
        let id = CardId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));

        let deserialized: CardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_trade_ids_sort_chronologically() {
        // UUID v7 embeds a millisecond timestamp; ids created in sequence
        // never sort backwards.
        let earlier = TradeId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = TradeId::new();
        assert!(earlier < later);
    }
}
