//! Collection service
//!
//! Collection browsing and per-user completion progress.

use std::collections::HashSet;
use std::sync::Arc;

use types::collection::Collection;
use types::ids::{CollectionId, UserId};

use crate::error::ServiceError;
use crate::repository::{CardRepository, CollectionRepository};

/// How far a user is through completing one collection
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CollectionProgress {
    pub collection_id: CollectionId,
    pub name: String,
    /// Distinct vehicles the user owns a card for
    pub owned_vehicles: usize,
    pub total_vehicles: usize,
    /// Completion percentage, 0-100
    pub percent: u32,
}

pub struct CollectionService {
    collections: Arc<dyn CollectionRepository>,
    cards: Arc<dyn CardRepository>,
}

impl CollectionService {
    pub fn new(collections: Arc<dyn CollectionRepository>, cards: Arc<dyn CardRepository>) -> Self {
        Self { collections, cards }
    }

    pub async fn list(&self) -> Vec<Collection> {
        self.collections.list().await
    }

    pub async fn get(&self, id: CollectionId) -> Result<Collection, ServiceError> {
        self.collections
            .get(id)
            .await
            .ok_or_else(|| ServiceError::not_found("collection", id))
    }

    /// Progress across all collections for one user, most complete first.
    ///
    /// Duplicate cards for the same vehicle count once; only vehicles still
    /// part of the collection count towards completion.
    pub async fn progress(&self, user_id: UserId) -> Vec<CollectionProgress> {
        let owned = self.cards.by_owner(user_id).await;

        let mut progress: Vec<CollectionProgress> = self
            .collections
            .list()
            .await
            .into_iter()
            .map(|collection| {
                let owned_vehicles: HashSet<_> = owned
                    .iter()
                    .filter(|card| {
                        card.collection_id == collection.id
                            && collection.has_vehicle(card.vehicle_id)
                    })
                    .map(|card| card.vehicle_id)
                    .collect();

                let total = collection.len();
                let percent = if total == 0 {
                    0
                } else {
                    (owned_vehicles.len() * 100 / total) as u32
                };

                CollectionProgress {
                    collection_id: collection.id,
                    name: collection.name,
                    owned_vehicles: owned_vehicles.len(),
                    total_vehicles: total,
                    percent,
                }
            })
            .collect();

        progress.sort_by_key(|p| std::cmp::Reverse(p.percent));
        progress
    }
}
