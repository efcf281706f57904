//! Pack service
//!
//! Pack purchase and opening. Opening consumes the pack and mints cards for
//! random vehicles from its collection, with grade odds weighted towards
//! the common tiers.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use types::card::Card;
use types::grade::Grade;
use types::ids::{CollectionId, PackId, UserId};
use types::pack::Pack;

use crate::error::ServiceError;
use crate::repository::{
    CardRepository, CollectionRepository, PackRepository, UserRepository, VehicleRepository,
};

/// Cards minted per opened pack
pub const PACK_SIZE: usize = 5;

pub struct PackService {
    users: Arc<dyn UserRepository>,
    cards: Arc<dyn CardRepository>,
    packs: Arc<dyn PackRepository>,
    collections: Arc<dyn CollectionRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl PackService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cards: Arc<dyn CardRepository>,
        packs: Arc<dyn PackRepository>,
        collections: Arc<dyn CollectionRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            users,
            cards,
            packs,
            collections,
            vehicles,
        }
    }

    /// Buy a pack from a collection at its pack price
    pub async fn purchase_pack(
        &self,
        user_id: UserId,
        collection_id: CollectionId,
    ) -> Result<Pack, ServiceError> {
        let collection = self
            .collections
            .get(collection_id)
            .await
            .ok_or_else(|| ServiceError::not_found("collection", collection_id))?;
        let mut user = self
            .users
            .get(user_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", user_id))?;

        user.deduct_currency(collection.pack_price)?;

        let pack = Pack::new(user_id, collection_id, collection.pack_price);
        user.add_pack(pack.id);

        self.users.update(user).await;
        self.packs.insert(pack.clone()).await;

        info!(pack_id = %pack.id, user_id = %user_id, collection_id = %collection_id, "pack purchased");
        Ok(pack)
    }

    /// Open a pack, consuming it and minting `PACK_SIZE` cards.
    ///
    /// The RNG is caller-supplied so tests can seed it. Each card draws a
    /// uniform random vehicle from the collection and a weighted grade;
    /// card value is the per-card share of the pack value times the grade
    /// multiplier.
    pub async fn open_pack<R: Rng>(
        &self,
        user_id: UserId,
        pack_id: PackId,
        rng: &mut R,
    ) -> Result<Vec<Card>, ServiceError> {
        let pack = self
            .packs
            .get(pack_id)
            .await
            .ok_or_else(|| ServiceError::not_found("pack", pack_id))?;
        if pack.owner_id != user_id {
            return Err(ServiceError::NotOwner("pack"));
        }

        let collection = self
            .collections
            .get(pack.collection_id)
            .await
            .ok_or_else(|| ServiceError::not_found("collection", pack.collection_id))?;
        if collection.is_empty() {
            return Err(ServiceError::EmptyCollection);
        }

        // Consume the pack; a concurrent open of the same pack stops here
        if self.packs.remove(pack_id).await.is_none() {
            return Err(ServiceError::not_found("pack", pack_id));
        }

        let mut user = self
            .users
            .get(user_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", user_id))?;
        user.remove_pack(pack_id);

        let base_value = pack.value / PACK_SIZE as i64;
        let mut minted = Vec::with_capacity(PACK_SIZE);
        for _ in 0..PACK_SIZE {
            let vehicle_id = collection.vehicles[rng.gen_range(0..collection.len())];
            let grade = roll_grade(rng);
            let card = Card::new(
                user_id,
                vehicle_id,
                pack.collection_id,
                grade,
                card_value(base_value, grade),
            );
            user.add_card(card.id);
            self.cards.insert(card.clone()).await;
            minted.push(card);
        }

        self.users.update(user).await;

        info!(pack_id = %pack_id, user_id = %user_id, cards = minted.len(), "pack opened");
        Ok(minted)
    }

    /// Preview of an unopened pack: the vehicles it can mint cards for
    pub async fn preview(&self, pack_id: PackId) -> Result<Vec<types::vehicle::Vehicle>, ServiceError> {
        let pack = self
            .packs
            .get(pack_id)
            .await
            .ok_or_else(|| ServiceError::not_found("pack", pack_id))?;
        let collection = self
            .collections
            .get(pack.collection_id)
            .await
            .ok_or_else(|| ServiceError::not_found("collection", pack.collection_id))?;

        let mut preview = Vec::with_capacity(collection.len());
        for vehicle_id in &collection.vehicles {
            let vehicle = self
                .vehicles
                .get(*vehicle_id)
                .await
                .ok_or_else(|| ServiceError::not_found("vehicle", *vehicle_id))?;
            preview.push(vehicle);
        }
        Ok(preview)
    }
}

/// Weighted grade roll: 10% NISMO, 25% LIMITED_RUN, 65% FACTORY
fn roll_grade<R: Rng>(rng: &mut R) -> Grade {
    let roll = rng.gen_range(0..100);
    if roll < 10 {
        Grade::Nismo
    } else if roll < 35 {
        Grade::LimitedRun
    } else {
        Grade::Factory
    }
}

/// Grade multiplier over the per-card base value: 3x / 1.5x / 1x
fn card_value(base_value: i64, grade: Grade) -> i64 {
    match grade {
        Grade::Nismo => base_value * 3,
        Grade::LimitedRun => base_value * 3 / 2,
        Grade::Factory => base_value,
    }
}
