//! Async repository traits
//!
//! One trait per aggregate, injected into the services as `Arc<dyn ...>`.
//! The in-memory store implements all of them; a relational backend would
//! too, without the services noticing.

use async_trait::async_trait;
use types::card::Card;
use types::collection::Collection;
use types::grade::Grade;
use types::ids::{CardId, CollectionId, PackId, RewardId, TradeId, UserId, VehicleId};
use types::pack::Pack;
use types::reward::Reward;
use types::trade::{CompletedTrade, OpenTrade, TradeKind};
use types::user::User;
use types::vehicle::Vehicle;

/// Sort order for open-trade listings
///
/// Date ordering rides on the id: trade ids are UUID v7 and therefore
/// time-sortable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeSort {
    PriceAsc,
    PriceDesc,
    DateAsc,
    #[default]
    DateDesc,
}

/// Declarative filter for browsing open trades
#[derive(Debug, Clone)]
pub struct TradeFilter {
    pub kind: Option<TradeKind>,
    /// Match trades offering a card from this collection
    pub collection_id: Option<CollectionId>,
    /// Match trades offering a card of this grade
    pub grade: Option<Grade>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    /// Match trades offering a card depicting this vehicle
    pub vehicle_id: Option<VehicleId>,
    pub want_card_id: Option<CardId>,
    pub sort: TradeSort,
    pub limit: usize,
    pub offset: usize,
}

impl Default for TradeFilter {
    fn default() -> Self {
        Self {
            kind: None,
            collection_id: None,
            grade: None,
            min_price: None,
            max_price: None,
            vehicle_id: None,
            want_card_id: None,
            sort: TradeSort::default(),
            limit: 50,
            offset: 0,
        }
    }
}

/// A page of open trades plus the unpaginated total
#[derive(Debug, Clone)]
pub struct TradePage {
    pub trades: Vec<OpenTrade>,
    pub total: usize,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: UserId) -> Option<User>;
    async fn insert(&self, user: User);
    async fn update(&self, user: User);
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn get(&self, id: CardId) -> Option<Card>;
    async fn insert(&self, card: Card);
    async fn update(&self, card: Card);
    async fn by_owner(&self, owner_id: UserId) -> Vec<Card>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn get(&self, id: VehicleId) -> Option<Vehicle>;
    async fn insert(&self, vehicle: Vehicle);
}

#[async_trait]
pub trait CollectionRepository: Send + Sync {
    async fn get(&self, id: CollectionId) -> Option<Collection>;
    async fn insert(&self, collection: Collection);
    async fn list(&self) -> Vec<Collection>;
}

#[async_trait]
pub trait PackRepository: Send + Sync {
    async fn get(&self, id: PackId) -> Option<Pack>;
    async fn insert(&self, pack: Pack);
    /// Remove and return the pack; `None` when already consumed
    async fn remove(&self, id: PackId) -> Option<Pack>;
}

#[async_trait]
pub trait OpenTradeRepository: Send + Sync {
    async fn get(&self, id: TradeId) -> Option<OpenTrade>;
    async fn insert(&self, trade: OpenTrade);
    /// Conditionally remove and return the trade.
    ///
    /// At most one caller observes `Some` for a given id; this is the
    /// at-most-once acceptance guard for concurrent accepts.
    async fn take(&self, id: TradeId) -> Option<OpenTrade>;
    async fn list(&self, filter: &TradeFilter) -> TradePage;
}

#[async_trait]
pub trait CompletedTradeRepository: Send + Sync {
    async fn get(&self, id: TradeId) -> Option<CompletedTrade>;
    async fn insert(&self, trade: CompletedTrade);
    /// Completed trades involving `user_id` (either side), newest first
    async fn history(&self, user_id: Option<UserId>, limit: usize, offset: usize)
        -> (Vec<CompletedTrade>, usize);
}

#[async_trait]
pub trait RewardRepository: Send + Sync {
    async fn get(&self, id: RewardId) -> Option<Reward>;
    async fn insert(&self, reward: Reward);
    async fn for_user(&self, user_id: UserId) -> Vec<Reward>;
}
