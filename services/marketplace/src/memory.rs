//! Concurrent in-memory store
//!
//! Implements every repository trait over `DashMap`s. Used by tests and as
//! the default backing store; card-joining filters (collection, grade,
//! vehicle) resolve through the card table the same way the relational
//! implementation joins through the cards relation.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use types::card::Card;
use types::collection::Collection;
use types::ids::{CardId, CollectionId, PackId, RewardId, TradeId, UserId, VehicleId};
use types::pack::Pack;
use types::reward::Reward;
use types::trade::{CompletedTrade, OpenTrade};
use types::user::User;
use types::vehicle::Vehicle;

use crate::repository::{
    CardRepository, CollectionRepository, CompletedTradeRepository, OpenTradeRepository,
    PackRepository, RewardRepository, TradeFilter, TradePage, TradeSort, UserRepository,
    VehicleRepository,
};

/// In-memory marketplace store
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    cards: DashMap<CardId, Card>,
    vehicles: DashMap<VehicleId, Vehicle>,
    collections: DashMap<CollectionId, Collection>,
    packs: DashMap<PackId, Pack>,
    open_trades: DashMap<TradeId, OpenTrade>,
    completed_trades: DashMap<TradeId, CompletedTrade>,
    rewards: DashMap<RewardId, Reward>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn trade_matches(&self, trade: &OpenTrade, filter: &TradeFilter) -> bool {
        if let Some(kind) = filter.kind {
            if trade.kind != kind {
                return false;
            }
        }
        if let Some(min) = filter.min_price {
            if trade.price < min {
                return false;
            }
        }
        if let Some(max) = filter.max_price {
            if trade.price > max {
                return false;
            }
        }
        if let Some(want) = filter.want_card_id {
            if trade.want_card_id != Some(want) {
                return false;
            }
        }

        // Card-joining predicates
        if filter.collection_id.is_some() || filter.grade.is_some() || filter.vehicle_id.is_some() {
            let card = match self.cards.get(&trade.card_id) {
                Some(card) => card,
                None => return false,
            };
            if let Some(collection_id) = filter.collection_id {
                if card.collection_id != collection_id {
                    return false;
                }
            }
            if let Some(grade) = filter.grade {
                if card.grade != grade {
                    return false;
                }
            }
            if let Some(vehicle_id) = filter.vehicle_id {
                if card.vehicle_id != vehicle_id {
                    return false;
                }
            }
        }

        true
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get(&self, id: UserId) -> Option<User> {
        self.users.get(&id).map(|u| u.value().clone())
    }

    async fn insert(&self, user: User) {
        self.users.insert(user.id, user);
    }

    async fn update(&self, user: User) {
        self.users.insert(user.id, user);
    }
}

#[async_trait]
impl CardRepository for MemoryStore {
    async fn get(&self, id: CardId) -> Option<Card> {
        self.cards.get(&id).map(|c| c.value().clone())
    }

    async fn insert(&self, card: Card) {
        self.cards.insert(card.id, card);
    }

    async fn update(&self, card: Card) {
        self.cards.insert(card.id, card);
    }

    async fn by_owner(&self, owner_id: UserId) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn get(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles.get(&id).map(|v| v.value().clone())
    }

    async fn insert(&self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.id, vehicle);
    }
}

#[async_trait]
impl CollectionRepository for MemoryStore {
    async fn get(&self, id: CollectionId) -> Option<Collection> {
        self.collections.get(&id).map(|c| c.value().clone())
    }

    async fn insert(&self, collection: Collection) {
        self.collections.insert(collection.id, collection);
    }

    async fn list(&self) -> Vec<Collection> {
        self.collections.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[async_trait]
impl PackRepository for MemoryStore {
    async fn get(&self, id: PackId) -> Option<Pack> {
        self.packs.get(&id).map(|p| p.value().clone())
    }

    async fn insert(&self, pack: Pack) {
        self.packs.insert(pack.id, pack);
    }

    async fn remove(&self, id: PackId) -> Option<Pack> {
        self.packs.remove(&id).map(|(_, pack)| pack)
    }
}

#[async_trait]
impl OpenTradeRepository for MemoryStore {
    async fn get(&self, id: TradeId) -> Option<OpenTrade> {
        self.open_trades.get(&id).map(|t| t.value().clone())
    }

    async fn insert(&self, trade: OpenTrade) {
        self.open_trades.insert(trade.id, trade);
    }

    async fn take(&self, id: TradeId) -> Option<OpenTrade> {
        // DashMap::remove is atomic; concurrent accepts race here and only
        // one observes the trade.
        self.open_trades.remove(&id).map(|(_, trade)| trade)
    }

    async fn list(&self, filter: &TradeFilter) -> TradePage {
        let mut trades: Vec<OpenTrade> = self
            .open_trades
            .iter()
            .filter(|entry| self.trade_matches(entry.value(), filter))
            .map(|entry| entry.value().clone())
            .collect();

        match filter.sort {
            TradeSort::PriceAsc => trades.sort_by_key(|t| t.price),
            TradeSort::PriceDesc => trades.sort_by_key(|t| std::cmp::Reverse(t.price)),
            TradeSort::DateAsc => trades.sort_by_key(|t| t.id),
            TradeSort::DateDesc => trades.sort_by_key(|t| std::cmp::Reverse(t.id)),
        }

        let total = trades.len();
        let trades = trades
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();

        TradePage { trades, total }
    }
}

#[async_trait]
impl CompletedTradeRepository for MemoryStore {
    async fn get(&self, id: TradeId) -> Option<CompletedTrade> {
        self.completed_trades.get(&id).map(|t| t.value().clone())
    }

    async fn insert(&self, trade: CompletedTrade) {
        self.completed_trades.insert(trade.id, trade);
    }

    async fn history(
        &self,
        user_id: Option<UserId>,
        limit: usize,
        offset: usize,
    ) -> (Vec<CompletedTrade>, usize) {
        let mut trades: Vec<CompletedTrade> = self
            .completed_trades
            .iter()
            .filter(|entry| user_id.map_or(true, |u| entry.involves(u)))
            .map(|entry| entry.value().clone())
            .collect();

        trades.sort_by_key(|t| std::cmp::Reverse(t.id));
        let total = trades.len();
        let trades = trades.into_iter().skip(offset).take(limit).collect();
        (trades, total)
    }
}

#[async_trait]
impl RewardRepository for MemoryStore {
    async fn get(&self, id: RewardId) -> Option<Reward> {
        self.rewards.get(&id).map(|r| r.value().clone())
    }

    async fn insert(&self, reward: Reward) {
        self.rewards.insert(reward.id, reward);
    }

    async fn for_user(&self, user_id: UserId) -> Vec<Reward> {
        self.rewards
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect()
    }
}
