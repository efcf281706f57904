//! Trade service
//!
//! Orchestrates the pure trading engine: loads participants, runs
//! validation, and on success applies the exchange (card ownership,
//! currency movement, rewards) through the repositories. Any rejection
//! leaves state untouched.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use trading_engine::{execute_trade, validate_trade};
use types::card::Card;
use types::ids::{CardId, TradeId, UserId};
use types::reward::{Reward, RewardKind};
use types::trade::{CompletedTrade, OpenTrade, TradeKind};
use types::user::User;

use crate::error::ServiceError;
use crate::repository::{
    CardRepository, CompletedTradeRepository, OpenTradeRepository, RewardRepository, TradeFilter,
    TradePage, UserRepository,
};

/// Request to post a new open trade
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateTradeRequest {
    pub kind: TradeKind,
    pub card_id: CardId,
    pub price: Option<i64>,
    pub want_card_id: Option<CardId>,
}

/// Everything produced by a successful acceptance
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TradeSettlement {
    pub completed: CompletedTrade,
    pub seller_reward: Reward,
    pub buyer_reward: Reward,
}

pub struct TradeService {
    users: Arc<dyn UserRepository>,
    cards: Arc<dyn CardRepository>,
    open_trades: Arc<dyn OpenTradeRepository>,
    completed_trades: Arc<dyn CompletedTradeRepository>,
    rewards: Arc<dyn RewardRepository>,
}

impl TradeService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cards: Arc<dyn CardRepository>,
        open_trades: Arc<dyn OpenTradeRepository>,
        completed_trades: Arc<dyn CompletedTradeRepository>,
        rewards: Arc<dyn RewardRepository>,
    ) -> Self {
        Self {
            users,
            cards,
            open_trades,
            completed_trades,
            rewards,
        }
    }

    /// Browse open trades with filtering, sorting and pagination
    pub async fn list_open_trades(&self, filter: &TradeFilter) -> TradePage {
        self.open_trades.list(filter).await
    }

    /// Look up one open trade
    pub async fn open_trade(&self, trade_id: TradeId) -> Result<OpenTrade, ServiceError> {
        self.open_trades
            .get(trade_id)
            .await
            .ok_or_else(|| ServiceError::not_found("trade", trade_id))
    }

    /// Look up one completed trade
    pub async fn completed_trade(&self, trade_id: TradeId) -> Result<CompletedTrade, ServiceError> {
        self.completed_trades
            .get(trade_id)
            .await
            .ok_or_else(|| ServiceError::not_found("completed trade", trade_id))
    }

    /// Completed trades involving a user (either side), newest first
    pub async fn trade_history(
        &self,
        user_id: Option<UserId>,
        limit: usize,
        offset: usize,
    ) -> (Vec<CompletedTrade>, usize) {
        self.completed_trades.history(user_id, limit, offset).await
    }

    /// Post a new open trade for one of the seller's cards
    pub async fn create_trade(
        &self,
        seller_id: UserId,
        request: CreateTradeRequest,
    ) -> Result<OpenTrade, ServiceError> {
        let card = self
            .cards
            .get(request.card_id)
            .await
            .ok_or_else(|| ServiceError::not_found("card", request.card_id))?;
        if card.owner_id != seller_id {
            return Err(ServiceError::NotOwner("card"));
        }

        let trade = match request.kind {
            TradeKind::ForPrice => {
                let price = request.price.ok_or(ServiceError::MissingPrice)?;
                OpenTrade::for_price(seller_id, request.card_id, price)?
            }
            TradeKind::ForCard => {
                let wanted = request
                    .want_card_id
                    .ok_or(types::errors::DomainError::MissingWantCard)?;
                OpenTrade::for_card(seller_id, request.card_id, wanted)
            }
        };

        let mut seller = self
            .users
            .get(seller_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", seller_id))?;
        seller.add_open_trade(trade.id);
        self.users.update(seller).await;
        self.open_trades.insert(trade.clone()).await;

        info!(trade_id = %trade.id, seller_id = %seller_id, kind = ?trade.kind, "open trade posted");
        Ok(trade)
    }

    /// Cancel an open trade; only its owner may do so
    pub async fn cancel_trade(
        &self,
        user_id: UserId,
        trade_id: TradeId,
    ) -> Result<(), ServiceError> {
        let trade = self.open_trade(trade_id).await?;
        if trade.seller_id != user_id {
            return Err(ServiceError::NotOwner("trade"));
        }

        if self.open_trades.take(trade_id).await.is_none() {
            return Err(ServiceError::AlreadyAccepted);
        }

        if let Some(mut seller) = self.users.get(user_id).await {
            seller.remove_open_trade(trade_id);
            self.users.update(seller).await;
        }
        info!(trade_id = %trade_id, "open trade cancelled");
        Ok(())
    }

    /// Accept an open trade as `buyer_id`.
    ///
    /// Validation happens before any mutation; the open trade is then taken
    /// conditionally so a concurrent accept of the same trade settles at
    /// most once. On success the seller card moves to the buyer, currency
    /// or the counterpart card moves to the seller, both sides receive a
    /// claimed reward, and the completed record is persisted.
    pub async fn accept_trade(
        &self,
        buyer_id: UserId,
        trade_id: TradeId,
        buyer_card_id: Option<CardId>,
    ) -> Result<TradeSettlement, ServiceError> {
        let trade = self.open_trade(trade_id).await?;

        let mut seller = self
            .users
            .get(trade.seller_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", trade.seller_id))?;
        let mut buyer = self
            .users
            .get(buyer_id)
            .await
            .ok_or_else(|| ServiceError::not_found("user", buyer_id))?;
        if seller.id == buyer.id {
            return Err(ServiceError::SelfTrade);
        }

        let mut seller_card = self
            .cards
            .get(trade.card_id)
            .await
            .ok_or_else(|| ServiceError::not_found("card", trade.card_id))?;

        let mut buyer_card = match trade.kind {
            TradeKind::ForCard => {
                let id = buyer_card_id.ok_or(ServiceError::MissingBuyerCard)?;
                Some(
                    self.cards
                        .get(id)
                        .await
                        .ok_or_else(|| ServiceError::not_found("card", id))?,
                )
            }
            TradeKind::ForPrice => None,
        };

        // Rule check first, before anything mutates
        if let Err(reason) =
            validate_trade(&trade, &seller, &buyer, &seller_card, buyer_card.as_ref()).into_result()
        {
            warn!(trade_id = %trade_id, %reason, "trade rejected");
            return Err(reason.into());
        }

        // Claim the open trade; losers of the race stop here
        let trade = self
            .open_trades
            .take(trade_id)
            .await
            .ok_or(ServiceError::AlreadyAccepted)?;

        let completed = match execute_trade(
            &trade,
            &seller,
            &buyer,
            &seller_card,
            buyer_card.as_ref(),
        ) {
            Ok(completed) => completed,
            Err(reason) => {
                // State drifted between check and take; put the offer back
                self.open_trades.insert(trade).await;
                warn!(trade_id = %trade_id, %reason, "trade rejected during execution");
                return Err(reason.into());
            }
        };

        let (seller_reward, buyer_reward) = self
            .settle(&trade, &completed, &mut seller, &mut buyer, &mut seller_card, &mut buyer_card)
            .await?;

        self.completed_trades.insert(completed.clone()).await;

        info!(
            trade_id = %completed.id,
            seller_id = %completed.seller_id,
            buyer_id = %completed.buyer_id,
            kind = ?completed.kind,
            price = completed.price,
            "trade executed"
        );

        Ok(TradeSettlement {
            completed,
            seller_reward,
            buyer_reward,
        })
    }

    /// Apply the exchange and issue both rewards
    async fn settle(
        &self,
        trade: &OpenTrade,
        completed: &CompletedTrade,
        seller: &mut User,
        buyer: &mut User,
        seller_card: &mut Card,
        buyer_card: &mut Option<Card>,
    ) -> Result<(Reward, Reward), ServiceError> {
        let now = Utc::now();

        let (mut seller_reward, mut buyer_reward) = match trade.kind {
            TradeKind::ForPrice => {
                buyer.deduct_currency(trade.price)?;
                seller.add_currency(trade.price)?;
                (
                    Reward::new(seller.id, RewardKind::CurrencyFromTrade, trade.price, None),
                    Reward::new(
                        buyer.id,
                        RewardKind::CardFromTrade,
                        0,
                        Some(*seller_card.id.as_uuid()),
                    ),
                )
            }
            TradeKind::ForCard => {
                // Counterpart card goes to the seller
                let card = buyer_card
                    .as_mut()
                    .ok_or(ServiceError::MissingBuyerCard)?;
                card.transfer_to(seller.id);
                buyer.remove_card(card.id);
                seller.add_card(card.id);
                self.cards.update(card.clone()).await;
                (
                    Reward::new(
                        seller.id,
                        RewardKind::CardFromTrade,
                        0,
                        Some(*card.id.as_uuid()),
                    ),
                    Reward::new(
                        buyer.id,
                        RewardKind::CardFromTrade,
                        0,
                        Some(*seller_card.id.as_uuid()),
                    ),
                )
            }
        };

        // Trade rewards are granted settled
        seller_reward.claim(now)?;
        buyer_reward.claim(now)?;

        // Seller's card goes to the buyer
        seller_card.transfer_to(buyer.id);
        seller.remove_card(seller_card.id);
        buyer.add_card(seller_card.id);
        self.cards.update(seller_card.clone()).await;

        seller.record_completed_trade(trade.id, completed.id);
        buyer.record_completed_trade(trade.id, completed.id);
        self.users.update(seller.clone()).await;
        self.users.update(buyer.clone()).await;

        self.rewards.insert(seller_reward.clone()).await;
        self.rewards.insert(buyer_reward.clone()).await;

        Ok((seller_reward, buyer_reward))
    }
}
