//! Open and completed trade records

use crate::errors::DomainError;
use crate::ids::{CardId, TradeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a seller wants in exchange for their card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    /// Exchange for a specific other card
    ForCard,
    /// Sell for in-game currency
    ForPrice,
}

/// A pending, unaccepted trade offer
///
/// Shape invariants enforced at construction:
/// - `FOR_CARD` offers must name a wanted card
/// - `FOR_PRICE` offers must ask a positive price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTrade {
    pub id: TradeId,
    pub kind: TradeKind,
    /// The user offering the card
    pub seller_id: UserId,
    /// The card being offered
    pub card_id: CardId,
    /// Asking price; 0 for FOR_CARD offers
    pub price: i64,
    /// Card wanted in exchange; None for FOR_PRICE offers
    pub want_card_id: Option<CardId>,
}

impl OpenTrade {
    /// Create a currency offer: sell `card_id` for `price`
    pub fn for_price(seller_id: UserId, card_id: CardId, price: i64) -> Result<Self, DomainError> {
        if price <= 0 {
            return Err(DomainError::PriceNotPositive);
        }
        Ok(Self {
            id: TradeId::new(),
            kind: TradeKind::ForPrice,
            seller_id,
            card_id,
            price,
            want_card_id: None,
        })
    }

    /// Create a card offer: exchange `card_id` for `want_card_id`
    pub fn for_card(seller_id: UserId, card_id: CardId, want_card_id: CardId) -> Self {
        Self {
            id: TradeId::new(),
            kind: TradeKind::ForCard,
            seller_id,
            card_id,
            price: 0,
            want_card_id: Some(want_card_id),
        }
    }

    /// Create an offer from raw parts, validating the shape
    pub fn new(
        kind: TradeKind,
        seller_id: UserId,
        card_id: CardId,
        price: i64,
        want_card_id: Option<CardId>,
    ) -> Result<Self, DomainError> {
        match kind {
            TradeKind::ForPrice => Self::for_price(seller_id, card_id, price),
            TradeKind::ForCard => {
                let wanted = want_card_id.ok_or(DomainError::MissingWantCard)?;
                Ok(Self::for_card(seller_id, card_id, wanted))
            }
        }
    }

    /// Change the asking price of a FOR_PRICE offer
    pub fn update_price(&mut self, new_price: i64) -> Result<(), DomainError> {
        if self.kind != TradeKind::ForPrice {
            return Err(DomainError::PriceUpdateOnCardTrade);
        }
        if new_price <= 0 {
            return Err(DomainError::PriceNotPositive);
        }
        self.price = new_price;
        Ok(())
    }
}

/// Immutable record of a finalized exchange
///
/// Produced by the trading engine once validation passes; never mutated
/// afterwards. `buyer_card_id` is set only for FOR_CARD trades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrade {
    pub id: TradeId,
    pub kind: TradeKind,
    pub seller_id: UserId,
    pub seller_card_id: CardId,
    pub buyer_id: UserId,
    pub buyer_card_id: Option<CardId>,
    pub price: i64,
    pub executed_at: DateTime<Utc>,
}

impl CompletedTrade {
    /// Record a finalized exchange with a fresh identifier
    pub fn new(
        kind: TradeKind,
        seller_id: UserId,
        seller_card_id: CardId,
        buyer_id: UserId,
        buyer_card_id: Option<CardId>,
        price: i64,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TradeId::new(),
            kind,
            seller_id,
            seller_card_id,
            buyer_id,
            buyer_card_id,
            price,
            executed_at,
        }
    }

    /// Whether this trade touched the given user on either side
    pub fn involves(&self, user_id: UserId) -> bool {
        self.seller_id == user_id || self.buyer_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_price_requires_positive_price() {
        let seller = UserId::new();
        let card = CardId::new();
        assert_eq!(
            OpenTrade::for_price(seller, card, 0),
            Err(DomainError::PriceNotPositive)
        );
        assert_eq!(
            OpenTrade::for_price(seller, card, -10),
            Err(DomainError::PriceNotPositive)
        );

        let trade = OpenTrade::for_price(seller, card, 100).unwrap();
        assert_eq!(trade.kind, TradeKind::ForPrice);
        assert_eq!(trade.want_card_id, None);
    }

    #[test]
    fn test_new_for_card_requires_want_card() {
        let result = OpenTrade::new(TradeKind::ForCard, UserId::new(), CardId::new(), 0, None);
        assert_eq!(result, Err(DomainError::MissingWantCard));
    }

    #[test]
    fn test_update_price_only_on_price_trades() {
        let mut card_trade = OpenTrade::for_card(UserId::new(), CardId::new(), CardId::new());
        assert_eq!(
            card_trade.update_price(50),
            Err(DomainError::PriceUpdateOnCardTrade)
        );

        let mut price_trade = OpenTrade::for_price(UserId::new(), CardId::new(), 100).unwrap();
        assert_eq!(
            price_trade.update_price(0),
            Err(DomainError::PriceNotPositive)
        );
        price_trade.update_price(150).unwrap();
        assert_eq!(price_trade.price, 150);
    }

    #[test]
    fn test_trade_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&TradeKind::ForCard).unwrap(),
            "\"FOR_CARD\""
        );
        assert_eq!(
            serde_json::to_string(&TradeKind::ForPrice).unwrap(),
            "\"FOR_PRICE\""
        );
    }

    #[test]
    fn test_completed_trade_involves() {
        let seller = UserId::new();
        let buyer = UserId::new();
        let trade = CompletedTrade::new(
            TradeKind::ForPrice,
            seller,
            CardId::new(),
            buyer,
            None,
            100,
            Utc::now(),
        );

        assert!(trade.involves(seller));
        assert!(trade.involves(buyer));
        assert!(!trade.involves(UserId::new()));
    }
}
