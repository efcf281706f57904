//! User accounts and currency

use crate::errors::DomainError;
use crate::ids::{CardId, PackId, TradeId, UserId};
use serde::{Deserialize, Serialize};

/// A user account in the marketplace
///
/// Users hold in-game currency and informational id lists of what they own.
/// Relational ownership (e.g. `Card::owner_id`) is authoritative; the lists
/// here exist so trade validation can cheaply check "does the seller's
/// owned-card list contain the offered card".
///
/// Invariant: `currency` never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Hashed password, never plain text
    pub password_hash: String,
    pub currency: i64,
    pub owned_cards: Vec<CardId>,
    pub owned_packs: Vec<PackId>,
    pub open_trades: Vec<TradeId>,
    pub trade_history: Vec<TradeId>,
}

impl User {
    /// Create a new user with an empty garage and zero currency
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            password_hash: password_hash.into(),
            currency: 0,
            owned_cards: Vec::new(),
            owned_packs: Vec::new(),
            open_trades: Vec::new(),
            trade_history: Vec::new(),
        }
    }

    /// Credit in-game currency to the account
    pub fn add_currency(&mut self, amount: i64) -> Result<(), DomainError> {
        if amount < 0 {
            return Err(DomainError::NegativeAmount);
        }
        self.currency += amount;
        Ok(())
    }

    /// Deduct in-game currency from the account
    pub fn deduct_currency(&mut self, amount: i64) -> Result<(), DomainError> {
        if amount > self.currency {
            return Err(DomainError::InsufficientCurrency);
        }
        self.currency -= amount;
        Ok(())
    }

    /// Record a card as owned
    pub fn add_card(&mut self, card_id: CardId) {
        if !self.owned_cards.contains(&card_id) {
            self.owned_cards.push(card_id);
        }
    }

    /// Drop a card from the owned list (e.g. after trading it away)
    pub fn remove_card(&mut self, card_id: CardId) {
        self.owned_cards.retain(|c| *c != card_id);
    }

    /// Check whether the user owns a specific card
    pub fn has_card(&self, card_id: CardId) -> bool {
        self.owned_cards.contains(&card_id)
    }

    /// Record an unopened pack as owned
    pub fn add_pack(&mut self, pack_id: PackId) {
        if !self.owned_packs.contains(&pack_id) {
            self.owned_packs.push(pack_id);
        }
    }

    /// Drop a pack from the owned list (consumed on opening)
    pub fn remove_pack(&mut self, pack_id: PackId) {
        self.owned_packs.retain(|p| *p != pack_id);
    }

    /// Track a newly posted open trade
    pub fn add_open_trade(&mut self, trade_id: TradeId) {
        if !self.open_trades.contains(&trade_id) {
            self.open_trades.push(trade_id);
        }
    }

    /// Drop a cancelled open trade
    pub fn remove_open_trade(&mut self, trade_id: TradeId) {
        self.open_trades.retain(|t| *t != trade_id);
    }

    /// Move a finalized trade from the open list into the history
    pub fn record_completed_trade(&mut self, open_trade_id: TradeId, completed_id: TradeId) {
        self.open_trades.retain(|t| *t != open_trade_id);
        self.trade_history.push(completed_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_never_negative() {
        let mut user = User::new("takumi", "hash");
        user.add_currency(500).unwrap();
        assert_eq!(user.currency, 500);

        assert_eq!(
            user.deduct_currency(501),
            Err(DomainError::InsufficientCurrency)
        );
        assert_eq!(user.currency, 500);

        user.deduct_currency(500).unwrap();
        assert_eq!(user.currency, 0);
    }

    #[test]
    fn test_add_currency_rejects_negative_amount() {
        let mut user = User::new("keisuke", "hash");
        assert_eq!(user.add_currency(-10), Err(DomainError::NegativeAmount));
    }

    #[test]
    fn test_card_list_membership() {
        let mut user = User::new("bunta", "hash");
        let card = CardId::new();
        assert!(!user.has_card(card));

        user.add_card(card);
        user.add_card(card); // idempotent
        assert!(user.has_card(card));
        assert_eq!(user.owned_cards.len(), 1);

        user.remove_card(card);
        assert!(!user.has_card(card));
    }

    #[test]
    fn test_record_completed_trade_moves_to_history() {
        let mut user = User::new("ryosuke", "hash");
        let open_id = TradeId::new();
        let completed_id = TradeId::new();
        user.add_open_trade(open_id);

        user.record_completed_trade(open_id, completed_id);
        assert!(user.open_trades.is_empty());
        assert_eq!(user.trade_history, vec![completed_id]);
    }
}
