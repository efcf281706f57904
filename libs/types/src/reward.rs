//! Claimable user rewards

use crate::errors::DomainError;
use crate::ids::{RewardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a reward grants when claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RewardKind {
    /// A card pack
    Pack,
    /// In-game currency
    Currency,
    /// A card received through a completed trade
    CardFromTrade,
    /// Currency received through a completed trade
    CurrencyFromTrade,
}

/// A reward a user can claim once
///
/// `item_id` references the awarded pack or card for item rewards and is
/// absent for currency rewards; `amount` carries the currency value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: RewardId,
    pub user_id: UserId,
    pub kind: RewardKind,
    pub item_id: Option<Uuid>,
    pub amount: i64,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl Reward {
    pub fn new(user_id: UserId, kind: RewardKind, amount: i64, item_id: Option<Uuid>) -> Self {
        Self {
            id: RewardId::new(),
            user_id,
            kind,
            item_id,
            amount,
            claimed_at: None,
        }
    }

    /// Mark the reward claimed; a reward can be claimed at most once
    pub fn claim(&mut self, at: DateTime<Utc>) -> Result<(), DomainError> {
        if self.claimed_at.is_some() {
            return Err(DomainError::RewardAlreadyClaimed);
        }
        self.claimed_at = Some(at);
        Ok(())
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed_at.is_some()
    }
}
