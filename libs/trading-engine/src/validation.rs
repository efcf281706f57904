//! Pre-execution trade validation
//!
//! Pure predicate functions over (trade, seller, buyer, cards). Checks run
//! in a fixed order and the first failure short-circuits; nothing here has
//! side effects.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::card::Card;
use types::trade::{OpenTrade, TradeKind};
use types::user::User;

/// Why a trade was rejected
///
/// Display strings are the human-readable reasons surfaced to users, so
/// they stay stable.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeRejection {
    #[error("Seller does not own the card")]
    SellerDoesNotOwnCard,

    #[error("Card does not belong to seller")]
    CardNotOwnedBySeller,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Price cannot be negative")]
    NegativePrice,

    #[error("Card trade must specify wanted card")]
    MissingWantedCard,

    #[error("Buyer does not own the requested card")]
    BuyerDoesNotOwnWantedCard,

    #[error("Requested card does not belong to buyer")]
    CardNotOwnedByBuyer,
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeCheck {
    /// All checks passed
    Pass,
    /// First failing check
    Reject(TradeRejection),
}

impl TradeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, TradeCheck::Pass)
    }

    /// Convert into a `Result`, surfacing the rejection reason
    pub fn into_result(self) -> Result<(), TradeRejection> {
        match self {
            TradeCheck::Pass => Ok(()),
            TradeCheck::Reject(reason) => Err(reason),
        }
    }
}

/// Validate a trade between a seller and a prospective buyer.
///
/// Checks, in order:
/// 1. The seller's owned-card list contains the offered card
/// 2. The offered card's owner is the seller
/// 3. Kind-specific checks:
///    - `FOR_PRICE`: buyer has sufficient currency, price is non-negative
///    - `FOR_CARD`: a wanted card is named, the buyer owns it, and any
///      supplied buyer card belongs to the buyer
///
/// All entities are caller-supplied and fully populated; no lookups happen
/// here.
pub fn validate_trade(
    trade: &OpenTrade,
    seller: &User,
    buyer: &User,
    seller_card: &Card,
    buyer_card: Option<&Card>,
) -> TradeCheck {
    // 1. Seller must own the card
    if !seller.has_card(trade.card_id) {
        return TradeCheck::Reject(TradeRejection::SellerDoesNotOwnCard);
    }

    // 2. Card must belong to the seller
    if seller_card.owner_id != seller.id {
        return TradeCheck::Reject(TradeRejection::CardNotOwnedBySeller);
    }

    // 3. Kind-specific checks
    match trade.kind {
        TradeKind::ForPrice => validate_currency_trade(trade, buyer),
        TradeKind::ForCard => validate_card_trade(trade, buyer, buyer_card),
    }
}

fn validate_currency_trade(trade: &OpenTrade, buyer: &User) -> TradeCheck {
    // Buyer must be able to pay
    if buyer.currency < trade.price {
        return TradeCheck::Reject(TradeRejection::InsufficientFunds);
    }

    if trade.price < 0 {
        return TradeCheck::Reject(TradeRejection::NegativePrice);
    }

    TradeCheck::Pass
}

fn validate_card_trade(trade: &OpenTrade, buyer: &User, buyer_card: Option<&Card>) -> TradeCheck {
    // A wanted card must be named
    let want_card_id = match trade.want_card_id {
        Some(id) => id,
        None => return TradeCheck::Reject(TradeRejection::MissingWantedCard),
    };

    // Buyer must own the wanted card
    if !buyer.has_card(want_card_id) {
        return TradeCheck::Reject(TradeRejection::BuyerDoesNotOwnWantedCard);
    }

    // Any supplied buyer card must belong to the buyer
    if let Some(card) = buyer_card {
        if card.owner_id != buyer.id {
            return TradeCheck::Reject(TradeRejection::CardNotOwnedByBuyer);
        }
    }

    TradeCheck::Pass
}
