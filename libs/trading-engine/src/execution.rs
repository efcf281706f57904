//! Trade execution
//!
//! Validation followed by construction of the immutable completed-trade
//! record. Execution performs no persistence; applying the exchange (card
//! ownership, currency movement) is the service layer's job.

use chrono::Utc;
use types::card::Card;
use types::trade::{CompletedTrade, OpenTrade};
use types::user::User;

use crate::validation::{validate_trade, TradeRejection};

/// Execute a trade: re-run validation, then build the completed record.
///
/// On rejection the reason propagates verbatim and nothing changes. On
/// success the record carries a freshly generated identifier and the
/// current timestamp; for `FOR_CARD` trades `buyer_card_id` is the wanted
/// card named by the offer.
pub fn execute_trade(
    trade: &OpenTrade,
    seller: &User,
    buyer: &User,
    seller_card: &Card,
    buyer_card: Option<&Card>,
) -> Result<CompletedTrade, TradeRejection> {
    validate_trade(trade, seller, buyer, seller_card, buyer_card).into_result()?;

    Ok(CompletedTrade::new(
        trade.kind,
        seller.id,
        trade.card_id,
        buyer.id,
        trade.want_card_id,
        trade.price,
        Utc::now(),
    ))
}
