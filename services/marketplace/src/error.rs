//! Central error type for the marketplace service layer

use thiserror::Error;
use trading_engine::TradeRejection;
use types::errors::DomainError;

/// Errors surfaced by the marketplace services
///
/// Every raised error means "operation rejected, no state changed".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Caller does not own this {0}")]
    NotOwner(&'static str),

    #[error("Buyer and seller cannot be the same user")]
    SelfTrade,

    #[error("Trade has already been accepted")]
    AlreadyAccepted,

    #[error("Price is required for FOR_PRICE trades")]
    MissingPrice,

    #[error("BuyerCardId is required for FOR_CARD trades")]
    MissingBuyerCard,

    #[error("Collection has no vehicles to draw from")]
    EmptyCollection,

    #[error("Trade rejected: {0}")]
    Rejected(#[from] TradeRejection),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ServiceError {
    /// Shorthand for the pervasive lookup-miss case
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
