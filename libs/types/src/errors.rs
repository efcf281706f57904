//! Domain error taxonomy
//!
//! Errors raised by entity state transitions. Trade validation rejections
//! live in the `trading-engine` crate; these cover everything else.

use thiserror::Error;

/// Errors from domain entity operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Value cannot be negative")]
    NegativeValue,

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Insufficient currency")]
    InsufficientCurrency,

    #[error("Cannot downgrade or keep the same grade")]
    GradeNotHigher,

    #[error("Price must be greater than 0 for FOR_PRICE trades")]
    PriceNotPositive,

    #[error("WantCardId must be provided for FOR_CARD trades")]
    MissingWantCard,

    #[error("Only FOR_PRICE trades can update price")]
    PriceUpdateOnCardTrade,

    #[error("Reward already claimed")]
    RewardAlreadyClaimed,
}
