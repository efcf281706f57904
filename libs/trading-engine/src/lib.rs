//! Trading engine: trade rule checking for the CarDex marketplace
//!
//! Provides the stateless core the service layer calls before touching any
//! state:
//! - Trade validation: ordered ownership and funds checks over caller-supplied
//!   entities
//! - Trade execution: validation plus construction of the immutable
//!   completed-trade record
//! - Fairness heuristic: percentage-difference comparison of two card values
//!
//! # Purity
//! All functions are synchronous and re-entrant: no I/O, no persistence, no
//! shared state. Callers own database reads/writes and serialization of
//! concurrent accepts on the same trade.

pub mod execution;
pub mod fairness;
pub mod validation;

pub use execution::execute_trade;
pub use fairness::{trade_fairness, trade_fairness_with_threshold, Fairness};
pub use validation::{validate_trade, TradeCheck, TradeRejection};

/// Crate version constant
pub const ENGINE_VERSION: &str = "1.0.0";
