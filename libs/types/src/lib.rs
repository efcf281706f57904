//! Types library for the CarDex trading-card marketplace
//!
//! This library provides all core type definitions shared across the
//! marketplace: users, vehicle cards, packs, collections, trades and rewards.
//!
//! # Modules
//! - `ids`: Unique identifiers (UserId, CardId, TradeId, ...)
//! - `grade`: Card rarity grades
//! - `user`: User accounts and currency
//! - `card`: Vehicle card instances
//! - `vehicle`: Vehicle definitions backing cards
//! - `pack`: Unopened card packs
//! - `collection`: Curated vehicle collections
//! - `trade`: Open and completed trade records
//! - `reward`: Claimable user rewards
//! - `errors`: Domain error taxonomy

// Public modules
pub mod card;
pub mod collection;
pub mod errors;
pub mod grade;
pub mod ids;
pub mod pack;
pub mod reward;
pub mod trade;
pub mod user;
pub mod vehicle;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::card::*;
    pub use crate::collection::*;
    pub use crate::errors::*;
    pub use crate::grade::*;
    pub use crate::ids::*;
    pub use crate::pack::*;
    pub use crate::reward::*;
    pub use crate::trade::*;
    pub use crate::user::*;
    pub use crate::vehicle::*;
}
