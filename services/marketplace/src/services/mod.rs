//! Marketplace services
//!
//! Each service owns its repository collaborators as injected trait objects
//! and exposes the operations one resource's handlers would call.

pub mod collection;
pub mod pack;
pub mod trade;
pub mod user;

pub use collection::{CollectionProgress, CollectionService};
pub use pack::PackService;
pub use trade::{CreateTradeRequest, TradeService, TradeSettlement};
pub use user::UserService;
