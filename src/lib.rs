//! In-memory lookup of exchange listings, keyed by ConId or by ticker symbol
//! plus exchange, with a trading-calendar check for whether a listing can be
//! traded at a given local date and time.
//!
//! Build a [`ListingsRegistry`] once, attach calendar providers in priority
//! order, then resolve [`Asset`]s against it.

pub mod config;
pub use config::{
    ListingsColumnPositions, ListingsColumns, RegistryConfig, DEFAULT_LISTINGS_COLUMNS,
    DEFAULT_LISTINGS_COLUMN_POSITIONS, DEFAULT_REGISTRY_CONFIG, UNCACHED_REGISTRY_CONFIG,
};
pub mod constants;
pub mod models;
pub use models::{
    Asset, CalendarProvider, Error, ListingRecord, ListingsRegistry, ListingsSnapshot, Session,
    StaticCalendarProvider, TradingCalendar,
};
pub mod types;
pub use types::{ExchangeCode, Identifier, Symbol, TimezoneName};
mod utils;
pub use utils::sorted_exchange_union;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
