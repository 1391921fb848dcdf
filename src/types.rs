use std::collections::HashMap;

use crate::models::ListingRecord;

// Types listed here are either shared across multiple files and/or exposed via the library.

/// The numeric contract identifier (ConId) of a single listing. Unique per
/// instrument per exchange.
pub type Identifier = u64;

/// Represents a ticker symbol (e.g., `SPY`) as an owned `String`. Several
/// listings may share one symbol.
pub type Symbol = String;

/// An exchange code as it appears in the listings file (e.g., `NYSE`, `ARCA`).
pub type ExchangeCode = String;

/// An IANA timezone name (e.g., `America/New_York`).
pub type TimezoneName = String;

/// Listings keyed by the string form of their identifier.
pub type IdentifierMap = HashMap<String, ListingRecord>;

/// Listings sharing a symbol, in the order they appeared in the listings file.
pub type SymbolMap = HashMap<Symbol, Vec<ListingRecord>>;
