use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{ExchangeCode, Identifier, Symbol, TimezoneName};

/// One row of the listings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub identifier: Identifier,
    pub symbol: Symbol,
    pub security_type: String,
    pub primary_exchange: ExchangeCode,
    pub valid_exchanges: BTreeSet<ExchangeCode>,
    pub timezone: TimezoneName,
}

impl ListingRecord {
    /// Whether `exchange` is this listing's primary exchange or one of its
    /// valid exchanges.
    pub fn trades_on(&self, exchange: &str) -> bool {
        self.primary_exchange == exchange || self.valid_exchanges.contains(exchange)
    }
}
