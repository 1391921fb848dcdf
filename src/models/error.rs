use thiserror::Error;

use crate::types::{ExchangeCode, Symbol};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration Error: {0}")]
    Configuration(String),

    #[error("Cache Corruption Error: {0}")]
    CacheCorruption(String),

    #[error("Listings registry is not initialized. Did you forget to call initialize()?")]
    UninitializedRegistry,

    #[error("{0} is neither a valid symbol nor a valid ConId")]
    UnknownAsset(String),

    #[error(
        "Multiple listings found for symbol {symbol}. Please specify an exchange.\nValid exchanges are: {}",
        .exchanges.join(", ")
    )]
    AmbiguousSymbol {
        symbol: Symbol,
        exchanges: Vec<ExchangeCode>,
    },

    #[error(
        "{exchange} is not a valid exchange for symbol {symbol}.\nValid exchanges are: {}",
        .exchanges.join(", ")
    )]
    InvalidExchange {
        symbol: Symbol,
        exchange: ExchangeCode,
        exchanges: Vec<ExchangeCode>,
    },

    #[error("Invalid Time Format: {0}")]
    InvalidTimeFormat(String),
}

impl Error {
    /// Candidate exchanges carried by ambiguity and invalid-exchange failures.
    pub fn candidate_exchanges(&self) -> Option<&[ExchangeCode]> {
        match self {
            Error::AmbiguousSymbol { exchanges, .. } | Error::InvalidExchange { exchanges, .. } => {
                Some(exchanges)
            }
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Configuration(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Error {
        Error::CacheCorruption(err.to_string())
    }
}
