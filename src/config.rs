/// Header names of the listings columns the registry needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingsColumns {
    pub identifier: &'static str,
    pub symbol: &'static str,
    pub security_type: &'static str,
    pub primary_exchange: &'static str,
    pub timezone: &'static str,
    pub valid_exchanges: &'static str,
}

/// Fixed column positions used when a listings file carries none of the
/// expected header names. `valid_exchanges` is always the final column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingsColumnPositions {
    pub identifier: usize,
    pub symbol: usize,
    pub security_type: usize,
    pub primary_exchange: usize,
    pub timezone: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    pub columns: &'static ListingsColumns,
    pub positions: &'static ListingsColumnPositions,
    /// Load the side-cache when one exists next to the listings file.
    pub use_cache: bool,
    /// Write the side-cache after a cold CSV parse.
    pub persist_cache: bool,
    pub cache_extension: &'static str,
}

pub const DEFAULT_LISTINGS_COLUMNS: &ListingsColumns = &ListingsColumns {
    identifier: "ConId",
    symbol: "Symbol",
    security_type: "SecType",
    primary_exchange: "PrimaryExchange",
    timezone: "Timezone",
    valid_exchanges: "ValidExchanges",
};

pub const DEFAULT_LISTINGS_COLUMN_POSITIONS: &ListingsColumnPositions = &ListingsColumnPositions {
    identifier: 0,
    symbol: 1,
    security_type: 2,
    primary_exchange: 4,
    timezone: 10,
};

pub const DEFAULT_REGISTRY_CONFIG: &RegistryConfig = &RegistryConfig {
    columns: DEFAULT_LISTINGS_COLUMNS,
    positions: DEFAULT_LISTINGS_COLUMN_POSITIONS,
    use_cache: true,
    persist_cache: true,
    cache_extension: crate::constants::LISTINGS_CACHE_EXTENSION,
};

/// Same as [`DEFAULT_REGISTRY_CONFIG`] but never reads or writes a side-cache.
pub const UNCACHED_REGISTRY_CONFIG: &RegistryConfig = &RegistryConfig {
    columns: DEFAULT_LISTINGS_COLUMNS,
    positions: DEFAULT_LISTINGS_COLUMN_POSITIONS,
    use_cache: false,
    persist_cache: false,
    cache_extension: crate::constants::LISTINGS_CACHE_EXTENSION,
};
