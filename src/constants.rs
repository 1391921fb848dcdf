/// Extension swapped onto the listings path to locate its side-cache.
pub const LISTINGS_CACHE_EXTENSION: &str = "cache";

/// Separator between entries of the valid-exchanges column.
pub const VALID_EXCHANGES_SEPARATOR: char = ',';

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const TIME_FORMAT: &str = "%H:%M:%S";
