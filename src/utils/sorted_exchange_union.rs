use crate::models::ListingRecord;
use crate::types::ExchangeCode;
use std::collections::BTreeSet;

/// Collects the valid exchanges of every listing into one list.
///
/// ### Returns:
/// - A `Vec` of exchange codes, deduplicated and sorted in ascending order.
///
/// ### Example:
/// ```rust
/// use asset_registry::models::ListingRecord;
/// use asset_registry::sorted_exchange_union;
///
/// let listing = |identifier, primary: &str, valid: &[&str]| ListingRecord {
///     identifier,
///     symbol: "SPY".to_string(),
///     security_type: "ETF".to_string(),
///     primary_exchange: primary.to_string(),
///     valid_exchanges: valid.iter().map(|exchange| exchange.to_string()).collect(),
///     timezone: "America/New_York".to_string(),
/// };
///
/// let listings = vec![
///     listing(1, "NYSE", &["NYSE", "ARCA"]),
///     listing(2, "ARCA", &["ARCA"]),
/// ];
///
/// assert_eq!(sorted_exchange_union(&listings), vec!["ARCA", "NYSE"]);
/// ```
pub fn sorted_exchange_union(listings: &[ListingRecord]) -> Vec<ExchangeCode> {
    listings
        .iter()
        .flat_map(|listing| listing.valid_exchanges.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
