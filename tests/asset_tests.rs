
use asset_registry::{Asset, Error, TradingCalendar};
use std::collections::BTreeSet;
use test_utils::{date, hm, load_registry, load_registry_with_calendars, LISTINGS_FILE_PATH};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_identifier_round_trips_through_its_symbol() {
        let registry = load_registry_with_calendars();

        for (key, listing) in &registry.snapshot().unwrap().by_identifier {
            let asset = Asset::new(&registry, key, None).unwrap();
            assert_eq!(asset.identifier(), listing.identifier);

            let by_symbol =
                Asset::new(&registry, asset.symbol(), Some(asset.selected_exchange())).unwrap();
            assert_eq!(by_symbol, asset, "{} did not round-trip", asset);
        }
    }

    #[test]
    fn test_single_listing_symbols_select_primary_exchange() {
        let registry = load_registry_with_calendars();

        for symbol in ["AAPL", "MSFT", "7203", "BHP"] {
            let listing = &registry.get_by_symbol(symbol)[0];
            let asset = Asset::new(&registry, symbol, None).unwrap();

            assert_eq!(asset.identifier(), listing.identifier);
            assert_eq!(asset.selected_exchange(), listing.primary_exchange);
        }
    }

    #[test]
    fn test_multi_listing_symbol_without_exchange_is_ambiguous() {
        let registry = load_registry_with_calendars();

        let err = Asset::new(&registry, "SPY", None).unwrap_err();

        assert!(matches!(err, Error::AmbiguousSymbol { .. }));
        assert_eq!(
            err.candidate_exchanges().unwrap(),
            &["ARCA".to_string(), "NYSE".to_string()]
        );
    }

    #[test]
    fn test_spy_listings_by_exchange() {
        let registry = load_registry_with_calendars();

        let nyse = Asset::new(&registry, "SPY", Some("NYSE")).unwrap();
        assert_eq!(nyse.identifier(), 1);
        assert_eq!(nyse.selected_exchange(), "NYSE");

        let arca = Asset::new(&registry, "SPY", Some("ARCA")).unwrap();
        assert_eq!(arca.identifier(), 2);
        assert_eq!(arca.selected_exchange(), "ARCA");
    }

    #[test]
    fn test_exchange_outside_every_listing_is_invalid() {
        let registry = load_registry_with_calendars();

        for (symbol, exchange) in [("SPY", "NASDAQ"), ("AAPL", "TSEJ"), ("BHP", "NYSE")] {
            let listings = registry.get_by_symbol(symbol);
            let expected: Vec<String> = listings
                .iter()
                .flat_map(|listing| listing.valid_exchanges.iter().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            match Asset::new(&registry, symbol, Some(exchange)) {
                Err(Error::InvalidExchange { exchanges, .. }) => assert_eq!(exchanges, expected),
                other => panic!("Expected invalid exchange for {}, got {:?}", symbol, other),
            }
        }
    }

    #[test]
    fn test_unknown_input() {
        let registry = load_registry_with_calendars();

        assert!(matches!(
            Asset::new(&registry, "999999", None),
            Err(Error::UnknownAsset(_))
        ));
        // Symbols are matched exactly
        assert!(matches!(
            Asset::new(&registry, "spy", Some("NYSE")),
            Err(Error::UnknownAsset(_))
        ));
    }

    #[test]
    fn test_calendars_follow_provider_priority() {
        let registry = load_registry_with_calendars();

        let spy = Asset::new(&registry, "SPY", Some("NYSE")).unwrap();
        let toyota = Asset::new(&registry, "7203", None).unwrap();
        let bhp = Asset::new(&registry, "BHP", None).unwrap();

        // Both providers know NYSE; the first one wins
        assert_eq!(spy.calendar().map(TradingCalendar::name), Some("XNYS"));
        assert_eq!(toyota.calendar().map(TradingCalendar::name), Some("JPX"));
        assert!(bhp.calendar().is_none());
    }

    #[test]
    fn test_can_trade_around_us_holiday_and_hours() {
        let registry = load_registry_with_calendars();
        let spy = Asset::from_identifier(&registry, 1).unwrap();

        assert!(!spy.can_trade("2024-01-01", None).unwrap());
        assert!(spy.can_trade("2024-01-02", Some("10:00:00")).unwrap());
        assert!(!spy.can_trade("2024-01-02", Some("04:00:00")).unwrap());
        assert!(!spy.can_trade("2024-01-02", Some("20:00:00")).unwrap());
        assert!(!spy.can_trade("2024-01-15", None).unwrap());
    }

    #[test]
    fn test_can_trade_tokyo_hours() {
        let registry = load_registry_with_calendars();
        let toyota = Asset::new(&registry, "7203", None).unwrap();

        assert!(toyota.can_trade_on(date(2024, 1, 4), Some(hm(10, 0))).unwrap());
        assert!(!toyota.can_trade_on(date(2024, 1, 4), Some(hm(8, 59))).unwrap());
        assert!(!toyota.can_trade_on(date(2024, 1, 2), Some(hm(10, 0))).unwrap());
    }

    #[test]
    fn test_without_calendars_every_time_is_tradable() {
        let registry = load_registry(&LISTINGS_FILE_PATH);

        for key in registry.snapshot().unwrap().by_identifier.keys() {
            let asset = Asset::new(&registry, key, None).unwrap();

            assert!(asset.calendar().is_none());
            assert!(asset.can_trade("2024-01-01", None).unwrap());
            assert!(asset.can_trade("2024-01-06", Some("23:59:59")).unwrap());
        }
    }

    #[test]
    fn test_sorting_orders_by_identifier() {
        let registry = load_registry_with_calendars();

        let mut assets: Vec<Asset> = ["BHP", "AAPL", "7203", "MSFT"]
            .iter()
            .map(|symbol| Asset::new(&registry, symbol, None).unwrap())
            .collect();
        assets.push(Asset::new(&registry, "SPY", Some("ARCA")).unwrap());
        assets.sort();

        let identifiers: Vec<u64> = assets.iter().map(Asset::identifier).collect();
        assert_eq!(identifiers, vec![2, 13905, 265598, 272093, 4036812]);
    }
}
