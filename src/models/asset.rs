use crate::constants::{DATE_FORMAT, TIME_FORMAT};
use crate::models::{ListingRecord, ListingsRegistry, TradingCalendar};
use crate::types::{ExchangeCode, Identifier, Symbol, TimezoneName};
use crate::utils::sorted_exchange_union;
use crate::Error;
use chrono::{NaiveDate, NaiveTime, TimeZone};
use log::debug;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A single listing resolved from a [`ListingsRegistry`], bound to the
/// trading calendar of its selected exchange when one is known.
///
/// Assets compare, order and hash by identifier alone.
#[derive(Debug, Clone)]
pub struct Asset {
    identifier: Identifier,
    symbol: Symbol,
    primary_exchange: ExchangeCode,
    valid_exchanges: BTreeSet<ExchangeCode>,
    selected_exchange: ExchangeCode,
    timezone: TimezoneName,
    calendar: Option<Arc<TradingCalendar>>,
}

impl Asset {
    /// Resolve `identifier_or_symbol`.
    ///
    /// An exact identifier match wins and `exchange` is ignored. Otherwise
    /// the input is treated as a symbol; when several listings share it,
    /// `exchange` picks one of them.
    pub fn new(
        registry: &ListingsRegistry,
        identifier_or_symbol: &str,
        exchange: Option<&str>,
    ) -> Result<Self, Error> {
        if !registry.is_initialized() {
            return Err(Error::UninitializedRegistry);
        }

        let exchange = exchange.filter(|exchange| !exchange.is_empty());

        if let Some(listing) = registry.get_by_identifier(identifier_or_symbol) {
            debug!("{} resolved as ConId", identifier_or_symbol);
            return Ok(Self::bind(registry, listing, None));
        }

        let listings = registry.get_by_symbol(identifier_or_symbol);
        if listings.is_empty() {
            return Err(Error::UnknownAsset(identifier_or_symbol.to_string()));
        }

        let listing = Self::select_listing(identifier_or_symbol, listings, exchange)?;
        debug!(
            "{} resolved as symbol to ConId {}",
            identifier_or_symbol, listing.identifier
        );

        Ok(Self::bind(registry, listing, exchange))
    }

    pub fn from_identifier(
        registry: &ListingsRegistry,
        identifier: Identifier,
    ) -> Result<Self, Error> {
        Self::new(registry, &identifier.to_string(), None)
    }

    fn select_listing<'a>(
        symbol: &str,
        listings: &'a [ListingRecord],
        exchange: Option<&str>,
    ) -> Result<&'a ListingRecord, Error> {
        match (exchange, listings) {
            (None, [listing]) => Ok(listing),
            (None, _) => Err(Error::AmbiguousSymbol {
                symbol: symbol.to_string(),
                exchanges: sorted_exchange_union(listings),
            }),
            (Some(exchange), _) => listings
                .iter()
                .find(|listing| listing.primary_exchange == exchange)
                .or_else(|| listings.iter().find(|listing| listing.trades_on(exchange)))
                .ok_or_else(|| Error::InvalidExchange {
                    symbol: symbol.to_string(),
                    exchange: exchange.to_string(),
                    exchanges: sorted_exchange_union(listings),
                }),
        }
    }

    fn bind(registry: &ListingsRegistry, listing: &ListingRecord, exchange: Option<&str>) -> Self {
        let selected_exchange = exchange.unwrap_or(&listing.primary_exchange).to_string();
        let calendar = registry.calendar_for_exchange(&selected_exchange);

        if calendar.is_none() {
            debug!("No trading calendar known for {}", selected_exchange);
        }

        Asset {
            identifier: listing.identifier,
            symbol: listing.symbol.clone(),
            primary_exchange: listing.primary_exchange.clone(),
            valid_exchanges: listing.valid_exchanges.clone(),
            selected_exchange,
            timezone: listing.timezone.clone(),
            calendar,
        }
    }

    pub fn identifier(&self) -> Identifier {
        self.identifier
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn primary_exchange(&self) -> &str {
        &self.primary_exchange
    }

    pub fn valid_exchanges(&self) -> &BTreeSet<ExchangeCode> {
        &self.valid_exchanges
    }

    pub fn selected_exchange(&self) -> &str {
        &self.selected_exchange
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn calendar(&self) -> Option<&TradingCalendar> {
        self.calendar.as_deref()
    }

    /// Whether the asset can be traded on `date` (`YYYY-MM-DD`) and, if
    /// given, at `time` (`HH:MM:SS`), both read in the exchange's local time.
    ///
    /// Always `true` when no calendar is bound.
    pub fn can_trade(&self, date: &str, time: Option<&str>) -> Result<bool, Error> {
        if self.calendar.is_none() {
            return Ok(true);
        }

        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            Error::InvalidTimeFormat(format!("'{}' is not a YYYY-MM-DD date: {}", date, e))
        })?;

        let time = time
            .map(|time| {
                NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|e| {
                    Error::InvalidTimeFormat(format!("'{}' is not a HH:MM:SS time: {}", time, e))
                })
            })
            .transpose()?;

        self.can_trade_on(date, time)
    }

    pub fn can_trade_on(&self, date: NaiveDate, time: Option<NaiveTime>) -> Result<bool, Error> {
        let Some(calendar) = self.calendar.as_deref() else {
            return Ok(true);
        };

        let local = date.and_time(time.unwrap_or(NaiveTime::MIN));
        let utc = calendar
            .timezone()
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| {
                Error::InvalidTimeFormat(format!(
                    "{} does not exist in {}",
                    local,
                    calendar.timezone()
                ))
            })?
            .naive_utc();

        // Sessions are looked up by the UTC date of the requested instant
        let Some(session) = calendar.session(utc.date()) else {
            return Ok(false);
        };

        Ok(match time {
            Some(time) => session.contains(time),
            None => true,
        })
    }
}

impl PartialEq for Asset {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for Asset {}

impl PartialOrd for Asset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Asset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identifier.cmp(&other.identifier)
    }
}

impl Hash for Asset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Asset(ConId={}, Symbol={}, Exchange={}, Timezone={}, calendar={})",
            self.identifier,
            self.symbol,
            self.selected_exchange,
            self.timezone,
            self.calendar
                .as_deref()
                .map(TradingCalendar::name)
                .unwrap_or("None")
        )
    }
}
