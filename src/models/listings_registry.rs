use crate::config::{RegistryConfig, DEFAULT_REGISTRY_CONFIG, UNCACHED_REGISTRY_CONFIG};
use crate::models::{
    resolve_calendar, CalendarProvider, ListingRecord, ListingsPreprocessor, ListingsSnapshot,
    TradingCalendar,
};
use crate::types::Identifier;
use crate::Error;
use log::{debug, info, warn};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lookup of listings by identifier and by symbol, built once from a
/// listings file, plus the calendar providers used to bind assets to a
/// trading calendar.
#[derive(Default)]
pub struct ListingsRegistry {
    snapshot: Option<ListingsSnapshot>,
    listings_path: Option<PathBuf>,
    calendar_providers: Vec<Box<dyn CalendarProvider>>,
}

impl ListingsRegistry {
    /// An uninitialized registry. Resolving assets against it fails until
    /// one of the `initialize` methods succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_path(listings_path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut registry = Self::new();
        registry.initialize(listings_path)?;
        Ok(registry)
    }

    /// Build from CSV content without touching any side-cache.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Error> {
        let config = UNCACHED_REGISTRY_CONFIG;
        let records =
            ListingsPreprocessor::read_listings_from_reader(rdr, config.columns, config.positions)?;
        Ok(Self::from_records(records))
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        ListingsRegistry {
            snapshot: Some(ListingsSnapshot::from_records(records)),
            listings_path: None,
            calendar_providers: Vec::new(),
        }
    }

    pub fn initialize(&mut self, listings_path: impl AsRef<Path>) -> Result<(), Error> {
        self.initialize_with_config(listings_path, DEFAULT_REGISTRY_CONFIG)
    }

    /// Populate the registry from `listings_path`, replacing any previous
    /// state. A side-cache next to the listings file is trusted as-is when
    /// present; a corrupt one is ignored and the CSV is parsed instead.
    pub fn initialize_with_config(
        &mut self,
        listings_path: impl AsRef<Path>,
        config: &RegistryConfig,
    ) -> Result<(), Error> {
        let listings_path = listings_path.as_ref();

        if !listings_path.is_file() {
            return Err(Error::Configuration(format!(
                "Listings file does not exist: {}",
                listings_path.display()
            )));
        }

        let cache_path = Self::cache_path_with_extension(listings_path, config.cache_extension);

        // The listings file itself must never be read or overwritten as a cache
        let cache_enabled = cache_path != listings_path;
        if !cache_enabled && (config.use_cache || config.persist_cache) {
            warn!(
                "Listings file {} already has the cache extension; caching disabled",
                listings_path.display()
            );
        }

        if cache_enabled && config.use_cache && cache_path.is_file() {
            match ListingsSnapshot::load(&cache_path) {
                Ok(snapshot) => {
                    info!(
                        "Loaded {} listings from cache {}",
                        snapshot.len(),
                        cache_path.display()
                    );
                    self.replace(snapshot, listings_path);
                    return Ok(());
                }
                Err(err) => {
                    warn!("Ignoring listings cache: {}", err);
                }
            }
        }

        let records = ListingsPreprocessor::read_listings_from_path(
            listings_path,
            config.columns,
            config.positions,
        )?;
        let snapshot = ListingsSnapshot::from_records(records);

        info!(
            "Loaded {} listings from {}",
            snapshot.len(),
            listings_path.display()
        );

        if cache_enabled && config.persist_cache {
            match snapshot.store(&cache_path) {
                Ok(()) => debug!("Wrote listings cache {}", cache_path.display()),
                Err(err) => warn!(
                    "Failed to write listings cache {}: {}",
                    cache_path.display(),
                    err
                ),
            }
        }

        self.replace(snapshot, listings_path);

        Ok(())
    }

    fn replace(&mut self, snapshot: ListingsSnapshot, listings_path: &Path) {
        self.snapshot = Some(snapshot);
        self.listings_path = Some(listings_path.to_path_buf());
    }

    /// Location of the side-cache for `listings_path` under the default
    /// configuration.
    pub fn cache_path(listings_path: impl AsRef<Path>) -> PathBuf {
        Self::cache_path_with_extension(listings_path, DEFAULT_REGISTRY_CONFIG.cache_extension)
    }

    pub fn cache_path_with_extension(listings_path: impl AsRef<Path>, extension: &str) -> PathBuf {
        listings_path.as_ref().with_extension(extension)
    }

    /// Delete the side-cache for `listings_path`, if any. The cache is never
    /// checked against the listings file, so call this whenever the file
    /// changes.
    pub fn clear_cache(listings_path: impl AsRef<Path>) -> std::io::Result<bool> {
        let cache_path = Self::cache_path(&listings_path);
        if cache_path == listings_path.as_ref() {
            return Ok(false);
        }

        match std::fs::remove_file(&cache_path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Append a calendar provider; earlier providers take priority.
    pub fn with_calendar_provider<P>(mut self, provider: P) -> Self
    where
        P: CalendarProvider + 'static,
    {
        self.push_calendar_provider(Box::new(provider));
        self
    }

    pub fn push_calendar_provider(&mut self, provider: Box<dyn CalendarProvider>) {
        self.calendar_providers.push(provider);
    }

    pub fn calendar_providers(&self) -> &[Box<dyn CalendarProvider>] {
        &self.calendar_providers
    }

    pub fn calendar_for_exchange(&self, exchange: &str) -> Option<Arc<TradingCalendar>> {
        resolve_calendar(&self.calendar_providers, exchange)
    }

    pub fn is_initialized(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The file the registry was last initialized from, if it came from one.
    pub fn listings_path(&self) -> Option<&Path> {
        self.listings_path.as_deref()
    }

    pub fn snapshot(&self) -> Result<&ListingsSnapshot, Error> {
        self.snapshot.as_ref().ok_or(Error::UninitializedRegistry)
    }

    pub fn get_by_identifier(&self, identifier: &str) -> Option<&ListingRecord> {
        self.snapshot.as_ref()?.by_identifier.get(identifier)
    }

    /// Listings sharing `symbol`, in listings-file order. Empty when the
    /// symbol is unknown.
    pub fn get_by_symbol(&self, symbol: &str) -> &[ListingRecord] {
        self.snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.by_symbol.get(symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn timezone(&self, identifier: Identifier) -> Option<&str> {
        self.get_by_identifier(&identifier.to_string())
            .map(|listing| listing.timezone.as_str())
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.snapshot
            .iter()
            .flat_map(|snapshot| snapshot.by_symbol.keys().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.snapshot.as_ref().map_or(0, ListingsSnapshot::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
