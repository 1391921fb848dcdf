use crate::models::ListingRecord;
use crate::types::{IdentifierMap, SymbolMap};
use crate::Error;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The lookup maps built from a listings file. This is also what gets
/// persisted to the side-cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingsSnapshot {
    pub by_identifier: IdentifierMap,
    pub by_symbol: SymbolMap,
}

impl ListingsSnapshot {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ListingRecord>,
    {
        let records = records.into_iter();
        let (lower, _) = records.size_hint();

        let mut snapshot = ListingsSnapshot {
            by_identifier: IdentifierMap::with_capacity(lower),
            by_symbol: SymbolMap::with_capacity(lower),
        };

        for record in records {
            snapshot.insert(record);
        }

        snapshot
    }

    /// Adds a listing; a listing with an identifier already present replaces
    /// the earlier one in both maps.
    pub fn insert(&mut self, record: ListingRecord) {
        let key = record.identifier.to_string();

        if let Some(previous) = self.by_identifier.remove(&key) {
            warn!(
                "Duplicate ConId {} ({} replaces {})",
                key, record.symbol, previous.symbol
            );

            if let Some(listings) = self.by_symbol.get_mut(&previous.symbol) {
                listings.retain(|listing| listing.identifier != previous.identifier);
                if listings.is_empty() {
                    self.by_symbol.remove(&previous.symbol);
                }
            }
        }

        self.by_symbol
            .entry(record.symbol.clone())
            .or_default()
            .push(record.clone());
        self.by_identifier.insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Every listing reachable by symbol is reachable by identifier, and
    /// vice versa.
    pub fn is_consistent(&self) -> bool {
        let symbol_listing_count: usize = self.by_symbol.values().map(Vec::len).sum();
        if symbol_listing_count != self.by_identifier.len() {
            return false;
        }

        self.by_symbol.iter().all(|(symbol, listings)| {
            !listings.is_empty()
                && listings.iter().all(|listing| {
                    &listing.symbol == symbol
                        && self.by_identifier.get(&listing.identifier.to_string()) == Some(listing)
                })
        })
    }

    /// Reads a gzip-compressed bincode snapshot.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| {
            Error::CacheCorruption(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let decoder = GzDecoder::new(BufReader::new(file));
        let snapshot: ListingsSnapshot = bincode::deserialize_from(decoder)?;

        if !snapshot.is_consistent() {
            return Err(Error::CacheCorruption(format!(
                "Identifier and symbol maps disagree in {}",
                path.display()
            )));
        }

        Ok(snapshot)
    }

    /// Writes the snapshot as gzip-compressed bincode.
    pub fn store(&self, path: &Path) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());

        bincode::serialize_into(&mut encoder, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        let mut writer = encoder.finish()?;
        writer.flush()
    }
}
