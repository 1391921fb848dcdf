use crate::config::{ListingsColumnPositions, ListingsColumns};
use crate::constants::VALID_EXCHANGES_SEPARATOR;
use crate::models::ListingRecord;
use crate::types::Identifier;
use crate::Error;
use csv::{ReaderBuilder, StringRecord};
use log::debug;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Resolved positions of the required columns within a listings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndices {
    identifier: usize,
    symbol: usize,
    security_type: usize,
    primary_exchange: usize,
    timezone: usize,
    valid_exchanges: usize,
    /// Valid exchanges sit in the final field of each row rather than at a
    /// named column.
    positional: bool,
}

impl ColumnIndices {
    fn max(&self) -> usize {
        [
            self.identifier,
            self.symbol,
            self.security_type,
            self.primary_exchange,
            self.timezone,
            self.valid_exchanges,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

pub struct ListingsPreprocessor {}

impl ListingsPreprocessor {
    pub fn read_listings_from_path(
        path: &Path,
        columns: &ListingsColumns,
        positions: &ListingsColumnPositions,
    ) -> Result<Vec<ListingRecord>, Error> {
        if !path.is_file() {
            return Err(Error::Configuration(format!(
                "Listings file does not exist: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            Error::Configuration(format!(
                "Failed to open listings file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::read_listings_from_reader(file, columns, positions)
    }

    pub fn read_listings_from_string(
        csv: &str,
        columns: &ListingsColumns,
        positions: &ListingsColumnPositions,
    ) -> Result<Vec<ListingRecord>, Error> {
        // Use a cursor to simulate a file reader from the string
        Self::read_listings_from_reader(Cursor::new(csv), columns, positions)
    }

    pub fn read_listings_from_reader<R: Read>(
        rdr: R,
        columns: &ListingsColumns,
        positions: &ListingsColumnPositions,
    ) -> Result<Vec<ListingRecord>, Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let headers = reader
            .headers()
            .map_err(|e| Error::Configuration(format!("Failed to read headers: {}", e)))?
            .clone();

        let indices = Self::resolve_column_indices(&headers, columns, positions)?;

        let mut listings = Vec::new();

        for (row_index, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| Error::Configuration(format!("Failed to read record: {}", e)))?;

            // Header is line 1
            let line_number = row_index + 2;

            listings.push(Self::parse_record(&record, &indices, line_number)?);
        }

        debug!("Parsed {} listings", listings.len());

        Ok(listings)
    }

    fn resolve_column_indices(
        headers: &StringRecord,
        columns: &ListingsColumns,
        positions: &ListingsColumnPositions,
    ) -> Result<ColumnIndices, Error> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let named = [
            position(columns.identifier),
            position(columns.symbol),
            position(columns.security_type),
            position(columns.primary_exchange),
            position(columns.timezone),
            position(columns.valid_exchanges),
        ];

        if named.iter().all(Option::is_none) {
            // No recognizable header names; fall back to the fixed layout
            if headers.is_empty() {
                return Err(Error::Configuration(
                    "Listings file has no header row".to_string(),
                ));
            }

            let indices = ColumnIndices {
                identifier: positions.identifier,
                symbol: positions.symbol,
                security_type: positions.security_type,
                primary_exchange: positions.primary_exchange,
                timezone: positions.timezone,
                valid_exchanges: headers.len() - 1,
                positional: true,
            };

            if indices.max() >= headers.len() {
                return Err(Error::Configuration(format!(
                    "Listings file has {} columns; at least {} are required",
                    headers.len(),
                    indices.max() + 1
                )));
            }

            debug!("Using positional listings columns");
            return Ok(indices);
        }

        let names = [
            columns.identifier,
            columns.symbol,
            columns.security_type,
            columns.primary_exchange,
            columns.timezone,
            columns.valid_exchanges,
        ];

        let missing: Vec<&str> = names
            .iter()
            .zip(named.iter())
            .filter(|(_, index)| index.is_none())
            .map(|(name, _)| *name)
            .collect();

        match named {
            [Some(identifier), Some(symbol), Some(security_type), Some(primary_exchange), Some(timezone), Some(valid_exchanges)] => {
                Ok(ColumnIndices {
                    identifier,
                    symbol,
                    security_type,
                    primary_exchange,
                    timezone,
                    valid_exchanges,
                    positional: false,
                })
            }
            _ => Err(Error::Configuration(format!(
                "Listings file is missing required columns: {}",
                missing.join(", ")
            ))),
        }
    }

    fn parse_record(
        record: &StringRecord,
        indices: &ColumnIndices,
        line_number: usize,
    ) -> Result<ListingRecord, Error> {
        let field = |index: usize, name: &str| {
            record.get(index).map(str::trim).ok_or_else(|| {
                Error::Configuration(format!("Missing '{}' field on line {}", name, line_number))
            })
        };

        let raw_identifier = field(indices.identifier, "identifier")?;
        let identifier: Identifier = raw_identifier.parse().map_err(|_| {
            Error::Configuration(format!(
                "Invalid identifier '{}' on line {}",
                raw_identifier, line_number
            ))
        })?;

        let symbol = field(indices.symbol, "symbol")?;
        if symbol.is_empty() {
            return Err(Error::Configuration(format!(
                "Empty symbol on line {}",
                line_number
            )));
        }

        let valid_exchanges_index = if indices.positional {
            record.len().saturating_sub(1).max(indices.valid_exchanges)
        } else {
            indices.valid_exchanges
        };

        let valid_exchanges = field(valid_exchanges_index, "valid exchanges")?
            .split(VALID_EXCHANGES_SEPARATOR)
            .map(|exchange| exchange.trim()) // Trim whitespace
            .filter(|exchange| !exchange.is_empty())
            .map(|exchange| exchange.to_string())
            .collect();

        Ok(ListingRecord {
            identifier,
            symbol: symbol.to_string(),
            security_type: field(indices.security_type, "security type")?.to_string(),
            primary_exchange: field(indices.primary_exchange, "primary exchange")?.to_string(),
            valid_exchanges,
            timezone: field(indices.timezone, "timezone")?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_LISTINGS_COLUMNS, DEFAULT_LISTINGS_COLUMN_POSITIONS};

    fn read(csv: &str) -> Result<Vec<ListingRecord>, Error> {
        ListingsPreprocessor::read_listings_from_string(
            csv,
            DEFAULT_LISTINGS_COLUMNS,
            DEFAULT_LISTINGS_COLUMN_POSITIONS,
        )
    }

    #[test]
    fn test_reads_columns_by_header_name() {
        let csv = "Symbol,ConId,Timezone,SecType,ValidExchanges,PrimaryExchange\n\
                   SPY,756733,America/New_York,ETF,\"ARCA, NYSE,\",NYSE\n";

        let listings = read(csv).unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].identifier, 756733);
        assert_eq!(listings[0].symbol, "SPY");
        assert_eq!(listings[0].security_type, "ETF");
        assert_eq!(listings[0].primary_exchange, "NYSE");
        assert_eq!(listings[0].timezone, "America/New_York");
        assert_eq!(
            listings[0].valid_exchanges.iter().collect::<Vec<_>>(),
            vec!["ARCA", "NYSE"]
        );
    }

    #[test]
    fn test_falls_back_to_fixed_positions() {
        let csv = "a,b,c,d,e,f,g,h,i,j,k,l\n\
                   1,SPY,ETF,x,NYSE,USD,SPY,SPY,NYSE,SPDR,America/New_York,\"NYSE,ARCA\"\n";

        let listings = read(csv).unwrap();

        assert_eq!(listings[0].identifier, 1);
        assert_eq!(listings[0].primary_exchange, "NYSE");
        assert_eq!(listings[0].timezone, "America/New_York");
        assert_eq!(listings[0].valid_exchanges.len(), 2);
    }

    #[test]
    fn test_positional_valid_exchanges_come_from_last_field_of_row() {
        let csv = "a,b,c,d,e,f,g,h,i,j,k,l\n\
                   1,SPY,ETF,x,NYSE,USD,SPY,SPY,NYSE,SPDR,America/New_York,extra,\"NYSE,ARCA\"\n";

        let listings = read(csv).unwrap();

        assert_eq!(
            listings[0].valid_exchanges.iter().collect::<Vec<_>>(),
            vec!["ARCA", "NYSE"]
        );
    }

    #[test]
    fn test_missing_required_column_is_configuration_error() {
        let csv = "ConId,Symbol,SecType,PrimaryExchange,ValidExchanges\n1,SPY,ETF,NYSE,NYSE\n";

        match read(csv) {
            Err(Error::Configuration(msg)) => assert!(msg.contains("Timezone")),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_identifier_is_configuration_error() {
        let csv = "ConId,Symbol,SecType,PrimaryExchange,Timezone,ValidExchanges\n\
                   abc,SPY,ETF,NYSE,America/New_York,NYSE\n";

        match read(csv) {
            Err(Error::Configuration(msg)) => assert!(msg.contains("line 2")),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_positional_columns_is_configuration_error() {
        let csv = "a,b,c\n1,SPY,ETF\n";

        assert!(matches!(read(csv), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let result = ListingsPreprocessor::read_listings_from_path(
            Path::new("does/not/exist.csv"),
            DEFAULT_LISTINGS_COLUMNS,
            DEFAULT_LISTINGS_COLUMN_POSITIONS,
        );

        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
