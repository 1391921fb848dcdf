pub mod asset;
pub use asset::Asset;

pub mod calendar_provider;
pub use calendar_provider::{resolve_calendar, CalendarProvider, StaticCalendarProvider};

pub mod error;
pub use error::Error;

pub mod listing_record;
pub use listing_record::ListingRecord;

pub mod listings_preprocessor;
pub use listings_preprocessor::ListingsPreprocessor;

pub mod listings_registry;
pub use listings_registry::ListingsRegistry;

pub mod listings_snapshot;
pub use listings_snapshot::ListingsSnapshot;

pub mod trading_calendar;
pub use trading_calendar::{Session, TradingCalendar};
