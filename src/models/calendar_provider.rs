use crate::models::TradingCalendar;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// A source of trading calendars, keyed by exchange or calendar code.
pub trait CalendarProvider: Send + Sync {
    fn name(&self) -> &str;

    fn is_known_exchange(&self, code: &str) -> bool;

    fn get_calendar(&self, code: &str) -> Option<Arc<TradingCalendar>>;
}

/// A provider backed by a fixed set of calendars plus an alias table
/// (e.g., `NYSE` -> `XNYS`).
#[derive(Debug, Clone, Default)]
pub struct StaticCalendarProvider {
    name: String,
    calendars: HashMap<String, Arc<TradingCalendar>>,
    aliases: HashMap<String, String>,
}

impl StaticCalendarProvider {
    pub fn new(name: &str) -> Self {
        StaticCalendarProvider {
            name: name.to_string(),
            calendars: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a calendar under its own name.
    pub fn with_calendar(mut self, calendar: TradingCalendar) -> Self {
        self.calendars
            .insert(calendar.name().to_string(), Arc::new(calendar));
        self
    }

    /// Make `alias` resolve to the calendar registered as `code`.
    pub fn with_alias(mut self, alias: &str, code: &str) -> Self {
        self.aliases.insert(alias.to_string(), code.to_string());
        self
    }

    fn canonical_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.aliases.get(code).map(String::as_str).unwrap_or(code)
    }
}

impl CalendarProvider for StaticCalendarProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_known_exchange(&self, code: &str) -> bool {
        self.calendars.contains_key(self.canonical_code(code))
    }

    fn get_calendar(&self, code: &str) -> Option<Arc<TradingCalendar>> {
        self.calendars.get(self.canonical_code(code)).cloned()
    }
}

/// Consult `providers` in order; the first one that knows `code` supplies
/// the calendar.
pub fn resolve_calendar(
    providers: &[Box<dyn CalendarProvider>],
    code: &str,
) -> Option<Arc<TradingCalendar>> {
    let provider = providers
        .iter()
        .find(|provider| provider.is_known_exchange(code))?;

    debug!("Calendar for {} supplied by {}", code, provider.name());

    provider.get_calendar(code)
}
