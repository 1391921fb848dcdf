//! Exchange trading calendars.
//!
//! A [`TradingCalendar`] is a list of sessions, one per trading day, each with
//! an open and a close time given in the exchange's local wall-clock time.
//! Dates missing from the calendar are days the exchange is closed.

use crate::constants::{DATE_FORMAT, TIME_FORMAT};
use crate::Error;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;
use csv::ReaderBuilder;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

/// Open and close of one trading day, in exchange-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl Session {
    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.close
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradingCalendar {
    name: String,
    timezone: Tz,
    sessions: BTreeMap<NaiveDate, Session>,
}

impl TradingCalendar {
    pub fn new(name: &str, timezone: Tz) -> Self {
        TradingCalendar {
            name: name.to_string(),
            timezone,
            sessions: BTreeMap::new(),
        }
    }

    /// Add (or replace) the session for `date`.
    pub fn with_session(mut self, date: NaiveDate, open: NaiveTime, close: NaiveTime) -> Self {
        self.sessions.insert(date, Session { open, close });
        self
    }

    /// A calendar with one `open`..`close` session on every weekday between
    /// `start` and `end` (inclusive) that is not listed in `holidays`.
    pub fn weekdays(
        name: &str,
        timezone: Tz,
        open: NaiveTime,
        close: NaiveTime,
        start: NaiveDate,
        end: NaiveDate,
        holidays: &[NaiveDate],
    ) -> Self {
        let holidays: BTreeSet<&NaiveDate> = holidays.iter().collect();
        let mut calendar = Self::new(name, timezone);

        for date in start.iter_days().take_while(|date| *date <= end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) || holidays.contains(&date) {
                continue;
            }

            calendar.sessions.insert(date, Session { open, close });
        }

        calendar
    }

    /// Reads a `date,open,close` schedule (header row required; dates as
    /// `YYYY-MM-DD`, times as `HH:MM:SS` local to the exchange).
    pub fn from_schedule_csv<R: Read>(name: &str, timezone: Tz, rdr: R) -> Result<Self, Error> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(rdr);
        let mut calendar = Self::new(name, timezone);

        for record in reader.records() {
            let record = record?;

            let get = |index: usize| {
                record.get(index).map(str::trim).ok_or_else(|| {
                    Error::Configuration(format!("Schedule row is too short: {:?}", record))
                })
            };

            let (raw_date, raw_open, raw_close) = (get(0)?, get(1)?, get(2)?);

            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
                .map_err(|e| Error::InvalidTimeFormat(format!("{}: {}", raw_date, e)))?;
            let open = NaiveTime::parse_from_str(raw_open, TIME_FORMAT)
                .map_err(|e| Error::InvalidTimeFormat(format!("{}: {}", raw_open, e)))?;
            let close = NaiveTime::parse_from_str(raw_close, TIME_FORMAT)
                .map_err(|e| Error::InvalidTimeFormat(format!("{}: {}", raw_close, e)))?;

            calendar.sessions.insert(date, Session { open, close });
        }

        Ok(calendar)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn is_session(&self, date: NaiveDate) -> bool {
        self.sessions.contains_key(&date)
    }

    pub fn session(&self, date: NaiveDate) -> Option<&Session> {
        self.sessions.get(&date)
    }

    pub fn sessions(&self) -> impl Iterator<Item = (&NaiveDate, &Session)> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
