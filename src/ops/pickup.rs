//! Pickup times and business hours.
//!
//! A custom pickup time must fall within opening hours (inclusive), not on
//! the weekly closed day or a declared store-closure date, and strictly after
//! the moment the order is submitted. "ASAP" always resolves to now.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat,
    TimeZone, Utc, Weekday,
};
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// How many pickup dates are offered ahead of time.
pub const BOOKING_WINDOW_DAYS: usize = 7;

#[derive(Debug, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum PickupError {
    #[error("could not read pickup time `{0}` (expected `asap` or `YYYY-MM-DD HH:MM`)")]
    #[diagnostic(code(griddle::pickup::unparseable))]
    Unparseable(String),

    #[error("Please select a time between {open} - {close} and not in the past.")]
    #[diagnostic(code(griddle::pickup::outside_hours))]
    OutsideHours { open: String, close: String },

    #[error("the store is closed on {0}")]
    #[diagnostic(code(griddle::pickup::closed_day))]
    ClosedDay(String),

    #[error("pickup time {0} is not in the future")]
    #[diagnostic(code(griddle::pickup::in_past))]
    InPast(String),
}

/// When the customer wants to collect the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickupTime {
    #[default]
    Asap,
    At(NaiveDateTime),
}

impl PickupTime {
    /// Parse `asap`, `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`.
    pub fn parse(text: &str) -> Result<Self, PickupError> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("asap") || trimmed.eq_ignore_ascii_case("now") {
            return Ok(PickupTime::Asap);
        }
        ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
            .map(PickupTime::At)
            .ok_or_else(|| PickupError::Unparseable(text.to_string()))
    }

    /// The concrete local time this pickup stands for.
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            PickupTime::Asap => now,
            PickupTime::At(at) => *at,
        }
    }

    /// ISO-8601 UTC timestamp sent to the backend.
    pub fn wire_value(&self, now: DateTime<Local>) -> String {
        let at = match self {
            PickupTime::Asap => now,
            PickupTime::At(at) => Local
                .from_local_datetime(at)
                .earliest()
                .unwrap_or(now),
        };
        at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for PickupTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickupTime::Asap => f.write_str("As soon as possible"),
            PickupTime::At(at) => write!(f, "{}", at.format("%a %b %-d at %-I:%M %p")),
        }
    }
}

/// Opening hours of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub closed_day: Weekday,
    pub closed_dates: BTreeSet<NaiveDate>,
}

impl Default for BusinessHours {
    fn default() -> Self {
        BusinessHours {
            open: NaiveTime::from_hms_opt(6, 30, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default(),
            closed_day: Weekday::Sun,
            closed_dates: BTreeSet::new(),
        }
    }
}

impl BusinessHours {
    /// Add dates on which the store is closed regardless of weekday.
    pub fn with_closed_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.closed_dates.extend(dates);
        self
    }

    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        date.weekday() != self.closed_day && !self.closed_dates.contains(&date)
    }

    /// Check a requested pickup against the hours and the current time.
    pub fn check(&self, pickup: &PickupTime, now: NaiveDateTime) -> Result<(), PickupError> {
        let PickupTime::At(at) = pickup else {
            return Ok(());
        };

        let time = at.time();
        if time < self.open || time > self.close {
            return Err(PickupError::OutsideHours {
                open: self.open.format("%-I:%M %p").to_string(),
                close: self.close.format("%-I:%M %p").to_string(),
            });
        }
        if !self.is_open_on(at.date()) {
            return Err(PickupError::ClosedDay(at.date().format("%A %Y-%m-%d").to_string()));
        }
        if *at <= now {
            return Err(PickupError::InPast(at.format("%Y-%m-%d %H:%M").to_string()));
        }
        Ok(())
    }

    /// The next `count` dates, starting today, on which the store opens.
    pub fn available_dates(&self, today: NaiveDate, count: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::with_capacity(count);
        let mut day = today;
        for _ in 0..(count * 7 + self.closed_dates.len()) {
            if dates.len() == count {
                break;
            }
            if self.is_open_on(day) {
                dates.push(day);
            }
            day += Duration::days(1);
        }
        dates
    }
}
