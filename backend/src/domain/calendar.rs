//! Calendar domain logic for the household finance backend.
//!
//! Month buckets, day-range tests and the clock abstraction live here. Every
//! aggregation takes its month as an explicit [`MonthKey`]; the only place the
//! wall clock is read is a service entry point resolving "the current month"
//! through an injected [`Clock`].

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

/// Clock abstracts access to the current timestamp so services stay deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn current_month(&self) -> MonthKey {
        MonthKey::from_date(self.today())
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Midnight UTC on the given day
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// A YYYY-MM month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(DomainError::validation(format!("Invalid month {:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Number of days in this month (28-31)
    pub fn days_in_month(&self) -> u32 {
        match self.month {
            2 => {
                if is_leap_year(self.year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Inclusive lower bound of the month's day range
    pub fn range_start(&self) -> String {
        format!("{}-01", self)
    }

    /// Inclusive upper bound of the month's day range.
    ///
    /// Always day 31: the bound is a string comparison and shorter months have
    /// no day-31 dates to over-select.
    pub fn range_end(&self) -> String {
        format!("{}-31", self)
    }

    /// Lexicographic range test on a YYYY-MM-DD date string
    pub fn contains(&self, date: &str) -> bool {
        let start = self.range_start();
        let end = self.range_end();
        date >= start.as_str() && date <= end.as_str()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation(format!("Month must be in YYYY-MM format, got '{}'", s));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn all_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a YYYY-MM-DD calendar day.
///
/// Stored dates are compared as strings, so only the zero-padded form is
/// accepted; chrono alone would also take signs and space padding.
pub fn parse_day(date: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::validation(format!("Date must be in YYYY-MM-DD format, got '{}'", date));

    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}

/// Resolve an optional YYYY-MM argument, falling back to the clock's current month
pub fn resolve_month(month: Option<&str>, clock: &dyn Clock) -> Result<MonthKey, DomainError> {
    match month {
        Some(month) => month.parse(),
        None => Ok(clock.current_month()),
    }
}
