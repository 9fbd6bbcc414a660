//! Calendar dates as they appear on `EMAIL` lines.
//!
//! Dates are written `MM-DD-YYYY` (one or two digits for month and day).
//! A [`DateKey`] is the number of seconds from the Unix epoch to midnight
//! UTC of that day, so later dates always compare greater.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::error::{ParseError, Result};

/// Regex for the `MM-DD-YYYY` shape.
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})$").expect("Invalid date regex"));

const SECONDS_PER_DAY: i64 = 86_400;

/// `NaiveDate::num_days_from_ce()` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Totally ordered timestamp derived from a calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(i64);

impl DateKey {
    /// 01-01-1970, the substitute for dates that fail to parse.
    pub const EPOCH: DateKey = DateKey(0);

    /// Parses a `MM-DD-YYYY` date.
    ///
    /// Leading and trailing whitespace is ignored.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidFormat`] if the text is not three dash-separated
    /// numeric fields, [`ParseError::InvalidDate`] if the fields do not name
    /// a real day (e.g. `02-30-2030`).
    pub fn parse(text: &str) -> Result<Self> {
        let caps = DATE_REGEX
            .captures(text.trim())
            .ok_or_else(|| ParseError::InvalidFormat(text.to_string()))?;

        let field = |i: usize| -> Result<u32> {
            caps[i]
                .parse()
                .map_err(|_| ParseError::InvalidFormat(text.to_string()))
        };
        let (month, day, year) = (field(1)?, field(2)?, field(3)?);

        let year = i32::try_from(year).map_err(|_| ParseError::InvalidFormat(text.to_string()))?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ParseError::InvalidDate(text.to_string()))?;

        Ok(Self::from_date(date))
    }

    /// Parses a date, substituting [`DateKey::EPOCH`] when it is malformed.
    ///
    /// Every unparseable date maps to the same key, so items carrying one
    /// tie on date and are ordered by arrival.
    pub fn parse_or_epoch(text: &str) -> Self {
        match Self::parse(text) {
            Ok(key) => key,
            Err(e) => {
                warn!(date = %text, error = %e, "Unparseable date, using epoch");
                Self::EPOCH
            }
        }
    }

    /// Key for a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        let days = i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE;
        Self(days * SECONDS_PER_DAY)
    }

    /// Seconds since the Unix epoch (negative before 1970).
    pub fn timestamp(self) -> i64 {
        self.0
    }

    /// The calendar date this key was built from.
    pub fn to_date(self) -> Option<NaiveDate> {
        let days = self.0.div_euclid(SECONDS_PER_DAY) + UNIX_EPOCH_DAYS_FROM_CE;
        i32::try_from(days)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
    }
}

impl FromStr for DateKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_date() {
            Some(date) => write!(f, "{}", date.format("%m-%d-%Y")),
            None => write!(f, "@{}", self.0),
        }
    }
}
