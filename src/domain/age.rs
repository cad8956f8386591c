//! Recommended-age parsing
//!
//! Catalog authors describe dose timing the way schedules are printed
//! ("at birth", "2 months", "12-15 months", "within 4 weeks"). This module
//! turns those descriptions into day offsets from the birth date.
//!
//! An offset is a single integer regardless of birth date, so month and year
//! counts convert to the longest span that many calendar months or years can
//! cover. A dose described as "at 12 months" therefore never falls before
//! the first birthday, whatever the birth date. Weeks are 7 days.
//! Ranges resolve to their start for scheduling; the end is kept as the close
//! of the recommended window.

use super::errors::CatalogError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Days in one week
pub const DAYS_PER_WEEK: i64 = 7;

/// Longest span covered by `n` consecutive calendar months, for `n < 12`
const MAX_DAYS_IN_MONTHS: [i64; 12] = [0, 31, 62, 92, 123, 153, 184, 215, 245, 276, 306, 337];

const LEADING_WORDS: [&str; 6] = ["at ", "within ", "by ", "from ", "aged ", "age "];
const TRAILING_WORDS: [&str; 3] = [" of age", " old", " after birth"];

/// Unit of an age description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Day,
    Week,
    Month,
    Year,
}

impl AgeUnit {
    /// Day offset that reaches `count` units of calendar age from any birth date
    ///
    /// Returns `None` on overflow or a negative count.
    pub fn to_days(self, count: i64) -> Option<i64> {
        if count < 0 {
            return None;
        }
        match self {
            AgeUnit::Day => Some(count),
            AgeUnit::Week => count.checked_mul(DAYS_PER_WEEK),
            AgeUnit::Month => {
                let years = years_to_days(count / 12)?;
                let months = usize::try_from(count % 12).ok()?;
                years.checked_add(MAX_DAYS_IN_MONTHS[months])
            }
            AgeUnit::Year => years_to_days(count),
        }
    }

    fn parse(unit: &str) -> Option<Self> {
        match unit {
            "day" => Some(AgeUnit::Day),
            "week" => Some(AgeUnit::Week),
            "month" => Some(AgeUnit::Month),
            "year" => Some(AgeUnit::Year),
            _ => None,
        }
    }
}

/// A recommended age expressed in days after birth
///
/// # Examples
///
/// ```
/// use immunize::domain::age::RecommendedAge;
///
/// let age: RecommendedAge = "at 12–15 months".parse().unwrap();
/// assert_eq!(age.start_days(), 366);
/// assert_eq!(age.end_days(), Some(458));
///
/// let birth: RecommendedAge = "at birth".parse().unwrap();
/// assert_eq!(birth.start_days(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAge {
    start_days: i64,
    end_days: Option<i64>,
}

impl RecommendedAge {
    /// An exact-day recommendation
    pub fn at_days(days: i64) -> Self {
        Self {
            start_days: days,
            end_days: None,
        }
    }

    /// A range recommendation; `None` if the range ends before it starts
    pub fn between_days(start_days: i64, end_days: i64) -> Option<Self> {
        if end_days < start_days {
            return None;
        }
        Some(Self {
            start_days,
            end_days: Some(end_days),
        })
    }

    /// Day offset used for scheduling
    pub fn start_days(&self) -> i64 {
        self.start_days
    }

    /// Close of the recommended window, if the description was a range
    pub fn end_days(&self) -> Option<i64> {
        self.end_days
    }

    /// Parses an age description
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidAge`] if the text matches none of the
    /// supported forms or describes a reversed range.
    pub fn parse(description: &str) -> Result<Self, CatalogError> {
        let invalid = || CatalogError::InvalidAge(description.to_string());
        let normalized = normalize(description);

        if normalized == "birth" || normalized == "newborn" {
            return Ok(Self::at_days(0));
        }

        let caps = age_pattern().captures(&normalized).ok_or_else(invalid)?;
        let unit = AgeUnit::parse(&caps[3]).ok_or_else(invalid)?;
        let start: i64 = caps[1].parse().map_err(|_| invalid())?;
        let start_days = unit.to_days(start).ok_or_else(invalid)?;

        match caps.get(2) {
            None => Ok(Self::at_days(start_days)),
            Some(end) => {
                let end: i64 = end.as_str().parse().map_err(|_| invalid())?;
                let end_days = unit.to_days(end).ok_or_else(invalid)?;
                Self::between_days(start_days, end_days).ok_or_else(invalid)
            }
        }
    }
}

impl FromStr for RecommendedAge {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecommendedAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_days {
            Some(end) => write!(f, "{}-{} days", self.start_days, end),
            None => write!(f, "{} days", self.start_days),
        }
    }
}

/// `ceil(years * 365.25)`: at most one leap day in every four years
fn years_to_days(years: i64) -> Option<i64> {
    years.checked_mul(1461)?.checked_add(3).map(|quarter_days| quarter_days / 4)
}

fn age_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)\s*(?:(?:-|–|~|to)\s*(\d+)\s*)?(day|week|month|year)s?$")
            .expect("age pattern is a valid regex")
    })
}

fn normalize(description: &str) -> String {
    let mut text = description.trim().to_lowercase();
    for word in LEADING_WORDS {
        if let Some(rest) = text.strip_prefix(word) {
            text = rest.trim_start().to_string();
        }
    }
    for word in TRAILING_WORDS {
        if let Some(rest) = text.strip_suffix(word) {
            text = rest.trim_end().to_string();
        }
    }
    text
}
