//! Period keys and calendar arithmetic.
//!
//! A period is one time box of a recurring initiative: a calendar month
//! (`"YYYY-MM"`) or a quarter (`"YYYY-Qn"`). Periods serialize as their
//! string key, which is also the key exported and embedded in occurrence
//! IDs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use vigil_core::VigilError;

/// One time box of a recurring initiative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Period {
    /// A calendar month. `month` is 1-12.
    Month {
        /// Calendar year.
        year: i32,
        /// Month of year, 1-12.
        month: u32,
    },
    /// A calendar quarter anchored at Jan/Apr/Jul/Oct. `quarter` is 1-4.
    Quarter {
        /// Calendar year.
        year: i32,
        /// Quarter of year, 1-4.
        quarter: u32,
    },
}

impl Period {
    /// Create a monthly period, validating the month range.
    pub fn month(year: i32, month: u32) -> Result<Self, VigilError> {
        if !(1..=12).contains(&month) {
            return Err(VigilError::InvalidPeriod {
                value: format!("{year:04}-{month:02}"),
                reason: "month out of range".to_string(),
            });
        }
        Ok(Self::Month { year, month })
    }

    /// Create a quarterly period, validating the quarter range.
    pub fn quarter(year: i32, quarter: u32) -> Result<Self, VigilError> {
        if !(1..=4).contains(&quarter) {
            return Err(VigilError::InvalidPeriod {
                value: format!("{year:04}-Q{quarter}"),
                reason: "quarter out of range".to_string(),
            });
        }
        Ok(Self::Quarter { year, quarter })
    }

    /// Calendar year of the period.
    #[must_use]
    pub fn year(&self) -> i32 {
        match self {
            Self::Month { year, .. } | Self::Quarter { year, .. } => *year,
        }
    }

    /// First month covered by the period, 1-12.
    #[must_use]
    pub fn start_month(&self) -> u32 {
        match self {
            Self::Month { month, .. } => *month,
            Self::Quarter { quarter, .. } => (quarter - 1) * 3 + 1,
        }
    }

    /// Number of months the period covers.
    #[must_use]
    pub fn months_covered(&self) -> u32 {
        match self {
            Self::Month { .. } => 1,
            Self::Quarter { .. } => 3,
        }
    }

    /// First calendar day of the period.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        // Month is validated at construction; day 1 always exists.
        NaiveDate::from_ymd_opt(self.year(), self.start_month(), 1).unwrap_or_default()
    }

    /// First calendar day of the following period (exclusive end bound).
    #[must_use]
    pub fn end_exclusive(&self) -> NaiveDate {
        let next = self.start_month() + self.months_covered();
        let (year, month) = if next > 12 {
            (self.year() + 1, next - 12)
        } else {
            (self.year(), next)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
    }

    /// Whether the period covers the given month of its year, 1-12.
    #[must_use]
    pub fn contains_month(&self, month: u32) -> bool {
        let start = self.start_month();
        (start..start + self.months_covered()).contains(&month)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Quarter { year, quarter } => write!(f, "{year:04}-Q{quarter}"),
        }
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

impl FromStr for Period {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| VigilError::InvalidPeriod {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let (year_part, tail) = s
            .split_once('-')
            .ok_or_else(|| invalid("expected YYYY-MM or YYYY-Qn"))?;
        let year: i32 = year_part
            .parse()
            .map_err(|_| invalid("year is not a number"))?;

        if let Some(quarter_part) = tail.strip_prefix('Q') {
            let quarter: u32 = quarter_part
                .parse()
                .map_err(|_| invalid("quarter is not a number"))?;
            Self::quarter(year, quarter)
        } else {
            let month: u32 = tail.parse().map_err(|_| invalid("month is not a number"))?;
            Self::month(year, month)
        }
    }
}

impl TryFrom<String> for Period {
    type Error = VigilError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_period_keys() {
        assert_eq!(Period::month(2025, 3).unwrap().to_string(), "2025-03");
        assert_eq!(Period::month(2025, 11).unwrap().to_string(), "2025-11");
        assert_eq!(Period::quarter(2025, 2).unwrap().to_string(), "2025-Q2");
    }

    #[test]
    fn test_parse_round_trips() {
        for key in ["2025-01", "2025-12", "2025-Q1", "2025-Q4"] {
            let period: Period = key.parse().unwrap();
            assert_eq!(period.to_string(), key);
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!("2025-00".parse::<Period>().is_err());
        assert!("2025-13".parse::<Period>().is_err());
        assert!("2025-Q0".parse::<Period>().is_err());
        assert!("2025-Q5".parse::<Period>().is_err());
        assert!("2025".parse::<Period>().is_err());
        assert!("banana-Q1".parse::<Period>().is_err());
    }

    #[test]
    fn test_month_start_and_end() {
        let march = Period::month(2025, 3).unwrap();
        assert_eq!(march.start_date(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(
            march.end_exclusive(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
        );
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let december = Period::month(2025, 12).unwrap();
        assert_eq!(
            december.end_exclusive(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_quarter_spans_three_months() {
        let q4 = Period::quarter(2025, 4).unwrap();
        assert_eq!(q4.start_date(), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
        assert_eq!(
            q4.end_exclusive(),
            NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
        );
        assert!(q4.contains_month(10));
        assert!(q4.contains_month(12));
        assert!(!q4.contains_month(9));
    }

    #[test]
    fn test_serde_uses_period_keys() {
        let period = Period::quarter(2025, 1).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, "\"2025-Q1\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period);
    }
}
