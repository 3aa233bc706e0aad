//! Time-axis labels as delivered by the backend.
//!
//! Labels are opaque: the backend sends ISO dates (`YYYY-MM-DD`) today but
//! nothing downstream may rely on that except the forecast overlap check,
//! which only applies when both sides parse as dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by the backend for `fechas`: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single label on a chart's horizontal axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimePoint {
    Index(i64),
    Label(String),
}

impl TimePoint {
    /// Parse the label as an ISO calendar date, if it is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TimePoint::Label(s) => NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok(),
            TimePoint::Index(_) => None,
        }
    }
}

impl From<&str> for TimePoint {
    fn from(s: &str) -> Self {
        TimePoint::Label(s.to_string())
    }
}

impl From<NaiveDate> for TimePoint {
    fn from(date: NaiveDate) -> Self {
        TimePoint::Label(date.format(DATE_FORMAT).to_string())
    }
}

impl From<i64> for TimePoint {
    fn from(i: i64) -> Self {
        TimePoint::Index(i)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePoint::Index(i) => write!(f, "{}", i),
            TimePoint::Label(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_label_parses_as_date() {
        let tp = TimePoint::from("2023-06-01");
        assert_eq!(tp.as_date(), NaiveDate::from_ymd_opt(2023, 6, 1));
    }

    #[test]
    fn non_date_labels_stay_opaque() {
        assert_eq!(TimePoint::from("month 3").as_date(), None);
        assert_eq!(TimePoint::from(7i64).as_date(), None);
    }

    #[test]
    fn deserializes_strings_and_indexes() {
        let labels: Vec<TimePoint> = serde_json::from_str(r#"["2020-01-01", 3]"#).unwrap();
        assert_eq!(labels[0], TimePoint::Label("2020-01-01".to_string()));
        assert_eq!(labels[1], TimePoint::Index(3));
    }

    #[test]
    fn date_round_trips_through_label() {
        let date = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        let tp = TimePoint::from(date);
        assert_eq!(tp.to_string(), "2021-12-31");
        assert_eq!(tp.as_date(), Some(date));
    }
}
