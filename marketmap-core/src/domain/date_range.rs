//! Date-range selectors for the heatmap endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trading-session window the remote heatmap data reflects.
///
/// The remote endpoint accepts these as the `date_range` query parameter.
/// This enum is the typed front door; the provider also exposes a raw-code
/// fetch path that forwards arbitrary strings unvalidated (see
/// `UnusualWhalesProvider::fetch_code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    OneDay,
    AfterHours,
    Yesterday,
    OneWeek,
    OneMonth,
    Ytd,
    OneYear,
}

impl DateRange {
    /// Every selector the endpoint documents, in display order.
    pub const ALL: [DateRange; 7] = [
        DateRange::OneDay,
        DateRange::AfterHours,
        DateRange::Yesterday,
        DateRange::OneWeek,
        DateRange::OneMonth,
        DateRange::Ytd,
        DateRange::OneYear,
    ];

    /// Wire code used in the `date_range` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            DateRange::OneDay => "one_day",
            DateRange::AfterHours => "after_hours",
            DateRange::Yesterday => "yesterday",
            DateRange::OneWeek => "one_week",
            DateRange::OneMonth => "one_month",
            DateRange::Ytd => "ytd",
            DateRange::OneYear => "one_year",
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange::OneDay
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown date range '{0}'. Valid: one_day, after_hours, yesterday, one_week, one_month, ytd, one_year")]
pub struct ParseDateRangeError(pub String);

impl FromStr for DateRange {
    type Err = ParseDateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_day" => Ok(DateRange::OneDay),
            "after_hours" => Ok(DateRange::AfterHours),
            "yesterday" => Ok(DateRange::Yesterday),
            "one_week" => Ok(DateRange::OneWeek),
            "one_month" => Ok(DateRange::OneMonth),
            "ytd" => Ok(DateRange::Ytd),
            "one_year" => Ok(DateRange::OneYear),
            other => Err(ParseDateRangeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_round_trip() {
        for range in DateRange::ALL {
            assert_eq!(range.as_str().parse::<DateRange>(), Ok(range));
        }
    }

    #[test]
    fn unknown_code_is_rejected_by_the_typed_parser() {
        let err = "three_decades".parse::<DateRange>().unwrap_err();
        assert_eq!(err, ParseDateRangeError("three_decades".into()));
    }

    #[test]
    fn default_is_one_day() {
        assert_eq!(DateRange::default(), DateRange::OneDay);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&DateRange::AfterHours).unwrap();
        assert_eq!(json, "\"after_hours\"");
        let back: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, DateRange::AfterHours);
    }
}
