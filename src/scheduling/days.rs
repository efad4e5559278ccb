//! Weekdays and symbolic day queries

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{SchoolDeskError, Result};

/// Day of the week a class meets on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub const WORKDAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub const WEEKEND: [Weekday; 2] = [Weekday::Saturday, Weekday::Sunday];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = SchoolDeskError;

    fn from_str(s: &str) -> Result<Self> {
        Weekday::ALL
            .iter()
            .copied()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| SchoolDeskError::InvalidDayQuery { value: s.to_string() })
    }
}

/// Symbolic shorthand for a fixed set of weekdays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayQuery {
    #[default]
    All,
    Weekday,
    Weekend,
}

impl DayQuery {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayQuery::All => "ALL",
            DayQuery::Weekday => "WEEKDAY",
            DayQuery::Weekend => "WEEKEND",
        }
    }

    /// The weekdays this query stands for
    pub fn days(&self) -> &'static [Weekday] {
        match self {
            DayQuery::All => &Weekday::ALL,
            DayQuery::Weekday => &Weekday::WORKDAYS,
            DayQuery::Weekend => &Weekday::WEEKEND,
        }
    }
}

impl FromStr for DayQuery {
    type Err = SchoolDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ALL" => Ok(DayQuery::All),
            "WEEKDAY" => Ok(DayQuery::Weekday),
            "WEEKEND" => Ok(DayQuery::Weekend),
            _ => Err(SchoolDeskError::InvalidDayQuery { value: s.to_string() }),
        }
    }
}

/// Resolve a day query into concrete weekdays.
///
/// A non-empty explicit list always wins and is returned as given; otherwise
/// the symbolic query is expanded, defaulting to [`DayQuery::All`].
pub fn resolve_days(day: Option<DayQuery>, explicit_days: &[Weekday]) -> Vec<Weekday> {
    if !explicit_days.is_empty() {
        return explicit_days.to_vec();
    }

    day.unwrap_or_default().days().to_vec()
}

/// Parse raw query parameters and resolve them, see [`resolve_days`]
pub fn resolve_day_query<S: AsRef<str>>(day: Option<&str>, explicit_days: &[S]) -> Result<Vec<Weekday>> {
    let day = day.map(DayQuery::from_str).transpose()?;
    let explicit_days = parse_weekdays(explicit_days)?;

    Ok(resolve_days(day, &explicit_days))
}

/// Parse weekday symbols, failing on the first unknown one
pub fn parse_weekdays<S: AsRef<str>>(values: &[S]) -> Result<Vec<Weekday>> {
    values.iter().map(|value| value.as_ref().parse()).collect()
}

/// Whether two day sets share at least one weekday
pub fn shares_any_day(a: &[Weekday], b: &[Weekday]) -> bool {
    a.iter().any(|day| b.contains(day))
}

/// Sort and deduplicate a day set
pub fn canonical_days(mut days: Vec<Weekday>) -> Vec<Weekday> {
    days.sort();
    days.dedup();
    days
}
