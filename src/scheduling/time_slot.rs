//! Time slot parsing, normalization and overlap detection
//!
//! A class meets in one daily slot written as `"HH:MM-HH:MM"`. Input may use
//! single-digit hours or minutes (`"8:0-10:5"`); the canonical form is always
//! zero-padded (`"08:00-10:05"`). Slots are half-open minute intervals, so a
//! slot ending at 10:00 does not collide with one starting at 10:00.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::errors::{SchoolDeskError, Result};

const MINUTES_PER_HOUR: u16 = 60;

/// A validated time slot, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start: u16,
    end: u16,
}

impl TimeSlot {
    /// Parse a raw slot and require `start < end`
    pub fn parse(raw: &str) -> Result<Self> {
        let (start, end) = parse_bounds(raw)?;
        if end <= start {
            return Err(malformed(raw));
        }
        Ok(Self { start, end })
    }

    pub fn start_minute(&self) -> u16 {
        self.start
    }

    pub fn end_minute(&self) -> u16 {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// Half-open interval intersection
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format_minute(self.start), format_minute(self.end))
    }
}

impl FromStr for TimeSlot {
    type Err = SchoolDeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SchoolDeskError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Normalize a raw slot into canonical `"HH:MM-HH:MM"` form.
///
/// Fails with [`SchoolDeskError::MalformedSlot`] when either side is missing,
/// a component is not a number, a component is out of range, or the slot
/// does not end after it starts.
pub fn normalize(raw: &str) -> Result<String> {
    TimeSlot::parse(raw).map(|slot| slot.to_string())
}

/// Whether two slots share any minute.
///
/// Each side is re-validated with the same component rules as [`normalize`],
/// but ordering is not enforced here: a slot with `end <= start` is simply an
/// empty interval and overlaps nothing.
pub fn overlaps(slot_a: &str, slot_b: &str) -> Result<bool> {
    let (start_a, end_a) = parse_bounds(slot_a)?;
    let (start_b, end_b) = parse_bounds(slot_b)?;

    Ok(start_a < end_b && start_b < end_a)
}

fn parse_bounds(raw: &str) -> Result<(u16, u16)> {
    let mut sides = raw.split('-').map(str::trim);

    let (start, end) = match (sides.next(), sides.next(), sides.next()) {
        (Some(start), Some(end), None) if !start.is_empty() && !end.is_empty() => (start, end),
        _ => return Err(malformed(raw)),
    };

    Ok((parse_clock(start)?, parse_clock(end)?))
}

fn parse_clock(value: &str) -> Result<u16> {
    let (hour, minute) = value.split_once(':').ok_or_else(|| malformed(value))?;

    let hour = parse_component(hour, 23).ok_or_else(|| malformed(value))?;
    let minute = parse_component(minute, 59).ok_or_else(|| malformed(value))?;

    Ok(hour * MINUTES_PER_HOUR + minute)
}

fn parse_component(digits: &str, max: u16) -> Option<u16> {
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().filter(|value| *value <= max)
}

fn format_minute(minute: u16) -> String {
    format!("{:02}:{:02}", minute / MINUTES_PER_HOUR, minute % MINUTES_PER_HOUR)
}

fn malformed(value: &str) -> SchoolDeskError {
    SchoolDeskError::MalformedSlot { value: value.to_string() }
}
