//! Class session and registration models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::scheduling::days::{canonical_days, parse_weekdays, DayQuery, Weekday};
use crate::scheduling::time_slot;
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::helpers::{has_min_chars, normalize_whitespace};

/// A class that meets in one daily time slot on a set of weekdays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: i64,
    pub subject: String,
    pub teacher_name: String,
    pub max_students: i32,
    /// Canonical `"HH:MM-HH:MM"`
    pub time_slot: String,
    #[serde(rename = "dayOfWeek")]
    pub days_of_week: Vec<Weekday>,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `classes` table; days are stored as text symbols
#[derive(Debug, Clone, FromRow)]
pub struct ClassRow {
    pub id: i64,
    pub subject: String,
    pub teacher_name: String,
    pub max_students: i32,
    pub time_slot: String,
    pub days_of_week: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ClassRow> for ClassSession {
    type Error = SchoolDeskError;

    fn try_from(row: ClassRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            subject: row.subject,
            teacher_name: row.teacher_name,
            max_students: row.max_students,
            time_slot: row.time_slot,
            days_of_week: parse_weekdays(&row.days_of_week)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClassRegistration {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    pub registered_at: DateTime<Utc>,
}

/// Time slot of a class a student already attends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredSlot {
    pub class_id: i64,
    pub time_slot: String,
}

/// Days for a new class: a symbolic query (`"WEEKEND"`) or an explicit list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaySelection {
    Query(String),
    Days(Vec<String>),
}

impl DaySelection {
    /// Resolve into a sorted, deduplicated, non-empty day set
    pub fn resolve(&self) -> Result<Vec<Weekday>> {
        let days = match self {
            DaySelection::Query(query) => query.parse::<DayQuery>()?.days().to_vec(),
            DaySelection::Days(days) => parse_weekdays(days)?,
        };

        if days.is_empty() {
            return Err(SchoolDeskError::EmptyDaySelection);
        }

        Ok(canonical_days(days))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub subject: String,
    pub day_of_week: DaySelection,
    pub time_slot: String,
    pub teacher_name: String,
    pub max_students: i32,
}

/// A class whose fields passed validation, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct NewClassSession {
    pub subject: String,
    pub teacher_name: String,
    pub max_students: i32,
    pub time_slot: String,
    pub days_of_week: Vec<Weekday>,
}

impl CreateClassRequest {
    pub fn validate(self) -> Result<NewClassSession> {
        let time_slot = time_slot::normalize(&self.time_slot)?;
        let days_of_week = self.day_of_week.resolve()?;

        if !has_min_chars(&self.subject, 2) {
            return Err(SchoolDeskError::InvalidInput("Subject must be at least 2 characters".to_string()));
        }
        if !has_min_chars(&self.teacher_name, 2) {
            return Err(SchoolDeskError::InvalidInput("Teacher name must be at least 2 characters".to_string()));
        }
        if self.max_students <= 0 {
            return Err(SchoolDeskError::InvalidInput(format!(
                "maxStudents must be greater than 0, got {}", self.max_students
            )));
        }

        Ok(NewClassSession {
            subject: normalize_whitespace(&self.subject),
            teacher_name: normalize_whitespace(&self.teacher_name),
            max_students: self.max_students,
            time_slot,
            days_of_week,
        })
    }
}

/// Query parameters for listing classes: `?day=WEEKEND` or `?days=MONDAY&days=FRIDAY`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassQuery {
    pub day: Option<String>,
    pub days: Vec<String>,
}

impl ClassQuery {
    /// Build from raw query pairs; `days` may repeat, unknown keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = ClassQuery::default();
        for (key, value) in pairs {
            match key.as_str() {
                "day" => query.day = Some(value),
                "days" | "days[]" => query.days.push(value),
                _ => {}
            }
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request(day_of_week: DaySelection, time_slot: &str) -> CreateClassRequest {
        CreateClassRequest {
            subject: "Mathematics".to_string(),
            day_of_week,
            time_slot: time_slot.to_string(),
            teacher_name: "Mr. John Doe".to_string(),
            max_students: 30,
        }
    }

    #[test]
    fn test_validate_normalizes_slot_and_days() {
        let days = DaySelection::Days(vec!["FRIDAY".to_string(), "MONDAY".to_string(), "FRIDAY".to_string()]);
        let class = request(days, "8:0-10:30").validate().unwrap();
        assert_eq!(class.time_slot, "08:00-10:30");
        assert_eq!(class.days_of_week, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn test_validate_expands_day_query() {
        let class = request(DaySelection::Query("WEEKEND".to_string()), "09:00-10:00").validate().unwrap();
        assert_eq!(class.days_of_week, vec![Weekday::Saturday, Weekday::Sunday]);
    }

    #[test]
    fn test_validate_rejects_empty_days() {
        assert_matches!(
            request(DaySelection::Days(vec![]), "09:00-10:00").validate(),
            Err(SchoolDeskError::EmptyDaySelection)
        );
    }

    #[test]
    fn test_validate_rejects_unknown_day_symbol() {
        assert_matches!(
            request(DaySelection::Query("SOMETIMES".to_string()), "09:00-10:00").validate(),
            Err(SchoolDeskError::InvalidDayQuery { .. })
        );
    }

    #[test]
    fn test_validate_rejects_bad_slot_and_capacity() {
        let days = || DaySelection::Query("ALL".to_string());
        assert_matches!(request(days(), "10:00-08:00").validate(), Err(SchoolDeskError::MalformedSlot { .. }));

        let mut zero_capacity = request(days(), "08:00-09:00");
        zero_capacity.max_students = 0;
        assert_matches!(zero_capacity.validate(), Err(SchoolDeskError::InvalidInput(_)));
    }

    #[test]
    fn test_day_selection_deserializes_string_or_list() {
        let json = r#"{"subject":"Physics","dayOfWeek":"WEEKDAY","timeSlot":"10:45-12:15","teacherName":"Ms. Jane Smith","maxStudents":1}"#;
        let request: CreateClassRequest = serde_json::from_str(json).unwrap();
        assert_matches!(request.day_of_week, DaySelection::Query(ref q) if q == "WEEKDAY");

        let json = r#"{"subject":"Physics","dayOfWeek":["TUESDAY","THURSDAY"],"timeSlot":"10:45-12:15","teacherName":"Ms. Jane Smith","maxStudents":1}"#;
        let request: CreateClassRequest = serde_json::from_str(json).unwrap();
        assert_matches!(request.day_of_week, DaySelection::Days(ref days) if days.len() == 2);
    }

    #[test]
    fn test_class_query_from_pairs() {
        let query = ClassQuery::from_pairs(vec![
            ("day".to_string(), "WEEKEND".to_string()),
            ("days".to_string(), "MONDAY".to_string()),
            ("days".to_string(), "FRIDAY".to_string()),
            ("page".to_string(), "2".to_string()),
        ]);
        assert_eq!(query.day.as_deref(), Some("WEEKEND"));
        assert_eq!(query.days, vec!["MONDAY".to_string(), "FRIDAY".to_string()]);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_day() {
        let row = ClassRow {
            id: 1,
            subject: "Chemistry".to_string(),
            teacher_name: "Dr. Emily White".to_string(),
            max_students: 30,
            time_slot: "09:00-10:15".to_string(),
            days_of_week: vec!["MONDAY".to_string(), "BLURSDAY".to_string()],
            created_at: Utc::now(),
        };
        assert!(ClassSession::try_from(row).is_err());
    }
}
