//! Student model

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use crate::models::parent::Parent;
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::helpers::{has_min_chars, normalize_whitespace};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub parent_id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: Option<String>,
    pub current_grade: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student together with the owning parent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    #[serde(flatten)]
    pub student: Student,
    pub parent: Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

impl FromStr for Gender {
    type Err = SchoolDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            "OTHER" => Ok(Gender::Other),
            _ => Err(SchoolDeskError::InvalidInput(format!("Invalid gender: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub parent_id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: Option<String>,
    pub current_grade: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    pub parent_id: Option<i64>,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub current_grade: Option<String>,
}

/// A student whose fields passed validation
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub parent_id: i64,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: Option<Gender>,
    pub current_grade: String,
}

impl CreateStudentRequest {
    pub fn validate(self) -> Result<NewStudent> {
        Ok(NewStudent {
            parent_id: validate_parent_id(self.parent_id)?,
            name: validate_name(&self.name)?,
            dob: self.dob,
            gender: self.gender.as_deref().map(Gender::from_str).transpose()?,
            current_grade: validate_grade(&self.current_grade)?,
        })
    }
}

impl UpdateStudentRequest {
    pub fn validate(self) -> Result<Self> {
        let gender = self.gender.as_deref().map(Gender::from_str).transpose()?;

        Ok(Self {
            parent_id: self.parent_id.map(validate_parent_id).transpose()?,
            name: self.name.as_deref().map(validate_name).transpose()?,
            dob: self.dob,
            gender: gender.map(|g| g.as_str().to_string()),
            current_grade: self.current_grade.as_deref().map(validate_grade).transpose()?,
        })
    }
}

fn validate_parent_id(parent_id: i64) -> Result<i64> {
    if parent_id <= 0 {
        return Err(SchoolDeskError::InvalidInput(format!("Invalid parent id: {}", parent_id)));
    }
    Ok(parent_id)
}

fn validate_name(name: &str) -> Result<String> {
    if !has_min_chars(name, 2) {
        return Err(SchoolDeskError::InvalidInput("Name must be at least 2 characters".to_string()));
    }
    Ok(normalize_whitespace(name))
}

fn validate_grade(grade: &str) -> Result<String> {
    let grade = grade.trim();
    if grade.is_empty() {
        return Err(SchoolDeskError::InvalidInput("Current grade is required".to_string()));
    }
    Ok(grade.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn request() -> CreateStudentRequest {
        CreateStudentRequest {
            parent_id: 1,
            name: "Nguyen Thi X".to_string(),
            dob: NaiveDate::from_ymd_opt(2010, 5, 15).unwrap(),
            gender: Some("FEMALE".to_string()),
            current_grade: "12A".to_string(),
        }
    }

    #[test]
    fn test_valid_student() {
        let student = request().validate().unwrap();
        assert_eq!(student.gender, Some(Gender::Female));
        assert_eq!(student.current_grade, "12A");
    }

    #[test]
    fn test_gender_is_optional() {
        let student = CreateStudentRequest { gender: None, ..request() }.validate().unwrap();
        assert!(student.gender.is_none());
    }

    #[test]
    fn test_invalid_student_fields() {
        assert_matches!(
            CreateStudentRequest { gender: Some("UNKNOWN".to_string()), ..request() }.validate(),
            Err(SchoolDeskError::InvalidInput(_))
        );
        assert!(CreateStudentRequest { parent_id: 0, ..request() }.validate().is_err());
        assert!(CreateStudentRequest { name: "X".to_string(), ..request() }.validate().is_err());
        assert!(CreateStudentRequest { current_grade: "  ".to_string(), ..request() }.validate().is_err());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"parentId":2,"name":"Tran Van Y","dob":"2011-08-20","gender":"MALE","currentGrade":"12B"}"#;
        let request: CreateStudentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.parent_id, 2);
        assert_eq!(request.current_grade, "12B");
    }
}
