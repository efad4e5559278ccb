//! Parent model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::utils::errors::{SchoolDeskError, Result};
use crate::utils::helpers::{has_min_chars, is_valid_email, is_valid_phone, normalize_whitespace};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParentRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CreateParentRequest {
    /// Check field shapes and return a cleaned copy
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: validate_name(&self.name)?,
            phone: validate_phone(&self.phone)?,
            email: validate_email(&self.email)?,
        })
    }
}

impl UpdateParentRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: self.name.as_deref().map(validate_name).transpose()?,
            phone: self.phone.as_deref().map(validate_phone).transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
        })
    }
}

fn validate_name(name: &str) -> Result<String> {
    if !has_min_chars(name, 2) {
        return Err(SchoolDeskError::InvalidInput("Name must be at least 2 characters".to_string()));
    }
    Ok(normalize_whitespace(name))
}

fn validate_phone(phone: &str) -> Result<String> {
    let phone = phone.trim();
    if !is_valid_phone(phone) {
        return Err(SchoolDeskError::InvalidInput(format!("Invalid phone number: {}", phone)));
    }
    Ok(phone.to_string())
}

fn validate_email(email: &str) -> Result<String> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(SchoolDeskError::InvalidInput(format!("Invalid email: {}", email)));
    }
    Ok(email.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateParentRequest {
        CreateParentRequest {
            name: " Nguyen  Van A ".to_string(),
            phone: "0987654321".to_string(),
            email: "Nguyen.Van.A@gmail.com".to_string(),
        }
    }

    #[test]
    fn test_valid_parent_is_cleaned() {
        let parent = request().validate().unwrap();
        assert_eq!(parent.name, "Nguyen Van A");
        assert_eq!(parent.email, "nguyen.van.a@gmail.com");
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        assert!(CreateParentRequest { name: "A".to_string(), ..request() }.validate().is_err());
        assert!(CreateParentRequest { phone: "12345".to_string(), ..request() }.validate().is_err());
        assert!(CreateParentRequest { email: "nope".to_string(), ..request() }.validate().is_err());
    }

    #[test]
    fn test_partial_update_only_checks_present_fields() {
        let update = UpdateParentRequest { phone: Some("0912345678".to_string()), ..Default::default() };
        let update = update.validate().unwrap();
        assert!(update.name.is_none());
        assert_eq!(update.phone.as_deref(), Some("0912345678"));

        let update = UpdateParentRequest { email: Some("bad".to_string()), ..Default::default() };
        assert!(update.validate().is_err());
    }
}
