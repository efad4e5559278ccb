//! Request and response bodies that are not entity models.

use serde::{Deserialize, Serialize};
use crate::models::{ClassRegistration, Subscription};

/// Answer to a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

impl CreatedResponse {
    pub fn new(entity: &str, id: i64) -> Self {
        Self {
            message: format!("{} created successfully", entity),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Body of `POST /classes/:id/register`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub registration: ClassRegistration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUsedResponse {
    pub message: String,
    pub remaining_sessions: i32,
    pub subscription: Subscription,
}
