//! Subscription model
//!
//! A subscription is a prepaid package of sessions. `used_sessions` only ever
//! grows, one session at a time, and never passes `total_sessions`.

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::utils::errors::{SchoolDeskError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: i64,
    pub student_id: i64,
    pub package_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_sessions: i32,
    pub used_sessions: i32,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn remaining_sessions(&self) -> i32 {
        (self.total_sessions - self.used_sessions).max(0)
    }

    pub fn is_exhausted(&self) -> bool {
        self.used_sessions >= self.total_sessions
    }
}

/// Subscription listed together with the student's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWithStudent {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub subscription: Subscription,
    pub student_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageName {
    Basic,
    Standard,
    Premium,
}

impl PackageName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageName::Basic => "BASIC",
            PackageName::Standard => "STANDARD",
            PackageName::Premium => "PREMIUM",
        }
    }
}

impl FromStr for PackageName {
    type Err = SchoolDeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BASIC" => Ok(PackageName::Basic),
            "STANDARD" => Ok(PackageName::Standard),
            "PREMIUM" => Ok(PackageName::Premium),
            _ => Err(SchoolDeskError::InvalidInput(format!("Invalid package name: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub student_id: i64,
    pub package_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_sessions: i32,
}

/// A subscription whose fields passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub student_id: i64,
    pub package_name: PackageName,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_sessions: i32,
}

impl CreateSubscriptionRequest {
    /// Validate against the current instant `now`
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewSubscription> {
        if self.student_id <= 0 {
            return Err(SchoolDeskError::InvalidInput(format!("Invalid student id: {}", self.student_id)));
        }

        let package_name = self.package_name.parse::<PackageName>()?;

        if self.total_sessions <= 0 {
            return Err(SchoolDeskError::InvalidInput("Total sessions must be greater than 0".to_string()));
        }
        if self.start_date <= now {
            return Err(SchoolDeskError::InvalidInput("Start date must be in the future".to_string()));
        }
        if self.end_date <= self.start_date {
            return Err(SchoolDeskError::InvalidInput("End date must be after start date".to_string()));
        }

        Ok(NewSubscription {
            student_id: self.student_id,
            package_name,
            start_date: self.start_date,
            end_date: self.end_date,
            total_sessions: self.total_sessions,
        })
    }
}

/// Body of requests that act on a student's subscription
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub student_id: i64,
}
