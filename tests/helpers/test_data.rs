//! Test data helpers for creating test objects

use chrono::{Duration, NaiveDate, Utc};
use SchoolDesk::models::{
    CreateClassRequest, CreateParentRequest, CreateStudentRequest, CreateSubscriptionRequest,
    DaySelection, NewClassSession, NewSubscription, PackageName,
};
use SchoolDesk::scheduling::Weekday;

/// A validated class on `days` in `time_slot`
pub fn new_class(days: &[Weekday], time_slot: &str, max_students: i32) -> NewClassSession {
    NewClassSession {
        subject: "Mathematics".to_string(),
        teacher_name: "Mr. John Doe".to_string(),
        max_students,
        time_slot: time_slot.to_string(),
        days_of_week: days.to_vec(),
    }
}

/// A validated subscription starting tomorrow
pub fn new_subscription(student_id: i64, total_sessions: i32) -> NewSubscription {
    let start_date = Utc::now() + Duration::days(1);
    NewSubscription {
        student_id,
        package_name: PackageName::Basic,
        start_date,
        end_date: start_date + Duration::days(30),
        total_sessions,
    }
}

pub fn create_parent_request(name: &str) -> CreateParentRequest {
    CreateParentRequest {
        name: name.to_string(),
        phone: "0123456789".to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
    }
}

pub fn create_student_request(parent_id: i64, name: &str) -> CreateStudentRequest {
    CreateStudentRequest {
        parent_id,
        name: name.to_string(),
        dob: NaiveDate::from_ymd_opt(2012, 5, 17).expect("valid date"),
        gender: Some("FEMALE".to_string()),
        current_grade: "6".to_string(),
    }
}

pub fn create_class_request(days: &[&str], time_slot: &str, max_students: i32) -> CreateClassRequest {
    CreateClassRequest {
        subject: "Physics".to_string(),
        day_of_week: DaySelection::Days(days.iter().map(|d| d.to_string()).collect()),
        time_slot: time_slot.to_string(),
        teacher_name: "Ms. Curie".to_string(),
        max_students,
    }
}

pub fn create_subscription_request(student_id: i64, total_sessions: i32) -> CreateSubscriptionRequest {
    let start_date = Utc::now() + Duration::days(1);
    CreateSubscriptionRequest {
        student_id,
        package_name: "STANDARD".to_string(),
        start_date,
        end_date: start_date + Duration::days(60),
        total_sessions,
    }
}
