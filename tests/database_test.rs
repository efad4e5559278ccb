//! PostgreSQL integration tests
//!
//! Skipped unless `TEST_DATABASE_URL` points at a disposable database.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;
use SchoolDesk::models::{ClassQuery, UpdateStudentRequest};
use SchoolDesk::scheduling::Weekday;
use SchoolDesk::services::ServiceFactory;
use SchoolDesk::SchoolDeskError;

async fn setup() -> Option<(TestDatabase, ServiceFactory)> {
    let db = TestDatabase::connect().await?;
    let services = ServiceFactory::new(&db.service);
    Some((db, services))
}

/// Parent plus `count` students, returning the student ids
async fn seed_students(services: &ServiceFactory, count: usize) -> Vec<i64> {
    let parent = services
        .parent_service
        .create_parent(create_parent_request("Jane Doe"))
        .await
        .unwrap();

    let mut ids = Vec::new();
    for n in 0..count {
        let student = services
            .student_service
            .create_student(create_student_request(parent.id, &format!("Student {}", n + 1)))
            .await
            .unwrap();
        ids.push(student.id);
    }
    ids
}

#[tokio::test]
#[serial]
async fn test_parent_and_student_round_trip() {
    let Some((_db, services)) = setup().await else { return };
    let students = seed_students(&services, 1).await;

    let details = services.student_service.get_student_details(students[0]).await.unwrap();
    assert_eq!(details.student.name, "Student 1");
    assert_eq!(details.parent.email, "jane.doe@example.com");

    let updated = services
        .student_service
        .update_student(
            students[0],
            UpdateStudentRequest { current_grade: Some("7".to_string()), ..Default::default() },
        )
        .await
        .unwrap();
    assert_eq!(updated.current_grade, "7");
    assert_eq!(updated.name, "Student 1");

    assert_matches!(
        services.student_service.get_student(9999).await,
        Err(SchoolDeskError::StudentNotFound { student_id: 9999 })
    );
}

#[tokio::test]
#[serial]
async fn test_student_requires_existing_parent() {
    let Some((_db, services)) = setup().await else { return };

    assert_matches!(
        services.student_service.create_student(create_student_request(404, "Orphan")).await,
        Err(SchoolDeskError::ParentNotFound { parent_id: 404 })
    );
}

#[tokio::test]
#[serial]
async fn test_class_listing_by_day_query() {
    let Some((_db, services)) = setup().await else { return };

    let weekday = services
        .class_service
        .create_class(create_class_request(&["MONDAY", "WEDNESDAY"], "8:0-9:30", 20))
        .await
        .unwrap();
    let weekend = services
        .class_service
        .create_class(create_class_request(&["SUNDAY", "SATURDAY", "SUNDAY"], "10:00-11:00", 20))
        .await
        .unwrap();

    assert_eq!(weekday.time_slot, "08:00-09:30");
    assert_eq!(weekend.days_of_week, vec![Weekday::Saturday, Weekday::Sunday]);

    let on_weekend = services
        .class_service
        .list_classes(ClassQuery { day: Some("WEEKEND".to_string()), days: vec![] })
        .await
        .unwrap();
    assert_eq!(on_weekend.iter().map(|c| c.id).collect::<Vec<_>>(), vec![weekend.id]);

    let explicit = services
        .class_service
        .list_classes(ClassQuery { day: Some("WEEKEND".to_string()), days: vec!["WEDNESDAY".to_string()] })
        .await
        .unwrap();
    assert_eq!(explicit.iter().map(|c| c.id).collect::<Vec<_>>(), vec![weekday.id]);

    let all = services.class_service.list_classes(ClassQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_registration_capacity_and_duplicates() {
    let Some((_db, services)) = setup().await else { return };
    let students = seed_students(&services, 2).await;
    let class = services
        .class_service
        .create_class(create_class_request(&["TUESDAY"], "15:00-16:00", 1))
        .await
        .unwrap();

    let enrollment = &services.enrollment_service;
    enrollment.register_student(class.id, students[0]).await.unwrap();

    assert_matches!(
        enrollment.register_student(class.id, students[1]).await,
        Err(SchoolDeskError::ClassFull { .. })
    );
    assert_matches!(
        enrollment.register_student(class.id, students[0]).await,
        Err(SchoolDeskError::AlreadyRegistered { .. })
    );

    let roster = services.class_service.list_class_students(class.id).await.unwrap();
    assert_eq!(roster.iter().map(|s| s.id).collect::<Vec<_>>(), vec![students[0]]);
}

#[tokio::test]
#[serial]
async fn test_registration_schedule_conflict() {
    let Some((_db, services)) = setup().await else { return };
    let students = seed_students(&services, 1).await;
    let class_service = &services.class_service;

    let class_a = class_service.create_class(create_class_request(&["MONDAY"], "08:00-10:00", 10)).await.unwrap();
    let class_b = class_service.create_class(create_class_request(&["MONDAY"], "09:00-09:30", 10)).await.unwrap();
    let class_c = class_service.create_class(create_class_request(&["TUESDAY"], "08:00-10:00", 10)).await.unwrap();

    let enrollment = &services.enrollment_service;
    enrollment.register_student(class_a.id, students[0]).await.unwrap();
    assert_matches!(
        enrollment.register_student(class_b.id, students[0]).await,
        Err(SchoolDeskError::ScheduleConflict { .. })
    );
    enrollment.register_student(class_c.id, students[0]).await.unwrap();

    assert!(class_service.list_class_students(class_b.id).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_registration_of_unknown_student() {
    let Some((_db, services)) = setup().await else { return };
    let class = services
        .class_service
        .create_class(create_class_request(&["FRIDAY"], "12:00-13:00", 5))
        .await
        .unwrap();

    assert_matches!(
        services.enrollment_service.register_student(class.id, 777).await,
        Err(SchoolDeskError::StudentNotFound { student_id: 777 })
    );
}

#[tokio::test]
#[serial]
async fn test_session_usage_until_exhausted() {
    let Some((_db, services)) = setup().await else { return };
    let students = seed_students(&services, 1).await;
    let subscription = services
        .subscription_service
        .create_subscription(create_subscription_request(students[0], 2))
        .await
        .unwrap();
    assert_eq!(subscription.used_sessions, 0);

    let enrollment = &services.enrollment_service;
    assert_eq!(enrollment.mark_session_used(subscription.id, students[0]).await.unwrap().used_sessions, 1);
    assert_eq!(enrollment.mark_session_used(subscription.id, students[0]).await.unwrap().used_sessions, 2);
    assert_matches!(
        enrollment.mark_session_used(subscription.id, students[0]).await,
        Err(SchoolDeskError::SessionsExhausted { total_sessions: 2, .. })
    );

    let stored = services
        .subscription_service
        .get_subscription(subscription.id, students[0])
        .await
        .unwrap();
    assert_eq!(stored.used_sessions, 2);

    let listed = services.subscription_service.list_subscriptions().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].student_name, "Student 1");
}
