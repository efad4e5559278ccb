//! HTTP handlers for the REST API.
//!
//! Each handler unwraps its extractors, delegates to one service call and
//! shapes the answer. Extractor rejections surface as `INVALID_INPUT`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{CreatedResponse, HealthResponse, RegisterRequest, RegistrationResponse, SessionUsedResponse};
use super::state::AppState;
use crate::models::{
    ClassQuery, ClassSession, CreateClassRequest, CreateParentRequest, CreateStudentRequest,
    CreateSubscriptionRequest, Parent, Student, StudentDetails, StudentRef, Subscription,
    SubscriptionWithStudent, UpdateParentRequest, UpdateStudentRequest,
};
use crate::utils::errors::SchoolDeskError;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, SchoolDeskError>;

pub type CreatedResult = Result<(StatusCode, Json<CreatedResponse>), SchoolDeskError>;

type IdPath = Result<Path<i64>, PathRejection>;
type Body<T> = Result<Json<T>, JsonRejection>;

fn created(entity: &str, id: i64) -> (StatusCode, Json<CreatedResponse>) {
    (StatusCode::CREATED, Json(CreatedResponse::new(entity, id)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.database.health_check().await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        database,
    }))
}

// =============================================================================
// Parents
// =============================================================================

pub async fn create_parent(State(state): State<AppState>, payload: Body<CreateParentRequest>) -> CreatedResult {
    let Json(request) = payload?;
    let parent = state.services.parent_service.create_parent(request).await?;
    Ok(created("Parent", parent.id))
}

pub async fn list_parents(State(state): State<AppState>) -> HandlerResult<Vec<Parent>> {
    Ok(Json(state.services.parent_service.list_parents().await?))
}

pub async fn get_parent(State(state): State<AppState>, id: IdPath) -> HandlerResult<Parent> {
    let Path(parent_id) = id?;
    Ok(Json(state.services.parent_service.get_parent(parent_id).await?))
}

pub async fn update_parent(
    State(state): State<AppState>,
    id: IdPath,
    payload: Body<UpdateParentRequest>,
) -> HandlerResult<Parent> {
    let Path(parent_id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.services.parent_service.update_parent(parent_id, request).await?))
}

// =============================================================================
// Students
// =============================================================================

pub async fn create_student(State(state): State<AppState>, payload: Body<CreateStudentRequest>) -> CreatedResult {
    let Json(request) = payload?;
    let student = state.services.student_service.create_student(request).await?;
    Ok(created("Student", student.id))
}

pub async fn list_students(State(state): State<AppState>) -> HandlerResult<Vec<Student>> {
    Ok(Json(state.services.student_service.list_students().await?))
}

/// GET /students/:id, with the parent embedded
pub async fn get_student(State(state): State<AppState>, id: IdPath) -> HandlerResult<StudentDetails> {
    let Path(student_id) = id?;
    Ok(Json(state.services.student_service.get_student_details(student_id).await?))
}

pub async fn update_student(
    State(state): State<AppState>,
    id: IdPath,
    payload: Body<UpdateStudentRequest>,
) -> HandlerResult<Student> {
    let Path(student_id) = id?;
    let Json(request) = payload?;
    Ok(Json(state.services.student_service.update_student(student_id, request).await?))
}

// =============================================================================
// Classes
// =============================================================================

pub async fn create_class(State(state): State<AppState>, payload: Body<CreateClassRequest>) -> CreatedResult {
    let Json(request) = payload?;
    let class = state.services.class_service.create_class(request).await?;
    Ok(created("Class", class.id))
}

/// GET /classes?day=WEEKEND or ?days=MONDAY&days=FRIDAY
pub async fn list_classes(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> HandlerResult<Vec<ClassSession>> {
    let Query(pairs) = query?;
    let classes = state.services.class_service.list_classes(ClassQuery::from_pairs(pairs)).await?;
    Ok(Json(classes))
}

pub async fn get_class(State(state): State<AppState>, id: IdPath) -> HandlerResult<ClassSession> {
    let Path(class_id) = id?;
    Ok(Json(state.services.class_service.get_class(class_id).await?))
}

pub async fn list_class_students(State(state): State<AppState>, id: IdPath) -> HandlerResult<Vec<Student>> {
    let Path(class_id) = id?;
    Ok(Json(state.services.class_service.list_class_students(class_id).await?))
}

/// POST /classes/:id/register
pub async fn register_student(
    State(state): State<AppState>,
    id: IdPath,
    payload: Body<RegisterRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), SchoolDeskError> {
    let Path(class_id) = id?;
    let Json(request) = payload?;

    let registration = state
        .services
        .enrollment_service
        .register_student(class_id, request.student_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "Student registered successfully".to_string(),
            registration,
        }),
    ))
}

// =============================================================================
// Subscriptions
// =============================================================================

pub async fn create_subscription(
    State(state): State<AppState>,
    payload: Body<CreateSubscriptionRequest>,
) -> CreatedResult {
    let Json(request) = payload?;
    let subscription = state.services.subscription_service.create_subscription(request).await?;
    Ok(created("Subscription", subscription.id))
}

pub async fn list_subscriptions(State(state): State<AppState>) -> HandlerResult<Vec<SubscriptionWithStudent>> {
    Ok(Json(state.services.subscription_service.list_subscriptions().await?))
}

/// GET /subscriptions/:id?studentId=
pub async fn get_subscription(
    State(state): State<AppState>,
    id: IdPath,
    query: Result<Query<StudentRef>, QueryRejection>,
) -> HandlerResult<Subscription> {
    let Path(subscription_id) = id?;
    let Query(owner) = query?;
    let subscription = state
        .services
        .subscription_service
        .get_subscription(subscription_id, owner.student_id)
        .await?;
    Ok(Json(subscription))
}

/// PATCH /subscriptions/:id/use
pub async fn mark_session_used(
    State(state): State<AppState>,
    id: IdPath,
    payload: Body<StudentRef>,
) -> HandlerResult<SessionUsedResponse> {
    let Path(subscription_id) = id?;
    let Json(owner) = payload?;

    let subscription = state
        .services
        .enrollment_service
        .mark_session_used(subscription_id, owner.student_id)
        .await?;

    Ok(Json(SessionUsedResponse {
        message: "Session marked as used".to_string(),
        remaining_sessions: subscription.remaining_sessions(),
        subscription,
    }))
}
