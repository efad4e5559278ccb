//! Logging middleware
//!
//! Tags every request with a fresh request id, runs the rest of the stack
//! inside a span carrying it, and logs the outcome with its latency.

use std::time::Instant;
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{info, info_span, warn, error, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request logger, mounted with `axum::middleware::from_fn`
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let span = info_span!("request", request_id = %request_id, method = %method, path = %path);
    let mut response = next.run(request).instrument(span).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        error!(request_id = %request_id, method = %method, path = %path, status = status.as_u16(), latency_ms, "Request failed");
    } else if status.is_client_error() {
        warn!(request_id = %request_id, method = %method, path = %path, status = status.as_u16(), latency_ms, "Request rejected");
    } else {
        info!(request_id = %request_id, method = %method, path = %path, status = status.as_u16(), latency_ms, "Request completed");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
