//! tiny_http server adapter
//!
//! Handles routing, caller resolution, body parsing, and response conversion
//! for tiny_http.

use std::io::{Cursor, Read as _};

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use mentor_verify::api::{self, ApiError, ApiResponse, VerifyRequest};
use mentor_verify::core::services::Orchestrator;

/// Header carrying the authenticated caller id
pub const USER_HEADER: &str = "X-User-Id";

/// Upper bound on a request body
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
///
/// This is the main routing function that maps URL paths to handlers.
pub async fn handle_api_request(
    orchestrator: &Orchestrator,
    request: &mut Request,
) -> Response<Cursor<Vec<u8>>> {
    let path = request.url().split('?').next().unwrap_or_default().to_string();
    let method = request.method().clone();
    let caller = caller_id(request);

    let Some(api_path) = path.strip_prefix("/api/v1") else {
        return not_found_response(&format!("API endpoint not found: {method} {path}"));
    };

    match (&method, api_path) {
        (&Method::Get, "/health") => success_response(api::health()),
        (&Method::Get, "/status") => {
            handle_result(api::get_status(orchestrator, caller.as_deref()).await)
        },
        (&Method::Get, "/eligibility") => {
            handle_result(api::get_eligibility(orchestrator, caller.as_deref()).await)
        },
        (&Method::Post, "/verify") => match read_json_body::<VerifyRequest>(request) {
            Ok(req) => handle_result(api::verify(orchestrator, caller.as_deref(), req).await),
            Err(e) => error_response(&e),
        },

        // 404 for unknown API routes
        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

/// Caller id from the identity header
fn caller_id(request: &Request) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(USER_HEADER))
        .map(|h| h.value.as_str().trim().to_string())
        .filter(|id| !id.is_empty())
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read and parse JSON body from request
fn read_json_body<T: DeserializeOwned>(request: &mut Request) -> Result<T, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;

    serde_json::from_str(&body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Convert a handler result to an HTTP response
fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Response<Cursor<Vec<u8>>> {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}

/// Create a successful JSON response
fn success_response<T: Serialize>(data: T) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> Response<Cursor<Vec<u8>>> {
    if error.status_code() >= 500 {
        log::error!("request failed: {error}");
    }
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> Response<Cursor<Vec<u8>>> {
    let response = ApiResponse::<()>::error("NOT_FOUND", message);
    json_response(&response, 404)
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> Response<Cursor<Vec<u8>>> {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    let response = Response::from_data(json.into_bytes()).with_status_code(StatusCode(status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
