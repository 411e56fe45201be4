use std::io::Cursor;

use serde::Serialize;
use serde_json::json;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

pub type HttpResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// CORS is open on every route, preflight included.
fn headers(extra: &[(&str, &str)]) -> Vec<Header> {
    [("Access-Control-Allow-Origin", "*")]
        .iter()
        .chain(extra)
        .filter_map(|(k, v)| Header::from_bytes(k.as_bytes(), v.as_bytes()).ok())
        .collect()
}

pub fn json_response<T: Serialize>(status: u16, body: &T) -> HttpResponse {
    let bytes = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    let len = bytes.len();
    Response::new(
        StatusCode(status),
        headers(&[("Content-Type", "application/json")]),
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn error_response(status: u16, message: &str) -> HttpResponse {
    json_response(status, &json!({ "error": message }))
}

pub fn preflight() -> HttpResponse {
    Response::new(
        StatusCode(204),
        headers(&[
            ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ]),
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> HttpResponse {
    error_response(404, "Not found")
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler and sends the
/// response. Runs on the request's own thread.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    let response = match (&method, path.as_str()) {
        (Method::Post,    "/predict") => handlers::predict::handle(&mut request, &state),
        (Method::Options, "/predict") => preflight(),
        (Method::Get,     "/health")  => handlers::health::handle(),
        _ => not_found(),
    };

    tracing::debug!(%method, path = %path, status = response.status_code().0, "request served");
    if let Err(e) = request.respond(response) {
        tracing::warn!(error = %e, "failed to send response");
    }
}
