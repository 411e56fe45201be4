use std::io::Read;

use serde_json::{json, Value};
use tiny_http::Request;

use skin_gate::{PredictError, Pipeline, SkinClassifier};

use crate::routes::{error_response, json_response, HttpResponse};
use crate::state::AppState;
use crate::util::multipart::{extract_boundary, multipart_extract_file_by_name};

/// Multipart field carrying the photo.
const FILE_FIELD: &str = "file";

#[derive(Debug)]
enum BodyError {
    TooLarge,
    Io(std::io::Error),
}

/// Reads at most `limit` bytes; one more means the upload is too large.
fn read_limited(reader: impl Read, limit: usize) -> Result<Vec<u8>, BodyError> {
    let mut body = Vec::new();
    reader
        .take(limit as u64 + 1)
        .read_to_end(&mut body)
        .map_err(BodyError::Io)?;
    if body.len() > limit {
        return Err(BodyError::TooLarge);
    }
    Ok(body)
}

pub fn handle(request: &mut Request, state: &AppState) -> HttpResponse {
    let limit = state.settings.max_upload_bytes;
    if request.body_length().is_some_and(|len| len > limit) {
        return error_response(413, "Upload too large");
    }

    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let body = match read_limited(request.as_reader(), limit) {
        Ok(body) => body,
        Err(BodyError::TooLarge) => return error_response(413, "Upload too large"),
        Err(BodyError::Io(e)) => {
            tracing::warn!(error = %e, "could not read request body");
            return error_response(400, "Could not read request body");
        }
    };

    let (status, reply) = respond(&state.pipeline, &content_type, &body);
    json_response(status, &reply)
}

/// Status and JSON body for one upload.
fn respond<C: SkinClassifier>(pipeline: &Pipeline<C>, content_type: &str, body: &[u8]) -> (u16, Value) {
    let upload = extract_boundary(content_type)
        .and_then(|boundary| multipart_extract_file_by_name(body, &boundary, FILE_FIELD));

    match pipeline.predict_upload(upload.as_deref()) {
        Ok(prediction) => (200, json!(prediction)),
        Err(PredictError::MissingInput) => (400, json!({ "error": "No file uploaded" })),
        Err(e) => {
            tracing::error!(stage = e.stage(), error = %e, "prediction failed");
            (500, json!({ "error": "Failed to get prediction", "details": e.to_string() }))
        }
    }
}
