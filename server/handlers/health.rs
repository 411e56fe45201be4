use serde_json::json;

use crate::routes::{json_response, HttpResponse};

pub fn handle() -> HttpResponse {
    json_response(200, &json!({ "status": "ok" }))
}
