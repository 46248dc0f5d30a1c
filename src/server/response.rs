use crate::error::CreateError;
use crate::package::Payload;
use may_minihttp::Response;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// `may_minihttp` wants `'static` header lines.
///
/// Content types and attachment names come from small fixed sets, so each
/// distinct line is leaked once and reused afterwards.
fn intern_header(line: String) -> &'static str {
    static LINES: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    let lines = LINES.get_or_init(|| Mutex::new(HashSet::new()));
    let mut lines = match lines.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(existing) = lines.get(line.as_str()) {
        return existing;
    }
    let leaked: &'static str = Box::leak(line.into_boxed_str());
    lines.insert(leaked);
    leaked
}

pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    write_json(res, status, &body);
}

/// JSON body for a failed request: `{"error": ..., "field": ...}`.
pub fn error_body(err: &CreateError) -> Value {
    match err.field() {
        Some(field) => json!({ "error": err.to_string(), "field": field }),
        None => json!({ "error": err.to_string() }),
    }
}

pub fn write_create_error(res: &mut Response, err: &CreateError) {
    write_json_error(res, err.status(), error_body(err));
}

/// Status and content type without a body.
pub fn write_status_only(res: &mut Response, status: u16, content_type: &'static str) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type);
}

pub fn write_html(res: &mut Response, html: String) {
    res.status_code(200, "OK");
    res.header("Content-Type: text/html; charset=UTF-8");
    res.body_vec(html.into_bytes());
}

/// Artifact body with its content type and, for attachments, a
/// `Content-Disposition` header.
pub fn write_payload(res: &mut Response, payload: Payload) {
    res.status_code(200, "OK");
    res.header(intern_header(format!("Content-Type: {}", payload.content_type)));
    if let Some(disposition) = payload.content_disposition() {
        res.header(intern_header(disposition));
    }
    res.body_vec(payload.bytes);
}
