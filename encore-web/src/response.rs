//! Response envelope
//!
//! Every successful response is `{"data": ..., "messages": [...]}`. One-shot
//! notices ("You have been logged out.") ride the `messages` list of the
//! response they belong to, so there is no ambient flash state to thread
//! between requests.

use axum::Json;
use serde_json::{json, Value};

/// Envelope with no notices
pub fn envelope(data: Value) -> Json<Value> {
    Json(json!({ "data": data, "messages": [] }))
}

/// Envelope carrying one-shot notices for this response
pub fn envelope_with(data: Value, messages: &[&str]) -> Json<Value> {
    Json(json!({ "data": data, "messages": messages }))
}
