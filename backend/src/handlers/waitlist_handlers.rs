use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use crate::models::waitlist_models::WaitlistEntry;
use crate::AppState;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn failed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Failed to join waitlist"})),
    )
}

/// `POST /api/waitlist` with `{ "email": string }`.
///
/// The body is taken raw so that a non-JSON body maps to the same 500 as a
/// storage failure, while a JSON body without a usable `email` is a 400.
pub async fn join_waitlist(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Waitlist error: unreadable request body: {}", e);
        failed()
    })?;

    let email = match payload.get("email").and_then(Value::as_str) {
        Some(email) if is_valid_email(email) => email,
        _ => {
            tracing::debug!("Rejected waitlist submission with invalid email");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid email format"})),
            ));
        }
    };

    let entry = WaitlistEntry::new(email, Utc::now());
    if let Err(e) = state.store.append(entry).await {
        tracing::error!("Waitlist error: {}", e);
        sentry::capture_error(&e);
        return Err(failed());
    }

    tracing::info!("New waitlist signup");
    Ok(Json(json!({"message": "Successfully joined waitlist"})))
}
