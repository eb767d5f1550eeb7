use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::{Value, json};
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use crate::error::BrochureError;
use crate::middleware::auth::{AdminSession, SESSION_HEADER};
use crate::middleware::validation::{PlainJson, ValidatedJson};
use crate::router::BrochureState;
use crate::service::passwords;
use crate::types::requests::{LoginRequest, SetupRequest};
use crate::types::validate::Validate;

/// POST /api/admin/login
///
/// Unknown usernames and wrong passwords are indistinguishable to the
/// caller; both answer 401 `Invalid credentials`.
pub async fn login(
    State(state): State<BrochureState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<Value>, BrochureError> {
    let user = state
        .storage
        .get_user_by_username(&req.username)
        .await?
        .ok_or(BrochureError::InvalidCredentials)?;

    if !passwords::verify_password(&req.password, &user.password_hash) {
        warn!(username = %req.username, "login rejected: password mismatch");
        return Err(BrochureError::InvalidCredentials);
    }
    if !user.is_admin {
        warn!(username = %req.username, "login rejected: not an admin");
        return Err(BrochureError::Forbidden("Not authorized as admin"));
    }

    let session_id = state.sessions.create(&user).await?;
    info!(username = %user.username, "admin login");
    Ok(Json(json!({
        "success": true,
        "sessionId": session_id,
        "user": { "id": user.id, "username": user.username },
    })))
}

/// POST /api/admin/logout
///
/// Always answers success: destroying an absent or unknown session is a
/// no-op, and a failed delete is logged rather than surfaced.
pub async fn logout(State(state): State<BrochureState>, headers: HeaderMap) -> Json<Value> {
    if let Some(session_id) = headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok())
        && let Err(e) = state.sessions.destroy(session_id).await
    {
        error!(error = %e, "failed to destroy session on logout");
    }
    Json(json!({ "success": true }))
}

/// GET /api/admin/me
pub async fn me(AdminSession(session): AdminSession) -> Json<Value> {
    Json(json!({ "success": true, "user": { "username": session.username } }))
}

/// POST /api/admin/setup
///
/// Bootstrap endpoint: creates an admin account when the supplied setup
/// key matches the configured shared secret. The comparison is
/// constant-time and runs before the field rules; a wrong key answers
/// 403 even when the rest of the body is also invalid.
pub async fn setup(
    State(state): State<BrochureState>,
    PlainJson(req): PlainJson<SetupRequest>,
) -> Result<Json<Value>, BrochureError> {
    let supplied = req.setup_key.as_bytes();
    let expected = state.setup_key.as_bytes();
    if !bool::from(supplied.ct_eq(expected)) {
        warn!("setup rejected: setup key mismatch");
        return Err(BrochureError::Forbidden("Invalid setup key"));
    }

    req.validate().map_err(BrochureError::Validation)?;

    if state
        .storage
        .get_user_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(BrochureError::BadRequest("User already exists".to_string()));
    }

    let password_hash = passwords::hash_password(&req.password, state.bcrypt_cost)?;
    let user = state
        .storage
        .create_admin_user(&req.username, &password_hash)
        .await?;
    info!(username = %user.username, "admin account created");
    Ok(Json(json!({ "success": true, "message": "Admin user created" })))
}
