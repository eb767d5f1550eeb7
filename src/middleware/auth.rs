use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::db::models::Session;
use crate::error::BrochureError;
use crate::router::BrochureState;

/// Header carrying the opaque session id issued at login.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extractor guarding admin-only routes.
///
/// Resolves `x-session-id` against the session registry and rejects
/// with 401 unless it maps to a live admin session. Extractor order in
/// handler signatures puts this before the body, so rejected requests
/// are never parsed or validated.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    BrochureState: FromRef<S>,
{
    type Rejection = BrochureError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = BrochureState::from_ref(state);

        let session_id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(BrochureError::Unauthorized)?;

        let session = state
            .sessions
            .lookup(session_id)
            .await?
            .ok_or(BrochureError::Unauthorized)?;

        if !session.is_admin {
            return Err(BrochureError::Unauthorized);
        }

        Ok(AdminSession(session))
    }
}
