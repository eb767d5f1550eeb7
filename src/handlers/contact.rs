use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;

use crate::db::models::ContactSubmission;
use crate::error::BrochureError;
use crate::middleware::auth::AdminSession;
use crate::middleware::validation::ValidatedJson;
use crate::router::BrochureState;
use crate::types::requests::ContactForm;

/// POST /api/contact, the public form submission endpoint.
pub async fn submit_contact(
    State(state): State<BrochureState>,
    ValidatedJson(form): ValidatedJson<ContactForm>,
) -> Result<(StatusCode, Json<Value>), BrochureError> {
    let submission = state.storage.create_submission(&form).await?;
    info!(id = %submission.id, "contact submission stored");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Contact submission received successfully",
            "id": submission.id,
        })),
    ))
}

/// GET /api/contact, the admin inbox. Newest first.
pub async fn list_submissions(
    State(state): State<BrochureState>,
    _admin: AdminSession,
) -> Result<Json<Vec<ContactSubmission>>, BrochureError> {
    Ok(Json(state.storage.list_submissions().await?))
}
