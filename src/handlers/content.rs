use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};
use tracing::info;

use crate::db::models::SiteSection;
use crate::error::BrochureError;
use crate::middleware::auth::AdminSession;
use crate::middleware::validation::ValidatedJson;
use crate::router::BrochureState;
use crate::types::requests::{ContactInfoBody, SectionBody};

/// GET /api/content
pub async fn list_sections(
    State(state): State<BrochureState>,
) -> Result<Json<Vec<SiteSection>>, BrochureError> {
    Ok(Json(state.storage.list_sections().await?))
}

/// GET /api/content/{key}
pub async fn get_section(
    State(state): State<BrochureState>,
    Path(key): Path<String>,
) -> Result<Json<SiteSection>, BrochureError> {
    state
        .storage
        .get_section(&key)
        .await?
        .map(Json)
        .ok_or(BrochureError::NotFound("Section"))
}

/// PUT /api/admin/content/{key}
///
/// The path key wins over anything in the body.
pub async fn upsert_section(
    State(state): State<BrochureState>,
    _admin: AdminSession,
    Path(key): Path<String>,
    ValidatedJson(body): ValidatedJson<SectionBody>,
) -> Result<Json<Value>, BrochureError> {
    let section = state.storage.upsert_section(&key, &body).await?;
    info!(key = %section.key, "site section upserted");
    Ok(Json(json!({ "success": true, "section": section })))
}

/// GET /api/contact-info
///
/// Answers `{}` until the singleton row has been populated.
pub async fn get_contact_info(
    State(state): State<BrochureState>,
) -> Result<Json<Value>, BrochureError> {
    match state.storage.get_contact_info().await? {
        Some(contact) => Ok(Json(serde_json::to_value(contact)?)),
        None => Ok(Json(json!({}))),
    }
}

/// PUT /api/admin/contact-info
pub async fn upsert_contact_info(
    State(state): State<BrochureState>,
    _admin: AdminSession,
    ValidatedJson(body): ValidatedJson<ContactInfoBody>,
) -> Result<Json<Value>, BrochureError> {
    let contact = state.storage.upsert_contact_info(&body).await?;
    info!("contact info upserted");
    Ok(Json(json!({ "success": true, "info": contact })))
}
