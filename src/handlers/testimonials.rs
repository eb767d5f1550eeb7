use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;

use crate::db::models::Testimonial;
use crate::error::BrochureError;
use crate::middleware::auth::AdminSession;
use crate::middleware::validation::ValidatedJson;
use crate::router::BrochureState;
use crate::types::requests::{TestimonialCreate, TestimonialPatch};

/// GET /api/testimonials. Public, sorted by display order.
pub async fn list_testimonials(
    State(state): State<BrochureState>,
) -> Result<Json<Vec<Testimonial>>, BrochureError> {
    Ok(Json(state.storage.list_testimonials().await?))
}

/// POST /api/admin/testimonials
pub async fn create_testimonial(
    State(state): State<BrochureState>,
    _admin: AdminSession,
    ValidatedJson(body): ValidatedJson<TestimonialCreate>,
) -> Result<(StatusCode, Json<Value>), BrochureError> {
    let testimonial = state.storage.create_testimonial(&body).await?;
    info!(id = %testimonial.id, "testimonial created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "testimonial": testimonial })),
    ))
}

/// PUT /api/admin/testimonials/{id}
pub async fn update_testimonial(
    State(state): State<BrochureState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<TestimonialPatch>,
) -> Result<Json<Value>, BrochureError> {
    let testimonial = state
        .storage
        .update_testimonial(&id, &patch)
        .await?
        .ok_or(BrochureError::NotFound("Testimonial"))?;
    info!(id = %testimonial.id, "testimonial updated");
    Ok(Json(json!({ "success": true, "testimonial": testimonial })))
}

/// DELETE /api/admin/testimonials/{id}
///
/// Reports success whether or not the id existed.
pub async fn delete_testimonial(
    State(state): State<BrochureState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> Result<Json<Value>, BrochureError> {
    state.storage.delete_testimonial(&id).await?;
    info!(id = %id, "testimonial delete handled");
    Ok(Json(json!({ "success": true })))
}
