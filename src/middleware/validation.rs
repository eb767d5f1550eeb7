use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::BrochureError;
use crate::types::validate::Validate;

/// JSON body extractor that folds undecodable payloads into this API's
/// 400 envelope, instead of surfacing axum's stock rejections (415/422
/// with a plain-text body). Carries no field checks; a handler that has
/// to judge something before the field rules takes this and runs
/// [`Validate`] itself.
pub struct PlainJson<T>(pub T);

impl<S, T> FromRequest<S> for PlainJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BrochureError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| BrochureError::BadRequest("Invalid JSON body".to_string()))?;
        Ok(PlainJson(body))
    }
}

/// [`PlainJson`] plus the body's [`Validate`] checks; failed field
/// checks answer with the same 400 envelope.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = BrochureError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let PlainJson(body) = PlainJson::<T>::from_request(req, state).await?;
        body.validate().map_err(BrochureError::Validation)?;
        Ok(ValidatedJson(body))
    }
}
