//! Custom Axum extractors
//!
//! Decode failures become [`ApiError::Validation`] (422), whatever part of
//! the request was wrong. Body transport failures (size limit, aborted
//! upload) keep axum's own status.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body that rejects with 422 on bad syntax, wrong types, missing
/// fields or a missing `application/json` content type.
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::BytesRejection(_) => ApiError::Rejected {
                    status: rejection.status(),
                    detail: rejection.body_text(),
                },
                other => ApiError::Validation(other.body_text()),
            })?;

        Ok(Self(value))
    }
}

/// Extract an integer todo id from the `{id}` path segment
///
/// Any integer is accepted. One that cannot be a stored id (outside the
/// `SERIAL` range) resolves to [`ApiError::NotFound`], the same answer as
/// an id that simply has no row; only non-integers are 422.
pub struct TodoId(pub i32);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        parse_todo_id(&raw).map(Self)
    }
}

fn parse_todo_id(raw: &str) -> Result<i32, ApiError> {
    if let Ok(id) = raw.parse::<i32>() {
        return Ok(id);
    }

    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Err(ApiError::NotFound)
    } else {
        Err(ApiError::Validation(format!(
            "Invalid URL: id must be an integer, got `{raw}`"
        )))
    }
}
