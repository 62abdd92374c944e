use axum::{async_trait, extract::FromRequestParts, http::{header::AUTHORIZATION, request::Parts}};

use crate::{error::AppError, utils};

/// Caller's upstream token, taken from the `Authorization` header
///
/// Rejects with 401 `{"error":"Unauthorized"}` when the header is missing or
/// blank, before the handler runs.
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(utils::normalize_token)
            .map(|token| BearerToken(token.to_string()))
            .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))
    }
}
