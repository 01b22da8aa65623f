use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::io::rest::errors::ApiError;

/// JSON body extractor whose rejections are JSON:API error documents.
///
/// Unlike `axum::Json` it does not insist on `application/json`; the media
/// type is negotiated by the header middleware.
pub struct JsonApiBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonApiBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                detail: e.body_text(),
                parameter: None,
            })?;

        serde_json::from_slice(&bytes)
            .map(JsonApiBody)
            .map_err(|e| ApiError::BadRequest {
                detail: format!("Malformed request document: {}", e),
                parameter: None,
            })
    }
}

/// `axum::extract::Path` with JSON:API error documents as rejections
pub struct JsonApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for JsonApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(JsonApiPath(value)),
            // Missing route parameters are a wiring fault, not a client error.
            Err(e) if e.status().is_server_error() => Err(ApiError::Internal(e.body_text())),
            Err(e) => Err(ApiError::BadRequest {
                detail: e.body_text(),
                parameter: None,
            }),
        }
    }
}
