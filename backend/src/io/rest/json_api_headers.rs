//! Media type negotiation for the JSON:API endpoints.

use axum::{
    extract::Request,
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, Method,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::JSON_API_MEDIA_TYPE;
use tracing::warn;

use crate::io::rest::errors::ApiError;

/// Rejects requests that do not speak `application/vnd.api+json`.
///
/// Responses pass through untouched: handlers, [`ApiError`] and the router
/// fallbacks label their own bodies, so a body rendered elsewhere keeps its
/// real media type.
pub async fn validate_json_api_headers(request: Request, next: Next) -> Response {
    if !accepts_json_api(request.headers()) {
        warn!("{} {} - missing JSON:API Accept header", request.method(), request.uri());
        return ApiError::NotAcceptable.into_response();
    }

    let is_mutation = matches!(*request.method(), Method::POST | Method::PATCH);
    if is_mutation && !has_json_api_content_type(request.headers()) {
        warn!("{} {} - unsupported Content-Type", request.method(), request.uri());
        return ApiError::UnsupportedMediaType.into_response();
    }

    next.run(request).await
}

fn media_type_essence(value: &str) -> &str {
    value.split(';').next().unwrap_or("").trim()
}

fn accepts_json_api(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|range| media_type_essence(range).eq_ignore_ascii_case(JSON_API_MEDIA_TYPE))
}

fn has_json_api_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| media_type_essence(value).eq_ignore_ascii_case(JSON_API_MEDIA_TYPE))
        .unwrap_or(false)
}
