//! JSON:API error formatting.
//!
//! Every failure leaving the REST layer goes through [`ApiError`], which
//! renders an `{"errors": [...]}` document with the JSON:API media type.

use axum::{
    extract::OriginalUri,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use shared::{ErrorDocument, ErrorObject, ErrorSource, JSON_API_MEDIA_TYPE};
use tracing::error;

use crate::domain::validation::ValidationErrors;
use crate::domain::ArticleError;

const VALIDATION_TITLE: &str = "The given data was invalid.";

/// One failed rule located by a JSON pointer into the request document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub pointer: String,
    pub code: &'static str,
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(pointer: impl Into<String>, code: &'static str, detail: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            code,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request document failed validation")]
    Unprocessable(Vec<ValidationIssue>),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {detail}")]
    BadRequest {
        detail: String,
        parameter: Option<String>,
    },
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Not acceptable")]
    NotAcceptable,
    #[error("Unsupported media type")]
    UnsupportedMediaType,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_objects(&self) -> Vec<ErrorObject> {
        let status = self.status();
        let simple = |title: &str, detail: String, source: Option<ErrorSource>| ErrorObject {
            status: Some(status.as_u16().to_string()),
            code: None,
            title: title.to_string(),
            detail,
            source,
        };

        match self {
            ApiError::Unprocessable(issues) => issues
                .iter()
                .map(|issue| ErrorObject {
                    status: Some(status.as_u16().to_string()),
                    code: Some(issue.code.to_string()),
                    title: VALIDATION_TITLE.to_string(),
                    detail: issue.detail.clone(),
                    source: Some(ErrorSource::pointer(issue.pointer.clone())),
                })
                .collect(),
            ApiError::NotFound(detail) => vec![simple("Not Found", detail.clone(), None)],
            ApiError::BadRequest { detail, parameter } => vec![simple(
                "Bad Request",
                detail.clone(),
                parameter.clone().map(ErrorSource::parameter),
            )],
            ApiError::MethodNotAllowed => vec![simple(
                "Method Not Allowed",
                "The requested method is not supported by this resource".to_string(),
                None,
            )],
            ApiError::NotAcceptable => vec![simple(
                "Not Acceptable",
                format!("The Accept header must include {}", JSON_API_MEDIA_TYPE),
                None,
            )],
            ApiError::UnsupportedMediaType => vec![simple(
                "Unsupported Media Type",
                format!("The Content-Type header must be {}", JSON_API_MEDIA_TYPE),
                None,
            )],
            // Do not leak implementation details to clients.
            ApiError::Internal(_) => vec![simple(
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                None,
            )],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            error!("Internal error: {}", cause);
        }

        let document = ErrorDocument {
            errors: self.error_objects(),
        };
        (
            self.status(),
            [(CONTENT_TYPE, HeaderValue::from_static(JSON_API_MEDIA_TYPE))],
            Json(document),
        )
            .into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Unprocessable(
            errors
                .violations()
                .iter()
                .map(|v| {
                    ValidationIssue::new(
                        format!("/data/attributes/{}", v.field),
                        v.violation.code(),
                        v.message(),
                    )
                })
                .collect(),
        )
    }
}

impl From<ArticleError> for ApiError {
    fn from(err: ArticleError) -> Self {
        match err {
            ArticleError::NotFound(id) => {
                ApiError::NotFound(format!("No article exists with id '{}'", id))
            }
            ArticleError::Validation(errors) => errors.into(),
            ArticleError::InvalidSort(invalid) => ApiError::BadRequest {
                detail: invalid.to_string(),
                parameter: Some("sort".to_string()),
            },
            ArticleError::Storage(cause) => ApiError::Internal(cause.to_string()),
        }
    }
}

/// Fallback for paths under the API prefix that match no route
pub async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("No resource exists at '{}'", uri.path()))
}

/// Fallback for known paths requested with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
