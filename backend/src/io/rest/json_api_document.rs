//! # JSON:API Document Validation
//!
//! Middleware checking the envelope of POST and PATCH bodies before any
//! handler runs:
//!
//! - `data` is present and is an object or array
//! - `data.type` is present and is a string
//! - `data.attributes` is present, is an object or array, and is not empty
//! - on PATCH, `data.id` is present and is a string
//!
//! All violations are reported together as a 422 error document. A body that
//! passes is forwarded untouched.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::warn;

use crate::io::rest::errors::{ApiError, ValidationIssue};

/// Upper bound on buffered request bodies
const MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

pub async fn validate_json_api_document(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    if method != Method::POST && method != Method::PATCH {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_DOCUMENT_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return ApiError::BadRequest {
                detail: "The request body could not be read".to_string(),
                parameter: None,
            }
            .into_response();
        }
    };

    // Unparseable JSON is treated like an empty document.
    let document: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    let issues = document_violations(&document, method == Method::PATCH);
    if !issues.is_empty() {
        warn!("{} {} - invalid JSON:API document: {:?}", method, parts.uri, issues);
        return ApiError::Unprocessable(issues).into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Structural checks on a request document.
pub fn document_violations(document: &Value, requires_id: bool) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let data = document.get("data");

    match data {
        Some(value) if is_filled(value) => {
            if !is_structure(value) {
                issues.push(must_be_object("data"));
            }
        }
        _ => issues.push(required("data")),
    }

    let member = |name: &str| data.and_then(|d| d.as_object()).and_then(|d| d.get(name));

    match member("type") {
        Some(value) if is_filled(value) => {
            if !value.is_string() {
                issues.push(must_be_string("type"));
            }
        }
        _ => issues.push(required("type")),
    }

    if requires_id {
        match member("id") {
            Some(value) if is_filled(value) => {
                if !value.is_string() {
                    issues.push(must_be_string("id"));
                }
            }
            _ => issues.push(required("id")),
        }
    }

    match member("attributes") {
        Some(value) if is_filled(value) => {
            if !is_structure(value) {
                issues.push(must_be_object("attributes"));
            }
        }
        _ => issues.push(required("attributes")),
    }

    issues
}

/// Null, blank strings and empty containers count as absent.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(members) => !members.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn is_structure(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn pointer(member: &str) -> String {
    if member == "data" {
        "/data".to_string()
    } else {
        format!("/data/{}", member)
    }
}

fn label(member: &str) -> String {
    if member == "data" {
        "data".to_string()
    } else {
        format!("data.{}", member)
    }
}

fn required(member: &str) -> ValidationIssue {
    ValidationIssue::new(
        pointer(member),
        "required",
        format!("The {} field is required.", label(member)),
    )
}

fn must_be_object(member: &str) -> ValidationIssue {
    ValidationIssue::new(
        pointer(member),
        "object",
        format!("The {} field must be an object.", label(member)),
    )
}

fn must_be_string(member: &str) -> ValidationIssue {
    ValidationIssue::new(
        pointer(member),
        "string",
        format!("The {} field must be a string.", label(member)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::any,
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    fn pointers(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.pointer.as_str()).collect()
    }

    #[test]
    fn test_valid_documents_pass() {
        let create = json!({ "data": { "type": "string", "attributes": { "name": "string" } } });
        assert!(document_violations(&create, false).is_empty());

        let update = json!({
            "data": { "id": "1", "type": "string", "attributes": { "name": "string" } }
        });
        assert!(document_violations(&update, true).is_empty());
    }

    #[test]
    fn test_data_is_required() {
        let issues = document_violations(&json!({}), false);
        assert!(pointers(&issues).contains(&"/data"));
        assert_eq!(issues[0].code, "required");

        let issues = document_violations(&Value::Null, true);
        assert!(pointers(&issues).contains(&"/data"));
    }

    #[test]
    fn test_data_must_be_an_object() {
        let issues = document_violations(&json!({ "data": "not an array" }), false);
        assert_eq!(issues[0].pointer, "/data");
        assert_eq!(issues[0].code, "object");
    }

    #[test]
    fn test_data_type_is_required() {
        let issues = document_violations(&json!({ "data": { "attributes": [] } }), false);
        assert_eq!(pointers(&issues), vec!["/data/type", "/data/attributes"]);
    }

    #[test]
    fn test_data_type_must_be_a_string() {
        let issues = document_violations(&json!({ "data": { "type": 1 } }), false);
        let type_issue = issues.iter().find(|i| i.pointer == "/data/type").unwrap();
        assert_eq!(type_issue.code, "string");
    }

    #[test]
    fn test_data_attributes_must_not_be_empty() {
        let issues = document_violations(
            &json!({ "data": { "id": "1", "type": "string", "attributes": [] } }),
            true,
        );
        assert_eq!(pointers(&issues), vec!["/data/attributes"]);
        assert_eq!(issues[0].code, "required");
    }

    #[test]
    fn test_data_attributes_must_be_an_object() {
        let issues = document_violations(
            &json!({ "data": { "type": "string", "attributes": "string" } }),
            false,
        );
        assert_eq!(pointers(&issues), vec!["/data/attributes"]);
        assert_eq!(issues[0].code, "object");
    }

    #[test]
    fn test_data_id_only_checked_when_required() {
        let document = json!({ "data": { "type": "string", "attributes": { "name": "test" } } });
        assert!(document_violations(&document, false).is_empty());

        let issues = document_violations(&document, true);
        assert_eq!(pointers(&issues), vec!["/data/id"]);

        let numeric = json!({
            "data": { "id": 1, "type": "string", "attributes": { "name": "test" } }
        });
        let issues = document_violations(&numeric, true);
        assert_eq!(pointers(&issues), vec!["/data/id"]);
        assert_eq!(issues[0].code, "string");
    }

    fn test_router() -> Router {
        Router::new()
            .route("/test_route", any(|| async { "ok" }))
            .layer(middleware::from_fn(validate_json_api_document))
    }

    async fn send(method: Method, body: &str) -> (StatusCode, String) {
        let request = HttpRequest::builder()
            .method(method)
            .uri("/test_route")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_middleware_forwards_valid_documents() {
        let (status, body) = send(
            Method::POST,
            r#"{"data":{"type":"string","attributes":{"name":"string"}}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let (status, _) = send(
            Method::PATCH,
            r#"{"data":{"id":"1","type":"string","attributes":{"name":"string"}}}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_short_circuits_invalid_documents() {
        let (status, body) = send(Method::POST, "{}").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let document: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(document["errors"][0]["source"]["pointer"], "/data");

        let (status, _) = send(Method::PATCH, "not json at all").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_middleware_ignores_reads() {
        let (status, body) = send(Method::GET, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
