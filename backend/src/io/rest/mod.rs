//! # REST API Interface Layer
//!
//! Provides the JSON:API HTTP endpoints for articles.
//! This layer handles:
//! - Media type negotiation (`application/vnd.api+json`)
//! - Structural validation of request documents
//! - Translation between JSON:API documents and domain commands
//! - Error translation from domain failures to JSON:API error documents
//! - Request logging
//!
//! ## Request Pipeline
//!
//! ```text
//! json_api_headers  ->  json_api_document  ->  article_apis  ->  ArticleService
//!   (406 / 415)            (422 /data/...)        (mappers)        (422 /data/attributes/...)
//! ```

pub mod article_apis;
pub mod errors;
pub mod extract;
pub mod json_api_document;
pub mod json_api_headers;
pub mod mappers;

pub use article_apis::*;
pub use errors::{ApiError, ValidationIssue};
pub use json_api_document::validate_json_api_document;
pub use json_api_headers::validate_json_api_headers;
