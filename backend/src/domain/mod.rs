//! # Domain Module
//!
//! Business rules for articles, independent of HTTP and storage.
//!
//! ## Module Organization
//!
//! - **article_service**: CRUD orchestration and the uniqueness pre-check
//! - **validation**: attribute rule set producing per-field violations
//! - **slug_rule**: slug format checks
//! - **sorting**: parsing of the `sort` query parameter
//! - **commands**: internal input types mapped from the wire documents
//! - **models**: the `Article` entity and domain errors
//!
//! ## Business Rules
//!
//! - Title, slug and content are required on create and on update
//! - Titles are at least 4 characters long
//! - Slugs use letters, digits and dashes, never start or end with a dash,
//!   and are unique across all articles
//! - Articles can only be sorted by title and content

pub mod article_service;
pub mod commands;
pub mod models;
pub mod slug_rule;
pub mod sorting;
pub mod validation;

pub use article_service::ArticleService;
pub use commands::articles::{ArticleListQuery, AttributeInput, SaveArticleCommand};
pub use models::{Article, ArticleError};
