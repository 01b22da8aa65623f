use chrono::{DateTime, Utc};

use crate::domain::sorting::InvalidSortField;
use crate::domain::validation::{ArticleField, ValidationErrors, Violation};
use crate::storage::StorageError;

/// A stored article
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("Article not found: {0}")]
    NotFound(String),
    #[error("Article attributes are invalid: {0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    InvalidSort(#[from] InvalidSortField),
    #[error("Storage failure: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for ArticleError {
    fn from(err: StorageError) -> Self {
        match err {
            // The unique index lost a race against the pre-write check.
            StorageError::DuplicateSlug(_) => ArticleError::Validation(ValidationErrors::single(
                ArticleField::Slug,
                Violation::SlugTaken,
            )),
            other => ArticleError::Storage(other),
        }
    }
}

impl From<ValidationErrors> for ArticleError {
    fn from(errors: ValidationErrors) -> Self {
        ArticleError::Validation(errors)
    }
}
