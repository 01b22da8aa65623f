//! # Storage Traits
//!
//! This module defines the storage abstraction that allows different storage
//! backends to be used interchangeably in the domain layer.

use async_trait::async_trait;

use crate::domain::models::Article;
use crate::domain::sorting::SortKey;
use crate::storage::StorageError;

/// Trait defining the interface for article storage operations
#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Store a new article.
    /// Fails with [`StorageError::DuplicateSlug`] if the slug is already used.
    async fn store_article(&self, article: &Article) -> Result<(), StorageError>;

    /// Retrieve a specific article by ID
    async fn get_article(&self, article_id: &str) -> Result<Option<Article>, StorageError>;

    /// List all articles ordered by `sort`, then by insertion order
    async fn list_articles(&self, sort: &[SortKey]) -> Result<Vec<Article>, StorageError>;

    /// Replace the attributes of an existing article.
    /// Returns false if no article has that ID.
    async fn update_article(&self, article: &Article) -> Result<bool, StorageError>;

    /// Delete an article by ID.
    /// Returns true if the article was found and deleted, false otherwise
    async fn delete_article(&self, article_id: &str) -> Result<bool, StorageError>;

    /// Check whether any article other than `excluding_id` uses `slug`
    async fn slug_exists(&self, slug: &str, excluding_id: Option<&str>)
        -> Result<bool, StorageError>;
}
