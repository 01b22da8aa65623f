//! # Storage Module
//!
//! Handles data persistence for the articles server.
//!
//! The domain layer talks to storage through the [`ArticleStorage`] trait, so
//! the SQLite implementation can be swapped without touching domain logic.
//!
//! ## Components
//!
//! - **connection.rs** - SQLite pool and schema management
//! - **traits.rs** - storage abstraction used by the domain
//! - **repositories/** - SQLite-backed repository implementations

pub mod connection;
pub mod repositories;
pub mod traits;

pub use connection::DbConnection;
pub use repositories::ArticleRepository;
pub use traits::ArticleStorage;

/// Failures raised by storage implementations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The unique index on `slug` rejected a write
    #[error("Slug already taken: {0}")]
    DuplicateSlug(String),
    #[error("Malformed row: {0}")]
    MalformedRow(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
