// Repository modules
pub mod article_repository;

// Re-export repository types
pub use article_repository::ArticleRepository;
