pub mod article_mapper;

pub use article_mapper::{ArticleMapper, ARTICLES_PATH};
