//! Mapper between JSON:API article documents and domain types.

use serde_json::Value;
use shared::{
    ArticleAttributes, ArticleCollectionDocument, ArticleDocument, ArticleResource, Links,
    ResourceObject, SaveArticleAttributes, ARTICLES_TYPE,
};

use crate::domain::{Article, AttributeInput, SaveArticleCommand};

/// Path of the articles collection, relative to the application URL
pub const ARTICLES_PATH: &str = "/api/v1/articles";

pub struct ArticleMapper;

impl ArticleMapper {
    /// Canonical URL of the articles collection
    pub fn collection_link(base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), ARTICLES_PATH)
    }

    /// Canonical URL of one article, used for `links.self` and `Location`
    pub fn self_link(base_url: &str, article_id: &str) -> String {
        format!("{}/{}", Self::collection_link(base_url), article_id)
    }

    pub fn to_resource(article: Article, base_url: &str) -> ArticleResource {
        let self_link = Self::self_link(base_url, &article.id);
        ResourceObject {
            resource_type: ARTICLES_TYPE.to_string(),
            id: article.id,
            attributes: ArticleAttributes {
                title: article.title,
                slug: article.slug,
                content: article.content,
            },
            links: Links { self_link },
        }
    }

    pub fn to_document(article: Article, base_url: &str) -> ArticleDocument {
        ArticleDocument {
            data: Self::to_resource(article, base_url),
            links: None,
        }
    }

    pub fn to_collection_document(
        articles: Vec<Article>,
        base_url: &str,
    ) -> ArticleCollectionDocument {
        ArticleCollectionDocument {
            data: articles
                .into_iter()
                .map(|article| Self::to_resource(article, base_url))
                .collect(),
            links: Some(Links {
                self_link: Self::collection_link(base_url),
            }),
        }
    }

    pub fn to_save_command(attributes: SaveArticleAttributes) -> SaveArticleCommand {
        SaveArticleCommand {
            title: Self::to_attribute_input(attributes.title),
            slug: Self::to_attribute_input(attributes.slug),
            content: Self::to_attribute_input(attributes.content),
        }
    }

    fn to_attribute_input(value: Option<Value>) -> AttributeInput {
        match value {
            None | Some(Value::Null) => AttributeInput::Missing,
            Some(Value::String(text)) => AttributeInput::Text(text),
            Some(_) => AttributeInput::NotText,
        }
    }
}
