use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Media type every JSON:API request and response body is exchanged in
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Resource type name of articles on the wire
pub const ARTICLES_TYPE: &str = "articles";

/// Attributes of an article as exposed in resource objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleAttributes {
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// Links member of a resource object or a top-level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// A single JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject<A> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: A,
    pub links: Links,
}

/// Top-level success document, `data` is either one resource or a list of them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

pub type ArticleResource = ResourceObject<ArticleAttributes>;
pub type ArticleDocument = Document<ArticleResource>;
pub type ArticleCollectionDocument = Document<Vec<ArticleResource>>;

/// Inbound body of POST/PATCH article requests.
///
/// Attribute values stay untyped so that a wrong JSON type is reported as a
/// field validation error instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveArticleDocument {
    pub data: SaveArticleData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveArticleData {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "attributes_by_name")]
    pub attributes: SaveArticleAttributes,
}

/// Attributes are looked up by member name only. Anything other than an
/// object carries no named members, so every attribute reads as absent.
fn attributes_by_name<'de, D>(deserializer: D) -> Result<SaveArticleAttributes, D::Error>
where
    D: Deserializer<'de>,
{
    let mut members = match Value::deserialize(deserializer)? {
        Value::Object(members) => members,
        _ => return Ok(SaveArticleAttributes::default()),
    };

    Ok(SaveArticleAttributes {
        title: members.remove("title"),
        slug: members.remove("slug"),
        content: members.remove("content"),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveArticleAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// Top-level error document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

/// One JSON:API error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status code as a string, per JSON:API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Machine readable violation code (e.g. `no_underscores`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Locates the part of the request an error refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer into the request document, e.g. `/data/attributes/slug`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Query parameter that caused the error, e.g. `sort`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ErrorSource {
    pub fn pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: Some(pointer.into()),
            parameter: None,
        }
    }

    pub fn parameter(parameter: impl Into<String>) -> Self {
        Self {
            pointer: None,
            parameter: Some(parameter.into()),
        }
    }
}
