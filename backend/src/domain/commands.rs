//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! JSON:API documents defined in the `shared` crate to these internal types.

pub mod articles {
    /// A single attribute as it arrived in the request document.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub enum AttributeInput {
        /// Absent or `null`
        #[default]
        Missing,
        /// Present but not a JSON string
        NotText,
        Text(String),
    }

    impl AttributeInput {
        pub fn text(value: impl Into<String>) -> Self {
            AttributeInput::Text(value.into())
        }

        /// The trimmed text if the attribute carries a non-blank string
        pub fn as_filled_text(&self) -> Option<&str> {
            match self {
                AttributeInput::Text(value) if !value.trim().is_empty() => Some(value.trim()),
                _ => None,
            }
        }
    }

    /// Input for creating or replacing an article.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct SaveArticleCommand {
        pub title: AttributeInput,
        pub slug: AttributeInput,
        pub content: AttributeInput,
    }

    /// Query parameters for listing articles.
    #[derive(Debug, Clone, Default)]
    pub struct ArticleListQuery {
        /// Raw `sort` parameter, e.g. `-title,content`
        pub sort: Option<String>,
    }
}
