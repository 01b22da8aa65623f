//! Parsing of the `sort` query parameter.
//!
//! The parameter is a comma separated list of field names, each optionally
//! prefixed with `-` for descending order. Keys apply left to right.

use std::fmt;

/// Fields a client may sort articles by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortableField {
    Title,
    Content,
}

impl SortableField {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(SortableField::Title),
            "content" => Some(SortableField::Content),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortableField::Title => "title",
            SortableField::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortableField,
    pub direction: SortDirection,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Ascending => write!(f, "{}", self.field.column()),
            SortDirection::Descending => write!(f, "-{}", self.field.column()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The sort field '{0}' is not supported")]
pub struct InvalidSortField(pub String);

/// Parse a raw `sort` value. A blank value means no ordering.
pub fn parse_sort(raw: &str) -> Result<Vec<SortKey>, InvalidSortField> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|segment| {
            let direction = if segment.starts_with('-') {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let name = segment.trim_start_matches('-');

            SortableField::parse(name)
                .map(|field| SortKey { field, direction })
                .ok_or_else(|| InvalidSortField(segment.to_string()))
        })
        .collect()
}
