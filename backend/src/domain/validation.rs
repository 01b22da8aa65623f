//! # Article Attribute Validation
//!
//! Pure rule set applied to the attributes of a create or update request.
//! Every rule is a plain predicate; failures are collected per field and
//! returned together so the caller can report all of them at once.
//!
//! The only rule that needs the store is slug uniqueness. The service runs
//! that query up front and passes the answer in, which keeps this module free
//! of I/O.

use std::fmt;

use crate::domain::commands::articles::{AttributeInput, SaveArticleCommand};
use crate::domain::slug_rule::{self, SlugViolation};

pub const TITLE_MIN_LENGTH: usize = 4;

/// Attributes an article exposes, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArticleField {
    Title,
    Slug,
    Content,
}

impl ArticleField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Slug => "slug",
            ArticleField::Content => "content",
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Required,
    NotString,
    TooShort { min: usize },
    InvalidSlugFormat,
    Slug(SlugViolation),
    SlugTaken,
}

impl Violation {
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::NotString => "string",
            Violation::TooShort { .. } => "min_length",
            Violation::InvalidSlugFormat => "invalid_format",
            Violation::Slug(slug) => slug.code(),
            Violation::SlugTaken => "unique",
        }
    }

    pub fn message(&self, field: ArticleField) -> String {
        match self {
            Violation::Required => format!("The {} field is required.", field),
            Violation::NotString => format!("The {} field must be a string.", field),
            Violation::TooShort { min } => {
                format!("The {} field must be at least {} characters.", field, min)
            }
            Violation::InvalidSlugFormat => format!(
                "The {} field must only contain letters, numbers, and dashes.",
                field
            ),
            Violation::Slug(slug) => slug.describe(field.as_str()),
            Violation::SlugTaken => format!("The {} has already been taken.", field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: ArticleField,
    pub violation: Violation,
}

impl FieldViolation {
    pub fn message(&self) -> String {
        self.violation.message(self.field)
    }
}

/// Every violation found in one request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} attribute violation(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn single(field: ArticleField, violation: Violation) -> Self {
        Self(vec![FieldViolation { field, violation }])
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn contains(&self, field: ArticleField, violation: Violation) -> bool {
        self.0
            .iter()
            .any(|v| v.field == field && v.violation == violation)
    }

    pub fn fields(&self) -> Vec<ArticleField> {
        let mut fields: Vec<ArticleField> = self.0.iter().map(|v| v.field).collect();
        fields.dedup();
        fields
    }
}

/// Attribute values that passed every rule, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFields {
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// Validate a create/update command.
///
/// `slug_taken` is the answer of the uniqueness query for the submitted slug
/// (already excluding the article being updated).
pub fn validate_article(
    command: &SaveArticleCommand,
    slug_taken: bool,
) -> Result<ArticleFields, ValidationErrors> {
    let mut violations = Vec::new();

    let title = required_text(ArticleField::Title, &command.title, &mut violations);
    if let Some(title) = title {
        if title.chars().count() < TITLE_MIN_LENGTH {
            violations.push(FieldViolation {
                field: ArticleField::Title,
                violation: Violation::TooShort {
                    min: TITLE_MIN_LENGTH,
                },
            });
        }
    }

    let slug = required_text(ArticleField::Slug, &command.slug, &mut violations);
    if let Some(slug) = slug {
        if !slug_rule::matches_pattern(slug) {
            violations.push(FieldViolation {
                field: ArticleField::Slug,
                violation: Violation::InvalidSlugFormat,
            });
        }
        violations.extend(slug_rule::check(slug).into_iter().map(|v| FieldViolation {
            field: ArticleField::Slug,
            violation: Violation::Slug(v),
        }));
        if slug_taken {
            violations.push(FieldViolation {
                field: ArticleField::Slug,
                violation: Violation::SlugTaken,
            });
        }
    }

    let content = required_text(ArticleField::Content, &command.content, &mut violations);

    match (title, slug, content) {
        (Some(title), Some(slug), Some(content)) if violations.is_empty() => Ok(ArticleFields {
            title: title.to_string(),
            slug: slug.to_string(),
            content: content.to_string(),
        }),
        _ => Err(ValidationErrors(violations)),
    }
}

fn required_text<'a>(
    field: ArticleField,
    input: &'a AttributeInput,
    violations: &mut Vec<FieldViolation>,
) -> Option<&'a str> {
    if let Some(text) = input.as_filled_text() {
        return Some(text);
    }

    let violation = match input {
        AttributeInput::NotText => Violation::NotString,
        _ => Violation::Required,
    };
    violations.push(FieldViolation { field, violation });
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(title: &str, slug: &str, content: &str) -> SaveArticleCommand {
        SaveArticleCommand {
            title: AttributeInput::text(title),
            slug: AttributeInput::text(slug),
            content: AttributeInput::text(content),
        }
    }

    #[test]
    fn test_valid_command_yields_fields() {
        let fields = validate_article(
            &command("Nuevo articulo", "nuevo-articulo", "Contenido del articulo"),
            false,
        )
        .expect("command should be valid");

        assert_eq!(fields.title, "Nuevo articulo");
        assert_eq!(fields.slug, "nuevo-articulo");
        assert_eq!(fields.content, "Contenido del articulo");
    }

    #[test]
    fn test_values_are_trimmed() {
        let fields = validate_article(&command("  Nuevo articulo ", " nuevo ", " texto "), false)
            .expect("command should be valid");

        assert_eq!(fields.title, "Nuevo articulo");
        assert_eq!(fields.slug, "nuevo");
        assert_eq!(fields.content, "texto");
    }

    #[test]
    fn test_missing_attributes_are_required() {
        let errors = validate_article(&SaveArticleCommand::default(), false).unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![ArticleField::Title, ArticleField::Slug, ArticleField::Content]
        );
        assert!(errors.contains(ArticleField::Title, Violation::Required));
        assert!(errors.contains(ArticleField::Slug, Violation::Required));
        assert!(errors.contains(ArticleField::Content, Violation::Required));
    }

    #[test]
    fn test_blank_string_counts_as_missing() {
        let errors = validate_article(&command("   ", "nuevo", "texto"), false).unwrap_err();
        assert_eq!(
            errors.violations(),
            &[FieldViolation {
                field: ArticleField::Title,
                violation: Violation::Required,
            }]
        );
    }

    #[test]
    fn test_non_string_reports_only_type() {
        let mut cmd = command("Nuevo articulo", "nuevo", "texto");
        cmd.slug = AttributeInput::NotText;

        let errors = validate_article(&cmd, false).unwrap_err();
        assert_eq!(errors.violations().len(), 1);
        assert!(errors.contains(ArticleField::Slug, Violation::NotString));
    }

    #[test]
    fn test_title_must_be_at_least_four_characters() {
        let errors = validate_article(&command("Art", "nuevo", "texto"), false).unwrap_err();
        assert!(errors.contains(ArticleField::Title, Violation::TooShort { min: 4 }));

        // Characters, not bytes.
        assert!(validate_article(&command("Añoñ", "nuevo", "texto"), false).is_ok());
    }

    #[test]
    fn test_slug_violations_accumulate() {
        let errors = validate_article(&command("Nuevo articulo", "-nuevo_articulo-", "texto"), true)
            .unwrap_err();

        let codes: Vec<&str> = errors.violations().iter().map(|v| v.violation.code()).collect();
        assert_eq!(
            codes,
            vec![
                "invalid_format",
                "no_underscores",
                "no_starting_dashes",
                "no_ending_dashes",
                "unique",
            ]
        );
    }

    #[test]
    fn test_symbols_fail_pattern_only() {
        let errors = validate_article(&command("Nuevo articulo", "$%^", "texto"), false).unwrap_err();
        assert_eq!(errors.violations().len(), 1);
        assert!(errors.contains(ArticleField::Slug, Violation::InvalidSlugFormat));
    }

    #[test]
    fn test_taken_slug_is_reported() {
        let errors = validate_article(&command("Nuevo articulo", "nuevo", "texto"), true).unwrap_err();
        assert!(errors.contains(ArticleField::Slug, Violation::SlugTaken));
        assert_eq!(
            errors.violations()[0].message(),
            "The slug has already been taken."
        );
    }

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            Violation::Required.message(ArticleField::Content),
            "The content field is required."
        );
        assert_eq!(
            Violation::TooShort { min: 4 }.message(ArticleField::Title),
            "The title field must be at least 4 characters."
        );
    }
}
