//! Slug format policy.
//!
//! A slug is made of ASCII letters, digits and dashes. On top of that
//! character class, three independent checks apply and may all fail at once.

/// A slug check that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugViolation {
    NoUnderscores,
    NoStartingDashes,
    NoEndingDashes,
}

impl SlugViolation {
    pub fn code(&self) -> &'static str {
        match self {
            SlugViolation::NoUnderscores => "no_underscores",
            SlugViolation::NoStartingDashes => "no_starting_dashes",
            SlugViolation::NoEndingDashes => "no_ending_dashes",
        }
    }

    pub fn describe(&self, attribute: &str) -> String {
        match self {
            SlugViolation::NoUnderscores => {
                format!("The {} field must not contain underscores.", attribute)
            }
            SlugViolation::NoStartingDashes => {
                format!("The {} field must not start with dashes.", attribute)
            }
            SlugViolation::NoEndingDashes => {
                format!("The {} field must not end with dashes.", attribute)
            }
        }
    }
}

/// `^[A-Za-z0-9-]+$`
pub fn matches_pattern(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Run every slug check against `value`, in a fixed order.
pub fn check(value: &str) -> Vec<SlugViolation> {
    let mut violations = Vec::new();

    if value.contains('_') {
        violations.push(SlugViolation::NoUnderscores);
    }
    if value.starts_with('-') {
        violations.push(SlugViolation::NoStartingDashes);
    }
    if value.ends_with('-') {
        violations.push(SlugViolation::NoEndingDashes);
    }

    violations
}
