//! Validation module
//!
//! Column identifiers end up inside quoted SQL text, so they are checked once
//! when an ordering or count column is attached.

use std::fmt;

/// Validation errors for column identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name contains invalid characters (only alphanumeric and underscore allowed)
    InvalidCharacters(String),
    /// A single segment is longer than any supported dialect accepts
    TooLong {
        name: String,
        length: usize,
        max_length: usize,
    },
    /// Name or one of its dotted segments is empty
    Empty,
    /// Segment starts with invalid character (must start with letter or underscore)
    InvalidStartCharacter(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidCharacters(name) => {
                write!(f, "Invalid characters in name '{}': only alphanumeric characters and underscores are allowed", name)
            }
            ValidationError::TooLong {
                name,
                length,
                max_length,
            } => {
                write!(
                    f,
                    "Name '{}' is too long: {} characters (max {})",
                    name, length, max_length
                )
            }
            ValidationError::Empty => {
                write!(f, "Name cannot be empty")
            }
            ValidationError::InvalidStartCharacter(name) => {
                write!(f, "Name '{}' must start with a letter or underscore", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validated column name, optionally qualified (`alias.column`).
///
/// Reserved words are accepted: every dialect quotes the name before it is
/// written into SQL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedFieldName(String);

impl ValidatedFieldName {
    /// Identifier length limit shared by PostgreSQL and Oracle (MySQL allows 64)
    pub const MAX_LENGTH: usize = 63;

    /// Create a new validated field name
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::Empty);
        }

        for segment in name.split('.') {
            Self::validate_segment(segment)?;
        }

        Ok(Self(name.to_string()))
    }

    /// Get the validated name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated parts of the name, in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    fn validate_segment(segment: &str) -> Result<(), ValidationError> {
        let first_char = segment.chars().next().ok_or(ValidationError::Empty)?;

        if segment.len() > Self::MAX_LENGTH {
            return Err(ValidationError::TooLong {
                name: segment.to_string(),
                length: segment.len(),
                max_length: Self::MAX_LENGTH,
            });
        }

        if !first_char.is_ascii_alphabetic() && first_char != '_' {
            return Err(ValidationError::InvalidStartCharacter(segment.to_string()));
        }

        if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ValidationError::InvalidCharacters(segment.to_string()));
        }

        Ok(())
    }
}

impl fmt::Display for ValidatedFieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
