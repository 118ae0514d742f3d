//! Validation error values.

use crate::path::FieldPath;
use frigate_config_shared::{ErrorCode, ErrorEnvelope, redact_if_secret};
use serde::Serialize;
use std::fmt;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// The document shape is wrong (root or camera is not a mapping).
    Structural,
    /// A required field is absent.
    MissingRequired,
    /// A value has the wrong type.
    TypeMismatch,
    /// A value breaks a range, enumeration, or emptiness constraint.
    ConstraintViolation,
    /// A conditional requirement between fields is not met.
    CrossField,
}

impl ValidationErrorKind {
    /// Stable upper-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "STRUCTURAL",
            Self::MissingRequired => "MISSING_REQUIRED",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::CrossField => "CROSS_FIELD",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Where the problem is.
    pub path: FieldPath,
    /// What kind of problem it is.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// What the schema wanted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// What the document had. Secret-looking fields are redacted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationError {
    pub(crate) fn new(
        path: FieldPath,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub(crate) fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub(crate) fn actual(mut self, actual: impl Into<String>) -> Self {
        let actual = actual.into();
        let redacted = match self.path.leaf_key() {
            Some(key) => redact_if_secret(key, &actual),
            None => actual,
        };
        self.actual = Some(redacted);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} [{}]: {}", self.path, self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Non-empty list of validation errors for an invalid document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) const fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    /// The collected errors, in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for errors returned by the validator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take ownership of the errors.
    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "configuration has {} error(s)", self.0.len())?;
        for error in &self.0 {
            write!(formatter, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for ErrorEnvelope {
    fn from(errors: ValidationErrors) -> Self {
        let mut envelope = Self::expected(
            ErrorCode::new("config", "invalid_config"),
            format!("configuration has {} error(s)", errors.len()),
        )
        .with_metadata("count", errors.len().to_string());

        if let Some(first) = errors.0.first() {
            envelope = envelope
                .with_metadata("first_path", first.path.to_string())
                .with_metadata("first_kind", first.kind.as_str());
        }

        envelope
    }
}
