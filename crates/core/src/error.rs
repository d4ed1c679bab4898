//! Validation error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used by record validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The six user-supplied fields of an item, in validation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Category,
    Date,
    Location,
    Status,
    ContactInfo,
}

impl Field {
    /// Fields in the order the required-field check visits them.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Category,
        Field::Date,
        Field::Location,
        Field::Status,
        Field::ContactInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Date => "date",
            Field::Location => "location",
            Field::Status => "status",
            Field::ContactInfo => "contact_info",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record failed validation.
///
/// The `Display` output is the user-facing message and is meant to be shown
/// verbatim.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or blank after trimming.
    #[error("Field '{0}' cannot be empty")]
    EmptyField(Field),

    /// The date is not `YYYY-MM-DD` or is not a real calendar date.
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDateFormat,

    /// The date lies after the current date.
    #[error("Date cannot be in the future")]
    FutureDate,

    /// The status is not one of the three known literals.
    #[error("Status must be 'Lost', 'Found', or 'Claimed'")]
    InvalidStatus,
}

impl ValidationError {
    pub fn empty(field: Field) -> Self {
        Self::EmptyField(field)
    }

    /// The field the failure refers to.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyField(field) => *field,
            ValidationError::InvalidDateFormat | ValidationError::FutureDate => Field::Date,
            ValidationError::InvalidStatus => Field::Status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(
            ValidationError::empty(Field::ContactInfo).to_string(),
            "Field 'contact_info' cannot be empty"
        );
        assert_eq!(
            ValidationError::InvalidDateFormat.to_string(),
            "Date must be in YYYY-MM-DD format"
        );
        assert_eq!(
            ValidationError::FutureDate.to_string(),
            "Date cannot be in the future"
        );
        assert_eq!(
            ValidationError::InvalidStatus.to_string(),
            "Status must be 'Lost', 'Found', or 'Claimed'"
        );
    }

    #[test]
    fn field_of_date_errors_is_date() {
        assert_eq!(ValidationError::FutureDate.field(), Field::Date);
        assert_eq!(ValidationError::InvalidStatus.field(), Field::Status);
    }
}
