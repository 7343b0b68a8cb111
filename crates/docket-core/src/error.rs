//! # Error Handling Module
//!
//! Error types shared across Docket crates.
//!
//! Parse failures and geometry edge cases inside the interaction engine
//! and the renderer never surface as errors; they degrade to defaults and
//! are logged. The types here cover the boundaries where a caller must be
//! told that nothing happened: template management, data validation and I/O.

use thiserror::Error;

/// Template management error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Template id is unknown
    #[error("Template not found: {id}")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The last remaining template cannot be removed
    #[error("At least one template must remain")]
    LastTemplate,

    /// Template name is empty
    #[error("Template name must not be empty")]
    EmptyName,

    /// Component id is unknown within the current layout
    #[error("Component not found: {id}")]
    ComponentNotFound {
        /// The component id that was looked up.
        id: String,
    },

    /// Action refused in the current mode
    #[error("Operation not allowed: {reason}")]
    NotAllowed {
        /// Why the operation was refused.
        reason: String,
    },
}

/// Data validation error type
///
/// Raised when externally supplied data (records, imports, dumps) does not
/// have the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Field name is unknown in the catalog
    #[error("Field not found: {name}")]
    FieldNotFound {
        /// The field name that was looked up.
        name: String,
    },

    /// Structure of the payload is wrong
    #[error("Invalid payload: {reason}")]
    InvalidShape {
        /// What was wrong with the payload.
        reason: String,
    },

    /// A component record could not be interpreted
    #[error("Invalid component record {id}: {reason}")]
    InvalidComponent {
        /// Id of the offending record, or an empty string when absent.
        id: String,
        /// What was wrong with the record.
        reason: String,
    },
}

/// Main error type for Docket
#[derive(Error, Debug)]
pub enum Error {
    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Data error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a template error
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::Template(_))
    }

    /// Check if this is a data validation error
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_display() {
        let err = TemplateError::NotFound {
            id: "tpl-1".to_string(),
        };
        assert_eq!(err.to_string(), "Template not found: tpl-1");
        assert_eq!(
            TemplateError::LastTemplate.to_string(),
            "At least one template must remain"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = DataError::InvalidShape {
            reason: "templates must be an array".to_string(),
        }
        .into();
        assert!(err.is_data_error());
        assert!(!err.is_template_error());
        assert_eq!(
            err.to_string(),
            "Invalid payload: templates must be an array"
        );
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
