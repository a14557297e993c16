use thiserror::Error;

/// Errors that can occur during billing calculation or SEPA processing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BeitragError {
    /// A recurrence interval string was not recognized.
    #[error("invalid recurrence interval: {0}")]
    InvalidInterval(String),

    /// An amount or rate was negative (or zero) where a positive value is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A SEPA direct-debit transaction was attempted without complete mandate data.
    #[error("missing SEPA mandate: {0}")]
    MissingMandate(String),

    /// Date arithmetic left the representable range.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single validation error with field path and message.
///
/// Used by the non-throwing SEPA transaction validation: all violated rules
/// are collected so a whole batch can be reported to an operator before
/// submission, instead of aborting on the first bad transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "debtor_iban").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
