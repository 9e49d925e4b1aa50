//! # Error Types
//!
//! Domain-specific error types for botica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  botica-core errors (this file)                                        │
//! │  ├── CoreError        - Domain errors (missing entities, bad ids)      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  botica-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  botica-api errors                                                     │
//! │  └── ApiError         - What HTTP clients see (JSON envelope)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP 400/404/500       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    /// Supplier cannot be found.
    ///
    /// ## When This Occurs
    /// - Quotation submitted for a supplier id that was never created
    /// - Supplier deleted directly in the store
    #[error("Supplier {0} not found")]
    SupplierNotFound(i64),

    /// Quotation cannot be found.
    #[error("Quotation {0} not found")]
    QuotationNotFound(i64),

    /// A partial update carried none of the recognized product fields.
    #[error("No product fields to update")]
    EmptyPatch,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Returns true when the error means "the referenced entity is absent".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::ProductNotFound(_)
                | CoreError::SupplierNotFound(_)
                | CoreError::QuotationNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They are always raised before any mutation reaches the store.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Amount does not fit in integer cents.
    #[error("{field}: amount is out of range")]
    AmountOutOfRange { field: String },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric id, malformed date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::AmountOutOfRange`].
    pub fn amount_out_of_range(field: impl Into<String>) -> Self {
        ValidationError::AmountOutOfRange {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
