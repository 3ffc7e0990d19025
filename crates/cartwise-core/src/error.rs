//! # Error Types
//!
//! Domain-specific error types for cartwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartwise-core errors (this file)                                      │
//! │  ├── CoreError        - Cart evaluation failures                       │
//! │  └── ValidationError  - One problem with one line item field           │
//! │                                                                         │
//! │  cart-api errors (separate crate)                                      │
//! │  └── ApiError         - What HTTP clients see (JSON body + status)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError::InvalidCart → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` output of a `ValidationError` IS the user-facing message
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart evaluation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// One or more line items failed validation.
    ///
    /// ## When This Occurs
    /// Any field of any line item is blank, has the wrong type, or carries a
    /// price that is not a non-negative number. `errors` holds every problem
    /// found, in input order, never just the first one.
    #[error("Cart is invalid ({} validation error(s))", errors.len())]
    InvalidCart { errors: Vec<ValidationError> },

    /// Every item is valid, but the sum of their prices does not fit.
    #[error("Total price is too large")]
    TotalTooLarge,
}

impl CoreError {
    /// Returns the human-readable validation messages.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::{CoreError, ValidationError};
    ///
    /// let err = CoreError::InvalidCart {
    ///     errors: vec![ValidationError::NameBlank, ValidationError::PriceNegative],
    /// };
    /// assert_eq!(err.messages(), vec!["Name can't be blank", "Price can't be negative"]);
    /// ```
    pub fn messages(&self) -> Vec<String> {
        match self {
            CoreError::InvalidCart { errors } => errors.iter().map(ToString::to_string).collect(),
            CoreError::TotalTooLarge => vec![self.to_string()],
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Line item validation errors.
///
/// One variant per message a client can receive. The messages are part of
/// the public contract of the service and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("Name can't be blank")]
    NameBlank,

    #[error("Name must be a string")]
    NameNotString,

    #[error("Price can't be blank")]
    PriceBlank,

    /// Price is present but does not parse as a number.
    #[error("Price must be a number")]
    PriceNotNumber,

    /// Price parsed, but is below zero.
    #[error("Price can't be negative")]
    PriceNegative,

    /// Price is a well-formed number above [`crate::validation::MAX_PRICE`].
    #[error("Price is too large")]
    PriceTooLarge,

    #[error("Collection can't be blank")]
    CollectionBlank,

    #[error("Collection must be a string")]
    CollectionNotString,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
