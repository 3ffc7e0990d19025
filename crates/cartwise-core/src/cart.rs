//! # Cart Evaluator
//!
//! Ties validation and discounting together for one cart.
//!
//! ## Evaluation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart { reference, line_items: [RawLineItem] }                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_line_items ── errors? ──► Err(CoreError::InvalidCart)         │
//! │       │                              (nothing computed)                 │
//! │       ▼                                                                 │
//! │  apply_discounts ── total overflows? ──► Err(CoreError::TotalTooLarge)  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(EvaluatedCart { reference, line_items, total_price })               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Evaluation is a pure function of the cart: evaluating the same cart twice
//! yields the same result.

use crate::discount::apply_discounts;
use crate::error::{CoreError, CoreResult};
use crate::types::{EvaluatedCart, RawLineItem};
use crate::validation::validate_line_items;

/// A cart as received, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    /// Opaque identifier, never inspected.
    pub reference: String,

    pub line_items: Vec<RawLineItem>,
}

impl Cart {
    /// Creates a cart.
    pub fn new(reference: impl Into<String>, line_items: Vec<RawLineItem>) -> Self {
        Cart {
            reference: reference.into(),
            line_items,
        }
    }

    /// Validates the line items and, if all pass, prices the cart.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::{Cart, RawLineItem};
    ///
    /// let cart = Cart::new(
    ///     "2d832fe0-6c96-4515-9be7-4c00983539c1",
    ///     vec![
    ///         RawLineItem::new("Peanut Butter", "39.0", "BEST-SELLERS"),
    ///         RawLineItem::new("Cocoa", "34.99", "KETO"),
    ///         RawLineItem::new("Fruity", "32", "DEFAULT"),
    ///     ],
    /// );
    ///
    /// let evaluated = cart.evaluate().unwrap();
    /// assert_eq!(evaluated.total_price.to_string(), "102.44");
    /// ```
    ///
    /// ## Errors
    /// - `CoreError::InvalidCart` with every validation error found
    /// - `CoreError::TotalTooLarge` if the total cannot be represented
    pub fn evaluate(&self) -> CoreResult<EvaluatedCart> {
        let items =
            validate_line_items(&self.line_items).map_err(|errors| CoreError::InvalidCart { errors })?;

        let discounted = apply_discounts(items)?;

        Ok(EvaluatedCart {
            reference: self.reference.clone(),
            line_items: discounted.line_items,
            total_price: discounted.total_price,
            discount: discounted.summary,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
