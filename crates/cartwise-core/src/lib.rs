//! # cartwise-core: Pure Cart Evaluation for Cartwise
//!
//! This crate is the **heart** of Cartwise. It validates shopping carts and
//! prices them with a quantity-based discount, as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 cart-api (HTTP, axum)                           │   │
//! │  │   POST /cart ──► structural checks ──► permitted params        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Cart                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cartwise-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │  discount │  │   money   │  │   cart    │  │   │
//! │  │   │  name     │  │  tiers    │  │  cents    │  │ evaluate  │  │   │
//! │  │   │  price    │  │  KETO     │  │  rounding │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart evaluator (validate, then discount)
//! - [`discount`] - Tier table and per-item price computation
//! - [`error`] - Domain error types
//! - [`money`] - Money type with integer cents
//! - [`types`] - Domain types (line items, rates, results)
//! - [`validation`] - Line item validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart in, same result out
//! 2. **No I/O**: HTTP, files and logging live in the app, not here
//! 3. **Exact Money**: decimal prices, integer cents, no float drift
//! 4. **All Errors at Once**: validation never stops at the first problem
//!
//! ## Example Usage
//!
//! ```rust
//! use cartwise_core::{Cart, RawLineItem};
//!
//! let cart = Cart::new(
//!     "order-42",
//!     vec![
//!         RawLineItem::new("Banana Cake", "34.99", "BEST-SELLERS"),
//!         RawLineItem::new("Peanut Butter", "39.0", "BEST-SELLERS"),
//!     ],
//! );
//!
//! // Two eligible items → 5% off each
//! let evaluated = cart.evaluate().unwrap();
//! assert_eq!(evaluated.line_items[0].discounted_price.to_string(), "33.24");
//! assert_eq!(evaluated.total_price.to_string(), "70.29");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Collection whose items are never discounted and never counted towards
/// a discount tier. Compared case-sensitively.
pub const EXCLUDED_COLLECTION: &str = "KETO";
