//! # Domain Types
//!
//! Core domain types used throughout Cartwise.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT (unvalidated)          VALIDATED              OUTPUT             │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │  RawLineItem    │   │    LineItem     │   │ EvaluatedLineItem   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │ ─────────────────   │   │
//! │  │  name: Field    │──►│  name: String   │──►│ name, price (echo)  │   │
//! │  │  price: Field   │   │  price: Price   │   │ collection          │   │
//! │  │  collection:    │   │  collection     │   │ discounted_price    │   │
//! │  │    Field        │   └─────────────────┘   └─────────────────────┘   │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   FieldValue    │   │  DiscountRate   │   │   EvaluatedCart     │   │
//! │  │  Absent / Null  │   │  bps (u32)      │   │  reference          │   │
//! │  │  Text / Number  │   │  500 = 5%       │   │  line_items         │   │
//! │  │  Other          │   └─────────────────┘   │  total_price        │   │
//! │  └─────────────────┘                         └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Field Value
// =============================================================================

/// A raw line item field as it arrived, before any validation.
///
/// ## Why Not `Option<String>`?
/// Validation reports "can't be blank" and "must be a string" differently,
/// so we need to tell apart a key that is missing, a key set to `null`, and
/// a key holding a value of the wrong type.
///
/// A missing key is `Absent`; anything present converts with `From<Value>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    /// Key not present.
    #[default]
    Absent,
    /// Key present with JSON `null`.
    Null,
    /// A JSON string.
    Text(String),
    /// A JSON number.
    Number(serde_json::Number),
    /// Anything else: booleans, arrays, objects.
    Other(Value),
}

impl FieldValue {
    /// Returns true if the value counts as blank.
    ///
    /// Blank means: absent, `null`, an empty or whitespace-only string,
    /// `false`, an empty array or an empty object.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Absent | FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Other(value) => value_is_blank(value),
        }
    }

    /// Returns the string, if this is a JSON string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Blank check for a raw JSON value, with the same rules as
/// [`FieldValue::is_blank`].
pub fn value_is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Number(_) => false,
        Value::Bool(b) => !b,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => FieldValue::Number(n),
            other => FieldValue::Other(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// An unvalidated line item.
///
/// Built by the request layer, which also rejects unknown keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLineItem {
    pub name: FieldValue,
    pub price: FieldValue,
    pub collection: FieldValue,
}

impl RawLineItem {
    /// Builds a line item from three string fields.
    ///
    /// ## Example
    /// ```rust
    /// use cartwise_core::RawLineItem;
    ///
    /// let item = RawLineItem::new("Cocoa", "34.99", "KETO");
    /// assert_eq!(item.name.as_text(), Some("Cocoa"));
    /// ```
    pub fn new(name: &str, price: &str, collection: &str) -> Self {
        RawLineItem {
            name: name.into(),
            price: price.into(),
            collection: collection.into(),
        }
    }
}

/// The price exactly as the client sent it.
///
/// Echoed back unchanged in the response: `"39.0"` stays the string
/// `"39.0"`, `32` stays the number `32`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

/// A validated, non-negative price.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    /// Exact parsed amount (never negative).
    pub amount: Decimal,

    /// Original encoding, for the response.
    pub input: PriceInput,
}

/// A line item that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub price: Price,
    pub collection: String,
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5% and 2500 bps = 25%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the rate as an exact fraction (500 bps → 0.05).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the factor applied to a price: `1 - rate`.
    #[inline]
    pub fn multiplier(&self) -> Decimal {
        Decimal::ONE - self.fraction()
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Shows the rate as a percentage (`5%`, `12.5%`).
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.fraction() * Decimal::ONE_HUNDRED).normalize();
        write!(f, "{}%", pct)
    }
}

// =============================================================================
// Evaluation Output
// =============================================================================

/// A line item with its discounted price.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct EvaluatedLineItem {
    pub name: String,

    /// Price as received.
    #[ts(type = "string | number")]
    pub price: PriceInput,

    pub collection: String,

    /// Price after the cart's discount, rounded to 2 decimals.
    #[ts(type = "number")]
    pub discounted_price: Money,
}

/// How the cart's discount was resolved. Logged, never rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountSummary {
    /// Number of items outside the excluded collection.
    pub eligible_count: usize,

    /// Rate applied to every eligible item.
    pub rate: DiscountRate,
}

/// The result of evaluating a valid cart.
///
/// The request layer decides how this is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedCart {
    /// Cart reference, passed through unchanged.
    pub reference: String,

    /// Same order as the input.
    pub line_items: Vec<EvaluatedLineItem>,

    /// Sum of every `discounted_price`.
    pub total_price: Money,

    pub discount: DiscountSummary,
}

// =============================================================================
// Unit Tests
// =============================================================================
