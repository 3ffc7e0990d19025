//! # Validation Module
//!
//! Line item validation for Cartwise.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request layer (cart-api)                                     │
//! │  ├── Missing cart / reference / lineItems keys                         │
//! │  └── Unpermitted keys                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name: present, string                                             │
//! │  ├── price: present, number, not negative                              │
//! │  └── collection: present, string                                       │
//! │                                                                         │
//! │  Every item and every field is checked: errors ACCUMULATE.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwise_core::validation::validate_line_items;
//! use cartwise_core::{RawLineItem, ValidationError};
//!
//! let items = vec![
//!     RawLineItem::new("", "10", "DEFAULT"),
//!     RawLineItem::new("Cocoa", "-4", "KETO"),
//! ];
//! let errors = validate_line_items(&items).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::NameBlank, ValidationError::PriceNegative]);
//! ```

use rust_decimal::Decimal;
use std::num::IntErrorKind;

use crate::error::ValidationError;
use crate::types::{FieldValue, LineItem, Price, PriceInput, RawLineItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line item name.
///
/// ## Rules
/// - Must not be blank → `Name can't be blank`
/// - Must be a string → `Name must be a string`
pub fn validate_name(name: &FieldValue) -> ValidationResult<String> {
    validate_text(name, ValidationError::NameBlank, ValidationError::NameNotString)
}

/// Validates a line item collection.
///
/// ## Rules
/// - Must not be blank → `Collection can't be blank`
/// - Must be a string → `Collection must be a string`
pub fn validate_collection(collection: &FieldValue) -> ValidationResult<String> {
    validate_text(
        collection,
        ValidationError::CollectionBlank,
        ValidationError::CollectionNotString,
    )
}

fn validate_text(
    value: &FieldValue,
    blank: ValidationError,
    not_string: ValidationError,
) -> ValidationResult<String> {
    if value.is_blank() {
        return Err(blank);
    }

    value.as_text().map(str::to_string).ok_or(not_string)
}

/// Validates a price.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  price field                                                            │
/// │       │                                                                 │
/// │       ├── blank? ─────────────────► "Price can't be blank"              │
/// │       │                                                                 │
/// │       ├── string or number?                                             │
/// │       │     └── parses? ── no ────► "Price must be a number"            │
/// │       │                                                                 │
/// │       ├── < 0? ───────────────────► "Price can't be negative"           │
/// │       │                                                                 │
/// │       ├── > MAX_PRICE? ───────────► "Price is too large"                │
/// │       │                                                                 │
/// │       └── OK → Price { amount, input }                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Strings and JSON numbers are both accepted.
///
/// ## Example
/// ```rust
/// use cartwise_core::validation::validate_price;
/// use cartwise_core::FieldValue;
///
/// assert!(validate_price(&FieldValue::from("39.0")).is_ok());
/// assert!(validate_price(&FieldValue::from("0")).is_ok());
/// assert!(validate_price(&FieldValue::from("price")).is_err());
/// assert!(validate_price(&FieldValue::from("-4")).is_err());
/// ```
pub fn validate_price(price: &FieldValue) -> ValidationResult<Price> {
    if price.is_blank() {
        return Err(ValidationError::PriceBlank);
    }

    let (amount, input) = match price {
        FieldValue::Text(s) => (parse_price(s)?, PriceInput::Text(s.clone())),
        FieldValue::Number(n) => (parse_price(&n.to_string())?, PriceInput::Number(n.clone())),
        _ => return Err(ValidationError::PriceNotNumber),
    };

    Ok(Price { amount, input })
}

/// Largest accepted price.
pub const MAX_PRICE: Decimal = Decimal::MAX;

/// Decimal places kept from a price. Finer digits are truncated, which
/// never changes the amount once rounded to cents.
const MAX_FRACTION_DIGITS: u64 = 28;

/// Digits in `MAX_PRICE`.
const MAX_PRICE_DIGITS: u64 = 29;

/// Parses a price string into an exact, non-negative decimal.
///
/// Accepts surrounding whitespace, an optional sign, decimal digits with at
/// most one `.`, and an optional exponent (`1e2`, `2.5E-3`).
///
/// ## Errors
/// - `PriceNotNumber` for anything else (`NaN`, `inf`, hex, `1_000`)
/// - `PriceNegative` for a value below zero (`-0` is zero)
/// - `PriceTooLarge` for a value above [`MAX_PRICE`]
///
/// ## Example
/// ```rust
/// use cartwise_core::validation::parse_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_price("1e2"), Ok(Decimal::ONE_HUNDRED));
/// assert_eq!(parse_price("1e-30"), Ok(Decimal::ZERO));
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<Decimal> {
    let raw = raw.trim();
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let (significand, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(at) => (&unsigned[..at], parse_exponent(&unsigned[at + 1..])?),
        None => (unsigned, 0),
    };

    let (whole, fraction) = significand.split_once('.').unwrap_or((significand, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(ValidationError::PriceNotNumber);
    }

    // value = digits × 10^exponent, with no leading or trailing zeros
    let joined = format!("{}{}", whole, fraction);
    let leading = joined.trim_start_matches('0');
    let digits = leading.trim_end_matches('0');
    let exponent = exponent
        .saturating_sub(fraction.len() as i64)
        .saturating_add((leading.len() - digits.len()) as i64);

    if digits.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if negative {
        return Err(ValidationError::PriceNegative);
    }

    // at least 10^(len - 1 + exponent)
    if (digits.len() as i64).saturating_add(exponent) > MAX_PRICE_DIGITS as i64 {
        return Err(ValidationError::PriceTooLarge);
    }

    let (kept, scale) = if exponent >= 0 {
        (digits, 0)
    } else {
        let scale = exponent.unsigned_abs();
        let len = digits.len() as u64;
        let drop = scale
            .saturating_sub(MAX_FRACTION_DIGITS)
            .max(len.saturating_sub(MAX_FRACTION_DIGITS))
            .min(scale);
        if drop >= len {
            return Ok(Decimal::ZERO);
        }
        (&digits[..(len - drop) as usize], scale - drop)
    };

    // at most MAX_PRICE_DIGITS digits, so the parse and shift fit in i128
    let mantissa: i128 = kept.parse().map_err(|_| ValidationError::PriceTooLarge)?;
    let mantissa = if exponent > 0 {
        mantissa * 10i128.pow(exponent as u32)
    } else {
        mantissa
    };

    Decimal::try_from_i128_with_scale(mantissa, scale as u32)
        .map_err(|_| ValidationError::PriceTooLarge)
}

/// Out-of-range exponents saturate; the magnitude checks take it from there.
fn parse_exponent(raw: &str) -> ValidationResult<i64> {
    match raw.parse::<i64>() {
        Ok(exponent) => Ok(exponent),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ValidationError::PriceNotNumber),
        },
    }
}

// =============================================================================
// Item Validators
// =============================================================================

/// Validates all three fields of one line item.
///
/// Every field is checked even after a failure, so the returned list holds
/// the errors for name, price and collection in that order.
pub fn validate_line_item(item: &RawLineItem) -> Result<LineItem, Vec<ValidationError>> {
    let name = validate_name(&item.name);
    let price = validate_price(&item.price);
    let collection = validate_collection(&item.collection);

    match (name, price, collection) {
        (Ok(name), Ok(price), Ok(collection)) => Ok(LineItem {
            name,
            price,
            collection,
        }),
        (name, price, collection) => Err([name.err(), price.err(), collection.err()]
            .into_iter()
            .flatten()
            .collect()),
    }
}

/// Validates every line item of a cart.
///
/// ## Behavior
/// - All-or-nothing: any error rejects the whole cart
/// - Errors from every item are collected, in input order
/// - An empty list is valid
pub fn validate_line_items(items: &[RawLineItem]) -> Result<Vec<LineItem>, Vec<ValidationError>> {
    let mut valid = Vec::with_capacity(items.len());
    let mut errors = Vec::new();

    for item in items {
        match validate_line_item(item) {
            Ok(line_item) => valid.push(line_item),
            Err(mut item_errors) => errors.append(&mut item_errors),
        }
    }

    if errors.is_empty() {
        Ok(valid)
    } else {
        Err(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
