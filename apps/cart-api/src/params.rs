//! # Request Parameters
//!
//! Structural checks on the `POST /cart` body, run before the core sees the
//! cart.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  body ──► presence ──► shape ──► permitted keys ──► Cart                │
//! │             │            │            │                                 │
//! │             ▼            ▼            ▼                                 │
//! │        MissingKeys  MalformedCart  UnpermittedParameters   (all 422)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each stage reports everything it finds, but a failing stage stops the
//! request before the next one runs. Keys next to `cart` at the top level
//! are ignored.

use serde_json::{Map, Value};

use cartwise_core::{value_is_blank, Cart, FieldValue, RawLineItem};

use crate::error::{ApiError, ApiResult};

/// Keys allowed inside `cart`.
pub const PERMITTED_CART_KEYS: [&str; 2] = ["reference", "lineItems"];

/// Keys allowed inside each line item.
pub const PERMITTED_LINE_ITEM_KEYS: [&str; 3] = ["name", "price", "collection"];

pub const CART_REQUIRED: &str = "cart hash is required";
pub const REFERENCE_REQUIRED: &str = "reference key is required";
pub const LINE_ITEMS_REQUIRED: &str = "lineItems key is required";

pub const REFERENCE_NOT_STRING: &str = "reference must be a string";
pub const LINE_ITEMS_NOT_LIST: &str = "lineItems must be a list";
pub const LINE_ITEM_NOT_OBJECT: &str = "lineItems entries must be objects";

/// Turns a request body into a cart, or the first failing stage's error.
pub fn cart_params(body: &Value) -> ApiResult<Cart> {
    let cart = body.get("cart").unwrap_or(&Value::Null);

    check_presence(cart)?;
    let (fields, reference, items) = check_shape(cart)?;
    check_permitted(fields, &items)?;

    let line_items = items.into_iter().map(raw_line_item).collect();
    Ok(Cart::new(reference, line_items))
}

// =============================================================================
// Stages
// =============================================================================

/// A blank cart reports all three keys.
fn check_presence(cart: &Value) -> ApiResult<()> {
    let mut missing = Vec::new();

    if value_is_blank(cart) {
        missing.push(CART_REQUIRED.to_string());
    }

    if cart.get("reference").map_or(true, value_is_blank) {
        missing.push(REFERENCE_REQUIRED.to_string());
    }

    // An empty list is an empty cart, not a missing key.
    if cart.get("lineItems").map_or(true, Value::is_null) {
        missing.push(LINE_ITEMS_REQUIRED.to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::MissingKeys(missing))
    }
}

type Shaped<'a> = (&'a Map<String, Value>, String, Vec<&'a Map<String, Value>>);

fn check_shape(cart: &Value) -> ApiResult<Shaped<'_>> {
    // Presence already rejected every non-object cart: `get` on one is None.
    let Some(fields) = cart.as_object() else {
        return Err(ApiError::MissingKeys(vec![CART_REQUIRED.to_string()]));
    };

    let mut errors = Vec::new();

    let reference = match fields.get("reference") {
        Some(Value::String(s)) => s.clone(),
        _ => {
            errors.push(REFERENCE_NOT_STRING.to_string());
            String::new()
        }
    };

    let mut items = Vec::new();
    match fields.get("lineItems") {
        Some(Value::Array(entries)) => {
            for entry in entries {
                match entry.as_object() {
                    Some(item) => items.push(item),
                    None => {
                        errors.push(LINE_ITEM_NOT_OBJECT.to_string());
                        break;
                    }
                }
            }
        }
        _ => errors.push(LINE_ITEMS_NOT_LIST.to_string()),
    }

    if errors.is_empty() {
        Ok((fields, reference, items))
    } else {
        Err(ApiError::MalformedCart(errors))
    }
}

fn check_permitted(cart: &Map<String, Value>, items: &[&Map<String, Value>]) -> ApiResult<()> {
    let mut unpermitted: Vec<String> = Vec::new();

    let mut note = |key: &String, permitted: &[&str]| {
        if !permitted.contains(&key.as_str()) && !unpermitted.contains(key) {
            unpermitted.push(key.clone());
        }
    };

    for key in cart.keys() {
        note(key, &PERMITTED_CART_KEYS);
    }
    for item in items {
        for key in item.keys() {
            note(key, &PERMITTED_LINE_ITEM_KEYS);
        }
    }

    if unpermitted.is_empty() {
        Ok(())
    } else {
        Err(ApiError::UnpermittedParameters(unpermitted))
    }
}

fn raw_line_item(item: &Map<String, Value>) -> RawLineItem {
    let field = |key: &str| {
        item.get(key)
            .cloned()
            .map(FieldValue::from)
            .unwrap_or_default()
    };

    RawLineItem {
        name: field("name"),
        price: field("price"),
        collection: field("collection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_of(result: ApiResult<Cart>) -> Vec<String> {
        match result {
            Err(ApiError::MissingKeys(errors)) | Err(ApiError::MalformedCart(errors)) => errors,
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_valid_cart() {
        let cart = cart_params(&json!({
            "cart": {
                "reference": "2d832fe0",
                "lineItems": [
                    { "name": "Peanut Butter", "price": "39.0", "collection": "BEST-SELLERS" },
                    { "name": "Fruity", "price": 32, "collection": "DEFAULT" }
                ]
            }
        }))
        .unwrap();

        assert_eq!(cart.reference, "2d832fe0");
        assert_eq!(cart.line_items.len(), 2);
        assert_eq!(
            cart.line_items[0],
            RawLineItem::new("Peanut Butter", "39.0", "BEST-SELLERS")
        );
        assert!(matches!(cart.line_items[1].price, FieldValue::Number(_)));
    }

    #[test]
    fn test_missing_cart_reports_every_key() {
        let expected = vec![CART_REQUIRED, REFERENCE_REQUIRED, LINE_ITEMS_REQUIRED];
        assert_eq!(errors_of(cart_params(&json!({}))), expected);
        assert_eq!(errors_of(cart_params(&json!({ "cart": null }))), expected);
        assert_eq!(errors_of(cart_params(&json!({ "cart": {} }))), expected);
        assert_eq!(errors_of(cart_params(&json!([1, 2]))), expected);
    }

    #[test]
    fn test_missing_reference_and_line_items() {
        assert_eq!(
            errors_of(cart_params(&json!({ "cart": { "reference": "  ", "lineItems": [] } }))),
            vec![REFERENCE_REQUIRED]
        );
        assert_eq!(
            errors_of(cart_params(&json!({ "cart": { "reference": "r", "lineItems": null } }))),
            vec![LINE_ITEMS_REQUIRED]
        );
    }

    #[test]
    fn test_non_object_cart_is_missing_keys() {
        assert_eq!(
            errors_of(cart_params(&json!({ "cart": "abc" }))),
            vec![REFERENCE_REQUIRED, LINE_ITEMS_REQUIRED]
        );
    }

    #[test]
    fn test_empty_line_items_is_an_empty_cart() {
        let cart = cart_params(&json!({ "cart": { "reference": "r", "lineItems": [] } })).unwrap();
        assert!(cart.line_items.is_empty());
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(
            errors_of(cart_params(&json!({ "cart": { "reference": 7, "lineItems": {"a": 1} } }))),
            vec![REFERENCE_NOT_STRING, LINE_ITEMS_NOT_LIST]
        );
        assert_eq!(
            errors_of(cart_params(&json!({ "cart": { "reference": "r", "lineItems": [1, "x"] } }))),
            vec![LINE_ITEM_NOT_OBJECT]
        );
    }

    #[test]
    fn test_unpermitted_keys_in_cart_and_items() {
        let result = cart_params(&json!({
            "cart": {
                "reference": "r",
                "other_key": true,
                "lineItems": [
                    { "name": "A", "price": "1", "collection": "X", "sku": 1 },
                    { "name": "B", "price": "1", "collection": "X", "sku": 2 }
                ]
            }
        }));

        match result {
            Err(ApiError::UnpermittedParameters(keys)) => {
                assert_eq!(keys, vec!["other_key", "sku"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_extra_keys_ignored() {
        let cart = cart_params(&json!({
            "format": "json",
            "cart": { "reference": "r", "lineItems": [] }
        }));
        assert!(cart.is_ok());
    }

    #[test]
    fn test_presence_runs_before_permit_list() {
        let result = cart_params(&json!({ "cart": { "other_key": 1 } }));
        assert_eq!(errors_of(result), vec![REFERENCE_REQUIRED, LINE_ITEMS_REQUIRED]);
    }

    #[test]
    fn test_missing_item_fields_stay_absent() {
        let cart = cart_params(&json!({
            "cart": { "reference": "r", "lineItems": [ { "name": null } ] }
        }))
        .unwrap();
        assert_eq!(cart.line_items[0].name, FieldValue::Null);
        assert_eq!(cart.line_items[0].price, FieldValue::Absent);
    }
}
