//! # Discount Module
//!
//! Quantity-based discounts: the more eligible items in a cart, the larger
//! the rate applied to each of them.
//!
//! ## Discount Progression
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  eligible items │  rate                                                 │
//! │  ───────────────┼──────                                                 │
//! │        0 - 1    │   0%                                                  │
//! │          2      │   5%                                                  │
//! │          3      │  10%                                                  │
//! │          4      │  20%                                                  │
//! │         5+      │  25%                                                  │
//! │                                                                         │
//! │  Items in the KETO collection are never counted and never discounted.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DiscountRate, DiscountSummary, EvaluatedLineItem, LineItem};
use crate::EXCLUDED_COLLECTION;

// =============================================================================
// Tier Table
// =============================================================================

/// One row of the discount progression: an inclusive range of eligible item
/// counts and the rate it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    /// Smallest eligible count in this tier.
    pub min: usize,
    /// Largest eligible count in this tier, `None` for open-ended.
    pub max: Option<usize>,
    pub rate: DiscountRate,
}

impl DiscountTier {
    /// Returns true if `count` falls inside this tier.
    pub const fn contains(&self, count: usize) -> bool {
        if count < self.min {
            return false;
        }
        match self.max {
            Some(max) => count <= max,
            None => true,
        }
    }
}

/// The discount progression, checked in order; the first matching tier wins.
///
/// The ranges are contiguous, disjoint and cover every count from zero up.
pub const DISCOUNT_TIERS: [DiscountTier; 5] = [
    DiscountTier {
        min: 0,
        max: Some(1),
        rate: DiscountRate::zero(),
    },
    DiscountTier {
        min: 2,
        max: Some(2),
        rate: DiscountRate::from_bps(500),
    },
    DiscountTier {
        min: 3,
        max: Some(3),
        rate: DiscountRate::from_bps(1000),
    },
    DiscountTier {
        min: 4,
        max: Some(4),
        rate: DiscountRate::from_bps(2000),
    },
    DiscountTier {
        min: 5,
        max: None,
        rate: DiscountRate::from_bps(2500),
    },
];

/// Looks up the rate for a number of eligible items.
///
/// ## Example
/// ```rust
/// use cartwise_core::discount::discount_rate_for;
///
/// assert_eq!(discount_rate_for(1).bps(), 0);
/// assert_eq!(discount_rate_for(2).bps(), 500);
/// assert_eq!(discount_rate_for(9).bps(), 2500);
/// ```
pub fn discount_rate_for(eligible_count: usize) -> DiscountRate {
    DISCOUNT_TIERS
        .iter()
        .find(|tier| tier.contains(eligible_count))
        .map(|tier| tier.rate)
        .unwrap_or_default()
}

// =============================================================================
// Eligibility
// =============================================================================

/// Returns true unless the collection is exactly `KETO` (case-sensitive).
#[inline]
pub fn is_discount_eligible(collection: &str) -> bool {
    collection != EXCLUDED_COLLECTION
}

/// Counts the items that take part in the discount.
pub fn eligible_count(items: &[LineItem]) -> usize {
    items
        .iter()
        .filter(|item| is_discount_eligible(&item.collection))
        .count()
}

// =============================================================================
// Price Computation
// =============================================================================

/// Computes the rounded price of one item under the cart's rate.
///
/// Non-eligible items keep their price (rounded to 2 decimals) whatever the
/// rate is.
pub fn discounted_price(item: &LineItem, rate: DiscountRate) -> Money {
    let amount = if is_discount_eligible(&item.collection) {
        item.price.amount * rate.multiplier()
    } else {
        item.price.amount
    };
    Money::from_decimal(amount)
}

/// Line items with their discounted prices and the cart total.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedItems {
    pub line_items: Vec<EvaluatedLineItem>,
    pub total_price: Money,
    pub summary: DiscountSummary,
}

/// Applies the cart's discount to validated line items.
///
/// ## Flow
/// ```text
/// items ──► eligible_count ──► discount_rate_for ──► rate
///   │                                                  │
///   └──────────────► discounted_price(item, rate) ◄────┘
///                              │
///                              ▼
///                   total = Σ discounted (exact)
/// ```
///
/// Output order matches input order.
///
/// ## Errors
/// `CoreError::TotalTooLarge` if the total does not fit in `Money`.
pub fn apply_discounts(items: Vec<LineItem>) -> CoreResult<DiscountedItems> {
    let eligible = eligible_count(&items);
    let rate = discount_rate_for(eligible);

    let line_items: Vec<EvaluatedLineItem> = items
        .into_iter()
        .map(|item| {
            let discounted_price = discounted_price(&item, rate);
            EvaluatedLineItem {
                name: item.name,
                price: item.price.input,
                collection: item.collection,
                discounted_price,
            }
        })
        .collect();

    let total_price = Money::checked_total(line_items.iter().map(|item| item.discounted_price))
        .ok_or(CoreError::TotalTooLarge)?;

    Ok(DiscountedItems {
        line_items,
        total_price,
        summary: DiscountSummary {
            eligible_count: eligible,
            rate,
        },
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, PriceInput};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn item(name: &str, price: &str, collection: &str) -> LineItem {
        LineItem {
            name: name.to_string(),
            price: Price {
                amount: Decimal::from_str(price).unwrap(),
                input: PriceInput::Text(price.to_string()),
            },
            collection: collection.to_string(),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(discount_rate_for(0).bps(), 0);
        assert_eq!(discount_rate_for(1).bps(), 0);
        assert_eq!(discount_rate_for(2).bps(), 500);
        assert_eq!(discount_rate_for(3).bps(), 1000);
        assert_eq!(discount_rate_for(4).bps(), 2000);
        assert_eq!(discount_rate_for(5).bps(), 2500);
        assert_eq!(discount_rate_for(6).bps(), 2500);
        assert_eq!(discount_rate_for(usize::MAX).bps(), 2500);
    }

    #[test]
    fn test_tiers_are_contiguous_and_disjoint() {
        for count in 0..50 {
            let matching = DISCOUNT_TIERS.iter().filter(|t| t.contains(count)).count();
            assert_eq!(matching, 1, "count {} matched {} tiers", count, matching);
        }
    }

    #[test]
    fn test_eligibility_is_case_sensitive() {
        assert!(!is_discount_eligible("KETO"));
        assert!(is_discount_eligible("keto"));
        assert!(is_discount_eligible("Keto"));
        assert!(is_discount_eligible("KETO "));
        assert!(is_discount_eligible("BEST-SELLERS"));
    }

    #[test]
    fn test_eligible_count_skips_keto() {
        let items = vec![
            item("Peanut Butter", "39.0", "BEST-SELLERS"),
            item("Cocoa", "34.99", "KETO"),
            item("Fruity", "32", "DEFAULT"),
        ];
        assert_eq!(eligible_count(&items), 2);
    }

    #[test]
    fn test_discounted_price() {
        let rate = DiscountRate::from_bps(500);
        assert_eq!(
            discounted_price(&item("Peanut Butter", "39.0", "BEST-SELLERS"), rate).cents(),
            3705
        );
        assert_eq!(
            discounted_price(&item("Fruity", "32", "DEFAULT"), rate).cents(),
            3040
        );
        assert_eq!(discounted_price(&item("Cocoa", "34.99", "KETO"), rate).cents(), 3499);
    }

    #[test]
    fn test_keto_items_round_without_discount() {
        let rate = DiscountRate::from_bps(2500);
        assert_eq!(discounted_price(&item("Cocoa", "34.995", "KETO"), rate).cents(), 3500);
    }

    #[test]
    fn test_apply_discounts_mixed_cart() {
        let result = apply_discounts(vec![
            item("Peanut Butter", "39.0", "BEST-SELLERS"),
            item("Cocoa", "34.99", "KETO"),
            item("Fruity", "32", "DEFAULT"),
        ])
        .unwrap();

        let prices: Vec<i128> = result
            .line_items
            .iter()
            .map(|i| i.discounted_price.cents())
            .collect();
        assert_eq!(prices, vec![3705, 3499, 3040]);
        assert_eq!(result.total_price.cents(), 10244);
        assert_eq!(result.summary.eligible_count, 2);
        assert_eq!(result.summary.rate, DiscountRate::from_bps(500));
    }

    #[test]
    fn test_apply_discounts_keeps_order_and_fields() {
        let result = apply_discounts(vec![
            item("B", "1", "X"),
            item("A", "2", "KETO"),
            item("C", "3", "Y"),
        ])
        .unwrap();
        let names: Vec<_> = result.line_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(result.line_items[1].collection, "KETO");
        assert_eq!(result.line_items[1].price, PriceInput::Text("2".to_string()));
    }

    #[test]
    fn test_five_or_more_items() {
        let items: Vec<LineItem> = (0..6).map(|_| item("Banana Cake", "34.99", "BEST-SELLERS")).collect();
        let result = apply_discounts(items).unwrap();
        // 34.99 * 0.75 = 26.2425 → 26.24
        assert!(result.line_items.iter().all(|i| i.discounted_price.cents() == 2624));
        assert_eq!(result.total_price.cents(), 2624 * 6);
    }

    #[test]
    fn test_empty_cart() {
        let result = apply_discounts(Vec::new()).unwrap();
        assert!(result.line_items.is_empty());
        assert!(result.total_price.is_zero());
        assert_eq!(result.summary.eligible_count, 0);
        assert!(result.summary.rate.is_zero());
    }

    #[test]
    fn test_total_beyond_i64_cents_is_exact() {
        let result = apply_discounts(vec![
            item("A", "90000000000000000", "KETO"),
            item("B", "90000000000000000", "KETO"),
        ])
        .unwrap();
        assert_eq!(result.total_price.to_string(), "180000000000000000.00");
    }
}
