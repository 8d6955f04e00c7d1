//! # Pricing Rules
//!
//! Domain types for the per-SKU pricing-rule table.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Rule Types                               │
//! │                                                                         │
//! │  PricingRules  ──  map: SKU ──► PricingRule                             │
//! │                                                                         │
//! │  ┌─────────────────┐     ┌─────────────────────────────────────────┐   │
//! │  │   PricingRule   │     │          DiscountPolicy                 │   │
//! │  │  ─────────────  │     │  ─────────────────────────────────────  │   │
//! │  │  unit_price     │     │  None                                   │   │
//! │  │  policy ────────┼────►│  SpecialDeal  { buy, pay }              │   │
//! │  └─────────────────┘     │  BulkDiscount { threshold, disc_price } │   │
//! │                          └─────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Single-Policy Invariant
//! The legacy rule-table shape carried two independent optional fields
//! (`special_deal`, `bulk_discount`) and resolved the overlap by giving the
//! special deal priority. Here the overlap cannot exist: a rule holds exactly
//! one `DiscountPolicy` variant. Deserialization of the legacy shape collapses
//! both fields into one policy, special deal winning when both are present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;

// =============================================================================
// Special Deal
// =============================================================================

/// A "buy N, pay for M" promotion.
///
/// For every `buy` units scanned, only `pay` units are charged, each at the
/// rule's full unit price. Units left over from an incomplete group
/// (`count % buy`) are charged at full unit price as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialDeal {
    /// Units that form one complete promotion group.
    pub buy: u32,
    /// Units actually charged per complete group.
    pub pay: u32,
}

impl SpecialDeal {
    /// Number of units charged for `count` scanned units.
    ///
    /// A `buy` of zero never completes a group, so every unit is charged;
    /// malformed rules compute, they do not panic.
    pub const fn chargeable_units(&self, count: u32) -> u32 {
        if self.buy == 0 {
            return count;
        }

        let deal_count = count / self.buy;
        let remainder = count % self.buy;
        deal_count * self.pay + remainder
    }
}

// =============================================================================
// Bulk Discount
// =============================================================================

/// A reduced per-unit price once a minimum quantity is met.
///
/// If the scanned quantity reaches `threshold`, every unit of the SKU is
/// charged at `discounted_price` instead of the rule's unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscount {
    /// Minimum scanned quantity for the discount to apply.
    pub threshold: u32,
    /// Per-unit price charged once the threshold is met.
    #[serde(rename = "discounted_price_cents")]
    pub discounted_price: Money,
}

// =============================================================================
// Discount Policy
// =============================================================================

/// The discount attached to a pricing rule: at most one per SKU.
///
/// ## Why a Sum Type?
/// Two independent `Option` fields would re-admit the ambiguous
/// "both set" state the legacy shape had to resolve by priority.
/// The enum makes "at most one policy" a structural guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPolicy {
    /// Plain per-unit pricing, no promotion.
    #[default]
    None,
    /// "Buy N, pay for M" promotion.
    SpecialDeal(SpecialDeal),
    /// Threshold-triggered per-unit price cut.
    BulkDiscount(BulkDiscount),
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// The price entry for one SKU: a unit price plus an optional discount policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPricingRule", into = "RawPricingRule")]
pub struct PricingRule {
    /// Full per-unit price in the smallest currency unit.
    pub unit_price: Money,
    /// Discount policy, if any.
    pub policy: DiscountPolicy,
}

impl PricingRule {
    /// Creates a rule with plain per-unit pricing.
    #[inline]
    pub const fn new(unit_price: Money) -> Self {
        PricingRule {
            unit_price,
            policy: DiscountPolicy::None,
        }
    }

    /// Creates a rule with the given discount policy.
    #[inline]
    pub const fn with_policy(unit_price: Money, policy: DiscountPolicy) -> Self {
        PricingRule { unit_price, policy }
    }

    /// Computes the charge for `count` scanned units of this SKU.
    ///
    /// ## Pricing Branches
    /// ```text
    /// SpecialDeal ──────────────► (full groups × pay + remainder) × unit_price
    /// BulkDiscount, count ≥ T ──► count × discounted_price
    /// otherwise ────────────────► count × unit_price
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::rules::{DiscountPolicy, PricingRule, SpecialDeal};
    ///
    /// // Apple TV: $109.50, buy 3 pay for 2
    /// let rule = PricingRule::with_policy(
    ///     Money::from_major_minor(109, 50),
    ///     DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
    /// );
    ///
    /// // Three scanned, two charged
    /// assert_eq!(rule.charge(3), Money::from_major_minor(219, 0));
    /// ```
    pub fn charge(&self, count: u32) -> Money {
        match self.policy {
            DiscountPolicy::SpecialDeal(deal) => self.unit_price * deal.chargeable_units(count),
            DiscountPolicy::BulkDiscount(bulk) if count >= bulk.threshold => {
                bulk.discounted_price * count
            }
            _ => self.unit_price * count,
        }
    }
}

// =============================================================================
// Wire Shape
// =============================================================================

/// The serialized rule shape: a price plus two optional discount fields.
///
/// This mirrors the legacy rule-table layout so existing tables load
/// unchanged. `From` conversions collapse it into the single-policy model.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawPricingRule {
    price_cents: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    special_deal: Option<SpecialDeal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bulk_discount: Option<BulkDiscount>,
}

impl From<RawPricingRule> for PricingRule {
    fn from(raw: RawPricingRule) -> Self {
        // Special deal takes priority when both fields are present
        let policy = match (raw.special_deal, raw.bulk_discount) {
            (Some(deal), _) => DiscountPolicy::SpecialDeal(deal),
            (None, Some(bulk)) => DiscountPolicy::BulkDiscount(bulk),
            (None, None) => DiscountPolicy::None,
        };

        PricingRule {
            unit_price: raw.price_cents,
            policy,
        }
    }
}

impl From<PricingRule> for RawPricingRule {
    fn from(rule: PricingRule) -> Self {
        let (special_deal, bulk_discount) = match rule.policy {
            DiscountPolicy::None => (None, None),
            DiscountPolicy::SpecialDeal(deal) => (Some(deal), None),
            DiscountPolicy::BulkDiscount(bulk) => (None, Some(bulk)),
        };

        RawPricingRule {
            price_cents: rule.unit_price,
            special_deal,
            bulk_discount,
        }
    }
}

// =============================================================================
// Pricing Rules Table
// =============================================================================

/// The rule table: a mapping from SKU to its pricing rule, keys unique.
///
/// Serializes transparently as a JSON object keyed by SKU:
/// ```json
/// {
///   "atv": { "price_cents": 10950, "special_deal": { "buy": 3, "pay": 2 } },
///   "vga": { "price_cents": 3000 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingRules {
    rules: HashMap<String, PricingRule>,
}

impl PricingRules {
    /// Creates an empty rule table.
    pub fn new() -> Self {
        PricingRules {
            rules: HashMap::new(),
        }
    }

    /// Inserts or replaces the rule for a SKU.
    ///
    /// Returns the previous rule if the SKU was already priced.
    pub fn insert(&mut self, sku: impl Into<String>, rule: PricingRule) -> Option<PricingRule> {
        self.rules.insert(sku.into(), rule)
    }

    /// Looks up the rule for a SKU.
    pub fn get(&self, sku: &str) -> Option<&PricingRule> {
        self.rules.get(sku)
    }

    /// Returns the number of priced SKUs.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Checks if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(sku, rule)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PricingRule)> {
        self.rules.iter().map(|(sku, rule)| (sku.as_str(), rule))
    }
}

impl FromIterator<(String, PricingRule)> for PricingRules {
    fn from_iter<I: IntoIterator<Item = (String, PricingRule)>>(iter: I) -> Self {
        PricingRules {
            rules: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charge_plain_rule() {
        let rule = PricingRule::new(Money::from_major_minor(30, 0));
        assert_eq!(rule.charge(0), Money::zero());
        assert_eq!(rule.charge(1), Money::from_cents(3000));
        assert_eq!(rule.charge(5), Money::from_cents(15000));
    }

    #[test]
    fn test_charge_special_deal_complete_groups() {
        // Buy 3 pay for 2 at $109.50: k*B units cost k*P*price
        let rule = PricingRule::with_policy(
            Money::from_major_minor(109, 50),
            DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
        );

        assert_eq!(rule.charge(3), Money::from_cents(21900));
        assert_eq!(rule.charge(6), Money::from_cents(43800));
        assert_eq!(rule.charge(9), Money::from_cents(65700));
    }

    #[test]
    fn test_charge_special_deal_with_remainder() {
        // k*B + r units cost k*P*price + r*price
        let rule = PricingRule::with_policy(
            Money::from_major_minor(109, 50),
            DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
        );

        assert_eq!(rule.charge(1), Money::from_cents(10950));
        assert_eq!(rule.charge(2), Money::from_cents(21900));
        assert_eq!(rule.charge(4), Money::from_cents(32850)); // 2 deal + 1 over
        assert_eq!(rule.charge(5), Money::from_cents(43800));
    }

    #[test]
    fn test_charge_special_deal_zero_buy_charges_full_price() {
        // Malformed rule: a group of zero never completes, so no discount
        let rule = PricingRule::with_policy(
            Money::from_cents(100),
            DiscountPolicy::SpecialDeal(SpecialDeal { buy: 0, pay: 0 }),
        );

        assert_eq!(rule.charge(4), Money::from_cents(400));
    }

    #[test]
    fn test_charge_bulk_discount_around_threshold() {
        // $549.99, 4+ units at $499.99 each
        let rule = PricingRule::with_policy(
            Money::from_major_minor(549, 99),
            DiscountPolicy::BulkDiscount(BulkDiscount {
                threshold: 4,
                discounted_price: Money::from_major_minor(499, 99),
            }),
        );

        assert_eq!(rule.charge(3), Money::from_cents(164997)); // below: full price
        assert_eq!(rule.charge(4), Money::from_cents(199996)); // at: all discounted
        assert_eq!(rule.charge(5), Money::from_cents(249995)); // above: all discounted
    }

    #[test]
    fn test_rules_insert_and_get() {
        let mut rules = PricingRules::new();
        assert!(rules.is_empty());

        let rule = PricingRule::new(Money::from_cents(3000));
        assert_eq!(rules.insert("vga", rule), None);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get("vga"), Some(&rule));
        assert_eq!(rules.get("hdmi"), None);

        // Re-inserting returns the replaced rule
        let cheaper = PricingRule::new(Money::from_cents(2500));
        assert_eq!(rules.insert("vga", cheaper), Some(rule));
        assert_eq!(rules.get("vga"), Some(&cheaper));
    }

    #[test]
    fn test_deserialize_rule_table() {
        let json = r#"{
            "ipd": { "price_cents": 54999, "bulk_discount": { "threshold": 4, "discounted_price_cents": 49999 } },
            "mbp": { "price_cents": 139999 },
            "atv": { "price_cents": 10950, "special_deal": { "buy": 3, "pay": 2 } }
        }"#;

        let rules: PricingRules = serde_json::from_str(json).unwrap();
        assert_eq!(rules.len(), 3);

        let atv = rules.get("atv").unwrap();
        assert_eq!(atv.unit_price, Money::from_cents(10950));
        assert_eq!(
            atv.policy,
            DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 })
        );

        let ipd = rules.get("ipd").unwrap();
        assert_eq!(
            ipd.policy,
            DiscountPolicy::BulkDiscount(BulkDiscount {
                threshold: 4,
                discounted_price: Money::from_cents(49999),
            })
        );

        assert_eq!(rules.get("mbp").unwrap().policy, DiscountPolicy::None);
    }

    #[test]
    fn test_deserialize_special_deal_wins_over_bulk() {
        // Legacy tables could set both fields; the special deal has priority
        let json = r#"{
            "price_cents": 1000,
            "special_deal": { "buy": 2, "pay": 1 },
            "bulk_discount": { "threshold": 10, "discounted_price_cents": 1 }
        }"#;

        let rule: PricingRule = serde_json::from_str(json).unwrap();
        assert_eq!(
            rule.policy,
            DiscountPolicy::SpecialDeal(SpecialDeal { buy: 2, pay: 1 })
        );
    }

    #[test]
    fn test_rule_round_trip() {
        let mut rules = PricingRules::new();
        rules.insert("vga", PricingRule::new(Money::from_cents(3000)));
        rules.insert(
            "atv",
            PricingRule::with_policy(
                Money::from_cents(10950),
                DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
            ),
        );

        let json = serde_json::to_string(&rules).unwrap();
        let reloaded: PricingRules = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, rules);
    }
}
