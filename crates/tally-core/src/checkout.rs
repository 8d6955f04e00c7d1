//! # Checkout
//!
//! Accumulates scanned item codes and totals them against a pricing-rule
//! table.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Operations                               │
//! │                                                                         │
//! │  Cashier Action            Operation              State Change          │
//! │  ──────────────            ─────────              ────────────          │
//! │                                                                         │
//! │  Scan barcode ───────────► scan(sku) ───────────► scanned.push(sku)     │
//! │                                                                         │
//! │  Read the display ───────► total() ─────────────► (read only)           │
//! │                                                                         │
//! │  total() groups the scans by SKU, charges each group through its        │
//! │  pricing rule, and sums the contributions. SKUs with no rule            │
//! │  contribute nothing.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//! `total` is a pure function of the multiset of scanned SKUs and the rule
//! table: scan order never matters, and repeated calls with no intervening
//! scan return the same value.

use std::collections::HashMap;

use crate::money::Money;
use crate::rules::PricingRules;

/// A single checkout session: one basket priced against one rule table.
///
/// ## Design Notes
/// - Borrows the rule table: rules are priced out-of-band and shared
///   read-only across any number of concurrent sessions.
/// - Owns its scanned sequence exclusively; `scan` needs `&mut self`, so
///   the borrow checker enforces the single-writer discipline.
/// - Scans are kept in arrival order. The total does not depend on order,
///   but the sequence is the receipt-shaped record of what happened.
#[derive(Debug, Clone)]
pub struct Checkout<'a> {
    /// The pricing-rule table this session prices against.
    rules: &'a PricingRules,

    /// Scanned SKUs in arrival order, duplicates allowed.
    scanned: Vec<String>,
}

impl<'a> Checkout<'a> {
    /// Starts a checkout session against a rule table.
    ///
    /// No validation happens here: any table is accepted, and malformed
    /// rules price however their arithmetic falls. Use
    /// [`crate::validation::validate_rules`] beforehand for stricter setups.
    pub fn new(rules: &'a PricingRules) -> Self {
        Checkout {
            rules,
            scanned: Vec::new(),
        }
    }

    /// Records one scanned item.
    ///
    /// Never fails: SKUs without a pricing rule are recorded too, they just
    /// contribute nothing to the total.
    pub fn scan(&mut self, sku: impl Into<String>) {
        self.scanned.push(sku.into());
    }

    /// The scanned SKUs in arrival order.
    pub fn scanned(&self) -> &[String] {
        &self.scanned
    }

    /// Checks if nothing has been scanned yet.
    pub fn is_empty(&self) -> bool {
        self.scanned.is_empty()
    }

    /// Computes the basket total.
    ///
    /// ## Algorithm
    /// 1. Count occurrences per distinct SKU (grouping by value equality).
    /// 2. Charge each counted SKU through its rule; unknown SKUs are skipped.
    /// 3. Sum the contributions.
    ///
    /// Takes `&self`: the basket is never mutated, so calling this twice
    /// with no scan in between returns the same value.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::checkout::Checkout;
    /// use tally_core::money::Money;
    /// use tally_core::rules::{PricingRule, PricingRules};
    ///
    /// let mut rules = PricingRules::new();
    /// rules.insert("vga", PricingRule::new(Money::from_major_minor(30, 0)));
    ///
    /// let mut checkout = Checkout::new(&rules);
    /// checkout.scan("vga");
    /// checkout.scan("vga");
    /// assert_eq!(checkout.total(), Money::from_major_minor(60, 0));
    /// ```
    pub fn total(&self) -> Money {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for sku in &self.scanned {
            *counts.entry(sku.as_str()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .filter_map(|(sku, count)| self.rules.get(sku).map(|rule| rule.charge(count)))
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BulkDiscount, DiscountPolicy, PricingRule, SpecialDeal};

    /// The reference rule table used by both pricing scenarios.
    fn reference_rules() -> PricingRules {
        let mut rules = PricingRules::new();
        rules.insert(
            "ipd",
            PricingRule::with_policy(
                Money::from_major_minor(549, 99),
                DiscountPolicy::BulkDiscount(BulkDiscount {
                    threshold: 4,
                    discounted_price: Money::from_major_minor(499, 99),
                }),
            ),
        );
        rules.insert("mbp", PricingRule::new(Money::from_major_minor(1399, 99)));
        rules.insert(
            "atv",
            PricingRule::with_policy(
                Money::from_major_minor(109, 50),
                DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
            ),
        );
        rules.insert("vga", PricingRule::new(Money::from_major_minor(30, 0)));
        rules
    }

    fn total_of(rules: &PricingRules, skus: &[&str]) -> Money {
        let mut checkout = Checkout::new(rules);
        for sku in skus {
            checkout.scan(*sku);
        }
        checkout.total()
    }

    #[test]
    fn test_empty_basket_totals_zero() {
        let rules = reference_rules();
        let checkout = Checkout::new(&rules);
        assert!(checkout.is_empty());
        assert_eq!(checkout.total(), Money::zero());
    }

    #[test]
    fn test_scenario_a_special_deal_basket() {
        // Three Apple TVs trigger the 3-for-2 deal; the VGA adapter rides along
        let rules = reference_rules();
        let total = total_of(&rules, &["atv", "atv", "atv", "vga"]);
        assert_eq!(total, Money::from_major_minor(249, 0));
    }

    #[test]
    fn test_scenario_b_bulk_discount_basket() {
        // Five iPads cross the bulk threshold; two Apple TVs miss the deal
        let rules = reference_rules();
        let total = total_of(
            &rules,
            &["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"],
        );
        assert_eq!(total, Money::from_major_minor(2718, 95));
    }

    #[test]
    fn test_total_ignores_scan_order() {
        let rules = reference_rules();
        let forward = total_of(&rules, &["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"]);
        let shuffled = total_of(&rules, &["ipd", "atv", "ipd", "ipd", "atv", "ipd", "ipd"]);
        let reversed = total_of(&rules, &["ipd", "ipd", "ipd", "atv", "ipd", "ipd", "atv"]);

        assert_eq!(forward, shuffled);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_total_is_idempotent() {
        let rules = reference_rules();
        let mut checkout = Checkout::new(&rules);
        checkout.scan("atv");
        checkout.scan("atv");
        checkout.scan("atv");

        let first = checkout.total();
        let second = checkout.total();
        assert_eq!(first, second);

        // The scanned record is untouched by totaling
        assert_eq!(checkout.scanned(), &["atv", "atv", "atv"]);

        // A further scan changes the total as expected
        checkout.scan("vga");
        assert_eq!(checkout.total(), first + Money::from_major_minor(30, 0));
    }

    #[test]
    fn test_unknown_skus_contribute_zero() {
        let rules = reference_rules();
        assert_eq!(total_of(&rules, &["nope"]), Money::zero());
        assert_eq!(
            total_of(&rules, &["nope", "nope", "nope", "nope", "nope"]),
            Money::zero()
        );

        // Unknown SKUs are still recorded, just not charged
        let mut checkout = Checkout::new(&rules);
        checkout.scan("nope");
        checkout.scan("vga");
        assert_eq!(checkout.scanned().len(), 2);
        assert_eq!(checkout.total(), Money::from_major_minor(30, 0));
    }

    #[test]
    fn test_special_deal_across_multiple_groups() {
        let rules = reference_rules();

        // k complete groups: k * pay * price
        assert_eq!(
            total_of(&rules, &["atv"; 6]),
            Money::from_cents(4 * 10950)
        );

        // k groups plus remainder r: k * pay * price + r * price
        assert_eq!(
            total_of(&rules, &["atv"; 7]),
            Money::from_cents(5 * 10950)
        );
        assert_eq!(
            total_of(&rules, &["atv"; 8]),
            Money::from_cents(6 * 10950)
        );
    }

    #[test]
    fn test_bulk_discount_threshold_boundary() {
        let rules = reference_rules();

        // One short of the threshold: full price
        assert_eq!(
            total_of(&rules, &["ipd"; 3]),
            Money::from_cents(3 * 54999)
        );

        // At the threshold: every unit discounted
        assert_eq!(
            total_of(&rules, &["ipd"; 4]),
            Money::from_cents(4 * 49999)
        );
    }

    #[test]
    fn test_sessions_share_one_rule_table() {
        let rules = reference_rules();
        let mut first = Checkout::new(&rules);
        let mut second = Checkout::new(&rules);

        first.scan("mbp");
        second.scan("vga");

        // Each session owns its basket; the shared table is untouched
        assert_eq!(first.total(), Money::from_major_minor(1399, 99));
        assert_eq!(second.total(), Money::from_major_minor(30, 0));
    }
}
