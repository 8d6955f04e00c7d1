//! # Validation Module
//!
//! Opt-in validation for pricing-rule tables.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Is Opt-In                               │
//! │                                                                         │
//! │  Checkout::new(&rules) ──► accepts ANY table, validates nothing         │
//! │                            (malformed rules price as the arithmetic     │
//! │                             falls; nothing panics)                      │
//! │                                                                         │
//! │  validate_rules(&rules) ─► run it yourself, before pricing, if you      │
//! │                            want malformed tables rejected up front      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::rules::{PricingRule, PricingRules};
//! use tally_core::validation::validate_rules;
//!
//! let mut rules = PricingRules::new();
//! rules.insert("vga", PricingRule::new(Money::from_cents(3000)));
//! assert!(validate_rules(&rules).is_ok());
//! ```

use crate::error::{RuleError, RuleResult};
use crate::rules::{DiscountPolicy, PricingRule, PricingRules};
use crate::MAX_SKU_LEN;

// =============================================================================
// SKU Validator
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Must contain only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use tally_core::validation::validate_sku;
///
/// assert!(validate_sku("atv").is_ok());
/// assert!(validate_sku("COKE-330").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> RuleResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(RuleError::EmptySku);
    }

    if sku.len() > MAX_SKU_LEN {
        return Err(RuleError::SkuTooLong {
            sku: sku.to_string(),
            max: MAX_SKU_LEN,
        });
    }

    // Check for valid characters (alphanumeric, hyphen, underscore)
    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RuleError::InvalidSkuFormat {
            sku: sku.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Rule Validators
// =============================================================================

/// Validates one pricing rule.
///
/// ## Rules
/// - Unit price must be non-negative (zero is allowed: free items)
/// - Special deal: `buy ≥ 1`, `pay ≥ 1`, `pay ≤ buy`
/// - Bulk discount: `threshold ≥ 1`, discounted price non-negative
pub fn validate_rule(sku: &str, rule: &PricingRule) -> RuleResult<()> {
    if rule.unit_price.is_negative() {
        return Err(RuleError::NegativeUnitPrice {
            sku: sku.to_string(),
            cents: rule.unit_price.cents(),
        });
    }

    match rule.policy {
        DiscountPolicy::None => Ok(()),
        DiscountPolicy::SpecialDeal(deal) => {
            if deal.buy == 0 {
                return Err(RuleError::ZeroBuyQuantity {
                    sku: sku.to_string(),
                });
            }
            if deal.pay == 0 {
                return Err(RuleError::ZeroPayQuantity {
                    sku: sku.to_string(),
                });
            }
            if deal.pay > deal.buy {
                return Err(RuleError::PayExceedsBuy {
                    sku: sku.to_string(),
                    buy: deal.buy,
                    pay: deal.pay,
                });
            }
            Ok(())
        }
        DiscountPolicy::BulkDiscount(bulk) => {
            if bulk.threshold == 0 {
                return Err(RuleError::ZeroThreshold {
                    sku: sku.to_string(),
                });
            }
            if bulk.discounted_price.is_negative() {
                return Err(RuleError::NegativeDiscountedPrice {
                    sku: sku.to_string(),
                    cents: bulk.discounted_price.cents(),
                });
            }
            Ok(())
        }
    }
}

/// Validates an entire rule table: every SKU and every rule.
///
/// Returns the first failure encountered; iteration order over the table
/// is unspecified, so callers should treat any returned error as "the
/// table is bad", not "this is the only problem".
pub fn validate_rules(rules: &PricingRules) -> RuleResult<()> {
    for (sku, rule) in rules.iter() {
        validate_sku(sku)?;
        validate_rule(sku, rule)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
