//! # Error Types
//!
//! Rule-validation errors for tally-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Surface                                   │
//! │                                                                         │
//! │  Checkout operations (scan, total)                                      │
//! │  └── infallible — every input is accepted, nothing panics               │
//! │                                                                         │
//! │  validation module (opt-in)                                             │
//! │  └── RuleError — one variant per rejected rule shape                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, offending values)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Rule Error
// =============================================================================

/// A pricing rule or SKU that fails the opt-in validation checks.
///
/// The checkout itself never produces these: it accepts any table and
/// computes whatever the arithmetic yields. Callers who want stricter
/// behavior run [`crate::validation::validate_rules`] before pricing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// SKU is empty or whitespace.
    #[error("sku is required")]
    EmptySku,

    /// SKU exceeds the maximum length.
    #[error("sku '{sku}' must be at most {max} characters")]
    SkuTooLong { sku: String, max: usize },

    /// SKU contains characters outside the allowed set.
    #[error("sku '{sku}' has invalid format: {reason}")]
    InvalidSkuFormat { sku: String, reason: String },

    /// Unit price is below zero.
    #[error("unit price for '{sku}' must not be negative (got {cents} cents)")]
    NegativeUnitPrice { sku: String, cents: i64 },

    /// Special deal with a group size of zero.
    #[error("special deal for '{sku}' must buy at least one unit")]
    ZeroBuyQuantity { sku: String },

    /// Special deal that charges for zero units per group.
    #[error("special deal for '{sku}' must pay for at least one unit")]
    ZeroPayQuantity { sku: String },

    /// Special deal that charges for more units than the group contains.
    #[error("special deal for '{sku}' pays for more units than it buys ({pay} > {buy})")]
    PayExceedsBuy { sku: String, buy: u32, pay: u32 },

    /// Bulk discount that would trigger at zero units.
    #[error("bulk discount for '{sku}' must have a threshold of at least one unit")]
    ZeroThreshold { sku: String },

    /// Bulk discount with a negative per-unit price.
    #[error("discounted price for '{sku}' must not be negative (got {cents} cents)")]
    NegativeDiscountedPrice { sku: String, cents: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with RuleError.
pub type RuleResult<T> = Result<T, RuleError>;

// =============================================================================
// Unit Tests
// =============================================================================
