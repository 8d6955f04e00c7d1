//! # tally-core: Pure Pricing Logic for Tally
//!
//! This crate is the **heart** of Tally. It contains the whole checkout
//! pricing engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/register (demo binary)                     │   │
//! │  │    loads rule table ──► scans baskets ──► prints totals         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   rules   │  │ checkout  │  │ validation│  │   │
//! │  │   │   Money   │  │ Pricing-  │  │ Checkout  │  │   rules   │  │   │
//! │  │   │  (cents)  │  │ Rule(s)   │  │ scan/total│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`rules`] - Pricing rules: unit prices and discount policies
//! - [`checkout`] - The Checkout session: scan items, compute the total
//! - [`error`] - Rule-validation error types
//! - [`validation`] - Opt-in rule-table validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Infallible Checkout**: scan and total accept every input and never panic;
//!    typed errors exist only on the opt-in validation surface
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Checkout, DiscountPolicy, Money, PricingRule, PricingRules, SpecialDeal};
//!
//! // Price the catalog: Apple TV is on a buy-3-pay-for-2 deal
//! let mut rules = PricingRules::new();
//! rules.insert(
//!     "atv",
//!     PricingRule::with_policy(
//!         Money::from_major_minor(109, 50),
//!         DiscountPolicy::SpecialDeal(SpecialDeal { buy: 3, pay: 2 }),
//!     ),
//! );
//! rules.insert("vga", PricingRule::new(Money::from_major_minor(30, 0)));
//!
//! // Scan a basket and total it
//! let mut checkout = Checkout::new(&rules);
//! for sku in ["atv", "atv", "atv", "vga"] {
//!     checkout.scan(sku);
//! }
//! assert_eq!(checkout.total(), Money::from_major_minor(249, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod rules;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tally_core::Checkout` instead of
// `use tally_core::checkout::Checkout`

pub use checkout::Checkout;
pub use error::{RuleError, RuleResult};
pub use money::Money;
pub use rules::{BulkDiscount, DiscountPolicy, PricingRule, PricingRules, SpecialDeal};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum SKU length accepted by the opt-in validator
///
/// ## Why a constant?
/// The checkout itself puts no limit on SKUs (it records anything scanned).
/// The validator caps them so rule tables stay printable on receipts and
/// label stock.
pub const MAX_SKU_LEN: usize = 50;
