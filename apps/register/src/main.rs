//! # Register Demo
//!
//! Runs the two reference baskets against the reference rule table and
//! prints expected vs. actual totals.
//!
//! ## Usage
//! ```bash
//! cargo run -p tally-register
//!
//! # With scan-level logging
//! RUST_LOG=debug cargo run -p tally-register
//! ```
//!
//! ## Reference Catalog
//! | SKU | Price    | Promotion                    |
//! |-----|----------|------------------------------|
//! | ipd | $549.99  | 4+ units at $499.99 each     |
//! | mbp | $1399.99 | -                            |
//! | atv | $109.50  | buy 3, pay for 2             |
//! | vga | $30.00   | -                            |

use tally_core::{Checkout, Money, PricingRules};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// The reference rule table, in the JSON wire shape tally-core loads.
/// Prices are integer cents.
const PRICING_RULES_JSON: &str = r#"{
    "ipd": { "price_cents": 54999, "bulk_discount": { "threshold": 4, "discounted_price_cents": 49999 } },
    "mbp": { "price_cents": 139999 },
    "atv": { "price_cents": 10950, "special_deal": { "buy": 3, "pay": 2 } },
    "vga": { "price_cents": 3000 }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let rules: PricingRules = serde_json::from_str(PRICING_RULES_JSON)?;
    info!(rule_count = rules.len(), "loaded pricing rules");

    run_basket(
        "Example 1",
        &rules,
        &["atv", "atv", "atv", "vga"],
        Money::from_major_minor(249, 0),
    );

    run_basket(
        "Example 2",
        &rules,
        &["atv", "ipd", "ipd", "atv", "ipd", "ipd", "ipd"],
        Money::from_major_minor(2718, 95),
    );

    Ok(())
}

/// Scans one basket and prints its expected and actual totals.
fn run_basket(label: &str, rules: &PricingRules, skus: &[&str], expected: Money) {
    let mut checkout = Checkout::new(rules);
    for sku in skus {
        checkout.scan(*sku);
        debug!(sku = *sku, "scanned");
    }

    let actual = checkout.total();
    info!(label, scans = skus.len(), %actual, "basket totaled");

    println!("{label}: {}", skus.join(", "));
    println!("  Total expected: {expected}");
    println!("  Actual total:   {actual}");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show each scan
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
