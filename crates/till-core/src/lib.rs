//! # till-core: Package Pricing for a Supermarket Till
//!
//! This crate prices a basket of scanned articles against package rules such
//! as "3 × A cost 130.00". It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    till-cli                                     │   │
//! │  │    rules.toml ──► TillConfig ──► PricingRuleSet                 │   │
//! │  │    "AAB"      ──► Checkout::scan_all ──► total_price            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │ checkout  │  │   money   │  │ validation│  │   │
//! │  │   │ RuleSet   │  │ Checkout  │  │   Money   │  │   rules   │  │   │
//! │  │   │ best pkg  │  │  tally    │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO ENVIRONMENT • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Article codes, pricing rules, interim lookup results
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - The rule set and its greedy package lookup
//! - [`checkout`] - Basket tally and total price
//! - [`validation`] - Field checks for rules and article codes
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use till_core::{Checkout, Money, PricingRule, PricingRuleSet};
//!
//! let rules = Arc::new(PricingRuleSet::from_rules([
//!     PricingRule::new('A', 1, Money::from_cents(5000)),
//!     PricingRule::new('A', 3, Money::from_cents(13000)),
//! ]));
//!
//! let mut checkout = Checkout::with_pricing_rules(rules).unwrap();
//! checkout.scan_all("AAAA").unwrap();
//!
//! // One package of three plus a single
//! assert_eq!(checkout.total_price().unwrap(), Money::from_cents(18000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{Checkout, MAX_ARTICLE_QUANTITY};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use pricing::PricingRuleSet;
pub use types::*;
