//! # Checkout
//!
//! Tallies scanned articles for one basket and prices them against a
//! validated [`PricingRuleSet`].
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   UNCONFIGURED ── set_pricing_rules (consistent) ──► READY              │
//! │        │                                               │                │
//! │        │ set_pricing_rules (inconsistent)              │ scan           │
//! │        ▼                                               │ total_price    │
//! │   UNCONFIGURED (error returned)                        ▼                │
//! │                                                      READY              │
//! │                                                                         │
//! │   scan / total_price while UNCONFIGURED → PricingRulesMissing           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A checkout is never reset. Each basket gets a fresh instance; the rule
//! set is shared between them through an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::PricingRuleSet;
use crate::types::ArticleCode;
use crate::validation::validate_article_code;

/// Most units of one article a single basket may hold.
pub const MAX_ARTICLE_QUANTITY: u32 = 1_000_000;

/// One basket's scan tally plus the rules it is priced with.
#[derive(Debug, Default)]
pub struct Checkout {
    /// `None` until a consistent rule set has been attached.
    pricing_rules: Option<Arc<PricingRuleSet>>,

    /// Scanned units per article. Counts are always >= 1.
    scanned: HashMap<ArticleCode, u32>,
}

impl Checkout {
    /// Creates an unconfigured checkout with an empty basket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checkout and attaches `rules` in one step.
    pub fn with_pricing_rules(rules: Arc<PricingRuleSet>) -> CoreResult<Self> {
        let mut checkout = Self::new();
        checkout.set_pricing_rules(rules)?;
        Ok(checkout)
    }

    /// Validates `rules` and attaches them.
    ///
    /// On failure the checkout keeps whatever rules it had before (none, for
    /// a fresh checkout) and the consistency error is returned.
    pub fn set_pricing_rules(&mut self, rules: Arc<PricingRuleSet>) -> CoreResult<()> {
        if let Err(err) = rules.check_consistency() {
            warn!(error = %err, "rejected inconsistent pricing rules");
            return Err(err);
        }

        debug!(rules = rules.len(), "pricing rules attached");
        self.pricing_rules = Some(rules);
        Ok(())
    }

    /// True once a consistent rule set is attached.
    pub fn is_configured(&self) -> bool {
        self.pricing_rules.is_some()
    }

    fn rules(&self) -> CoreResult<&PricingRuleSet> {
        self.pricing_rules
            .as_deref()
            .ok_or(CoreError::PricingRulesMissing)
    }

    /// Adds one unit of `article` to the basket.
    ///
    /// ## Errors
    /// - [`CoreError::PricingRulesMissing`] if no rules are attached
    /// - [`CoreError::NoPriceAvailable`] if no rule mentions `article`
    /// - [`CoreError::QuantityTooLarge`] if the basket already holds
    ///   [`MAX_ARTICLE_QUANTITY`] units of `article`
    ///
    /// The tally is left untouched on error.
    pub fn scan(&mut self, article: ArticleCode) -> CoreResult<()> {
        let rules = self.rules()?;

        if !rules.has_price_for(article) {
            debug!(%article, "scan rejected, article has no price");
            return Err(CoreError::NoPriceAvailable { article });
        }

        let count = self.scanned.entry(article).or_insert(0);
        if *count >= MAX_ARTICLE_QUANTITY {
            debug!(%article, count = *count, "scan rejected, quantity limit reached");
            return Err(CoreError::QuantityTooLarge {
                article,
                max: MAX_ARTICLE_QUANTITY,
            });
        }
        *count += 1;
        Ok(())
    }

    /// Scans every non-whitespace character of `basket`, in order.
    ///
    /// Stops at the first failure; articles scanned before it stay in the
    /// basket.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use till_core::{Checkout, Money, PricingRule, PricingRuleSet};
    ///
    /// let rules = Arc::new(PricingRuleSet::from_rules([
    ///     PricingRule::new('A', 1, Money::from_cents(5000)),
    ///     PricingRule::new('B', 1, Money::from_cents(3000)),
    /// ]));
    ///
    /// let mut checkout = Checkout::with_pricing_rules(rules).unwrap();
    /// checkout.scan_all("A B A").unwrap();
    /// assert_eq!(checkout.total_price().unwrap(), Money::from_cents(13000));
    /// ```
    pub fn scan_all(&mut self, basket: &str) -> CoreResult<()> {
        for c in basket.chars().filter(|c| !c.is_whitespace()) {
            validate_article_code(c)?;
            self.scan(ArticleCode::new(c))?;
        }
        Ok(())
    }

    /// Prices the basket.
    ///
    /// Each article's count is reduced package by package via
    /// [`PricingRuleSet::best_package_match`] until nothing is left.
    ///
    /// ## Errors
    /// - [`CoreError::PricingRulesMissing`] if no rules are attached
    /// - [`CoreError::UnpricedRemainder`] if some units of an article fit no
    ///   package, e.g. a single unit of an article sold only in pairs
    /// - [`CoreError::PriceOverflow`] if the total does not fit in `Money`
    pub fn total_price(&self) -> CoreResult<Money> {
        let rules = self.rules()?;
        let mut total = Money::zero();

        for (&article, &count) in &self.scanned {
            let mut remaining = count;
            while remaining > 0 {
                let step = rules
                    .best_package_match(article, remaining)
                    .map_err(|err| {
                        debug!(%article, remaining, error = %err, "units left unpriced");
                        CoreError::UnpricedRemainder { article, remaining }
                    })?;
                trace!(%article, price = %step.price, remaining = step.remaining, "package applied");
                total = total
                    .checked_add(step.price)
                    .ok_or(CoreError::PriceOverflow { article })?;
                remaining = step.remaining;
            }
        }

        Ok(total)
    }

    // =========================================================================
    // Basket Queries
    // =========================================================================

    /// Units of `article` scanned so far.
    pub fn scanned_count(&self, article: ArticleCode) -> u32 {
        self.scanned.get(&article).copied().unwrap_or(0)
    }

    /// Number of distinct articles in the basket.
    pub fn distinct_articles(&self) -> usize {
        self.scanned.len()
    }

    /// Total units scanned.
    pub fn total_quantity(&self) -> u64 {
        self.scanned.values().map(|&count| u64::from(count)).sum()
    }

    /// True if nothing has been scanned.
    pub fn is_empty(&self) -> bool {
        self.scanned.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
