//! # Pricing Rules
//!
//! Holds the package price list and answers "what does the largest package
//! that fits cost, and how many units are left over".
//!
//! ## Greedy Decomposition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rules: F × 1 → 10   F × 3 → 20   F × 6 → 30                            │
//! │  Basket: 10 × F                                                         │
//! │                                                                         │
//! │  best_package_match(F, 10) → F × 6 → 30, remaining 4                    │
//! │  best_package_match(F, 4)  → F × 3 → 20, remaining 1                    │
//! │  best_package_match(F, 1)  → F × 1 → 10, remaining 0                    │
//! │                                              total 60                   │
//! │                                                                         │
//! │  Each call takes the largest package <= count and never backtracks.    │
//! │  Totals are whatever that walk produces, not an optimal packing.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Consistency
//! A rule set is only handed to a checkout after
//! [`PricingRuleSet::check_consistency`] passes:
//! 1. it is not empty
//! 2. every rule passes field validation
//! 3. no (article, package size) pair has two different prices
//! 4. no package costs more than smaller packages covering the same quantity

use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ArticleCode, InterimResult, PricingRule};
use crate::validation::validate_rule;

/// The price list a checkout evaluates against.
///
/// Rules are kept in insertion order. Once validated, share it across
/// checkouts behind an `Arc`; nothing in this crate mutates a shared set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PricingRuleSet {
    rules: Vec<PricingRule>,
}

impl PricingRuleSet {
    /// Creates an empty (unset) rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rule set from `rules` without validating them.
    pub fn from_rules(rules: impl IntoIterator<Item = PricingRule>) -> Self {
        let mut set = Self::new();
        set.initialize(rules);
        set
    }

    /// Replaces all rules. No validation happens here; call
    /// [`check_consistency`](Self::check_consistency) separately.
    pub fn initialize(&mut self, rules: impl IntoIterator<Item = PricingRule>) {
        self.rules = rules.into_iter().collect();
    }

    /// True iff at least one rule exists for `article`, at any package size.
    pub fn has_price_for(&self, article: ArticleCode) -> bool {
        self.rules.iter().any(|rule| rule.article == article)
    }

    /// Picks the largest package of `article` that fits into `count` units.
    ///
    /// Returns the package price and `count - package_size`. Among duplicate
    /// rules for the same size the first one wins.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidCount`] if `count` is 0
    /// - [`CoreError::NoPriceAvailable`] if no package of `article` has a
    ///   size between 1 and `count`
    ///
    /// ## Example
    /// ```rust
    /// use till_core::{ArticleCode, Money, PricingRule, PricingRuleSet};
    ///
    /// let rules = PricingRuleSet::from_rules([
    ///     PricingRule::new('A', 1, Money::from_cents(5000)),
    ///     PricingRule::new('A', 3, Money::from_cents(13000)),
    /// ]);
    ///
    /// let step = rules.best_package_match(ArticleCode::new('A'), 5).unwrap();
    /// assert_eq!(step.price, Money::from_cents(13000));
    /// assert_eq!(step.remaining, 2);
    /// ```
    pub fn best_package_match(&self, article: ArticleCode, count: u32) -> CoreResult<InterimResult> {
        if count == 0 {
            return Err(CoreError::InvalidCount { count });
        }

        let mut best: Option<&PricingRule> = None;
        for rule in &self.rules {
            if rule.article != article || rule.package_size == 0 || rule.package_size > count {
                continue;
            }
            match best {
                Some(current) if current.package_size >= rule.package_size => {}
                _ => best = Some(rule),
            }
        }

        best.map(|rule| InterimResult::new(rule.package_price, count - rule.package_size))
            .ok_or(CoreError::NoPriceAvailable { article })
    }

    /// Validates the rule set.
    ///
    /// ## Errors
    /// All failures are invalid-state errors, reported in this order:
    /// - [`CoreError::EmptyRuleSet`]
    /// - [`CoreError::InvalidRule`] for a package size or price out of range
    /// - [`CoreError::ConflictingPrices`] for one (article, size) with two prices
    /// - [`CoreError::PriceEvolution`] when a package is dearer than a
    ///   combination of smaller packages of the same article summing to its size
    /// - [`CoreError::PriceOverflow`] if a combined price does not fit in
    ///   `Money`; unreachable once field validation has bounded the prices
    pub fn check_consistency(&self) -> CoreResult<()> {
        if self.rules.is_empty() {
            return Err(CoreError::EmptyRuleSet);
        }

        for rule in &self.rules {
            validate_rule(rule).map_err(|source| CoreError::InvalidRule {
                article: rule.article,
                package_size: rule.package_size,
                source,
            })?;
        }

        let mut prices: HashMap<(ArticleCode, u32), Money> = HashMap::new();
        for rule in &self.rules {
            let key = (rule.article, rule.package_size);
            match prices.get(&key) {
                Some(&first) if first != rule.package_price => {
                    return Err(CoreError::ConflictingPrices {
                        article: rule.article,
                        package_size: rule.package_size,
                        first,
                        second: rule.package_price,
                    });
                }
                Some(_) => {}
                None => {
                    prices.insert(key, rule.package_price);
                }
            }
        }

        for article in self.articles() {
            self.check_price_evolution(article)?;
        }

        Ok(())
    }

    /// Prices every package of `article` against the cheapest exact
    /// combination of strictly smaller packages.
    ///
    /// `cheapest[q]` holds the lowest price for exactly `q` units using the
    /// packages folded in so far. Packages are folded in ascending size, so
    /// when package `s` is examined `cheapest[s]` only uses smaller ones.
    fn check_price_evolution(&self, article: ArticleCode) -> CoreResult<()> {
        let packages = self.packages_of(article);
        let Some(&(largest, _)) = packages.last() else {
            return Ok(());
        };

        let mut cheapest: Vec<Option<Money>> = vec![None; largest as usize + 1];
        cheapest[0] = Some(Money::zero());

        for &(size, price) in &packages {
            let size_idx = size as usize;
            if let Some(combined) = cheapest[size_idx] {
                if combined < price {
                    tracing::debug!(%article, size, %price, %combined, "package undercut by smaller packages");
                    return Err(CoreError::PriceEvolution {
                        article,
                        package_size: size,
                        package_price: price,
                        combined_price: combined,
                    });
                }
            }

            for quantity in size_idx..=largest as usize {
                if let Some(rest) = cheapest[quantity - size_idx] {
                    let candidate = rest
                        .checked_add(price)
                        .ok_or(CoreError::PriceOverflow { article })?;
                    if cheapest[quantity].map_or(true, |known| candidate < known) {
                        cheapest[quantity] = Some(candidate);
                    }
                }
            }
        }

        Ok(())
    }

    /// Distinct (size, price) pairs of `article`, ascending by size. Keeps the
    /// first price seen per size.
    fn packages_of(&self, article: ArticleCode) -> Vec<(u32, Money)> {
        let mut packages: Vec<(u32, Money)> = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.article == article) {
            if !packages.iter().any(|&(size, _)| size == rule.package_size) {
                packages.push((rule.package_size, rule.package_price));
            }
        }
        packages.sort_by_key(|&(size, _)| size);
        packages
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// All rules in insertion order.
    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    /// Number of rules, duplicates included.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no rules are set.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct articles in order of first appearance.
    pub fn articles(&self) -> Vec<ArticleCode> {
        let mut articles = Vec::new();
        for rule in &self.rules {
            if !articles.contains(&rule.article) {
                articles.push(rule.article);
            }
        }
        articles
    }

    /// Package sizes defined for `article`, ascending and deduplicated.
    pub fn package_sizes(&self, article: ArticleCode) -> Vec<u32> {
        self.packages_of(article)
            .into_iter()
            .map(|(size, _)| size)
            .collect()
    }
}

impl FromIterator<PricingRule> for PricingRuleSet {
    fn from_iter<I: IntoIterator<Item = PricingRule>>(iter: I) -> Self {
        Self::from_rules(iter)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};
    use crate::validation::{MAX_PACKAGE_PRICE_CENTS, MAX_PACKAGE_SIZE};

    fn rule(article: char, size: u32, cents: i64) -> PricingRule {
        PricingRule::new(article, size, Money::from_cents(cents))
    }

    fn a(c: char) -> ArticleCode {
        ArticleCode::new(c)
    }

    fn sample_rules() -> PricingRuleSet {
        PricingRuleSet::from_rules([
            rule('A', 1, 5000),
            rule('A', 2, 9000),
            rule('A', 3, 13000),
            rule('B', 1, 3000),
            rule('B', 2, 4500),
            rule('C', 1, 2000),
            rule('D', 1, 1500),
            rule('E', 2, 1500),
            rule('F', 1, 1000),
            rule('F', 3, 2000),
            rule('F', 6, 3000),
        ])
    }

    #[test]
    fn test_sample_rules_are_consistent() {
        assert!(sample_rules().check_consistency().is_ok());
    }

    #[test]
    fn test_has_price_for() {
        let rules = sample_rules();
        assert!(rules.has_price_for(a('A')));
        assert!(rules.has_price_for(a('E')));
        assert!(!rules.has_price_for(a('X')));
        assert!(!PricingRuleSet::new().has_price_for(a('A')));
    }

    #[test]
    fn test_best_package_match_takes_largest_fitting_package() {
        let rules = sample_rules();

        let step = rules.best_package_match(a('A'), 5).unwrap();
        assert_eq!(step, InterimResult::new(Money::from_cents(13000), 2));

        let step = rules.best_package_match(a('A'), 2).unwrap();
        assert_eq!(step, InterimResult::new(Money::from_cents(9000), 0));

        let step = rules.best_package_match(a('F'), 5).unwrap();
        assert_eq!(step, InterimResult::new(Money::from_cents(2000), 2));

        let step = rules.best_package_match(a('F'), 6).unwrap();
        assert!(step.is_complete());
    }

    #[test]
    fn test_best_package_match_skips_missing_sizes() {
        let rules = sample_rules();
        let step = rules.best_package_match(a('E'), 3).unwrap();
        assert_eq!(step, InterimResult::new(Money::from_cents(1500), 1));
    }

    #[test]
    fn test_best_package_match_without_fitting_size() {
        let rules = sample_rules();

        let err = rules.best_package_match(a('E'), 1).unwrap_err();
        assert!(matches!(err, CoreError::NoPriceAvailable { article } if article == a('E')));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = rules.best_package_match(a('X'), 4).unwrap_err();
        assert!(matches!(err, CoreError::NoPriceAvailable { .. }));
    }

    #[test]
    fn test_best_package_match_zero_count() {
        let err = sample_rules().best_package_match(a('A'), 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidCount { count: 0 }));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_best_package_match_first_duplicate_wins() {
        let rules = PricingRuleSet::from_rules([rule('A', 2, 9000), rule('A', 2, 9500)]);
        let step = rules.best_package_match(a('A'), 2).unwrap();
        assert_eq!(step.price, Money::from_cents(9000));
    }

    #[test]
    fn test_initialize_replaces_rules() {
        let mut rules = sample_rules();
        rules.initialize([rule('Z', 1, 100)]);
        assert_eq!(rules.len(), 1);
        assert!(rules.has_price_for(a('Z')));
        assert!(!rules.has_price_for(a('A')));
    }

    #[test]
    fn test_empty_rule_set_is_inconsistent() {
        let err = PricingRuleSet::new().check_consistency().unwrap_err();
        assert!(matches!(err, CoreError::EmptyRuleSet));
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        let mut rules = sample_rules();
        rules.initialize(Vec::new());
        assert!(matches!(rules.check_consistency(), Err(CoreError::EmptyRuleSet)));
    }

    #[test]
    fn test_conflicting_duplicate_is_inconsistent() {
        let rules = PricingRuleSet::from_rules([
            rule('A', 1, 5000),
            rule('A', 2, 9000),
            rule('A', 2, 9500),
        ]);
        let err = rules.check_consistency().unwrap_err();
        match err {
            CoreError::ConflictingPrices {
                article,
                package_size,
                first,
                second,
            } => {
                assert_eq!(article, a('A'));
                assert_eq!(package_size, 2);
                assert_eq!(first, Money::from_cents(9000));
                assert_eq!(second, Money::from_cents(9500));
            }
            other => panic!("expected ConflictingPrices, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_duplicate_is_tolerated() {
        let rules = PricingRuleSet::from_rules([rule('A', 1, 5000), rule('A', 1, 5000)]);
        assert!(rules.check_consistency().is_ok());
        assert_eq!(rules.package_sizes(a('A')), vec![1]);
    }

    #[test]
    fn test_invalid_rule_fields_are_inconsistent() {
        let rules = PricingRuleSet::from_rules([rule('A', 0, 5000)]);
        let err = rules.check_consistency().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRule {
                source: ValidationError::MustBePositive { .. },
                ..
            }
        ));
        assert!(err.is_invalid_state());

        let rules = PricingRuleSet::from_rules([rule('A', 1, -1)]);
        assert!(matches!(
            rules.check_consistency(),
            Err(CoreError::InvalidRule { .. })
        ));
    }

    #[test]
    fn test_oversized_package_is_inconsistent() {
        let rules = PricingRuleSet::from_rules([
            rule('A', 1, 100),
            rule('A', MAX_PACKAGE_SIZE + 1, 100),
        ]);
        let err = rules.check_consistency().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRule {
                package_size,
                source: ValidationError::OutOfRange { .. },
                ..
            } if package_size == MAX_PACKAGE_SIZE + 1
        ));
        assert!(err.is_invalid_state());

        let rules = PricingRuleSet::from_rules([
            rule('A', 1, 100),
            rule('A', MAX_PACKAGE_SIZE, 100),
        ]);
        assert!(rules.check_consistency().is_ok());
    }

    #[test]
    fn test_huge_prices_are_rejected_before_evolution() {
        let half = i64::MAX / 2 + 1;
        let rules = PricingRuleSet::from_rules([rule('A', 1, half), rule('A', 2, 1)]);
        let err = rules.check_consistency().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidRule {
                source: ValidationError::OutOfRange { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_price_evolution_overflow_is_an_error() {
        let half = i64::MAX / 2 + 1;
        let rules = PricingRuleSet::from_rules([rule('A', 1, half), rule('A', 2, 1)]);
        let err = rules.check_price_evolution(a('A')).unwrap_err();
        assert!(matches!(err, CoreError::PriceOverflow { article } if article == a('A')));
        assert!(err.is_invalid_state());
    }

    #[test]
    fn test_largest_valid_prices_do_not_overflow() {
        let rules = PricingRuleSet::from_rules([
            rule('A', 1, MAX_PACKAGE_PRICE_CENTS),
            rule('A', MAX_PACKAGE_SIZE, MAX_PACKAGE_PRICE_CENTS),
        ]);
        assert!(rules.check_consistency().is_ok());
    }

    #[test]
    fn test_zero_size_rule_never_matches() {
        let rules = PricingRuleSet::from_rules([rule('A', 0, 0)]);
        assert!(rules.best_package_match(a('A'), 3).is_err());
    }

    #[test]
    fn test_price_evolution_is_inconsistent() {
        let mut rules = PricingRuleSet::from_rules([
            rule('A', 1, 5000),
            rule('A', 2, 9000),
            rule('B', 1, 3000),
        ]);
        assert!(rules.check_consistency().is_ok());

        let mut extended = rules.rules().to_vec();
        extended.push(rule('A', 10, 45100));
        rules.initialize(extended);

        let err = rules.check_consistency().unwrap_err();
        assert!(err.is_invalid_state());
        assert!(err.to_string().contains("evolve"));
        match err {
            CoreError::PriceEvolution {
                package_size,
                combined_price,
                ..
            } => {
                assert_eq!(package_size, 10);
                assert_eq!(combined_price, Money::from_cents(45000));
            }
            other => panic!("expected PriceEvolution, got {other:?}"),
        }
    }

    #[test]
    fn test_price_evolution_equal_price_is_allowed() {
        let rules = PricingRuleSet::from_rules([
            rule('A', 1, 5000),
            rule('A', 2, 9000),
            rule('A', 10, 45000),
        ]);
        assert!(rules.check_consistency().is_ok());
    }

    #[test]
    fn test_price_evolution_against_mixed_combination() {
        // 3 + 1 = 30 undercuts the 4-pack at 31, though 4 × 1 = 40 does not
        let rules = PricingRuleSet::from_rules([
            rule('G', 1, 1000),
            rule('G', 3, 2000),
            rule('G', 4, 3100),
        ]);
        let err = rules.check_consistency().unwrap_err();
        assert!(matches!(
            err,
            CoreError::PriceEvolution {
                package_size: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_price_evolution_without_exact_cover() {
        // No smaller packages sum to 3, so the 3-pack cannot be undercut
        let rules = PricingRuleSet::from_rules([rule('E', 2, 1500), rule('E', 3, 9900)]);
        assert!(rules.check_consistency().is_ok());
    }

    #[test]
    fn test_price_evolution_is_per_article() {
        let rules = PricingRuleSet::from_rules([
            rule('A', 1, 100),
            rule('B', 2, 500),
        ]);
        assert!(rules.check_consistency().is_ok());
    }

    #[test]
    fn test_accessors() {
        let rules = sample_rules();
        assert_eq!(rules.len(), 11);
        assert!(!rules.is_empty());
        assert_eq!(
            rules.articles(),
            vec![a('A'), a('B'), a('C'), a('D'), a('E'), a('F')]
        );
        assert_eq!(rules.package_sizes(a('F')), vec![1, 3, 6]);
        assert!(rules.package_sizes(a('X')).is_empty());
    }

    #[test]
    fn test_collect_into_rule_set() {
        let rules: PricingRuleSet = (1..=3).map(|size| rule('A', size, 5000 * size as i64)).collect();
        assert_eq!(rules.package_sizes(a('A')), vec![1, 2, 3]);
    }
}
