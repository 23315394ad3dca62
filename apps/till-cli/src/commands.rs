//! # Commands
//!
//! What each subcommand computes. Printing happens in `main`.

use std::sync::Arc;

use till_core::{Checkout, CoreResult, Money, PricingRuleSet};
use tracing::info;

/// Outcome of pricing one basket string.
#[derive(Debug)]
pub struct BasketOutcome {
    pub basket: String,
    pub total: CoreResult<Money>,
}

/// Prices one basket with a fresh checkout.
pub fn price_basket(rules: Arc<PricingRuleSet>, basket: &str) -> CoreResult<Money> {
    let mut checkout = Checkout::with_pricing_rules(rules)?;
    checkout.scan_all(basket)?;
    checkout.total_price()
}

/// Prices every basket independently.
pub fn price_baskets(rules: &Arc<PricingRuleSet>, baskets: &[String]) -> Vec<BasketOutcome> {
    baskets
        .iter()
        .map(|basket| BasketOutcome {
            basket: basket.clone(),
            total: price_basket(Arc::clone(rules), basket),
        })
        .collect()
}

/// Validates `rules` and describes them in one line.
pub fn check_rules(rules: &PricingRuleSet) -> CoreResult<String> {
    rules.check_consistency()?;

    let articles: Vec<String> = rules.articles().iter().map(ToString::to_string).collect();
    info!(rules = rules.len(), articles = articles.len(), "Pricing rules are consistent");

    Ok(format!(
        "{} rule(s) for {} article(s): {}",
        rules.len(),
        articles.len(),
        articles.join(", ")
    ))
}

/// Lists the package prices per article, smallest package first.
pub fn list_rules(rules: &PricingRuleSet, format_money: impl Fn(Money) -> String) -> Vec<String> {
    let mut lines = Vec::new();
    for article in rules.articles() {
        let packages: Vec<String> = rules
            .package_sizes(article)
            .into_iter()
            .filter_map(|size| {
                rules
                    .rules()
                    .iter()
                    .find(|rule| rule.article == article && rule.package_size == size)
                    .map(|rule| format!("{} for {}", size, format_money(rule.package_price)))
            })
            .collect();
        lines.push(format!("{}: {}", article, packages.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{CoreError, PricingRule};

    fn rule(article: char, size: u32, cents: i64) -> PricingRule {
        PricingRule::new(article, size, Money::from_cents(cents))
    }

    fn sample_rules() -> Arc<PricingRuleSet> {
        Arc::new(PricingRuleSet::from_rules([
            rule('A', 1, 5000),
            rule('A', 3, 13000),
            rule('A', 2, 9000),
            rule('E', 2, 1500),
        ]))
    }

    #[test]
    fn test_price_baskets_independently() {
        let baskets = vec!["AAA".to_string(), "E".to_string(), "AA".to_string()];
        let outcomes = price_baskets(&sample_rules(), &baskets);

        assert_eq!(outcomes.len(), 3);
        assert_eq!(*outcomes[0].total.as_ref().unwrap(), Money::from_cents(13000));
        assert!(matches!(
            outcomes[1].total,
            Err(CoreError::UnpricedRemainder { .. })
        ));
        assert_eq!(*outcomes[2].total.as_ref().unwrap(), Money::from_cents(9000));
    }

    #[test]
    fn test_price_basket_unknown_article() {
        let err = price_basket(sample_rules(), "AX").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_price_basket_with_inconsistent_rules() {
        let rules = Arc::new(PricingRuleSet::new());
        let err = price_basket(rules, "A").unwrap_err();
        assert!(matches!(err, CoreError::EmptyRuleSet));
    }

    #[test]
    fn test_check_rules_summary() {
        let summary = check_rules(&sample_rules()).unwrap();
        assert_eq!(summary, "4 rule(s) for 2 article(s): A, E");
    }

    #[test]
    fn test_list_rules_sorted_by_size() {
        let lines = list_rules(&sample_rules(), |money| money.to_string());
        assert_eq!(
            lines,
            vec![
                "A: 1 for 50.00, 2 for 90.00, 3 for 130.00".to_string(),
                "E: 2 for 15.00".to_string(),
            ]
        );
    }
}
