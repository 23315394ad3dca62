//! # Validation Module
//!
//! Field validators for pricing rules and article codes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Rule file (till-cli)                                         │
//! │  ├── Deserialization (types, one-character article codes)              │
//! │  └── Non-empty rule list                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── package size >= 1                                                 │
//! │  ├── package price >= 0 and <= MAX_PACKAGE_PRICE_CENTS                 │
//! │  └── package size <= MAX_PACKAGE_SIZE                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: PricingRuleSet::check_consistency                            │
//! │  ├── conflicting duplicates                                            │
//! │  └── price evolution across package sizes                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PricingRule;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest package size a rule may declare.
///
/// The price evolution check costs every quantity up to the largest package
/// size of an article, so this bounds its work.
pub const MAX_PACKAGE_SIZE: u32 = 10_000;

/// Largest package price a rule may declare, in cents (one billion in major
/// units).
pub const MAX_PACKAGE_PRICE_CENTS: i64 = 100_000_000_000;

/// Validates a package size.
///
/// ```rust
/// use till_core::validation::validate_package_size;
///
/// assert!(validate_package_size(1).is_ok());
/// assert!(validate_package_size(0).is_err());
/// ```
pub fn validate_package_size(size: u32) -> ValidationResult<()> {
    if size == 0 {
        return Err(ValidationError::MustBePositive {
            field: "package_size".to_string(),
        });
    }

    if size > MAX_PACKAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "package_size".to_string(),
            min: 1,
            max: MAX_PACKAGE_SIZE as i64,
        });
    }

    Ok(())
}

/// Validates a package price. Zero is allowed (free packages).
///
/// ```rust
/// use till_core::money::Money;
/// use till_core::validation::validate_package_price;
///
/// assert!(validate_package_price(Money::from_cents(0)).is_ok());
/// assert!(validate_package_price(Money::from_cents(-100)).is_err());
/// assert!(validate_package_price(Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_package_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PACKAGE_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "package_price".to_string(),
            min: 0,
            max: MAX_PACKAGE_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a single article character.
///
/// Whitespace and control characters cannot be article codes; basket strings
/// use whitespace as a separator.
pub fn validate_article_code(code: char) -> ValidationResult<()> {
    if code.is_whitespace() || code.is_control() {
        return Err(ValidationError::InvalidFormat {
            field: "article".to_string(),
            reason: format!("{:?} is not a printable character", code),
        });
    }

    Ok(())
}

/// Runs every field validator on a rule.
pub fn validate_rule(rule: &PricingRule) -> ValidationResult<()> {
    validate_article_code(rule.article.as_char())?;
    validate_package_size(rule.package_size)?;
    validate_package_price(rule.package_price)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_package_size() {
        assert!(validate_package_size(1).is_ok());
        assert!(validate_package_size(6).is_ok());
        assert!(validate_package_size(MAX_PACKAGE_SIZE).is_ok());

        assert!(matches!(
            validate_package_size(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_package_size(MAX_PACKAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_validate_package_price() {
        assert!(validate_package_price(Money::zero()).is_ok());
        assert!(validate_package_price(Money::from_cents(13000)).is_ok());
        assert!(validate_package_price(Money::from_cents(-1)).is_err());

        assert!(validate_package_price(Money::from_cents(MAX_PACKAGE_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_package_price(Money::from_cents(MAX_PACKAGE_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_article_code() {
        assert!(validate_article_code('A').is_ok());
        assert!(validate_article_code('7').is_ok());
        assert!(validate_article_code(' ').is_err());
        assert!(validate_article_code('\n').is_err());
        assert!(validate_article_code('\u{7}').is_err());
    }

    #[test]
    fn test_validate_rule() {
        assert!(validate_rule(&PricingRule::new('A', 1, Money::from_cents(5000))).is_ok());
        assert!(validate_rule(&PricingRule::new('A', 0, Money::from_cents(5000))).is_err());
        assert!(validate_rule(&PricingRule::new('A', 1, Money::from_cents(-5000))).is_err());
        assert!(validate_rule(&PricingRule::new(' ', 1, Money::from_cents(5000))).is_err());
    }
}
