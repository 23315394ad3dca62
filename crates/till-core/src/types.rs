//! # Domain Types
//!
//! Value types shared by the rule set and the checkout.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ArticleCode    │   │  PricingRule    │   │ InterimResult   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  'A', 'B', ...  │   │  article        │   │  price          │       │
//! │  │  (opaque id)    │   │  package_size   │   │  remaining      │       │
//! │  │                 │   │  package_price  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_article_code;

// =============================================================================
// Article Code
// =============================================================================

/// Identity of an article type.
///
/// Only equality and hashing matter; the wrapped character carries no
/// ordering semantics for pricing. Serialises as a one-character string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArticleCode(char);

impl ArticleCode {
    /// Wraps a character without validation.
    #[inline]
    pub const fn new(code: char) -> Self {
        ArticleCode(code)
    }

    /// Returns the wrapped character.
    #[inline]
    pub const fn as_char(&self) -> char {
        self.0
    }
}

impl From<char> for ArticleCode {
    fn from(code: char) -> Self {
        ArticleCode(code)
    }
}

impl fmt::Display for ArticleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a one-character code such as `"A"`.
///
/// ```rust
/// use till_core::ArticleCode;
///
/// let code: ArticleCode = "A".parse().unwrap();
/// assert_eq!(code.as_char(), 'A');
/// assert!("AB".parse::<ArticleCode>().is_err());
/// ```
impl FromStr for ArticleCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                validate_article_code(c)?;
                Ok(ArticleCode(c))
            }
            _ => Err(ValidationError::InvalidFormat {
                field: "article".to_string(),
                reason: format!("expected a single character, got '{}'", s),
            }),
        }
    }
}

impl TryFrom<String> for ArticleCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArticleCode> for String {
    fn from(code: ArticleCode) -> Self {
        code.0.to_string()
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// "`package_size` units of `article` cost `package_price`."
///
/// In rule files the price is given in cents:
/// ```toml
/// [[rules]]
/// article = "A"
/// package_size = 3
/// price_cents = 13000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// The article this rule prices.
    pub article: ArticleCode,

    /// Number of units in the package. Must be at least 1.
    pub package_size: u32,

    /// Price for exactly `package_size` units. Must not be negative.
    #[serde(rename = "price_cents")]
    pub package_price: Money,
}

impl PricingRule {
    /// Creates a rule.
    ///
    /// ```rust
    /// use till_core::{Money, PricingRule};
    ///
    /// let rule = PricingRule::new('A', 3, Money::from_cents(13000));
    /// assert_eq!(rule.package_size, 3);
    /// ```
    pub fn new(article: impl Into<ArticleCode>, package_size: u32, package_price: Money) -> Self {
        PricingRule {
            article: article.into(),
            package_size,
            package_price,
        }
    }
}

impl fmt::Display for PricingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} = {}",
            self.article, self.package_size, self.package_price
        )
    }
}

// =============================================================================
// Interim Result
// =============================================================================

/// Outcome of one package lookup: what the chosen package costs and how many
/// units are still unpriced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterimResult {
    /// Price of the chosen package.
    pub price: Money,

    /// Units left for the next lookup.
    pub remaining: u32,
}

impl InterimResult {
    pub const fn new(price: Money, remaining: u32) -> Self {
        InterimResult { price, remaining }
    }

    /// True when the lookup consumed every unit.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
