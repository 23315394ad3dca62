//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Checkout / rule set failures                   │
//! │  ├── ValidationError  - Field-level rule and article problems          │
//! │  └── ErrorKind        - InvalidState vs InvalidArgument                │
//! │                                                                         │
//! │  till-cli errors (separate crate)                                      │
//! │  └── CliError         - Config loading, parse failures, CoreError      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Kinds of Failure
//! Every `CoreError` is either an **InvalidState** (the checkout or its rule
//! set is not in a shape that allows the operation) or an **InvalidArgument**
//! (the caller passed something the rules cannot price). Callers that only
//! care about the distinction match on [`CoreError::kind`].

use thiserror::Error;

use crate::money::Money;
use crate::types::ArticleCode;

// =============================================================================
// Error Kind
// =============================================================================

/// Coarse classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation attempted in the wrong state, or the rule set is unusable.
    InvalidState,
    /// The operation was handed a value it cannot work with.
    InvalidArgument,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidState => write!(f, "invalid state"),
            ErrorKind::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and checkout errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// `scan` or `total_price` called before `set_pricing_rules` succeeded.
    #[error("PricingRules are missing")]
    PricingRulesMissing,

    /// The rule set was never initialised or holds no rules.
    #[error("Pricing rule set is not set or empty")]
    EmptyRuleSet,

    /// A single rule failed field validation.
    #[error("Invalid pricing rule for article {article}, package size {package_size}: {source}")]
    InvalidRule {
        article: ArticleCode,
        package_size: u32,
        #[source]
        source: ValidationError,
    },

    /// Two rules for the same article and package size disagree on price.
    ///
    /// ## When This Occurs
    /// ```text
    /// A × 2 → 90.00
    /// A × 2 → 95.00   ← same key, different price
    /// ```
    /// Identical duplicates are tolerated.
    #[error("Pricing rules contain two prices for article {article} and package size {package_size}: {first} and {second}")]
    ConflictingPrices {
        article: ArticleCode,
        package_size: u32,
        first: Money,
        second: Money,
    },

    /// A package costs more than smaller packages covering the same quantity.
    ///
    /// ## When This Occurs
    /// ```text
    /// A × 1  → 50.00
    /// A × 2  → 90.00
    /// A × 10 → 451.00   ← 5 × (A × 2) = 450.00 is cheaper
    /// ```
    #[error("Prices evolve the wrong way for article {article}: package of {package_size} costs {package_price}, smaller packages cost {combined_price}")]
    PriceEvolution {
        article: ArticleCode,
        package_size: u32,
        package_price: Money,
        combined_price: Money,
    },

    /// Scanned units of an article are left over that no package size covers.
    ///
    /// ## User Workflow
    /// ```text
    /// Rules: E × 2 → 15.00 (no single price)
    /// Scan:  E, E, E
    ///      │
    ///      ▼
    /// total_price: E × 2 priced, 1 E left
    ///      │
    ///      ▼
    /// UnpricedRemainder { article: E, remaining: 1 }
    /// ```
    #[error("No price available for article {article} ({remaining} unit(s) cannot be priced)")]
    UnpricedRemainder { article: ArticleCode, remaining: u32 },

    /// A basket total or combined package price does not fit in `Money`.
    #[error("Price of article {article} overflows")]
    PriceOverflow { article: ArticleCode },

    /// No rule exists for the article at any package size up to the count.
    #[error("No price available for article {article}")]
    NoPriceAvailable { article: ArticleCode },

    /// Package lookup requested for zero units.
    #[error("Article count must be at least 1, got {count}")]
    InvalidCount { count: u32 },

    /// One more unit of an article would exceed the per-article maximum.
    #[error("Quantity of article {article} cannot exceed {max}")]
    QuantityTooLarge { article: ArticleCode, max: u32 },

    /// Basket input that is not a valid article code.
    #[error("Invalid article: {0}")]
    InvalidArticle(#[from] ValidationError),
}

impl CoreError {
    /// Classifies the error as an invalid state or an invalid argument.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::PricingRulesMissing
            | CoreError::EmptyRuleSet
            | CoreError::InvalidRule { .. }
            | CoreError::ConflictingPrices { .. }
            | CoreError::PriceEvolution { .. }
            | CoreError::UnpricedRemainder { .. }
            | CoreError::PriceOverflow { .. } => ErrorKind::InvalidState,
            CoreError::NoPriceAvailable { .. }
            | CoreError::InvalidCount { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::InvalidArticle(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Shorthand for `kind() == ErrorKind::InvalidState`.
    pub fn is_invalid_state(&self) -> bool {
        self.kind() == ErrorKind::InvalidState
    }

    /// Shorthand for `kind() == ErrorKind::InvalidArgument`.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors for rules and article codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., multi-character article code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
