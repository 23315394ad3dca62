//! # Till Configuration
//!
//! Loads the price list the till works with.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TILL_CURRENCY_SYMBOL="EUR "                                        │
//! │                                                                         │
//! │  2. Rules file                                                         │
//! │     --rules <path> or TILL_RULES=<path>                                │
//! │     else ~/.config/till/rules.toml (Linux)                             │
//! │          ~/Library/Application Support/org.kata.till/rules.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no currency symbol, no rules                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules File Format
//! ```toml
//! # rules.toml
//! currency_symbol = ""
//!
//! [[rules]]
//! article = "A"
//! package_size = 1
//! price_cents = 5000
//!
//! [[rules]]
//! article = "A"
//! package_size = 3
//! price_cents = 13000
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use till_core::{Money, PricingRule, PricingRuleSet};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Environment variable overriding [`TillConfig::currency_symbol`].
pub const CURRENCY_SYMBOL_ENV: &str = "TILL_CURRENCY_SYMBOL";

/// Rule file contents plus display settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TillConfig {
    /// Prefix printed before totals, e.g. `"EUR "`.
    #[serde(default)]
    pub currency_symbol: String,

    /// The price list.
    #[serde(default)]
    pub rules: Vec<PricingRule>,
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Rules file (`path`, or the default path when `None`)
    /// 3. Environment variables
    ///
    /// An explicit `path` must exist. A missing default file leaves the rule
    /// list empty, which validation then rejects.
    pub fn load(path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::RulesFileNotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                other => {
                    debug!(path = ?other, "No rules file at default location");
                    Self::default()
                }
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a rules file. JSON if the extension is `.json`,
    /// TOML otherwise.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading pricing rules from file");
        let contents = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(toml::from_str(&contents)?)
        }
    }

    /// Applies environment overrides through `lookup`, which maps a variable
    /// name to its value.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(symbol) = lookup(CURRENCY_SYMBOL_ENV) {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency_symbol = symbol;
        }
    }

    /// Rejects a configuration without rules.
    ///
    /// Rule consistency is checked by till-core when a checkout is set up.
    pub fn validate(&self) -> CliResult<()> {
        if self.rules.is_empty() {
            return Err(CliError::Config(
                "no pricing rules configured; pass --rules <path> or set TILL_RULES".into(),
            ));
        }
        Ok(())
    }

    /// Builds the rule set for checkouts.
    pub fn to_rule_set(&self) -> PricingRuleSet {
        PricingRuleSet::from_rules(self.rules.iter().copied())
    }

    /// Formats an amount with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }

    /// Returns the default rules file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "kata", "till")
            .map(|dirs| dirs.config_dir().join("rules.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use till_core::ArticleCode;

    const SAMPLE_TOML: &str = r#"
currency_symbol = "EUR "

[[rules]]
article = "A"
package_size = 1
price_cents = 5000

[[rules]]
article = "A"
package_size = 3
price_cents = 13000

[[rules]]
article = "E"
package_size = 2
price_cents = 1500
"#;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml_rules() {
        let file = write_temp(".toml", SAMPLE_TOML);
        let config = TillConfig::from_file(file.path()).unwrap();

        assert_eq!(config.currency_symbol, "EUR ");
        assert_eq!(config.rules.len(), 3);
        assert_eq!(
            config.rules[1],
            PricingRule::new('A', 3, Money::from_cents(13000))
        );
    }

    #[test]
    fn test_load_json_rules() {
        let file = write_temp(
            ".json",
            r#"{ "rules": [ { "article": "B", "package_size": 2, "price_cents": 4500 } ] }"#,
        );
        let config = TillConfig::from_file(file.path()).unwrap();

        assert!(config.currency_symbol.is_empty());
        assert_eq!(config.rules[0].article, ArticleCode::new('B'));
        assert_eq!(config.rules[0].package_price, Money::from_cents(4500));
    }

    #[test]
    fn test_load_rejects_malformed_files() {
        let file = write_temp(".toml", "[[rules]]\narticle = \"AB\"\npackage_size = 1\nprice_cents = 1\n");
        assert!(matches!(
            TillConfig::from_file(file.path()),
            Err(CliError::Toml(_))
        ));

        let file = write_temp(".json", "{ not json");
        assert!(matches!(
            TillConfig::from_file(file.path()),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rules.toml");
        assert!(matches!(
            TillConfig::load(Some(missing)),
            Err(CliError::RulesFileNotFound(_))
        ));
    }

    #[test]
    fn test_load_explicit_path() {
        let file = write_temp(".toml", SAMPLE_TOML);
        let config = TillConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.to_rule_set().len(), 3);
    }

    #[test]
    fn test_env_override() {
        let mut config = TillConfig::default();
        config.apply_env_overrides(|key| (key == CURRENCY_SYMBOL_ENV).then(|| "$".to_string()));
        assert_eq!(config.currency_symbol, "$");

        config.apply_env_overrides(|_| None);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_validate_requires_rules() {
        assert!(matches!(
            TillConfig::default().validate(),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_format_money() {
        let config = TillConfig {
            currency_symbol: "EUR ".into(),
            rules: Vec::new(),
        };
        assert_eq!(config.format_money(Money::from_cents(13000)), "EUR 130.00");
    }

    #[test]
    fn test_toml_round_trip_shape() {
        let config = TillConfig {
            currency_symbol: String::new(),
            rules: vec![PricingRule::new('F', 6, Money::from_cents(3000))],
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[[rules]]"));
        assert!(toml_str.contains("price_cents = 3000"));
    }
}
