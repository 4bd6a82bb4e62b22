//! # Merchant Configuration
//!
//! The receiving merchant's profile, so that `pix encode` only needs the
//! per-charge values (amount, txid, description).
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by commands.rs)      │
//! │     --key, --name, --city, --description                               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     PIX_KEY, PIX_MERCHANT_NAME, PIX_MERCHANT_CITY, PIX_DESCRIPTION     │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path> / PIX_CONFIG, otherwise                            │
//! │     ~/.config/pix/merchant.toml (Linux)                                │
//! │     ~/Library/Application Support/br.pix.pix/merchant.toml (macOS)     │
//! │                                                                         │
//! │  4. Default Values (lowest priority): nothing set                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # merchant.toml
//! [merchant]
//! pix_key = "pix@example.com"
//! name = "Fulano de Tal"
//! city = "BRASILIA"
//! description = "Pagamento"  # optional default description
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "merchant.toml";

// =============================================================================
// Merchant Profile
// =============================================================================

/// Receiver data shared by every payload a merchant generates.
///
/// All fields are optional here; `pix-core` reports whichever required one
/// is still missing when the payload is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantConfig {
    #[serde(default)]
    pub pix_key: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    /// Used when `--description` is not given.
    #[serde(default)]
    pub description: Option<String>,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixConfig {
    #[serde(default)]
    pub merchant: MerchantConfig,
}

impl PixConfig {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`PixConfig::load`], with overrides taken from `lookup`.
    pub fn load_with(
        config_path: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading merchant config from file");
                config = Self::read(&path)?;
            } else if explicit {
                warn!(?path, "Config file not found, using defaults");
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn read(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies overrides from any key lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("PIX_KEY") {
            debug!("Overriding Pix key from environment");
            self.merchant.pix_key = Some(key);
        }

        if let Some(name) = lookup("PIX_MERCHANT_NAME") {
            debug!(merchant_name = %name, "Overriding merchant name from environment");
            self.merchant.name = Some(name);
        }

        if let Some(city) = lookup("PIX_MERCHANT_CITY") {
            debug!(merchant_city = %city, "Overriding merchant city from environment");
            self.merchant.city = Some(city);
        }

        if let Some(description) = lookup("PIX_DESCRIPTION") {
            self.merchant.description = Some(description);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("br", "pix", "pix")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_profile() {
        let config = PixConfig::from_toml_str(
            r#"
            [merchant]
            pix_key = "pix@example.com"
            name = "Fulano de Tal"
            city = "BRASILIA"
            description = "Pagamento"
            "#,
        )
        .unwrap();

        assert_eq!(config.merchant.pix_key.as_deref(), Some("pix@example.com"));
        assert_eq!(config.merchant.name.as_deref(), Some("Fulano de Tal"));
        assert_eq!(config.merchant.city.as_deref(), Some("BRASILIA"));
        assert_eq!(config.merchant.description.as_deref(), Some("Pagamento"));
    }

    #[test]
    fn test_parse_partial_and_empty() {
        let config = PixConfig::from_toml_str("[merchant]\ncity = \"Recife\"\n").unwrap();
        assert_eq!(config.merchant.city.as_deref(), Some("Recife"));
        assert!(config.merchant.pix_key.is_none());

        assert_eq!(PixConfig::from_toml_str("").unwrap(), PixConfig::default());
    }

    #[test]
    fn test_parse_malformed() {
        let err = PixConfig::from_toml_str("[merchant\nname = 1").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = PixConfig::from_toml_str(
            "[merchant]\npix_key = \"from-file\"\nname = \"Loja\"\n",
        )
        .unwrap();

        let env: HashMap<&str, &str> =
            HashMap::from([("PIX_KEY", "from-env"), ("PIX_MERCHANT_CITY", "Recife")]);
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.merchant.pix_key.as_deref(), Some("from-env"));
        assert_eq!(config.merchant.name.as_deref(), Some("Loja"));
        assert_eq!(config.merchant.city.as_deref(), Some("Recife"));
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("pix-cli-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[merchant]\nname = \"Padaria\"\n").unwrap();

        let plain = PixConfig::load_with(Some(path.clone()), |_| None);
        let overridden = PixConfig::load_with(Some(path.clone()), |key| {
            (key == "PIX_MERCHANT_CITY").then(|| "Recife".to_string())
        });
        std::fs::remove_file(&path).unwrap();

        let config = plain.unwrap();
        assert_eq!(config.merchant.name.as_deref(), Some("Padaria"));
        assert!(config.merchant.city.is_none());

        let config = overridden.unwrap();
        assert_eq!(config.merchant.name.as_deref(), Some("Padaria"));
        assert_eq!(config.merchant.city.as_deref(), Some("Recife"));
    }

    #[test]
    fn test_load_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("pix-cli-test-does-not-exist.toml");
        assert_eq!(PixConfig::load_with(Some(path), |_| None).unwrap(), PixConfig::default());
    }

    #[test]
    fn test_toml_serialization() {
        let config = PixConfig {
            merchant: MerchantConfig {
                pix_key: Some("pix@example.com".to_string()),
                ..MerchantConfig::default()
            },
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[merchant]"));
        assert_eq!(PixConfig::from_toml_str(&toml_str).unwrap(), config);
    }
}
