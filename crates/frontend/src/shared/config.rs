//! Frontend configuration
//!
//! The default lives in [`DEFAULT_CONFIG`]; a build can replace it by exporting
//! `LICIMAR_CONFIG` (TOML text) at compile time.

use serde::Deserialize;
use once_cell::sync::OnceCell;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FrontendConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub settlement: SettlementConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Full origin of the backend; empty means same host as the page
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SettlementConfig {
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_port() -> u16 {
    5000
}

fn default_prefix() -> String {
    "/api".to_string()
}

fn default_level() -> String {
    "debug".to_string()
}

fn default_currency() -> String {
    "R$".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: default_port(),
            prefix: default_prefix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency(),
        }
    }
}

/// Default configuration embedded in the bundle
pub const DEFAULT_CONFIG: &str = r#"
[api]
base_url = ""
port = 5000
prefix = "/api"

[logging]
level = "debug"

[settlement]
currency_symbol = "R$"
"#;

impl FrontendConfig {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Parse `text`, falling back to [`DEFAULT_CONFIG`] on error.
    pub fn parse_or_default(text: &str) -> Self {
        match Self::parse(text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid frontend config, using defaults: {}", e);
                Self::parse(DEFAULT_CONFIG).unwrap_or_else(|_| Self::fallback())
            }
        }
    }

    fn fallback() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            settlement: SettlementConfig::default(),
        }
    }

    pub fn log_level(&self) -> log::Level {
        match self.logging.level.trim().to_lowercase().as_str() {
            "error" => log::Level::Error,
            "warn" | "warning" => log::Level::Warn,
            "info" => log::Level::Info,
            "trace" => log::Level::Trace,
            _ => log::Level::Debug,
        }
    }
}

static CONFIG: OnceCell<FrontendConfig> = OnceCell::new();

/// Loaded once per page.
pub fn config() -> &'static FrontendConfig {
    CONFIG.get_or_init(|| {
        let text = option_env!("LICIMAR_CONFIG").unwrap_or(DEFAULT_CONFIG);
        FrontendConfig::parse_or_default(text)
    })
}
