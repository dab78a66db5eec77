use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub gateway: GatewayConfig,
    pub catalog: CatalogConfig,
    pub locales: LocaleConfig,
    pub forgery: ForgeryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub id: String,
    pub account_url: String,
}

impl GatewayConfig {
    /// Dasherized gateway id, used to scope request parameter names.
    pub fn slug(&self) -> String {
        self.id.replace('_', "-")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub supported: Vec<String>,
    pub installed_manifest: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeryConfig {
    // Raw shared secret; rotate by redeploying with a new value
    pub secret: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig {
                id: "storefront_gateway".to_string(),
                account_url: "https://shop.example.com/my-account/payment-methods".to_string(),
            },
            catalog: CatalogConfig {
                base_url: "https://packages.example.com/translations".to_string(),
                timeout_seconds: 10,
            },
            locales: LocaleConfig {
                supported: vec!["en_US".to_string()],
                installed_manifest: None,
            },
            forgery: ForgeryConfig {
                secret: String::new(),
            },
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(id) = std::env::var("BRIDGE_GATEWAY_ID") {
            if !id.trim().is_empty() {
                config.gateway.id = id;
            }
        }

        if let Ok(url) = std::env::var("BRIDGE_ACCOUNT_URL") {
            config.gateway.account_url = url;
        }

        if let Ok(url) = std::env::var("BRIDGE_CATALOG_URL") {
            config.catalog.base_url = url;
        }

        if let Ok(timeout) = std::env::var("BRIDGE_CATALOG_TIMEOUT_SECS") {
            config.catalog.timeout_seconds = timeout
                .parse()
                .map_err(|_| BridgeError::config_error("Invalid BRIDGE_CATALOG_TIMEOUT_SECS"))?;
        }

        if let Ok(locales) = std::env::var("BRIDGE_SUPPORTED_LOCALES") {
            let list = locales
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>();
            if !list.is_empty() {
                config.locales.supported = list;
            }
        }

        config.locales.installed_manifest = std::env::var("BRIDGE_INSTALLED_MANIFEST").ok();

        if let Ok(secret) = std::env::var("BRIDGE_NONCE_SECRET") {
            config.forgery.secret = secret;
        }

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BridgeError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: BridgeConfig = toml::from_str(&content)
            .map_err(|e| BridgeError::config_error(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gateway.id.trim().is_empty() {
            return Err(BridgeError::config_error("Gateway id cannot be empty"));
        }
        if self.gateway.account_url.trim().is_empty() {
            return Err(BridgeError::config_error("Account URL cannot be empty"));
        }
        if self.forgery.secret.trim().is_empty() {
            return Err(BridgeError::config_error(
                "Anti-forgery secret is not configured",
            ));
        }
        Ok(())
    }
}
