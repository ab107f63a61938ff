//! Runtime configuration
//!
//! All settings come from the environment and are read once at startup; the
//! resulting `Config` is passed explicitly into the components that need it.

use std::path::PathBuf;

/// Default catalog file, next to the working directory
const DEFAULT_CATALOG_PATH: &str = "vehicle_database.json";

/// Meta Cloud API version used for message delivery
const DEFAULT_API_VERSION: &str = "v18.0";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the vehicle catalog JSON file
    pub catalog_path: PathBuf,
    /// Port for the webhook server
    pub port: u16,
    pub whatsapp: WhatsAppConfig,
    pub extraction: ExtractionConfig,
}

/// WhatsApp Cloud API settings
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    pub api_base: String,
    pub api_version: String,
    pub phone_number_id: String,
    pub access_token: String,
    /// Token Meta echoes back during the webhook verification handshake
    pub verify_token: String,
}

/// AI extraction endpoint settings (OpenAI-compatible chat completions)
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Config {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            catalog_path: PathBuf::from(
                env_or("CATALOG_PATH", DEFAULT_CATALOG_PATH),
            ),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            whatsapp: WhatsAppConfig {
                api_base: env_or("WHATSAPP_API_BASE", "https://graph.facebook.com"),
                api_version: env_or("WHATSAPP_API_VERSION", DEFAULT_API_VERSION),
                phone_number_id: env_or("WHATSAPP_PHONE_NUMBER_ID", ""),
                access_token: env_or("WHATSAPP_ACCESS_TOKEN", ""),
                verify_token: env_or("VERIFY_TOKEN", ""),
            },
            extraction: ExtractionConfig {
                api_base: env_or("OPENAI_API_BASE", "https://api.openai.com/v1"),
                api_key: std::env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|k| !k.trim().is_empty()),
                model: env_or("OPENAI_MODEL", "gpt-4.1-mini"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("FIPEBOT_TEST_UNSET_VAR", "fallback"), "fallback");
    }
}
