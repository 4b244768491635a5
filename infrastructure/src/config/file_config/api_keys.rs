//! Credentials from TOML (`[api_keys]` section)

use lab_domain::Provider;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides each credential
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEEPSEEK_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const NASA_ADS_KEY_ENV: &str = "NASA_ADS_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiKeysConfig {
    pub openai: Option<String>,
    pub deepseek: Option<String>,
    /// Token for the NASA ADS search API
    pub nasa_ads: Option<String>,
}

impl FileApiKeysConfig {
    /// Key for a completion provider, ignoring blank values
    pub fn for_provider(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::OpenAi => self.openai.as_deref(),
            Provider::DeepSeek => self.deepseek.as_deref(),
        };
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn nasa_ads(&self) -> Option<&str> {
        self.nasa_ads.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Environment variable consulted for a provider's key
    pub fn env_var(provider: Provider) -> &'static str {
        match provider {
            Provider::OpenAi => OPENAI_API_KEY_ENV,
            Provider::DeepSeek => DEEPSEEK_API_KEY_ENV,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keys_ignored() {
        let keys = FileApiKeysConfig {
            openai: Some("  ".to_string()),
            deepseek: Some("ds-key".to_string()),
            nasa_ads: None,
        };
        assert_eq!(keys.for_provider(Provider::OpenAi), None);
        assert_eq!(keys.for_provider(Provider::DeepSeek), Some("ds-key"));
        assert_eq!(keys.nasa_ads(), None);
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(FileApiKeysConfig::env_var(Provider::OpenAi), "OPENAI_API_KEY");
        assert_eq!(FileApiKeysConfig::env_var(Provider::DeepSeek), "DEEPSEEK_API_KEY");
    }
}
