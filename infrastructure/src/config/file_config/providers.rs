//! Provider configuration from TOML (`[providers]` section)

use lab_domain::Provider;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_ADS_BASE_URL: &str = "https://api.adsabs.harvard.edu/v1";
pub const DEFAULT_SIMBAD_TAP_URL: &str = "https://simbad.cds.unistra.fr/simbad/sim-tap/sync";

/// Tool round-trips allowed within one reply
pub const DEFAULT_TOOL_TURN_LIMIT: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Base URL of the OpenAI chat completions API
    pub openai_base_url: String,
    /// Base URL of the DeepSeek chat completions API
    pub deepseek_base_url: String,
    /// Base URL of the NASA ADS API
    pub ads_base_url: String,
    /// SIMBAD TAP synchronous query endpoint
    pub simbad_tap_url: String,
    /// Maximum tool round-trips before a reply is abandoned
    pub tool_turn_limit: u32,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        Self {
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            deepseek_base_url: DEFAULT_DEEPSEEK_BASE_URL.to_string(),
            ads_base_url: DEFAULT_ADS_BASE_URL.to_string(),
            simbad_tap_url: DEFAULT_SIMBAD_TAP_URL.to_string(),
            tool_turn_limit: DEFAULT_TOOL_TURN_LIMIT,
        }
    }
}

impl FileProvidersConfig {
    pub fn base_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::OpenAi => &self.openai_base_url,
            Provider::DeepSeek => &self.deepseek_base_url,
        }
    }
}
