//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api_keys;
mod meeting;
mod output;
mod providers;

pub use api_keys::{
    DEEPSEEK_API_KEY_ENV, FileApiKeysConfig, NASA_ADS_KEY_ENV, OPENAI_API_KEY_ENV,
};
pub use meeting::FileMeetingConfig;
pub use output::FileOutputConfig;
pub use providers::{DEFAULT_TOOL_TURN_LIMIT, FileProvidersConfig};

use lab_domain::{ModelPricing, PricingTable};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Credentials for completion providers and lookup services
    pub api_keys: FileApiKeysConfig,
    /// Endpoints and tool loop settings
    pub providers: FileProvidersConfig,
    /// Meeting defaults
    pub meeting: FileMeetingConfig,
    /// USD per one million tokens, keyed by model id
    pub pricing: PricingTable,
    /// Output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_keys: FileApiKeysConfig::default(),
            providers: FileProvidersConfig::default(),
            meeting: FileMeetingConfig::default(),
            pricing: default_pricing(),
            output: FileOutputConfig::default(),
        }
    }
}

/// Prices shipped with the tool; `[pricing]` entries add to or replace them
fn default_pricing() -> PricingTable {
    PricingTable::new()
        .with_price(
            "gpt-3.5-turbo",
            ModelPricing {
                input_per_million: 0.5,
                output_per_million: 1.5,
            },
        )
        .with_price(
            "gpt-4o",
            ModelPricing {
                input_per_million: 5.0,
                output_per_million: 15.0,
            },
        )
}

impl FileConfig {
    /// Check value ranges, returning a message per problem found.
    ///
    /// Problems are reported as warnings; the affected setting falls back to
    /// its default where one exists.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.meeting.model.as_str().trim().is_empty() {
            issues.push("meeting.model: model name is empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.meeting.temperature) {
            issues.push(format!(
                "meeting.temperature: {} is outside 0.0..=2.0",
                self.meeting.temperature
            ));
        }
        if self.meeting.rounds == Some(0) {
            issues.push("meeting.rounds: must be at least 1".to_string());
        }
        if self.providers.tool_turn_limit == 0 {
            issues.push(format!(
                "providers.tool_turn_limit: 0 disables tool use, using {}",
                DEFAULT_TOOL_TURN_LIMIT
            ));
        }

        issues
    }

    /// Tool turn limit with the zero value replaced by the default
    pub fn tool_turn_limit(&self) -> u32 {
        match self.providers.tool_turn_limit {
            0 => DEFAULT_TOOL_TURN_LIMIT,
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_domain::{Model, OutputFormat, Provider, TokenUsage};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api_keys]
openai = "sk-test"
nasa_ads = "ads-token"

[providers]
deepseek_base_url = "http://localhost:9000"
tool_turn_limit = 4

[meeting]
model = "deepseek-chat"
temperature = 0.8
rounds = 3
tools = false
save_dir = "runs"

[pricing."deepseek-chat"]
input_per_million = 0.27
output_per_million = 1.1

[output]
format = "transcript"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_keys.for_provider(Provider::OpenAi), Some("sk-test"));
        assert_eq!(config.api_keys.nasa_ads(), Some("ads-token"));
        assert_eq!(
            config.providers.base_url(Provider::DeepSeek),
            "http://localhost:9000"
        );
        assert_eq!(config.tool_turn_limit(), 4);
        assert_eq!(config.meeting.model, Model::DeepSeekChat);
        assert_eq!(config.meeting.temperature, 0.8);
        assert_eq!(config.meeting.rounds, Some(3));
        assert!(!config.meeting.tools);
        assert_eq!(config.meeting.save_dir.to_str(), Some("runs"));
        assert!(config.pricing.get("deepseek-chat").is_some());
        assert_eq!(config.output.format, Some(OutputFormat::Transcript));
        assert!(!config.output.color);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[meeting]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.meeting.model, Model::Gpt4o);
        // Defaults should apply
        assert_eq!(config.meeting.temperature, 0.2);
        assert!(config.meeting.tools);
        assert_eq!(config.tool_turn_limit(), DEFAULT_TOOL_TURN_LIMIT);
        assert!(config.api_keys.openai.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.meeting.model, Model::Gpt35Turbo);
        assert_eq!(
            config.providers.base_url(Provider::OpenAi),
            "https://api.openai.com/v1"
        );
        let cost = config
            .pricing
            .cost("gpt-3.5-turbo", &TokenUsage::new(1_000_000, 0))
            .unwrap();
        assert!((cost - 0.5).abs() < 1e-9);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_bad_values() {
        let mut config = FileConfig::default();
        config.meeting.temperature = 3.5;
        config.meeting.rounds = Some(0);
        config.providers.tool_turn_limit = 0;

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].starts_with("meeting.temperature"));
        assert_eq!(config.tool_turn_limit(), DEFAULT_TOOL_TURN_LIMIT);
    }
}
