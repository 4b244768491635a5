//! Sampling parameters shared by every turn of a meeting

use super::error::DomainError;
use super::model::Model;
use serde::{Deserialize, Deserializer, Serialize};

/// Low temperature for reproducible, focused replies
pub const CONSISTENT_TEMPERATURE: f32 = 0.2;

/// Higher temperature for brainstorming-style meetings
pub const CREATIVE_TEMPERATURE: f32 = 0.8;

/// Parse a temperature given as a number or as a preset name
/// (`consistent` or `creative`).
pub fn parse_temperature(value: &str) -> Result<f32, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "consistent" => Ok(CONSISTENT_TEMPERATURE),
        "creative" => Ok(CREATIVE_TEMPERATURE),
        other => other
            .parse()
            .map_err(|_| DomainError::InvalidTemperature(value.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTemperature {
    Number(f32),
    Name(String),
}

/// Serde `deserialize_with` helper accepting `0.8` or `"creative"`
pub fn deserialize_temperature<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTemperature::deserialize(deserializer)? {
        RawTemperature::Number(value) => Ok(value),
        RawTemperature::Name(name) => parse_temperature(&name).map_err(serde::de::Error::custom),
    }
}

/// Optional form of [`deserialize_temperature`]
pub fn deserialize_optional_temperature<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_temperature(deserializer).map(Some)
}

/// How each completion in a meeting is sampled (Value Object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub model: Model,
    /// Allow the backend to call the literature and object lookups
    pub tools_enabled: bool,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: CONSISTENT_TEMPERATURE,
            model: Model::default(),
            tools_enabled: true,
        }
    }
}

impl SamplingParams {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tools(mut self, enabled: bool) -> Self {
        self.tools_enabled = enabled;
        self
    }

    /// Tools are only offered when enabled and the model can use them
    pub fn offers_tools(&self) -> bool {
        self.tools_enabled && self.model.supports_tools()
    }
}
