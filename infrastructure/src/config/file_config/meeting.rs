//! Meeting defaults from TOML (`[meeting]` section)
//!
//! Values here apply when neither the meeting file nor the command line
//! sets them.

use lab_domain::core::sampling::deserialize_temperature;
use lab_domain::{CONSISTENT_TEMPERATURE, Model, SamplingParams};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMeetingConfig {
    /// Completion model (e.g. "gpt-4o", "deepseek-chat")
    pub model: Model,
    /// Sampling temperature, as a number or `"consistent"` / `"creative"`
    #[serde(deserialize_with = "deserialize_temperature")]
    pub temperature: f32,
    /// Rounds for team meetings that don't say otherwise
    pub rounds: Option<u32>,
    /// Offer the literature and object lookups to the model
    pub tools: bool,
    /// Directory transcripts are written to
    pub save_dir: PathBuf,
}

impl Default for FileMeetingConfig {
    fn default() -> Self {
        Self {
            model: Model::default(),
            temperature: CONSISTENT_TEMPERATURE,
            rounds: None,
            tools: true,
            save_dir: PathBuf::from("discussions"),
        }
    }
}

impl FileMeetingConfig {
    pub fn sampling(&self) -> SamplingParams {
        SamplingParams::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_tools(self.tools)
    }
}
