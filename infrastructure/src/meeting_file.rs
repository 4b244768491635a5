//! Meeting definition files (TOML)
//!
//! A meeting file names its personas either by preset key or inline:
//!
//! ```toml
//! type = "team"
//! agenda = "Study the thick disk."
//! questions = ["Which populations are accreted?"]
//! rules = ["State all assumptions"]
//! rounds = 3
//! facilitator = "principal_investigator"
//! participants = [
//!     "galactic_evolution_expert",
//!     { title = "Dust Expert", expertise = "ISM", goal = "map dust", role = "advise" },
//! ]
//!
//! [sampling]
//! model = "deepseek-reasoner"
//! ```

use lab_domain::core::sampling::deserialize_optional_temperature;
use lab_domain::persona::presets;
use lab_domain::{DomainError, MeetingRequest, Model, Persona, SamplingParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetingFileError {
    #[error("Failed to read meeting file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse meeting file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Persona named by preset key or written out in full
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PersonaRef {
    Preset(String),
    Inline(Persona),
}

impl PersonaRef {
    pub fn resolve(self) -> Result<Persona, DomainError> {
        match self {
            PersonaRef::Preset(key) => presets::preset(&key),
            PersonaRef::Inline(persona) => Ok(persona),
        }
    }
}

/// Sampling settings a meeting file may override
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SamplingOverrides {
    pub model: Option<Model>,
    #[serde(deserialize_with = "deserialize_optional_temperature")]
    pub temperature: Option<f32>,
    pub tools: Option<bool>,
}

impl SamplingOverrides {
    pub fn apply(&self, base: SamplingParams) -> SamplingParams {
        let mut sampling = base;
        if let Some(model) = &self.model {
            sampling = sampling.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            sampling = sampling.with_temperature(temperature);
        }
        if let Some(tools) = self.tools {
            sampling = sampling.with_tools(tools);
        }
        sampling
    }
}

/// Raw meeting file contents
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeetingFile {
    #[serde(rename = "type")]
    pub meeting_type: String,
    pub agenda: String,
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub summaries: Vec<String>,
    #[serde(default)]
    pub contexts: Vec<String>,
    pub rounds: Option<u32>,
    /// Base name of the saved transcript files
    pub save_name: Option<String>,
    pub facilitator: Option<PersonaRef>,
    #[serde(default)]
    pub participants: Vec<PersonaRef>,
    pub participant: Option<PersonaRef>,
    #[serde(default)]
    pub sampling: SamplingOverrides,
}

impl MeetingFile {
    pub fn load(path: &Path) -> Result<Self, MeetingFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| MeetingFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|e| MeetingFileError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolve personas and layer the file's sampling settings over `base`.
    ///
    /// The result is not validated yet; callers apply their own overrides and
    /// then call [`MeetingRequest::validate`].
    pub fn into_request(self, base: SamplingParams) -> Result<MeetingRequest, DomainError> {
        let facilitator = self.facilitator.map(PersonaRef::resolve).transpose()?;
        let participants = self
            .participants
            .into_iter()
            .map(PersonaRef::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        let participant = self.participant.map(PersonaRef::resolve).transpose()?;

        Ok(MeetingRequest {
            meeting_type: self.meeting_type,
            facilitator,
            participants,
            participant,
            agenda: self.agenda,
            agenda_questions: self.questions,
            agenda_rules: self.rules,
            summaries: self.summaries,
            contexts: self.contexts,
            rounds: self.rounds,
            sampling: self.sampling.apply(base),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lab_domain::MeetingKind;
    use std::io::Write;

    const TEAM: &str = r#"
type = "team"
agenda = "Study the thick disk."
questions = ["Which populations are accreted?"]
rounds = 3
save_name = "thick_disk"
facilitator = "principal_investigator"
participants = [
    "galactic_evolution_expert",
    { title = "Dust Expert", expertise = "the ISM", goal = "map dust", role = "advise on extinction" },
]

[sampling]
model = "deepseek-reasoner"
temperature = 0.8
"#;

    #[test]
    fn test_team_file() {
        let file = MeetingFile::parse(TEAM).unwrap();
        assert_eq!(file.save_name.as_deref(), Some("thick_disk"));

        let config = file
            .into_request(SamplingParams::default())
            .unwrap()
            .validate()
            .unwrap();

        match config.kind() {
            MeetingKind::Team {
                facilitator,
                participants,
                rounds,
            } => {
                assert_eq!(facilitator.title(), "Principal Investigator");
                assert_eq!(participants.len(), 2);
                assert_eq!(participants[0].title(), "Galactic Evolution Expert");
                assert_eq!(participants[1].title(), "Dust Expert");
                assert_eq!(*rounds, 3);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(config.agenda().questions().len(), 1);
        assert_eq!(config.sampling().model, Model::DeepSeekReasoner);
        assert_eq!(config.sampling().temperature, 0.8);
        assert!(config.sampling().tools_enabled);
    }

    #[test]
    fn test_individual_file() {
        let file = MeetingFile::parse(
            r#"
type = "individual"
agenda = "Plan the cross-calibration."
participant = "machine_learning_expert"
"#,
        )
        .unwrap();
        let base = SamplingParams::default().with_model("gpt-4o");
        let config = file.into_request(base).unwrap().validate().unwrap();

        assert!(matches!(
            config.kind(),
            MeetingKind::Individual { participant } if participant.title() == "Machine Learning Expert"
        ));
        assert_eq!(config.sampling().model, Model::Gpt4o);
    }

    #[test]
    fn test_demo_meetings_parse() {
        for content in [
            include_str!("../../demos/galactic_archaeology.toml"),
            include_str!("../../demos/ml_analysis.toml"),
        ] {
            let file = MeetingFile::parse(content).unwrap();
            let config = file
                .into_request(SamplingParams::default())
                .unwrap()
                .validate()
                .unwrap();
            assert_eq!(config.sampling().model, Model::DeepSeekReasoner);
        }
    }

    #[test]
    fn test_named_temperature_override() {
        let file = MeetingFile::parse(
            r#"
type = "individual"
agenda = "Brainstorm survey targets."
participant = "machine_learning_expert"

[sampling]
temperature = "creative"
"#,
        )
        .unwrap();
        let config = file
            .into_request(SamplingParams::default())
            .unwrap()
            .validate()
            .unwrap();
        assert_eq!(config.sampling().temperature, lab_domain::CREATIVE_TEMPERATURE);

        assert!(MeetingFile::parse(
            "type = \"individual\"\nagenda = \"x\"\n[sampling]\ntemperature = \"hot\"\n"
        )
        .is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let file = MeetingFile::parse(
            r#"
type = "individual"
agenda = "x"
participant = "astrologer"
"#,
        )
        .unwrap();
        let err = file.into_request(SamplingParams::default()).unwrap_err();
        assert_eq!(err, DomainError::UnknownPersona("astrologer".to_string()));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(MeetingFile::parse("type = \"team\"\nagenda = \"x\"\nnum_rounds = 2\n").is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meeting.toml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(TEAM.as_bytes())
            .unwrap();

        assert!(MeetingFile::load(&path).is_ok());

        let err = MeetingFile::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, MeetingFileError::Read { .. }));
    }
}
