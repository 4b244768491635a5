//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for meeting results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final turn (the meeting summary)
    Summary,
    /// Every turn of the transcript
    Transcript,
    /// JSON output
    Json,
}

impl From<OutputFormat> for lab_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => lab_domain::OutputFormat::Summary,
            OutputFormat::Transcript => lab_domain::OutputFormat::Transcript,
            OutputFormat::Json => lab_domain::OutputFormat::Json,
        }
    }
}

fn parse_temperature(value: &str) -> Result<f32, String> {
    lab_domain::parse_temperature(value).map_err(|e| e.to_string())
}

/// CLI arguments for virtual-lab
#[derive(Parser, Debug)]
#[command(name = "virtual-lab")]
#[command(author, version, about = "Virtual Lab - scripted research meetings between AI personas")]
#[command(long_about = r#"
Virtual Lab runs a research meeting between personas played by a language model.

A team meeting has a facilitator and a roster of participants who discuss the
agenda for a number of rounds before the facilitator writes a structured
summary. An individual meeting asks a single persona to answer the agenda.

Meetings are described in TOML files. Personas can be named by preset key
(see --list-personas) or written out inline.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./virtual_lab.toml                       Project-level config
3. ~/.config/virtual-lab/config.toml        Global config
API keys can also be set via OPENAI_API_KEY, DEEPSEEK_API_KEY and NASA_ADS_KEY.

Example:
  virtual-lab demos/galactic_archaeology.toml
  virtual-lab meeting.toml -m deepseek-chat --rounds 1 -o transcript
"#)]
pub struct Cli {
    /// Meeting definition file (TOML)
    #[arg(required_unless_present_any = ["show_config", "list_personas"])]
    pub meeting_file: Option<PathBuf>,

    /// Directory the transcript is written to
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Base name of the transcript files (default: from the meeting file, else "discussion")
    #[arg(long, value_name = "NAME")]
    pub save_name: Option<String>,

    /// Completion model (e.g. gpt-4o, deepseek-chat, deepseek-reasoner)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature: a number, "consistent" (0.2) or "creative" (0.8)
    #[arg(long, value_name = "T", value_parser = parse_temperature)]
    pub temperature: Option<f32>,

    /// Number of discussion rounds (team meetings)
    #[arg(long, value_name = "R")]
    pub rounds: Option<u32>,

    /// Do not offer the ADS and SIMBAD lookups to the model
    #[arg(long)]
    pub no_tools: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the built-in personas and exit
    #[arg(long)]
    pub list_personas: bool,

    /// Append every directive and reply to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_named_temperature_flag() {
        let cli =
            Cli::try_parse_from(["virtual-lab", "m.toml", "--temperature", "creative"]).unwrap();
        assert_eq!(cli.temperature, Some(lab_domain::CREATIVE_TEMPERATURE));

        assert!(Cli::try_parse_from(["virtual-lab", "m.toml", "--temperature", "hot"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "virtual-lab",
            "meeting.toml",
            "-m",
            "deepseek-chat",
            "--temperature",
            "0.8",
            "--rounds",
            "1",
            "--no-tools",
            "-o",
            "json",
            "-vv",
            "--save-dir",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.meeting_file, Some(PathBuf::from("meeting.toml")));
        assert_eq!(cli.model.as_deref(), Some("deepseek-chat"));
        assert_eq!(cli.temperature, Some(0.8));
        assert_eq!(cli.rounds, Some(1));
        assert!(cli.no_tools);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.save_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_meeting_file_required() {
        assert!(Cli::try_parse_from(["virtual-lab"]).is_err());
        assert!(Cli::try_parse_from(["virtual-lab", "--list-personas"]).is_ok());
        assert!(Cli::try_parse_from(["virtual-lab", "--show-config"]).is_ok());
    }
}
