//! Console output formatter for meeting results

use colored::Colorize;
use lab_application::RunMeetingOutput;
use lab_domain::{NO_SUMMARY, OutputFormat, Persona, Speaker, TokenUsage};
use serde_json::json;

/// Formats meeting results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render `output` in the requested format
    pub fn render(output: &RunMeetingOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => Self::format_summary(output),
            OutputFormat::Transcript => Self::format_transcript(output),
            OutputFormat::Json => Self::format_json(output),
        }
    }

    /// Final turn only, followed by where the transcript went
    pub fn format_summary(output: &RunMeetingOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!("{}\n\n", "=== Meeting Summary ===".cyan().bold()));
        text.push_str(output.summary.as_deref().unwrap_or(NO_SUMMARY));
        text.push_str("\n\n");
        text.push_str(&Self::footer(output));

        text
    }

    /// Every turn, with directives dimmed and speakers highlighted
    pub fn format_transcript(output: &RunMeetingOutput) -> String {
        let mut text = String::new();

        text.push_str(&Self::header("Meeting Transcript"));
        text.push('\n');

        for turn in output.transcript.turns() {
            let heading = format!("── {} ──", turn.speaker());
            match turn.speaker() {
                Speaker::Orchestrator => {
                    text.push_str(&format!("\n{}\n{}\n", heading.dimmed(), turn.text().dimmed()))
                }
                Speaker::Persona(_) => {
                    text.push_str(&format!("\n{}\n{}\n", heading.yellow().bold(), turn.text()))
                }
            }
        }

        text.push('\n');
        text.push_str(&Self::footer(output));
        text
    }

    /// Format as JSON
    pub fn format_json(output: &RunMeetingOutput) -> String {
        let value = json!({
            "model": output.model.as_str(),
            "summary": output.summary,
            "transcript": output.transcript,
            "saved": {
                "json": output.saved.structured,
                "markdown": output.saved.rendered,
            },
            "usage": output.usage,
            "cost_usd": output.cost,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// One line per preset persona (for --list-personas)
    pub fn format_personas(personas: &[(&str, Persona)]) -> String {
        let mut text = String::new();
        text.push_str(&Self::section_header("Built-in personas"));
        for (key, persona) in personas {
            text.push_str(&format!(
                "  {:<28} {}\n      {}\n",
                key.cyan(),
                persona.title().bold(),
                persona.expertise().dimmed()
            ));
        }
        text
    }

    fn usage_line(usage: &TokenUsage, cost: Option<f64>) -> String {
        let cost = cost
            .map(|c| format!(", ~${:.4}", c))
            .unwrap_or_default();
        format!(
            "{} in / {} out tokens{}",
            usage.input_tokens, usage.output_tokens, cost
        )
    }

    fn footer(output: &RunMeetingOutput) -> String {
        let mut text = format!(
            "{} {}\n{} {}\n",
            "Saved:".dimmed(),
            output.saved.structured.display(),
            "      ".dimmed(),
            output.saved.rendered.display()
        );
        if !output.usage.is_empty() {
            text.push_str(&format!(
                "{} {} ({})\n",
                "Usage:".dimmed(),
                Self::usage_line(&output.usage, output.cost),
                output.model
            ));
        }
        text
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
