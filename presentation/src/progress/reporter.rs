//! Progress reporting while a meeting runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use lab_application::ports::progress::MeetingProgress;
use lab_domain::{MeetingPhase, MeetingType, Persona};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with an indicatif bar counting replies
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(bar) = guard.as_ref()
        {
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingProgress for ProgressReporter {
    fn on_meeting_start(&self, meeting_type: MeetingType, total_replies: usize) {
        let bar = ProgressBar::new(total_replies as u64);
        bar.set_style(Self::style());
        bar.set_prefix(format!("{} meeting", meeting_type));
        bar.set_message("Starting...");
        bar.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn on_turn_start(&self, phase: &MeetingPhase, speaker: &Persona) {
        self.with_bar(|bar| bar.set_message(format!("{}: {}", phase, speaker.title())));
    }

    fn on_turn_complete(&self, _phase: &MeetingPhase, _speaker: &Persona) {
        self.with_bar(|bar| bar.inc(1));
    }

    fn on_turn_failed(&self, phase: &MeetingPhase, speaker: &Persona, _error: &str) {
        self.with_bar(|bar| {
            bar.abandon_with_message(format!("{} {} ({})", "x".red(), speaker.title(), phase))
        });
    }

    fn on_meeting_complete(&self, turns: usize) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_with_message(format!("{} ({} turns)", "complete!".green(), turns));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl MeetingProgress for SimpleProgress {
    fn on_meeting_start(&self, meeting_type: MeetingType, total_replies: usize) {
        eprintln!(
            "{} {} ({} replies)",
            "->".cyan(),
            format!("{} meeting", meeting_type).bold(),
            total_replies
        );
    }

    fn on_turn_start(&self, phase: &MeetingPhase, speaker: &Persona) {
        eprintln!("  {} {}: {}", "..".dimmed(), phase, speaker.title());
    }

    fn on_turn_complete(&self, _phase: &MeetingPhase, speaker: &Persona) {
        eprintln!("  {} {}", "v".green(), speaker.title());
    }

    fn on_turn_failed(&self, _phase: &MeetingPhase, speaker: &Persona, error: &str) {
        eprintln!("  {} {} ({})", "x".red(), speaker.title(), error);
    }

    fn on_meeting_complete(&self, turns: usize) {
        eprintln!("{} {} turns recorded\n", "->".cyan(), turns);
    }
}
