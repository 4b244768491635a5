//! CLI entrypoint for Virtual Lab
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lab_application::{
    CompletionGateway, ConversationLogger, MeetingProgress, NoProgress, RunMeetingInput,
    RunMeetingUseCase, SaveTarget,
};
use lab_domain::persona::presets;
use lab_domain::{MeetingConfig, MeetingPlan, Model};
use lab_infrastructure::{
    AstroLookup, ConfigLoader, FileConfig, FileTranscriptStore, JsonlConversationLogger,
    MeetingFile, RoutingGateway,
};
use lab_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const DEFAULT_SAVE_NAME: &str = "discussion";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    if cli.list_personas {
        print!("{}", ConsoleFormatter::format_personas(&presets::all()));
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    let meeting_path = cli
        .meeting_file
        .as_deref()
        .context("A meeting file is required")?;
    let meeting_file = MeetingFile::load(meeting_path)?;
    let save_name = cli
        .save_name
        .clone()
        .or_else(|| meeting_file.save_name.clone())
        .unwrap_or_else(|| DEFAULT_SAVE_NAME.to_string());
    let meeting = build_meeting(&cli, &config, meeting_file)?;

    let save_dir = cli
        .save_dir
        .clone()
        .unwrap_or_else(|| config.meeting.save_dir.clone());
    let save = SaveTarget::new(save_dir, save_name);

    info!(
        "Starting {} meeting with {} ({} turns)",
        meeting.meeting_type(),
        meeting.sampling().model,
        MeetingPlan::new(&meeting).expected_turns()
    );

    // === Dependency Injection ===
    let client = reqwest::Client::builder()
        .user_agent(concat!("virtual-lab/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    let lookup = Arc::new(AstroLookup::from_config(client.clone(), &config));
    let gateway = Arc::new(RoutingGateway::from_config(client, &config, lookup));

    let logger = preflight_and_open_log(
        gateway.as_ref(),
        &meeting.sampling().model,
        &save,
        cli.conversation_log.as_deref(),
    )?;

    let mut use_case = RunMeetingUseCase::new(gateway, Arc::new(FileTranscriptStore::new()))
        .with_pricing(config.pricing.clone());
    if let Some(logger) = logger {
        use_case = use_case.with_logger(logger);
    }

    let input = RunMeetingInput::new(meeting, save);
    // Bars and log lines share stderr, so verbose runs get plain lines
    let progress: Box<dyn MeetingProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let result = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter::render(&result, format));

    Ok(())
}

/// Resolve the meeting file and layer CLI flags over it.
///
/// Precedence: command line, then the meeting file, then `[meeting]` in the
/// config files.
fn build_meeting(cli: &Cli, config: &FileConfig, file: MeetingFile) -> Result<MeetingConfig> {
    let mut request = file.into_request(config.meeting.sampling())?;

    if let Some(model) = &cli.model {
        request.sampling = request.sampling.with_model(Model::from(model.as_str()));
    }
    if let Some(temperature) = cli.temperature {
        request.sampling = request.sampling.with_temperature(temperature);
    }
    if cli.no_tools {
        request.sampling = request.sampling.with_tools(false);
    }
    request.rounds = cli.rounds.or(request.rounds).or(config.meeting.rounds);

    Ok(request.validate()?)
}

/// Check the save target and model before anything touches the disk, then
/// open the optional conversation log.
fn preflight_and_open_log(
    gateway: &dyn CompletionGateway,
    model: &Model,
    save: &SaveTarget,
    log_path: Option<&Path>,
) -> Result<Option<Arc<dyn ConversationLogger>>> {
    save.validate()?;
    if let Err(e) = gateway.preflight(model) {
        if e.is_configuration() {
            bail!(
                "{} (model {}). Run `virtual-lab --show-config` to see which config files are read.",
                e,
                model
            );
        }
        return Err(e.into());
    }

    let Some(path) = log_path else {
        return Ok(None);
    };
    let logger: Arc<dyn ConversationLogger> = Arc::new(
        JsonlConversationLogger::open(path)
            .with_context(|| format!("Failed to open conversation log {}", path.display()))?,
    );
    Ok(Some(logger))
}

/// Console logging from -v / RUST_LOG, plus an optional daily log file.
///
/// The returned guard must be held until exit so buffered lines are flushed.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "virtual-lab.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
