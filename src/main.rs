use anyhow::{bail, Result};
use clap::Parser;
use music_catalog_store::catalog_store::CatalogError;
use music_catalog_store::cli_style::{self, get_styles};
use music_catalog_store::commands::{
    replay_file, run_commands, CommandOutput, CommandRecord, ReplayReport,
};
use music_catalog_store::config::{parse_path, AppConfig, CliConfig, FileConfig};
use music_catalog_store::logging::init_logging;
use music_catalog_store::{CatalogManager, CatalogSummary, Problem};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
#[cfg(feature = "no_checks")]
use tracing::warn;

#[derive(Parser, Debug)]
#[command(styles = get_styles(), version)]
struct CliArgs {
    /// Command scripts to replay, in order.
    #[clap(value_parser = parse_path)]
    pub scripts: Vec<PathBuf>,

    /// TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Abort on the first script line that fails.
    #[clap(long)]
    pub strict: bool,

    /// Verify derived counts and ownership after the replay.
    #[clap(long)]
    pub check: bool,

    /// Default tracing directive, LOG_LEVEL takes precedence.
    #[clap(long)]
    pub log_level: Option<String>,

    /// Print results as JSON.
    #[clap(long)]
    pub json: bool,

    /// A command to run once the scripts are replayed, can be repeated.
    #[clap(long = "run", value_name = "COMMAND")]
    pub commands: Vec<String>,
}

#[derive(Serialize)]
struct RunReport {
    replay: ReplayReport,
    commands: ReplayReport,
    outputs: Vec<CommandRecord>,
    summary: CatalogSummary,
    most_popular_artist: Option<String>,
    most_popular_song: Option<String>,
    problems: Option<Vec<Problem>>,
}

fn popular(result: Result<String, CatalogError>) -> Result<Option<String>> {
    match result {
        Ok(name) => Ok(Some(name)),
        Err(CatalogError::EmptyCatalog(_)) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(feature = "no_checks"))]
fn run_checks(manager: &CatalogManager, enabled: bool) -> Option<Vec<Problem>> {
    enabled.then(|| manager.check_integrity())
}

#[cfg(feature = "no_checks")]
fn run_checks(_manager: &CatalogManager, enabled: bool) -> Option<Vec<Problem>> {
    if enabled {
        warn!("Integrity checks are disabled in this build.");
    }
    None
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = cli_args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli_config = CliConfig {
        scripts: cli_args.scripts,
        strict: cli_args.strict,
        check: cli_args.check,
        log_level: cli_args.log_level,
        history_file: None,
        json_output: cli_args.json,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    init_logging(&config.log_level)?;

    let manager = CatalogManager::default();

    let mut replay = ReplayReport::default();
    for script in &config.scripts {
        let report = replay_file(&manager, script, config.replay_mode)?;
        replay.executed += report.executed;
        replay.failed += report.failed;
        replay.skipped += report.skipped;
    }

    let (commands, outputs) = run_commands(&manager, &cli_args.commands, config.replay_mode)?;

    let report = RunReport {
        replay,
        commands,
        outputs,
        summary: manager.summary(),
        most_popular_artist: popular(manager.most_popular_artist())?,
        most_popular_song: popular(manager.most_popular_song())?,
        problems: run_checks(&manager, config.check),
    };

    if config.json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        cli_style::print_replay_report(&report.replay);
        cli_style::print_output(&CommandOutput::Summary(report.summary));
        match &report.most_popular_artist {
            Some(name) => cli_style::print_key_value("Most popular artist", name),
            None => cli_style::print_empty_list("No artists"),
        }
        match &report.most_popular_song {
            Some(title) => cli_style::print_key_value("Most popular song", title),
            None => cli_style::print_empty_list("No songs"),
        }
        for record in &report.outputs {
            cli_style::print_command_record(record);
        }
        if !report.outputs.is_empty() {
            cli_style::print_replay_report(&report.commands);
        }
        if let Some(problems) = &report.problems {
            cli_style::print_output(&CommandOutput::Problems(problems.clone()));
        }
    }

    if let Some(problems) = &report.problems {
        if !problems.is_empty() {
            bail!("Integrity check found {} problems", problems.len());
        }
    }

    info!("Done.");
    Ok(())
}
