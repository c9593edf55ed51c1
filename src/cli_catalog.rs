use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{debug, warn};

use music_catalog_store::cli_style::{self, get_styles};
use music_catalog_store::commands::{
    execute_command, parse_command_line, replay_file, CommandOutput, InnerCli,
};
use music_catalog_store::config::{parse_path, AppConfig, CliConfig, FileConfig};
use music_catalog_store::logging::init_logging;
use music_catalog_store::CatalogManager;

use rustyline::{
    completion::Completer,
    highlight::Highlighter,
    history::{FileHistory, History},
    validate::Validator,
    CompletionType, Config, Editor, Helper,
};

#[derive(Parser, Debug)]
#[command(styles = get_styles())]
struct CliArgs {
    /// Command scripts to replay before the prompt opens.
    #[clap(value_parser = parse_path)]
    pub scripts: Vec<PathBuf>,

    /// TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Abort startup on the first script line that fails.
    #[clap(long)]
    pub strict: bool,

    /// File to load and save the shell history.
    #[clap(long, value_parser = parse_path)]
    pub history_file: Option<PathBuf>,

    /// Default tracing directive, LOG_LEVEL takes precedence.
    #[clap(long, default_value = "warn")]
    pub log_level: String,

    /// Print command results as JSON.
    #[clap(long)]
    pub json: bool,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn execute_line(line: &str, manager: &CatalogManager, json: bool) -> CommandExecutionResult {
    let command = match parse_command_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return CommandExecutionResult::Ok,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    debug!("Executing {:?}", command);
    match execute_command(manager, command) {
        Ok(CommandOutput::Exit) => CommandExecutionResult::Exit,
        Ok(output) if json => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{}", text);
                CommandExecutionResult::Ok
            }
            Err(err) => CommandExecutionResult::Error(err.to_string()),
        },
        Ok(output) => {
            cli_style::print_output(&output);
            CommandExecutionResult::Ok
        }
        Err(err) => CommandExecutionResult::Error(err.to_string()),
    }
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandHelper { commands_names }
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    let file_config = cli_args.config.as_deref().map(FileConfig::load).transpose()?;
    let cli_config = CliConfig {
        scripts: cli_args.scripts,
        strict: cli_args.strict,
        check: false,
        log_level: Some(cli_args.log_level),
        history_file: cli_args.history_file,
        json_output: cli_args.json,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    init_logging(&config.log_level)?;

    let manager = CatalogManager::default();
    for script in &config.scripts {
        let report = replay_file(&manager, script, config.replay_mode)?;
        cli_style::print_replay_report(&report);
    }

    cli_style::print_welcome(&manager.summary());

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(config.shell.max_history)?
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(CommandHelper::new()));

    if let Some(history_file) = &config.shell.history_file {
        if history_file.exists() {
            if let Err(err) = rl.load_history(history_file) {
                warn!("Could not load history from {:?}: {}", history_file, err);
            }
        }
    }

    let prompt = cli_style::get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                match execute_line(&line, &manager, config.json_output) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => {
                        cli_style::print_error(&err);
                        continue;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                cli_style::print_error(&format!("{:?}", e));
                break;
            }
        }
    }

    if let Some(history_file) = &config.shell.history_file {
        if rl.history().is_empty() {
            debug!("No history to save.");
        } else if let Err(err) = rl.save_history(history_file) {
            warn!("Could not save history to {:?}: {}", history_file, err);
        }
    }

    cli_style::print_goodbye();
    Ok(())
}
