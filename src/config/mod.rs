mod file_config;

pub use file_config::{FileConfig, ShellConfig};

use crate::commands::ReplayMode;
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Makes a command line path absolute, canonicalizing it when it exists.
pub fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => path_buf,
        Err(err) => return Err(err).with_context(|| format!("Error resolving path: {}", s)),
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

/// CLI arguments that can be used for config resolution.
/// Every field here can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub scripts: Vec<PathBuf>,
    pub strict: bool,
    pub check: bool,
    pub log_level: Option<String>,
    pub history_file: Option<PathBuf>,
    pub json_output: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scripts: Vec<PathBuf>,
    pub replay_mode: ReplayMode,
    pub check: bool,
    pub log_level: String,
    pub json_output: bool,

    pub shell: ShellSettings,
}

#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub history_file: Option<PathBuf>,
    pub max_history: usize,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            history_file: None,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let scripts = file
            .scripts
            .map(|paths| paths.into_iter().map(PathBuf::from).collect())
            .unwrap_or_else(|| cli.scripts.clone());

        for script in &scripts {
            if !script.exists() {
                bail!("Script file does not exist: {:?}", script);
            }
            if !script.is_file() {
                bail!("Script path is not a file: {:?}", script);
            }
        }

        let replay_mode = if file.strict.unwrap_or(cli.strict) {
            ReplayMode::Strict
        } else {
            ReplayMode::Lenient
        };

        let log_level = file
            .log_level
            .or_else(|| cli.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        if EnvFilter::try_new(&log_level).is_err() {
            bail!("Invalid log level directive: {}", log_level);
        }

        let shell_file = file.shell.unwrap_or_default();
        let shell = ShellSettings {
            history_file: shell_file
                .history_file
                .map(PathBuf::from)
                .or_else(|| cli.history_file.clone()),
            max_history: shell_file.max_history.unwrap_or(DEFAULT_MAX_HISTORY),
        };

        Ok(Self {
            scripts,
            replay_mode,
            check: file.check.unwrap_or(cli.check),
            log_level,
            json_output: file.json_output.unwrap_or(cli.json_output),
            shell,
        })
    }
}
