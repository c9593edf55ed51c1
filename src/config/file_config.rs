use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub scripts: Option<Vec<String>>,
    pub strict: Option<bool>,
    pub check: Option<bool>,
    pub log_level: Option<String>,
    pub json_output: Option<bool>,

    pub shell: Option<ShellConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ShellConfig {
    pub history_file: Option<String>,
    pub max_history: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
scripts = ["seed.txt", "more.txt"]
strict = false
check = true
log_level = "debug"

[shell]
history_file = "/tmp/catalog_history"
max_history = 50
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();

        assert_eq!(
            config.scripts,
            Some(vec!["seed.txt".to_string(), "more.txt".to_string()])
        );
        assert_eq!(config.strict, Some(false));
        assert_eq!(config.check, Some(true));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.json_output.is_none());
        let shell = config.shell.unwrap();
        assert_eq!(shell.history_file.as_deref(), Some("/tmp/catalog_history"));
        assert_eq!(shell.max_history, Some(50));
    }

    #[test]
    fn empty_file_gives_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.scripts.is_none());
        assert!(config.shell.is_none());
    }

    #[test]
    fn rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "strict = maybe").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = FileConfig::load(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
