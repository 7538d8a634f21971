//! Runtime settings for the CLI.
//!
//! # Precedence
//! 1. Command-line flags, then `DAYBOARD_*` environment variables (clap).
//! 2. The user config file.
//! 3. Built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DATABASE_FILE_NAME: &str = "dayboard.sqlite3";
const APP_DIR: &str = "dayboard";
const LOG_SUBDIR: &str = "logs";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }
}

/// `<config dir>/dayboard/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Reads the config file.
///
/// An explicit path must exist; the default path may be absent.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(FileConfig::default()),
        },
    };
    let content = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_file_config(&content).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_file_config(content: &str) -> Result<FileConfig> {
    Ok(toml::from_str(content)?)
}

/// Merges flag/env values over the file config and defaults.
pub fn resolve(
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
    file: FileConfig,
) -> Result<Settings> {
    let data_dir = data_dir
        .or(file.data_dir)
        .or_else(|| dirs::data_dir().map(|dir| dir.join(APP_DIR)))
        .context("no data directory available; pass --data-dir or set DAYBOARD_DATA_DIR")?;
    let log_level = log_level
        .or(file.log_level)
        .unwrap_or_else(|| dayboard_core::default_log_level().to_string());
    let data_dir = absolute(data_dir)?;
    let log_dir = match file.log_dir {
        Some(dir) => absolute(dir)?,
        None => data_dir.join(LOG_SUBDIR),
    };

    Ok(Settings {
        data_dir,
        log_level,
        log_dir,
    })
}

/// Anchors relative paths at the working directory; logging needs absolute
/// directories.
fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::{load_file_config, parse_file_config, resolve, FileConfig};
    use std::path::PathBuf;

    #[test]
    fn parses_partial_file() {
        let config = parse_file_config("log_level = \"debug\"\n").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse_file_config("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("/file/data")),
            log_level: Some("warn".to_string()),
            log_dir: None,
        };
        let settings = resolve(
            Some(PathBuf::from("/flag/data")),
            Some("trace".to_string()),
            file,
        )
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/flag/data"));
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.log_dir, PathBuf::from("/flag/data/logs"));
        assert_eq!(
            settings.database_path(),
            PathBuf::from("/flag/data/dayboard.sqlite3")
        );
    }

    #[test]
    fn file_values_fill_missing_flags() {
        let file = FileConfig {
            data_dir: Some(PathBuf::from("/file/data")),
            log_level: None,
            log_dir: Some(PathBuf::from("/var/log/dayboard")),
        };
        let settings = resolve(None, None, file).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/file/data"));
        assert_eq!(settings.log_level, dayboard_core::default_log_level());
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/dayboard"));
    }

    #[test]
    fn relative_data_dir_is_anchored_at_working_directory() {
        let settings = resolve(Some(PathBuf::from("state")), None, FileConfig::default()).unwrap();
        assert!(settings.data_dir.is_absolute());
        assert!(settings.data_dir.ends_with("state"));
        assert!(settings.log_dir.ends_with("state/logs"));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/srv/dayboard\"\n").unwrap();

        let config = load_file_config(Some(&path)).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/dayboard")));

        let missing = dir.path().join("missing.toml");
        assert!(load_file_config(Some(&missing)).is_err());
    }
}
