//! Configuration file discovery for the CLI.
//!
//! An explicit `--config` path always wins. Otherwise the first existing
//! file among the search paths is used, and defaults apply when there is none.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use settle::{SettleError, config::AppConfig};

/// Local configuration path, relative to the working directory
const LOCAL_CONFIG: &str = "settle/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Configuration file not found: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SettleError {
    fn from(err: ConfigError) -> Self {
        SettleError::ConfigFile(err.to_string())
    }
}

/// Where a discovered configuration file lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// `settle/config.toml` under the working directory
    Local,
    /// The platform configuration directory
    System,
}

/// Candidate configuration files, in search order
fn search_paths() -> Vec<(ConfigSource, PathBuf)> {
    let mut paths = vec![(ConfigSource::Local, PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "settle", "settle") {
        Some(dirs) => paths.push((ConfigSource::System, dirs.config_dir().join("config.toml"))),
        None => debug!("No platform configuration directory"),
    }
    paths
}

/// Load the configuration for a run.
///
/// # Errors
///
/// Returns [`SettleError::ConfigFile`] if an explicit path does not exist or
/// the chosen file is not a valid configuration.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SettleError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:?; "Loading configuration from --config");
        return read_config(path);
    }

    match search_paths().into_iter().find(|(_, path)| path.is_file()) {
        Some((source, path)) => {
            info!(source:?, path:?; "Loading discovered configuration");
            read_config(&path)
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(AppConfig::default())
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, SettleError> {
    let content = fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()).into(),
        _ => SettleError::Io(err),
    })?;

    toml::from_str(&content).map_err(|err| {
        ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nmax_ticks = 12\n\n[canvas]\nmargin = 10.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.simulation().max_ticks(), 12);
        assert_eq!(config.canvas().margin(), 10.0);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = load_config(Some("does/not/exist.toml"));
        match result {
            Err(SettleError::ConfigFile(message)) => assert!(message.contains("exist.toml")),
            other => panic!("Expected ConfigFile error, got {other:?}"),
        }
    }

    #[test]
    fn test_local_file_is_searched_first() {
        let paths = search_paths();
        assert_eq!(paths[0], (ConfigSource::Local, PathBuf::from(LOCAL_CONFIG)));
        assert!(
            paths[1..]
                .iter()
                .all(|(source, _)| *source == ConfigSource::System)
        );
    }

    #[test]
    fn test_mistyped_value_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nmax_ticks = \"many\"").unwrap();

        match load_config(Some(file.path())) {
            Err(SettleError::ConfigFile(message)) => {
                assert!(message.contains("Invalid configuration"))
            }
            other => panic!("Expected ConfigFile error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[simulation\nmax_ticks = ").unwrap();

        assert!(matches!(
            load_config(Some(file.path())),
            Err(SettleError::ConfigFile(_))
        ));
    }
}
