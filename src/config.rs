use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Base name of the optional settings file in the working directory.
pub const CONFIG_FILE: &str = "content-checker";
pub const ENV_PREFIX: &str = "CONTENT_CHECKER";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Directory below the root holding `<course>/<chapter>/<page>.md`.
    pub content_dir: PathBuf,
    /// Stop after this many files with issues. Negative means unlimited.
    pub max_errors: i64,
    /// Skip documents with broken front matter instead of aborting.
    pub skip_broken: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            content_dir: PathBuf::from("content"),
            max_errors: 3,
            skip_broken: false,
        }
    }
}

impl Settings {
    /// Defaults, then `content-checker.toml` if present, then `CONTENT_CHECKER_*`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false))
    }

    /// Same layering with an explicit settings file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();

        Config::builder()
            .set_default("content_dir", defaults.content_dir.to_string_lossy().into_owned())?
            .set_default("max_errors", defaults.max_errors)?
            .set_default("skip_broken", defaults.skip_broken)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn error_limit(&self) -> Option<usize> {
        usize::try_from(self.max_errors).ok()
    }
}
