//! The config for Weir

use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::errors::WeirError;

/// The backend to keep ring state in
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Keep ring state in memory only
    #[default]
    Memory,
    /// Keep ring state in files on disk
    FileSystem,
}

/// Help serde set a default file system storage path
fn default_fs_path() -> PathBuf {
    PathBuf::from("/opt/weir/rings")
}

/// The settings for file system based storage
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileSystemStorage {
    /// Where to store ring state
    #[serde(default = "default_fs_path")]
    pub path: PathBuf,
}

impl Default for FileSystemStorage {
    fn default() -> Self {
        FileSystemStorage {
            path: default_fs_path(),
        }
    }
}

/// The storage settings for Weir
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Storage {
    /// The backend to store ring state in
    #[serde(default)]
    pub backend: Backend,
    /// The settings for file system based storage
    #[serde(default)]
    pub fs: FileSystemStorage,
}

/// The different levels to log tracing info at
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub enum TraceLevel {
    /// Log everything include high verbosity low priority info
    Trace,
    /// Log low priority debug infomation and up
    Debug,
    /// Log standard priority information and up
    #[default]
    Info,
    /// Log only warning and Errors
    Warn,
    /// Log only errors
    Error,
    /// Do not log anything
    Off,
}

impl TraceLevel {
    /// Convert this [`TraceLevel`] to a [`LevelFilter`]
    pub fn to_filter(&self) -> LevelFilter {
        match self {
            TraceLevel::Trace => LevelFilter::TRACE,
            TraceLevel::Debug => LevelFilter::DEBUG,
            TraceLevel::Info => LevelFilter::INFO,
            TraceLevel::Warn => LevelFilter::WARN,
            TraceLevel::Error => LevelFilter::ERROR,
            TraceLevel::Off => LevelFilter::OFF,
        }
    }
}

/// The tracing settings for Weir
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tracing {
    // The level to log traces at
    #[serde(default)]
    pub level: TraceLevel,
}

/// The config for running Weir
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Conf {
    /// The storage settings to use
    #[serde(default)]
    pub storage: Storage,
    /// The tracing settings to use
    #[serde(default)]
    pub tracing: Tracing,
}

impl Conf {
    /// Build a config from our environment and a config file
    ///
    /// Env vars look like `WEIR_TRACING__LEVEL=Debug`.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the config file to load if it exists
    pub fn new(path: &str) -> Result<Self, WeirError> {
        Self::with_env(path, Self::environment())
    }

    /// The env var source our config is overlaid with
    pub(crate) fn environment() -> Environment {
        Environment::with_prefix("weir")
            .prefix_separator("_")
            .separator("__")
    }

    /// Build a config from a config file and a specific env var source
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the config file to load if it exists
    /// * `env` - The env var source to overlay on top of our config file
    pub(crate) fn with_env(path: &str, env: Environment) -> Result<Self, WeirError> {
        // build our config sources
        let conf = Config::builder()
            // start with the settings in our config file
            .add_source(config::File::with_name(path).required(false))
            // overlay our env vars on top
            .add_source(env)
            .build()?;
        Ok(conf.try_deserialize()?)
    }
}
