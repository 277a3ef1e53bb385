// errors.rs - Typed errors for registration, dispatch, and engine layers

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling the option registry, registering tasks,
/// or resolving the run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Option '--{long}' of '{owner}' collides with an option already registered by '{existing_owner}'")]
    DuplicateOption {
        long: String,
        owner: String,
        existing_owner: String,
    },

    #[error("A task named '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors raised by a task handler while resolving inputs or delegating
/// to its recovery runner
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("The specified path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Errors raised by the recovery runners
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read input: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write CSV output: {path}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("Runner was not set up before run was called")]
    NotConfigured,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type TaskResult<T> = Result<T, TaskError>;
pub type EngineResult<T> = Result<T, EngineError>;
