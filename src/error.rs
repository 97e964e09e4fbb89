// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while reading the configuration file.
///
/// None of these are fatal: the loader reports them and carries on with
/// whatever it could read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Error opening '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: glib::Error,
    },

    #[error("Error parsing '{}': {source}", .path.display())]
    Value {
        path: PathBuf,
        #[source]
        source: glib::Error,
    },

    #[error("Error parsing '{}': section [{section}] must specify {key}", .path.display())]
    MissingKey {
        path: PathBuf,
        section: &'static str,
        key: String,
    },

    #[error("Error parsing '{}': invalid color '{value}'", .path.display())]
    InvalidColor { path: PathBuf, value: String },
}

/// Failures while bringing up the terminal and its child.
#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Error compiling regex '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: glib::Error,
    },

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: glib::Error,
    },

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid wait status {0}")]
    WaitStatus(i32),
}

pub type TerminalResult<T> = Result<T, TerminalError>;
