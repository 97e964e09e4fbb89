//! stupidterm - a stupid terminal
//!
//! One GTK4 window around a VTE terminal widget:
//! - INI configuration merged with command-line flags
//! - window-manager requests from the child forwarded to the window
//! - URL matching with a configurable opener
//! - the child's exit status becomes the process exit code

pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod terminal;
pub mod window;

pub use cli::Cli;
pub use command::Launch;
pub use config::{Config, Palette, UrlMatch};
pub use error::{ConfigError, TerminalError, TerminalResult};
