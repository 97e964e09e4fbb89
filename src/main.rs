// src/main.rs
use clap::Parser;
use std::process::ExitCode;
use stupidterm::{app, Cli, Config};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Config problems are warnings; show them unless told otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli);

    ExitCode::from(app::run(config))
}
