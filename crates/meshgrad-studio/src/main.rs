mod args;
mod color;
mod export;
mod io;
mod new;
mod saved;

use std::process::ExitCode;

use clap::Parser;
use meshgrad_editor::config::EditorConfig;
use meshgrad_engine::logging::{LoggingConfig, init_logging};

use crate::args::{CliArguments, Command};

fn main() -> ExitCode {
    let args = CliArguments::parse();

    // Logging depends on the config, so config problems are reported after init.
    let config_path = args.config.clone().or_else(EditorConfig::default_path);
    let loaded = config_path.as_deref().map(EditorConfig::load_from).transpose();
    let config = match &loaded {
        Ok(config) => config.clone().unwrap_or_default(),
        Err(_) => EditorConfig::default(),
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::with_verbosity(args.verbosity)
    });
    if let Err(e) = &loaded {
        log::warn!("using default configuration: {e}");
    }

    match dispatch(&args.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: &Command, config: &EditorConfig) -> anyhow::Result<()> {
    match command {
        Command::New(cmd) => new::new(cmd),
        Command::Export(cmd) => export::export(cmd, config),
        Command::Saved(cmd) => saved::saved(cmd, config),
        Command::Color(cmd) => color::color(cmd),
    }
}
