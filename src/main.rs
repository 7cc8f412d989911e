// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Definitions --> Command Dispatch
//!   Transform | Map | Env | Schemas | Inis
//! ```

use std::process::ExitCode;

use schemata::cli::global::GlobalOptions;
use schemata::cli::{self, Command};
use schemata::cmd::env::run_env_command;
use schemata::cmd::map::run_map_command;
use schemata::cmd::schemas::{run_inis_command, run_schemas_command};
use schemata::cmd::transform::run_transform_command;
use schemata::config::Definitions;
use schemata::config::loader::DefinitionLoader;
use schemata::logging::init_logging;
use schemata::logging::{LogConfig, LogFormat, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Prefix of environment variables that override definition keys.
const ENV_PREFIX: &str = "SCHEMATA";

fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(|level| LogLevel::new(level).ok())
        .unwrap_or_default();

    let file_level = global
        .file_log_level
        .and_then(|level| LogLevel::new(level).ok())
        .unwrap_or(LogLevel::TRACE);

    let file_format = if global.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .with_file_format(file_format)
        .build()
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Inis) => build_definition_loader(&cli.global)
            .map(|loader| run_inis_command(&loader.format_loaded_files())),
        Some(Command::Schemas) => {
            load_definitions(&cli.global).map(|definitions| run_schemas_command(&definitions))
        }
        Some(Command::Transform(args)) => load_definitions(&cli.global)
            .and_then(|definitions| run_transform_command(args, &definitions)),
        Some(Command::Map(args)) => load_definitions(&cli.global)
            .and_then(|definitions| run_map_command(args, &definitions)),
        Some(Command::Env(args)) => load_definitions(&cli.global)
            .and_then(|definitions| run_env_command(args, &definitions)),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_definition_loader(global: &GlobalOptions) -> schemata::error::Result<DefinitionLoader> {
    let mut loader = DefinitionLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(schemata::cli::global::DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);

    for (key, value) in &global.overrides {
        loader = loader.set(key, value.as_str())?;
    }
    Ok(loader)
}

fn load_definitions(global: &GlobalOptions) -> schemata::error::Result<Definitions> {
    let definitions = build_definition_loader(global)?.build()?;
    Ok(definitions)
}
