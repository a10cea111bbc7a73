//! `toggler` - run a single toggle over a file.
//!
//! # Usage
//!
//! ```bash
//! # Cycle the comment style around line 12
//! toggler comment-type src/lib.rs --cursor 12:1 --in-place
//!
//! # Turn a JSON block into a JavaScript object literal
//! toggler json-js-yaml config.ts --select 3:5-9:6
//! ```
//!
//! The toggled document is printed to stdout unless `--in-place` is given. Warnings and errors
//! are printed to stderr; an error leaves the file untouched and exits non-zero.

mod cli;
mod logging;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use toggler_core::{CommandExecutor, Settings, Severity, ToggleCommand};
use toggler_lang::LanguageRegistry;
use tracing::debug;

use crate::cli::CliArgs;

fn main() -> ExitCode {
    logging::init();
    match run(CliArgs::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<ExitCode> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let language = args.language_id();

    let settings = match &args.settings {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            Settings::from_json(&raw)
                .with_context(|| format!("invalid settings in {}", path.display()))?
        }
        None => Settings::default(),
    };

    let mut registry = LanguageRegistry::builtin();
    if let Some(path) = &args.language_config {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        registry.register_configuration_json(&language, &raw)?;
    }

    let mut executor = CommandExecutor::new(&text, language.as_str())
        .with_settings(settings)
        .with_language_source(registry)
        .with_tab_size(args.tab_size);
    executor.set_selections(args.selections());

    let command: ToggleCommand = args.toggle.into();
    debug!(%command, language = %language, file = %args.file.display(), "running toggle");
    let notifications = executor.execute_with_notifications(command);

    let mut failed = false;
    for notification in &notifications {
        match notification.severity {
            Severity::Error => {
                failed = true;
                eprintln!("error: {}", notification.message);
            }
            Severity::Warning => eprintln!("warning: {}", notification.message),
        }
    }
    if failed {
        return Ok(ExitCode::FAILURE);
    }

    if args.in_place {
        fs::write(&args.file, executor.text())
            .with_context(|| format!("failed to write {}", args.file.display()))?;
    } else {
        print!("{}", executor.text());
    }
    Ok(ExitCode::SUCCESS)
}
