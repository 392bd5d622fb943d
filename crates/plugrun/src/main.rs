// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! plugrun - load one WebAssembly code unit at run time and call its entry
//! operation.
//!
//! This is the binary entry point. Exit status is 0 when the entry operation
//! returns, 1 for configuration errors, and 2 when loading or invoking fails.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use plugrun_config::PlugrunConfig;

/// plugrun - load a WebAssembly code unit and call its entry operation.
#[derive(Parser, Debug)]
#[command(name = "plugrun", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory containing `<unit>.wasm`.
    #[arg(long, value_name = "PATH")]
    dir: Option<String>,

    /// Name of the unit to load, without extension.
    #[arg(long, value_name = "NAME")]
    unit: Option<String>,

    /// Zero-argument exported function to call.
    #[arg(long, value_name = "NAME")]
    entry: Option<String>,
}

impl Cli {
    /// Applies command-line overrides on top of the loaded configuration.
    fn apply(self, config: &mut PlugrunConfig) {
        if let Some(dir) = self.dir {
            config.unit.directory = dir;
        }
        if let Some(unit) = self.unit {
            config.unit.name = unit;
        }
        if let Some(entry) = self.entry {
            config.unit.entry = entry;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => plugrun_config::load_and_validate_path(path),
        None => plugrun_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            plugrun_config::render_errors(&errors);
            return ExitCode::from(1);
        }
    };

    cli.apply(&mut config);
    if let Err(errors) = plugrun_config::validation::validate_config(&config) {
        plugrun_config::render_errors(&errors);
        return ExitCode::from(1);
    }

    run::init_tracing(&config.log.level);

    match run::run_unit(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            run::report(&e);
            ExitCode::from(2)
        }
    }
}
