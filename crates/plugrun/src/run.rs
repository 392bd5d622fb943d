// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The load-then-invoke pipeline behind `plugrun`.

use plugrun_config::PlugrunConfig;
use plugrun_core::PlugrunError;
use plugrun_invoker::{Console, Invoker};
use plugrun_loader::{EngineOptions, FsUnitSource, UnitLoader, build_engine};
use tracing::{error, info};

/// Loads the configured unit and calls its entry operation once.
pub fn run_unit(config: &PlugrunConfig) -> Result<(), PlugrunError> {
    let unit = &config.unit;
    info!(
        directory = %unit.directory,
        unit = %unit.name,
        entry = %unit.entry,
        "starting plugrun"
    );

    let engine = build_engine(&EngineOptions {
        backtrace_details: config.runtime.wasm_backtrace,
    })?;
    let mut loader = UnitLoader::with_engine(engine, FsUnitSource::new(&unit.directory));
    let definition = loader.load(&unit.name)?;

    let console = if config.runtime.inherit_stdio {
        Console::Inherit
    } else {
        let (console, _discarded) = Console::capture();
        console
    };
    Invoker::new(console).run(&definition, &unit.entry)?;

    info!(unit = %unit.name, entry = %unit.entry, "entry operation completed");
    Ok(())
}

/// Logs the failing stage and prints the full diagnostic report to stderr.
pub fn report(err: &PlugrunError) {
    use miette::{Diagnostic, GraphicalReportHandler};

    match err.stage() {
        Some(stage) => error!(%stage, "plugrun failed"),
        None => error!("plugrun failed"),
    }

    let mut buf = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut buf, err as &dyn Diagnostic)
        .is_ok()
    {
        eprint!("{buf}");
    } else {
        eprintln!("Error: {err}");
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `level`.
pub fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("plugrun={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugrun_test_utils::{UnitDir, units};

    fn config_for(dir: &UnitDir, name: &str, entry: &str) -> PlugrunConfig {
        let mut config = PlugrunConfig::default();
        config.unit.directory = dir.path().display().to_string();
        config.unit.name = name.to_string();
        config.unit.entry = entry.to_string();
        config.runtime.inherit_stdio = false;
        config
    }

    #[test]
    fn run_unit_succeeds_for_greeter() {
        let dir = UnitDir::new();
        dir.add_wat("Greeter", units::GREETER);
        assert!(run_unit(&config_for(&dir, "Greeter", "greet")).is_ok());
    }

    #[test]
    fn run_unit_reports_each_stage() {
        use plugrun_core::Stage;

        let dir = UnitDir::new();
        dir.add_wat("BadSig", units::BAD_SIG);
        dir.add_wat("BadStart", units::TRAPPING_START);
        dir.add_wat("Crashy", units::TRAPPING_ENTRY);

        let stage = |name: &str| {
            run_unit(&config_for(&dir, name, "greet"))
                .unwrap_err()
                .stage()
        };
        assert_eq!(stage("Missing"), Some(Stage::Load));
        assert_eq!(stage("BadStart"), Some(Stage::Construct));
        assert_eq!(stage("BadSig"), Some(Stage::Resolve));
        assert_eq!(stage("Crashy"), Some(Stage::Invoke));
    }
}
