// SPDX-License-Identifier: MPL-2.0
use std::io;
use std::process::ExitCode;

use smartpos_settings::app::{self, cli, config, logging, paths};
use smartpos_settings::application::store::SettingsStore;

fn main() -> ExitCode {
    let args = match cli::parse_args(pico_args::Arguments::from_env()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n\n{}", cli::HELP);
            return ExitCode::from(2);
        }
    };

    paths::init_cli_overrides(args.data_dir.clone(), args.config_dir.clone());
    let (config, warning) = config::load();
    logging::init_logging(&config.logging);
    if let Some(key) = warning {
        tracing::warn!(%key, "using default host configuration");
    }

    let storage = match app::open_storage(&config) {
        Ok(storage) => storage,
        Err(err) => {
            tracing::error!(%err, "cannot open settings storage");
            eprintln!("{}", err.user_message());
            return ExitCode::FAILURE;
        }
    };
    let mut store = SettingsStore::open(storage);

    let stdout = io::stdout();
    match cli::run(args.command, &mut store, &config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, key = err.notification_key(), "command failed");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
