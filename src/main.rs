// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later
mod conf;
mod defs;
mod driver;
mod utils;

use std::{
    panic::{self, AssertUnwindSafe},
    path::PathBuf,
    process::ExitCode,
};

use conf::config::Config;
use driver::ReturnMessage;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const FALLBACK_RESPONSE: &str =
    r#"{"Status":"Failure","Message":"Failed to encode driver response"}"#;

fn run_guarded(args: &[String], config: &Config) -> ReturnMessage {
    panic::catch_unwind(AssertUnwindSafe(|| {
        driver::driver_main(args, config, &utils::SystemRunner)
    }))
    .unwrap_or_else(|payload| {
        let cause = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        ReturnMessage::failure(format!("Unexpected executing volume driver: {}", cause))
    })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let config_path = std::env::var_os(defs::CONFIG_ENV).map(PathBuf::from);
    let (config, config_error) = match Config::load(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // The log never carries credentials.
    let _log_guard = match utils::init_logging(config.verbose, &config.log_file) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("WARNING: error opening log file: {:#}", e);
            None
        }
    };

    if let Some(e) = config_error {
        tracing::warn!("{:#}, continuing with defaults", e);
    }

    let ret = run_guarded(&args, &config);

    let json = ret.to_json().unwrap_or_else(|e| {
        tracing::error!("Failed to encode response: {}", e);
        FALLBACK_RESPONSE.to_string()
    });
    println!("{}", json);
    tracing::info!("{}", json);

    if ret.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
