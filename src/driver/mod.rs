// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod args;
pub mod command;
pub mod error;
pub mod response;

pub use self::{
    args::MounterArgs,
    command::{ExternalCommand, build_mount, build_unmount},
    error::DriverError,
    response::ReturnMessage,
};
use crate::{
    conf::{
        cli::{Cli, Operation},
        config::Config,
    },
    utils::CommandRunner,
};

/// Handles one kubelet invocation. `args` is the full argument vector,
/// program name included. Every outcome ends up in the returned message.
pub fn driver_main(args: &[String], config: &Config, runner: &dyn CommandRunner) -> ReturnMessage {
    if args.len() < 2 {
        return ReturnMessage::failure(DriverError::InsufficientArguments.to_string());
    }

    let operation = match Cli::parse_verb(args) {
        Ok(operation) => operation,
        Err(e) => {
            tracing::debug!("Unrecognized invocation {:?}: {}", args[1], e.kind());
            return ReturnMessage::not_supported(&args[1]);
        }
    };

    // Operands sit at fixed positions: <target-path> then <json-args>.
    let target = args.get(2).map(String::as_str);
    let json = args.get(3).map(String::as_str);

    match operation {
        Operation::Init => {
            tracing::info!("Driver init");
            ReturnMessage::success()
        }
        Operation::Mount => execute(build_mount(&config.mount_program, target, json), runner),
        Operation::Unmount => execute(build_unmount(&config.umount_program, target), runner),
        Operation::Unsupported(_) => ReturnMessage::not_supported(&args[1]),
    }
}

fn execute(
    cmd: Result<ExternalCommand, DriverError>,
    runner: &dyn CommandRunner,
) -> ReturnMessage {
    let result = cmd.and_then(|cmd| {
        tracing::info!("{}", cmd);
        runner.run(&cmd)
    });

    match result {
        Ok(()) => ReturnMessage::success(),
        Err(e) => {
            tracing::error!("{}", e);
            ReturnMessage::from_error(&e)
        }
    }
}
