// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    io::{self, Read},
    os::unix::process::ExitStatusExt,
    process::{ExitStatus, Stdio},
};

use crate::{
    defs,
    driver::{DriverError, ExternalCommand},
};

pub trait CommandRunner {
    fn run(&self, cmd: &ExternalCommand) -> Result<(), DriverError>;
}

/// Runs commands on the host and waits for them, without a timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &ExternalCommand) -> Result<(), DriverError> {
        let (status, output) = run_combined(cmd)?;
        tracing::debug!("{} exited with {}", cmd.program, status);
        classify_exit(cmd, status, &output)
    }
}

// stdout and stderr share one pipe so the response keeps the utility's own ordering.
fn run_combined(cmd: &ExternalCommand) -> Result<(ExitStatus, String), DriverError> {
    let start_err = |source: io::Error| DriverError::Start {
        cmd: cmd.to_string(),
        source,
    };
    let wait_err = |source: io::Error| DriverError::Wait {
        cmd: cmd.to_string(),
        source,
    };

    let (mut reader, writer) = io::pipe().map_err(start_err)?;
    let mut child = {
        let mut command = cmd.to_command();
        command
            .stdin(Stdio::null())
            .stdout(writer.try_clone().map_err(start_err)?)
            .stderr(writer);
        command.spawn().map_err(start_err)?
    };

    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(wait_err)?;
    let status = child.wait().map_err(wait_err)?;

    Ok((status, String::from_utf8_lossy(&buf).into_owned()))
}

// Rendered as `exit status 13`, or `signal: 9` for a killed child.
fn describe_status(status: ExitStatus) -> String {
    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exit status {}", code),
        (None, Some(signal)) => format!("signal: {}", signal),
        (None, None) => status.to_string(),
    }
}

/// Maps the exit status of `cmd` to the failure the kubelet gets to see.
pub fn classify_exit(
    cmd: &ExternalCommand,
    status: ExitStatus,
    output: &str,
) -> Result<(), DriverError> {
    if status.success() {
        return Ok(());
    }

    let cmd_line = cmd.to_string();
    let output = output.to_string();
    let status_text = describe_status(status);

    Err(match status.code() {
        Some(defs::EXIT_PERMISSION_DENIED) => DriverError::PermissionDenied {
            cmd: cmd_line,
            output,
            status: status_text,
        },
        Some(defs::EXIT_IO_ERROR) if cmd.has_option(defs::NODFS_OPTION) => {
            DriverError::DfsWithNodfs {
                cmd: cmd_line,
                output,
                status: status_text,
            }
        }
        Some(defs::EXIT_MOUNT_FAILURE) => DriverError::CheckParameters {
            cmd: cmd_line,
            output,
            status: status_text,
        },
        _ => DriverError::CommandFailed {
            cmd: cmd_line,
            output,
            status: status_text,
        },
    })
}
