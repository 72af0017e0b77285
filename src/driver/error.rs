// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{io, string::FromUtf8Error};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Insufficient arguments")]
    InsufficientArguments,

    #[error("Invalid mounter arguments")]
    InvalidMounterArgs,

    #[error("Error interpreting mounter args: {0}")]
    MounterArgs(#[from] serde_json::Error),

    #[error("Error decoding credential {field}: {source}")]
    CredentialEncoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Error decoding credential {field}: {source}")]
    CredentialUtf8 {
        field: &'static str,
        #[source]
        source: FromUtf8Error,
    },

    #[error("Error start cmd [cmd={cmd}]: {source}")]
    Start {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("Error waiting for cmd to finish [cmd={cmd}]: {source}")]
    Wait {
        cmd: String,
        #[source]
        source: io::Error,
    },

    #[error("Permission denied for cmd [cmd={cmd}] [response={output}]: {status}")]
    PermissionDenied {
        cmd: String,
        output: String,
        status: String,
    },

    #[error("Cannot mount a DFS-Share with option nodfs [cmd={cmd}] [response={output}]: {status}")]
    DfsWithNodfs {
        cmd: String,
        output: String,
        status: String,
    },

    #[error("Could not mount volume. Check parameters [cmd={cmd}] [response={output}]: {status}")]
    CheckParameters {
        cmd: String,
        output: String,
        status: String,
    },

    #[error("Error running cmd [cmd={cmd}] [response={output}]: {status}")]
    CommandFailed {
        cmd: String,
        output: String,
        status: String,
    },
}

impl DriverError {
    /// True for failures raised while running the host utility, as opposed to
    /// failures while interpreting the kubelet request.
    pub fn is_command_failure(&self) -> bool {
        matches!(
            self,
            Self::Start { .. }
                | Self::Wait { .. }
                | Self::PermissionDenied { .. }
                | Self::DfsWithNodfs { .. }
                | Self::CheckParameters { .. }
                | Self::CommandFailed { .. }
        )
    }
}
