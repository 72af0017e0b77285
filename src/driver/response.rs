// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Serialize;

use crate::driver::DriverError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Status {
    #[default]
    Success,
    Failure,
    #[serde(rename = "Not supported")]
    NotSupported,
}

/// What the driver can do beyond mount/unmount. All off for CIFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    #[serde(rename = "Attach")]
    pub attach: bool,
    #[serde(rename = "FSGroup")]
    pub fs_group: bool,
    #[serde(rename = "SupportsMetrics")]
    pub supports_metrics: bool,
}

/// Response printed to the kubelet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReturnMessage {
    #[serde(rename = "Status")]
    pub status: Status,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "Capabilities")]
    pub capabilities: Capabilities,
}

impl ReturnMessage {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failure,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn not_supported(operation: &str) -> Self {
        Self {
            status: Status::NotSupported,
            message: format!("Unsupported operation: {}", operation),
            ..Self::default()
        }
    }

    pub fn from_error(err: &DriverError) -> Self {
        if err.is_command_failure() {
            Self::failure(format!("Error: {}", err))
        } else {
            Self::failure(format!("Unexpected executing volume driver: {}", err))
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
