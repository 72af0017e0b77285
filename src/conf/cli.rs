// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand};

/// FlexVolume calling convention. The kubelet decides the verbs, so help and
/// version flags are switched off and unknown verbs are kept as-is. Only the
/// verb goes through the parser: operands are positional by contract and are
/// read straight from the argument vector.
#[derive(Parser, Debug)]
#[command(
    name = "cifs",
    about = "Kubernetes FlexVolume driver for CIFS/SMB shares",
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub operation: Operation,
}

impl Cli {
    /// Parses the program name and verb of `args`, ignoring everything after.
    pub fn parse_verb<S: AsRef<str>>(args: &[S]) -> Result<Operation, clap::Error> {
        let head = args.iter().take(2).map(|a| a.as_ref());
        Self::try_parse_from(head).map(|cli| cli.operation)
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Operation {
    #[command(disable_help_flag = true)]
    Init,
    /// mount <target-path> <json-args>
    #[command(disable_help_flag = true)]
    Mount,
    /// unmount <target-path>
    #[command(disable_help_flag = true)]
    Unmount,
    #[command(external_subcommand)]
    Unsupported(Vec<String>),
}
