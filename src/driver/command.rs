// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fmt, process::Command};

use crate::{
    defs,
    driver::{DriverError, MounterArgs},
};

/// One invocation of a host utility.
#[derive(Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    env: Vec<(String, String)>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn env_keys(&self) -> impl Iterator<Item = &str> {
        self.env.iter().map(|(k, _)| k.as_str())
    }

    /// Checks for `name` as a bare argument or inside any `-o` option list.
    pub fn has_option(&self, name: &str) -> bool {
        let mut in_options = false;
        for arg in &self.args {
            if arg == name || (in_options && arg.split(',').any(|o| o == name)) {
                return true;
            }
            in_options = arg == "-o";
        }
        false
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

// Environment values stay out of every rendering of the command.
impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalCommand")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &self.env_keys().collect::<Vec<_>>())
            .finish()
    }
}

fn trim_line_breaks(s: &str) -> &str {
    s.trim_matches(|c| c == '\n' || c == '\r')
}

/// Builds `mount -t cifs [-o opts] <source> <target>` from the kubelet request.
pub fn build_mount(
    program: &str,
    target: Option<&str>,
    json: Option<&str>,
) -> Result<ExternalCommand, DriverError> {
    let (Some(target), Some(json)) = (target, json) else {
        return Err(DriverError::InsufficientArguments);
    };

    let args = MounterArgs::decode(json)?;
    tracing::debug!(
        "Mount request for pod {}/{} ({}) volume {} [fsType={}] [serviceAccount={}] [passwdMethod={}]",
        args.pod_namespace,
        args.pod_name,
        args.pod_uid,
        args.pv_name,
        args.fs_type,
        args.service_account,
        args.passwd_method
    );
    let mut cmd = ExternalCommand::new(program);
    cmd.arg("-t").arg(defs::CIFS_FS_TYPE);

    let mut options = Vec::new();
    if let Some(group) = args.effective_fs_group() {
        options.push(format!("uid={},gid={}", group, group));
    }
    if !args.read_write.is_empty() {
        options.push(args.read_write.clone());
    }
    if !args.credential_domain.is_empty() {
        options.push(format!("domain={}", trim_line_breaks(&args.credential_domain)));
    }
    if !args.credential_user.is_empty() {
        options.push(format!("username={}", trim_line_breaks(&args.credential_user)));
    }
    if !args.credential_pass.is_empty() {
        cmd.env(
            defs::PASSWORD_ENV,
            trim_line_breaks(args.credential_pass.expose()),
        );
    }

    let extra = if !args.opts.is_empty() {
        &args.opts
    } else {
        &args.mount_options
    };
    if !extra.is_empty() {
        options.extend(extra.split(',').map(str::to_string));
    }

    if !options.is_empty() {
        cmd.arg("-o").arg(options.join(","));
    }

    if !args.server.is_empty() && !args.share.is_empty() {
        cmd.arg(format!("//{}{}", args.server, args.share));
    } else if !args.source.is_empty() {
        cmd.arg(args.source.as_str());
    } else {
        return Err(DriverError::InvalidMounterArgs);
    }

    cmd.arg(target);
    Ok(cmd)
}

pub fn build_unmount(program: &str, target: Option<&str>) -> Result<ExternalCommand, DriverError> {
    let target = target.ok_or(DriverError::InsufficientArguments)?;
    let mut cmd = ExternalCommand::new(program);
    cmd.arg(target);
    Ok(cmd)
}
