// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

use serde_json::Value;

struct Sandbox {
    dir: PathBuf,
}

impl Sandbox {
    fn new(name: &str, mount_program: &str) -> Self {
        let sandbox = Self::empty(name);
        sandbox.write_config(&format!(
            "log_file = \"{}\"\nmount_program = \"{}\"\n",
            sandbox.dir.join("driver.log").display(),
            mount_program
        ));
        sandbox
    }

    fn empty(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "cifs-volumedriver-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    fn write_config(&self, content: &str) {
        fs::write(self.dir.join("config.toml"), content).unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_cifs"))
            .args(args)
            .env("CIFS_VOLUMEDRIVER_CONFIG", self.dir.join("config.toml"))
            .output()
            .unwrap()
    }

    fn log(&self) -> String {
        fs::read_to_string(self.dir.join("driver.log")).unwrap_or_default()
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}

fn response(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn init() {
    let sandbox = Sandbox::new("init", "mount");
    let output = sandbox.run(&["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"Status":"Success","Message":"","Capabilities":{"Attach":false,"FSGroup":false,"SupportsMetrics":false}}"#
    );
    let log = sandbox.log();
    assert!(log.contains("Driver init"));
    assert!(log.contains(r#"{"Status":"Success""#));
}

#[test]
fn unsupported_operation() {
    let sandbox = Sandbox::new("unsupported", "mount");
    let output = sandbox.run(&["foo"]);
    assert_eq!(output.status.code(), Some(1));
    let ret = response(&output);
    assert_eq!(ret["Status"], "Not supported");
    assert_eq!(ret["Message"], "Unsupported operation: foo");
}

#[test]
fn insufficient_arguments() {
    let sandbox = Sandbox::new("insufficient", "mount");

    let ret = response(&sandbox.run(&[]));
    assert_eq!(ret["Status"], "Failure");
    assert_eq!(ret["Message"], "Insufficient arguments");

    let output = sandbox.run(&["mount"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        response(&output)["Message"],
        "Unexpected executing volume driver: Insufficient arguments"
    );
}

#[test]
fn failed_mount_keeps_password_out_of_log() {
    let sandbox = Sandbox::new("failed-mount", "false");
    let output = sandbox.run(&[
        "mount",
        "/mnt/x",
        r#"{"source":"//h/s","kubernetes.io/secret/username":"YWxpY2U=","kubernetes.io/secret/password":"czNjcjN0"}"#,
    ]);
    assert_eq!(output.status.code(), Some(1));

    let ret = response(&output);
    assert_eq!(ret["Status"], "Failure");
    let message = ret["Message"].as_str().unwrap();
    assert!(message.starts_with(
        "Error: Error running cmd [cmd=false -t cifs -o username=alice //h/s /mnt/x]"
    ));
    assert!(!message.contains("s3cr3t"));

    let log = sandbox.log();
    assert!(log.contains("false -t cifs -o username=alice //h/s /mnt/x"));
    assert!(!log.contains("s3cr3t"));
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let sandbox = Sandbox::empty("missing-config");
    let output = sandbox.run(&["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(response(&output)["Status"], "Success");
}

#[test]
fn unparsable_config_falls_back_to_defaults() {
    let sandbox = Sandbox::empty("bad-config");
    sandbox.write_config("log_file = [not toml");

    let output = sandbox.run(&["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(response(&output)["Status"], "Success");

    let output = sandbox.run(&["foo"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(response(&output)["Message"], "Unsupported operation: foo");
}

#[test]
fn unwritable_log_keeps_driver_running() {
    let sandbox = Sandbox::empty("unwritable-log");
    sandbox.write_config("log_file = \"/dev/null/cifs-volumedriver/driver.log\"\n");

    let output = sandbox.run(&["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"Status":"Success","Message":"","Capabilities":{"Attach":false,"FSGroup":false,"SupportsMetrics":false}}"#
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("WARNING: error opening log file"));

    let output = sandbox.run(&["unmount"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(response(&output)["Status"], "Failure");
}
