// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::defs;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_mount_program")]
    pub mount_program: String,
    #[serde(default = "default_umount_program")]
    pub umount_program: String,
    #[serde(default)]
    pub verbose: bool,
}

fn default_log_file() -> PathBuf {
    PathBuf::from(defs::LOG_FILE)
}

fn default_mount_program() -> String {
    defs::MOUNT_PROGRAM.to_string()
}

fn default_umount_program() -> String {
    defs::UMOUNT_PROGRAM.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            mount_program: default_mount_program(),
            umount_program: default_umount_program(),
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).context("failed to read config file")?;

        let config: Config = toml::from_str(&content).context("failed to parse config file")?;

        Ok(config)
    }

    /// Loads `path`, or the default location when `path` is `None`. Only a
    /// missing default file yields the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path).with_context(|| {
                format!("Failed to load config from custom path: {}", path.display())
            });
        }

        match Self::from_file(defs::CONFIG_FILE) {
            Ok(config) => Ok(config),
            Err(e) => {
                let is_not_found = e
                    .root_cause()
                    .downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);

                if is_not_found {
                    Ok(Self::default())
                } else {
                    Err(e).context(format!(
                        "Failed to load default config from {}",
                        defs::CONFIG_FILE
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_file, Path::new(defs::LOG_FILE));
        assert_eq!(config.mount_program, "mount");
        assert_eq!(config.umount_program, "umount");
    }

    #[test]
    fn partial_override() {
        let config: Config =
            toml::from_str("mount_program = \"/usr/bin/mount\"\nverbose = true\n").unwrap();
        assert_eq!(config.mount_program, "/usr/bin/mount");
        assert!(config.verbose);
        assert_eq!(config.umount_program, "umount");
    }

    #[test]
    fn custom_path_must_exist() {
        let missing = std::env::temp_dir().join("cifs-volumedriver-missing.toml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(format!("{:#}", err).contains("custom path"));
    }

    #[test]
    fn custom_path_is_read() {
        let path =
            std::env::temp_dir().join(format!("cifs-volumedriver-{}.toml", std::process::id()));
        fs::write(&path, "umount_program = \"/bin/umount\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.umount_program, "/bin/umount");
    }
}
