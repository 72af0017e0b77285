// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

// Driver files
pub const LOG_FILE: &str = "/var/log/kubernetes-cifs-volumedriver.log";
pub const CONFIG_FILE: &str = "/etc/kubernetes-cifs-volumedriver/config.toml";
pub const CONFIG_ENV: &str = "CIFS_VOLUMEDRIVER_CONFIG";

// Host utilities
pub const MOUNT_PROGRAM: &str = "mount";
pub const UMOUNT_PROGRAM: &str = "umount";
pub const CIFS_FS_TYPE: &str = "cifs";

// mount.cifs reads the password from here instead of argv
pub const PASSWORD_ENV: &str = "PASSWD";

// mount.cifs exit codes
pub const EXIT_PERMISSION_DENIED: i32 = 13;
pub const EXIT_IO_ERROR: i32 = 5;
pub const EXIT_MOUNT_FAILURE: i32 = 32;

pub const NODFS_OPTION: &str = "nodfs";
