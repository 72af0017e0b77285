// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod log;
pub mod process;

pub use self::{log::*, process::*};
