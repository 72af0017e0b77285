// Copyright 2026 CIFS Volume Driver Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fmt as std_fmt,
    fs::{OpenOptions, create_dir_all},
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, FmtContext, FormatEvent, FormatFields},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

struct SimpleFormatter;

impl<S, N> FormatEvent<S, N> for SimpleFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        let level = *event.metadata().level();
        write!(
            writer,
            "{} [{}] ",
            Local::now().format("%Y/%m/%d %H:%M:%S"),
            level
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Appends driver logs to `log_path`. Keep the guard alive until exit so the
/// last lines get flushed.
pub fn init_logging(verbose: bool, log_path: &Path) -> Result<WorkerGuard> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;
    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid log directory"))?;
    create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .event_format(SimpleFormatter),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    let log_path_buf = log_path.to_path_buf();
    std::panic::set_hook(Box::new(move |info| {
        let msg = match info.payload().downcast_ref::<&str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => &s[..],
                None => "Box<Any>",
            },
        };

        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();

        let error_msg = format!("[ERROR] PANIC at {}: {}", location, msg);

        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path_buf)
        {
            let _ = writeln!(file, "{}", error_msg);
        }

        eprintln!("{}", error_msg);
    }));

    Ok(guard)
}
