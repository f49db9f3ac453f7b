use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::{Mutex, Once},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install the process-wide subscriber: console plus an appending log file.
///
/// Only the first call has any effect. `RUST_LOG` takes precedence over
/// `level`. If the log file cannot be opened, logging goes to the console only.
pub fn init(log_file: &Path, level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let file_layer = open_log_file(log_file).map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .with(file_layer)
            .try_init();

        info!("Logger initialized");
    });
}

fn open_log_file(log_file: &Path) -> Option<fs::File> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).ok()?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .ok()
}
