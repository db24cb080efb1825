// Tue Jan 13 2026 - Alex

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::time::Instant;

const CRATE_TARGET: &str = "sdk_layout_generator";

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the level-tagged stderr logger. A set `RUST_LOG` takes
    /// precedence and hands control to `env_logger`.
    pub fn init(level: LevelFilter, use_color: bool) {
        if std::env::var_os("RUST_LOG").is_some() {
            init_from_env();
            return;
        }
        Self::init_logger(level, use_color);
    }

    pub fn init_logger(level: LevelFilter, use_color: bool) {
        let logger = Box::new(ColoredLogger::new(level, use_color));
        log::set_boxed_logger(logger).ok();
        log::set_max_level(level);
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn level_from_verbosity(verbosity: usize) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct ColoredLogger {
    level: LevelFilter,
    use_color: bool,
}

impl ColoredLogger {
    fn new(level: LevelFilter, use_color: bool) -> Self {
        Self { level, use_color }
    }

    fn format_level(&self, level: Level) -> String {
        if !self.use_color {
            return format!("{:5}", level);
        }
        let tag = match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        };
        tag.to_string()
    }
}

/// `sdk_layout_generator::generator::package` -> `generator::package`
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(CRATE_TARGET)
        .map(|rest| rest.trim_start_matches("::"))
        .unwrap_or(target)
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let target = short_target(record.target());
        let target = if target.is_empty() {
            String::new()
        } else if self.use_color {
            format!("[{}]", target).dimmed().to_string()
        } else {
            format!("[{}]", target)
        };
        eprintln!("{} {} {}", self.format_level(record.level()), target, record.args());
    }

    fn flush(&self) {}
}

/// Logs the wall time of a named phase at debug level when dropped.
pub struct ScopedTimer {
    name: String,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        log::debug!("[TIMER] {} started", name);
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        log::debug!("[TIMER] {} took {:.2}ms", self.name, elapsed.as_secs_f64() * 1000.0);
    }
}

pub fn init_from_env() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
