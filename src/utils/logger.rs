//! Logger utility for application-wide logging
//!
//! This module provides a file-backed logger that works alongside the
//! standard log crate. The same type doubles as a plain run-report writer
//! that commands use to record what they produced.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

use crate::haar::topology::Topology;

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output, `None` when reporting is disabled
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Creates a logger that discards every message
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs how many features each topology contributed to a result
    ///
    /// # Arguments
    ///
    /// * `types` - Topology of every feature, aligned with the result
    pub fn log_feature_summary(&self, types: &[Topology]) -> io::Result<()> {
        self.log(&format!("Features: {}", types.len()))?;

        let mut start = 0;
        while start < types.len() {
            let topology = types[start];
            let run = types[start..].iter().take_while(|t| **t == topology).count();
            self.log(&format!("  {}: {} (indices {}..{})", topology, run, start, start + run))?;
            start += run;
        }

        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?;

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Mirror to stderr, stdout may carry feature output
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}
