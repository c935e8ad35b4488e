use std::sync::OnceLock;

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Stdout logger for the batch runner. Millisecond timestamps so runs
/// of different policies and levels can be compared for throughput.
pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn write(&self, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S%.3f");
        if let Some(prefix) = &self.prefix {
            println!("[{}][{}] {}", timestamp, prefix, message);
        } else {
            println!("[{}] {}", timestamp, message);
        }
    }
}

pub fn init(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger { prefix });
}

pub fn write(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.write(message);
    } else {
        // Usable before init, just without the timestamp.
        println!("{}", message);
    }
}

macro_rules! log {
    ($($arg:tt)*) => {
        crate::logger::write(&format!($($arg)*))
    };
}
pub(crate) use log;
