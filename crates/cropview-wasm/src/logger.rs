//! `log` backend that writes to the browser console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger (idempotent) and set the level.
pub(crate) fn install(level: LevelFilter) {
    // A second install only adjusts the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Parse a level name ("off", "error", "warn", "info", "debug", "trace").
pub(crate) fn level_from_str(value: &str) -> Option<LevelFilter> {
    value.trim().parse::<LevelFilter>().ok()
}

/// Set the engine's console log level.
///
/// # Example (TypeScript)
///
/// ```typescript
/// set_log_level('debug'); // show homing transitions and rejected gestures
/// ```
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level_from_str(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    install(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("debug"), Some(LevelFilter::Debug));
        assert_eq!(level_from_str(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(level_from_str("off"), Some(LevelFilter::Off));
        assert_eq!(level_from_str("loud"), None);
    }
}
