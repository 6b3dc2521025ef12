use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}: {}", record.level(), record.target(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the browser console.
///
/// `filter` is a level name (`"debug"`, `"warn"`, ...); anything else means
/// `info`. Repeated calls only adjust the level.
pub fn init_console_logging(filter: Option<&str>) {
    let level = filter.and_then(|f| f.parse::<LevelFilter>().ok()).unwrap_or(LevelFilter::Info);
    // Errors once a logger is installed; later calls only set the level.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
