//! Logging setup.
//!
//! The crate logs through the `log` facade. In the browser, [`init`] installs
//! a logger that forwards records to the developer console; native builds
//! (the CLI, tests) install `env_logger` instead.

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    pub(super) const MAX_LEVEL: LevelFilter = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record<'_>) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let message = JsValue::from_str(&format!("[gridview] {}", record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&message),
                Level::Warn => web_sys::console::warn_1(&message),
                Level::Info => web_sys::console::info_1(&message),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the console logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    if log::set_logger(&console::LOGGER).is_ok() {
        log::set_max_level(console::MAX_LEVEL);
    }
}

/// Install `env_logger` (honours `RUST_LOG`). Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
