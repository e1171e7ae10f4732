#[cfg(not(target_arch = "wasm32"))]
use log::LevelFilter;

/// Initialize logging for both the CLI and the browser build.
///
/// # Behavior
/// - **Native (CLI):** `Debug` if `debug_enabled`, else `Info`; `RUST_LOG` overrides both.
/// - **WASM:** logs to the browser console at `Debug` or `Info`.
///
/// Safe to call more than once; later calls leave the first logger in place.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let level = if debug_enabled { log::Level::Debug } else { log::Level::Info };

        match console_log::init_with_level(level) {
            Ok(()) => log::info!("Browser logger initialized at {level:?} level"),
            Err(e) => {
                let msg = format!("gridfill: console logging unavailable: {e}");
                web_sys::console::error_1(&msg.into());
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let level = if debug_enabled { LevelFilter::Debug } else { LevelFilter::Info };

        let mut builder = env_logger::Builder::new();
        builder
            .filter(None, level)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        if builder.try_init().is_ok() {
            log::debug!("Logger initialized at {level:?} level");
        }
    }
}
