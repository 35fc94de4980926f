#![deny(missing_docs)]
//! Logging macros shared by every UI Forge crate.
//!
//! Everything goes through the `log` facade; the binary decides where the
//! records end up (see `uiforge_app`), tests use [`initialize_for_tests`].

/// Target for records emitted by generated fragment scripts (console calls
/// and execution failures), so they can be filtered apart from client logs.
pub const SCRIPT_TARGET: &str = "uiforge::script";

/// Trace-level record.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Debug-level record.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Info-level record.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Warn-level record.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level record.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Record at an explicit level under [`SCRIPT_TARGET`].
///
/// ```ignore
/// engine_script!(log::Level::Warn, "script #{} threw: {}", index, message);
/// ```
#[macro_export]
macro_rules! engine_script {
    ($level:expr, $($arg:tt)*) => {{
        log::log!(target: $crate::SCRIPT_TARGET, $level, $($arg)*);
    }};
}

/// Installs a terminal logger for tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macros_expand_without_a_logger() {
        engine_trace!("trace {}", 1);
        engine_debug!("debug {}", 2);
        engine_info!("info {}", 3);
        engine_warn!("warn {}", 4);
        engine_error!("error {}", 5);
        engine_script!(log::Level::Info, "script {}", 6);
    }

    #[test]
    fn double_initialization_is_harmless() {
        initialize_for_tests();
        initialize_for_tests();
        log::info!("logger initialized twice");
    }
}
