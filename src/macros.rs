//! Small crate-wide convenience macros.

/// Log a formatted message to the browser console.
///
/// Compiled down to nothing in release builds so production bundles stay
/// quiet; the closure in the release arm keeps the arguments type-checked
/// without evaluating them.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(debug_assertions))]
        let _ = || format!($($arg)*);
    }};
}

/// Log an error to the browser console unconditionally.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        web_sys::console::error_1(&format!($($arg)*).into())
    };
}
