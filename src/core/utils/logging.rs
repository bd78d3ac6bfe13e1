//! Console logging macros
//!
//! On wasm32 the message goes to the browser console through `web_sys`.
//! Native builds (tests, embedding) format nothing and print nothing, but the
//! arguments are still type-checked so both targets see the same call sites.
//!
//! Usage:
//! ```rust
//! use kinema_engine::console_log;
//!
//! let bodies = 3;
//! console_log!("scene loaded: {} bodies", bodies);
//! ```

/// Log an informational message.
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Log a warning (rejected edits, suspicious input).
#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_expand_natively_without_output() {
        let id = 7u32;
        console_log!("spawned body {}", id);
        console_warn!("rejected body {id}: {}", "mass must be positive");
    }
}
