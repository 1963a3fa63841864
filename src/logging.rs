//! Logging backends
//!
//! `log` feature routes through the `log` facade, `esp32-log` prints with
//! `esp_println`. With neither enabled the macros expand to nothing but
//! still type-check their arguments.

macro_rules! emit {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
        #[cfg(all(feature = "esp32-log", not(feature = "log")))]
        ::esp_println::println!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "esp32-log")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => { $crate::logging::emit!(debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { $crate::logging::emit!(info, $($arg)*) };
}

macro_rules! warning {
    ($($arg:tt)*) => { $crate::logging::emit!(warn, $($arg)*) };
}

pub(crate) use {debug, emit, info, warning};
