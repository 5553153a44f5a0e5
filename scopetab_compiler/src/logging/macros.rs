//! Logging macros. Context values are anything `Display`.
//!
//! ```ignore
//! log_warning!(code = codes::tokens::MALFORMED_TOKEN_LINE, "Skipping", "input_line" => 4);
//! log_error!(codes::references::UNDECLARED_REFERENCE, "Undeclared y", line = 7, "identifier" => "y");
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    ($($key:expr => $value:expr),*) => {
        vec![$(($key, format!("{}", $value))),*]
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code, $message, Some($line), $crate::__log_context!($($key => $value),*)
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code, $message, None, $crate::__log_context!($($key => $value),*)
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr, line = $line:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            Some($code), $message, Some($line), $crate::__log_context!($($key => $value),*)
        )
    };

    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            Some($code), $message, None, $crate::__log_context!($($key => $value),*)
        )
    };

    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_warning_with_context(
            None, $message, None, $crate::__log_context!($($key => $value),*)
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_success_with_context(
            $code, $message, $crate::__log_context!($($key => $value),*)
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_info_with_context($message, $crate::__log_context!($($key => $value),*))
    };
}

/// Context values are only formatted when a logger is installed
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::try_get_global_logger().is_some() {
            $crate::logging::log_debug_with_context(
                $message, $crate::__log_context!($($key => $value),*)
            )
        }
    };
}
