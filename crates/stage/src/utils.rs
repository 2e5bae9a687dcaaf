//! Utility macros used internally by the stage crate.

/// Returns early with an error if a condition is not met.
///
/// Works like `assert!`, but returns `Err($error)` instead of panicking.
/// The error expression is only evaluated when the predicate fails.
///
/// ```ignore
/// ensure!(src.len() <= max_buffer, DecodeError::too_large_buffer(src.len(), max_buffer));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
