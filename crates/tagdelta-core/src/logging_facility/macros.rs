//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use tagdelta_core::log_op_start;
/// log_op_start!("tracker_step");
/// log_op_start!("tracker_step", generation = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use tagdelta_core::log_op_end;
/// log_op_end!("tracker_step", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError).
/// The item the error refers to, if any, is recorded as `err_item`.
///
/// # Example
///
/// ```
/// # use tagdelta_core::{log_op_error, errors::DeltaError};
/// let err = DeltaError::LockPoisoned;
/// log_op_error!("tracker_step", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_item = ex_err.item(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            err_item = ex_err.item(),
            $($field)*
        );
    }};
}

/// Log one listener notification at debug level
///
/// Records the association's item and tag name (absent for untagged items)
/// together with the generation the notification belongs to.
///
/// # Example
///
/// ```
/// # use tagdelta_core::log_notify;
/// # use tagdelta_core::core_types::schema::EVENT_NOTIFY_ADDED;
/// use tagdelta_core::model::Association;
///
/// let association = Association::tagged("src/lib.rs", "git");
/// log_notify!(EVENT_NOTIFY_ADDED, association, generation = 1u64);
/// ```
#[macro_export]
macro_rules! log_notify {
    ($event:expr, $association:expr, generation = $generation:expr) => {{
        let association: &$crate::model::Association = &$association;
        tracing::debug!(
            component = module_path!(),
            event = $event,
            item = %association.item,
            tag = association.tag.as_ref().map($crate::model::TagName::as_str),
            generation = $generation,
        );
    }};
}
