//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the tracker, the CLI
//! and any log consumer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Tracked entities
pub const FIELD_ITEM: &str = "item";
pub const FIELD_TAG: &str = "tag";
pub const FIELD_GENERATION: &str = "generation";

// Collection sizes
pub const FIELD_SNAPSHOT_LEN: &str = "snapshot_len";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_ADDED: &str = "added";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_ITEM: &str = "err_item";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Notification event names
pub const EVENT_NOTIFY_ADDED: &str = "notify_added";
pub const EVENT_NOTIFY_REMOVED: &str = "notify_removed";
