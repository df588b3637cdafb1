use thiserror::Error;

/// Result type alias using DeltaError
pub type Result<T> = std::result::Result<T, DeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    DuplicateMapping,
    MissingMapping,

    // Collaborators
    ExternalService,

    // Integration
    Serialization,
    Concurrency,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::DuplicateMapping => "ERR_DUPLICATE_MAPPING",
            ExErrorKind::MissingMapping => "ERR_MISSING_MAPPING",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, item, tag) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    item: Option<String>,
    tag: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            item: None,
            tag: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add item context
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Add tag context
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(item) = &self.item {
            write!(f, " (item: {})", item)?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " (tag: {})", tag)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for tagdelta operations
///
/// Tag resolution failure is deliberately absent: an unresolvable tag is a
/// normal outcome and is forwarded to listeners as `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    // ===== Snapshot Errors =====
    /// An item was paired with two different tags in one snapshot
    #[error("Item {item} has conflicting tags in one snapshot: {first} vs {second}")]
    ConflictingTags {
        item: String,
        first: String,
        second: String,
    },

    // ===== Mirror Errors =====
    /// An addition arrived for an item that is already mirrored
    #[error("Mirror already holds item {item}")]
    MirrorConflict { item: String },

    /// A removal arrived for an item that is not mirrored
    #[error("Mirror does not hold item {item}")]
    MirrorMissing { item: String },

    // ===== Listener Errors =====
    /// A notification sink refused a notification
    #[error("Listener rejected {op} for item {item}: {reason}")]
    ListenerRejected {
        op: String,
        item: String,
        reason: String,
    },

    // ===== Concurrency Errors =====
    /// A previous holder of the tracker lock panicked mid-step
    #[error("Tracker lock poisoned")]
    LockPoisoned,

    // ===== Configuration Errors =====
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from DeltaError to the canonical ExError facility
impl From<DeltaError> for ExError {
    fn from(err: DeltaError) -> Self {
        match err {
            DeltaError::ConflictingTags {
                item,
                first,
                second,
            } => ExError::new(ExErrorKind::DuplicateMapping)
                .with_op("build_snapshot")
                .with_item(item)
                .with_tag(second)
                .with_message(format!("Item already tagged {}", first)),

            DeltaError::MirrorConflict { item } => ExError::new(ExErrorKind::DuplicateMapping)
                .with_op("mirror_add")
                .with_item(item)
                .with_message("Item is already mirrored"),

            DeltaError::MirrorMissing { item } => ExError::new(ExErrorKind::MissingMapping)
                .with_op("mirror_remove")
                .with_item(item)
                .with_message("Item is not mirrored"),

            DeltaError::ListenerRejected { op, item, reason } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op(op)
                    .with_item(item)
                    .with_message(reason)
            }

            DeltaError::LockPoisoned => ExError::new(ExErrorKind::Concurrency)
                .with_op("tracker_step")
                .with_message("Tracker lock poisoned"),

            DeltaError::InvalidConfig { reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(reason),

            DeltaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            DeltaError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for DeltaError {
    fn from(err: serde_json::Error) -> Self {
        DeltaError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DeltaError {
    fn from(err: toml::de::Error) -> Self {
        DeltaError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
