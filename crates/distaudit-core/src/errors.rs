use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Markup / validation
    /// The document could not be tokenized into tag/attribute/text events
    MalformedMarkup,
    /// Parsed `created` token disagrees with the identifier's date suffix
    DateMismatch,
    /// Identifier does not carry a `-YYYY-MM-DD.html` style date suffix
    InvalidIdentifier,
    /// A resource lacks one or more digests; tags the load warning, never raised
    MissingDigest,
    InvalidInput,
    NotFound,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedMarkup => "ERR_MALFORMED_MARKUP",
            ExErrorKind::DateMismatch => "ERR_DATE_MISMATCH",
            ExErrorKind::InvalidIdentifier => "ERR_INVALID_IDENTIFIER",
            ExErrorKind::MissingDigest => "ERR_MISSING_DIGEST",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the offending
/// snapshot identifier (or path) for reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    identifier: Option<String>,
    position: Option<u64>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            identifier: None,
            position: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the snapshot identifier (or filesystem path) the error concerns
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a byte position within the offending document
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the identifier context, if any
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Get the byte position, if any
    pub fn position(&self) -> Option<u64> {
        self.position
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(identifier) = &self.identifier {
            write!(f, " (identifier: {})", identifier)?;
        }
        if let Some(position) = self.position {
            write!(f, " (position: {})", position)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for audit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// Markup could not be tokenized
    #[error("Malformed markup at byte {position}: {message}")]
    MalformedMarkup { position: u64, message: String },

    /// The snapshot's creation token does not match its identifier
    #[error("Document date does not match file date: {identifier} (expected {expected}, found {found})")]
    DateMismatch {
        identifier: String,
        expected: String,
        found: String,
    },

    /// The identifier has no date suffix to validate against
    #[error("Identifier carries no date suffix: {identifier}")]
    InvalidIdentifier { identifier: String },

    /// Filesystem or stream failure
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON encoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from AuditError to ExError
impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::MalformedMarkup { position, message } => {
                ExError::new(ExErrorKind::MalformedMarkup)
                    .with_op("parse_snapshot")
                    .with_position(position)
                    .with_message(message)
            }

            AuditError::DateMismatch {
                identifier,
                expected,
                found,
            } => ExError::new(ExErrorKind::DateMismatch)
                .with_op("load_snapshot")
                .with_identifier(identifier)
                .with_message(format!(
                    "document date '{}' does not match file date '{}'",
                    found, expected
                )),

            AuditError::InvalidIdentifier { identifier } => {
                ExError::new(ExErrorKind::InvalidIdentifier)
                    .with_identifier(identifier)
                    .with_message("identifier carries no date suffix")
            }

            AuditError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_identifier(path)
                .with_message(message),

            AuditError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}
