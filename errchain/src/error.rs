//! AppError and AppFailure, the two managed error variants

use crate::ErrorKind;
use std::collections::BTreeMap;
use std::fmt;

/// Keyed detail data attached to an error.
pub type Details = BTreeMap<String, String>;

/// Code given to foreign errors boxed at the [`Outcome`](crate::Outcome) boundary.
pub const UNEXPECTED_FAILURE_CODE: &str = "unexpected_failure";

/// Status given to foreign errors boxed at the [`Outcome`](crate::Outcome) boundary.
pub const UNEXPECTED_FAILURE_STATUS: i32 = 500;

// =============================================================================
// Construction options
// =============================================================================

/// A single configuration step applied while an error is constructed.
///
/// Options are applied in the order given, so a later option that writes the
/// same detail key wins.
pub enum ErrorOption {
    /// Set the underlying cause
    Cause(anyhow::Error),
    /// Set one detail entry
    Detail(String, String),
    /// Merge a batch of detail entries
    Details(Details),
}

/// Attach an underlying cause that can be walked with `source()` later
pub fn with_cause(err: impl Into<anyhow::Error>) -> ErrorOption {
    ErrorOption::Cause(err.into())
}

/// Set a single detail entry, overwriting an existing key
pub fn with_detail(key: impl Into<String>, value: impl Into<String>) -> ErrorOption {
    ErrorOption::Detail(key.into(), value.into())
}

/// Merge several detail entries. An empty batch is a no-op.
pub fn with_details<I, K, V>(details: I) -> ErrorOption
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    ErrorOption::Details(collect_details(details))
}

fn collect_details<I, K, V>(details: I) -> Details
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    details
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

// =============================================================================
// Shared record
// =============================================================================

struct ErrorRecord {
    message: String,
    code: String,
    status: i32,
    details: Details,
    cause: Option<anyhow::Error>,
    kind: ErrorKind,
}

impl ErrorRecord {
    fn new(kind: ErrorKind, message: String, code: String, status: i32) -> Self {
        Self {
            message,
            code,
            status,
            details: Details::new(),
            cause: None,
            kind,
        }
    }

    fn apply_all(&mut self, options: impl IntoIterator<Item = ErrorOption>) {
        for option in options {
            match option {
                ErrorOption::Cause(cause) => self.cause = Some(cause),
                ErrorOption::Detail(key, value) => {
                    self.details.insert(key, value);
                }
                ErrorOption::Details(details) => self.details.extend(details),
            }
        }
    }

    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| &**e as &(dyn std::error::Error + 'static))
    }
}

// =============================================================================
// Display - the single rendering rule shared by both variants
// =============================================================================

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // status 0 is indistinguishable from "unset"
        match (self.code.is_empty(), self.status) {
            (false, 0) => write!(f, "{} (code={})", self.message, self.code),
            (false, status) => write!(
                f,
                "{} (code={} status={})",
                self.message, self.code, status
            ),
            (true, 0) => write!(f, "{}", self.message),
            (true, status) => write!(f, "{} (status={})", self.message, status),
        }
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self, self.kind)?;

        if !self.details.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Details:")?;
            for (key, value) in &self.details {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(cause) = &self.cause {
            writeln!(f)?;
            writeln!(f, "    Cause: {:?}", cause)?;
        }

        Ok(())
    }
}

// =============================================================================
// AppError
// =============================================================================

/// An expected error, such as a failed validation or a missing record.
///
/// # Example
///
/// ```rust
/// use errchain::{new_error, with_detail, ErrorKind};
///
/// let mut err = new_error("bad input", "E1", 400, [with_detail("field", "name")]);
/// err.add_detail("reason", "empty");
///
/// assert_eq!(err.kind(), ErrorKind::Error);
/// assert_eq!(err.to_string(), "bad input (code=E1 status=400)");
/// assert_eq!(err.details()["reason"], "empty");
/// ```
pub struct AppError {
    record: ErrorRecord,
}

/// Build a new AppError and apply `options` in order
pub fn new_error(
    message: impl Into<String>,
    code: impl Into<String>,
    status: i32,
    options: impl IntoIterator<Item = ErrorOption>,
) -> AppError {
    AppError::new(message, code, status).with_options(options)
}

impl AppError {
    /// Create a new error with the given message, code and status
    pub fn new(message: impl Into<String>, code: impl Into<String>, status: i32) -> Self {
        Self {
            record: ErrorRecord::new(ErrorKind::Error, message.into(), code.into(), status),
        }
    }

    /// Apply construction options in order
    pub fn with_options(mut self, options: impl IntoIterator<Item = ErrorOption>) -> Self {
        self.record.apply_all(options);
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the message
    pub fn message(&self) -> &str {
        &self.record.message
    }

    /// Get the code, empty when unset
    pub fn code(&self) -> &str {
        &self.record.code
    }

    /// Get the status, 0 when unset
    pub fn status(&self) -> i32 {
        self.record.status
    }

    /// Get a copy of the details.
    ///
    /// Every call returns a fresh map; mutating it never reaches the error.
    pub fn details(&self) -> Details {
        self.record.details.clone()
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.record.kind
    }

    /// Get the cause (if any)
    pub fn cause_ref(&self) -> Option<&anyhow::Error> {
        self.record.cause.as_ref()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    /// Set the cause
    pub fn with_cause(self, cause: impl Into<anyhow::Error>) -> Self {
        self.with_options([with_cause(cause)])
    }

    /// Add a detail entry
    pub fn with_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_options([with_detail(key, value)])
    }

    /// Merge detail entries
    pub fn with_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_options([with_details(details)])
    }

    // =========================================================================
    // In-place augmentation
    // =========================================================================

    /// Add a detail entry in place
    pub fn add_detail(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.record.apply_all([with_detail(key, value)]);
        self
    }

    /// Merge detail entries in place
    pub fn add_details<I, K, V>(&mut self, details: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.record.apply_all([with_details(details)]);
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppError: {:?}", self.record)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.record.source()
    }
}

// =============================================================================
// AppFailure
// =============================================================================

/// An unexpected failure, such as an infrastructure fault.
///
/// Also the adapter type for foreign errors that are not part of this
/// error model; see [`AppFailure::unexpected`].
pub struct AppFailure {
    record: ErrorRecord,
}

/// Build a new AppFailure and apply `options` in order
pub fn new_failure(
    message: impl Into<String>,
    code: impl Into<String>,
    status: i32,
    options: impl IntoIterator<Item = ErrorOption>,
) -> AppFailure {
    AppFailure::new(message, code, status).with_options(options)
}

impl AppFailure {
    /// Create a new failure with the given message, code and status
    pub fn new(message: impl Into<String>, code: impl Into<String>, status: i32) -> Self {
        Self {
            record: ErrorRecord::new(ErrorKind::Failure, message.into(), code.into(), status),
        }
    }

    /// Box a foreign error as an unexpected failure.
    ///
    /// The message is the foreign error's rendering, the code is
    /// [`UNEXPECTED_FAILURE_CODE`], the status is [`UNEXPECTED_FAILURE_STATUS`]
    /// and the foreign error becomes the cause.
    pub fn unexpected(cause: impl Into<anyhow::Error>) -> Self {
        let cause = cause.into();
        Self::new(
            cause.to_string(),
            UNEXPECTED_FAILURE_CODE,
            UNEXPECTED_FAILURE_STATUS,
        )
        .with_cause(cause)
    }

    /// Apply construction options in order
    pub fn with_options(mut self, options: impl IntoIterator<Item = ErrorOption>) -> Self {
        self.record.apply_all(options);
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn message(&self) -> &str {
        &self.record.message
    }

    pub fn code(&self) -> &str {
        &self.record.code
    }

    pub fn status(&self) -> i32 {
        self.record.status
    }

    /// Get a fresh copy of the details
    pub fn details(&self) -> Details {
        self.record.details.clone()
    }

    pub fn kind(&self) -> ErrorKind {
        self.record.kind
    }

    pub fn cause_ref(&self) -> Option<&anyhow::Error> {
        self.record.cause.as_ref()
    }

    // =========================================================================
    // Builders (chainable)
    // =========================================================================

    pub fn with_cause(self, cause: impl Into<anyhow::Error>) -> Self {
        self.with_options([with_cause(cause)])
    }

    pub fn with_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_options([with_detail(key, value)])
    }

    pub fn with_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_options([with_details(details)])
    }

    // =========================================================================
    // In-place augmentation
    // =========================================================================

    pub fn add_detail(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.record.apply_all([with_detail(key, value)]);
        self
    }

    pub fn add_details<I, K, V>(&mut self, details: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.record.apply_all([with_details(details)]);
        self
    }
}

impl fmt::Display for AppFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.record, f)
    }
}

impl fmt::Debug for AppFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppFailure: {:?}", self.record)
    }
}

impl std::error::Error for AppFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.record.source()
    }
}

// =============================================================================
// Augmentation on a possibly-absent error
// =============================================================================

/// Detail augmentation on an error that may be absent.
///
/// `None` stays `None`; nothing is added and nothing panics.
pub trait OptionalDetails: Sized {
    /// Add a detail entry if the error is present
    fn add_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self;

    /// Merge detail entries if the error is present
    fn add_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>;
}

impl OptionalDetails for Option<AppError> {
    fn add_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|e| e.with_detail(key, value))
    }

    fn add_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|e| e.with_details(details))
    }
}

impl OptionalDetails for Option<&mut AppError> {
    fn add_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|e| e.add_detail(key, value))
    }

    fn add_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|e| e.add_details(details))
    }
}

impl OptionalDetails for Option<AppFailure> {
    fn add_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|f| f.with_detail(key, value))
    }

    fn add_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|f| f.with_details(details))
    }
}

impl OptionalDetails for Option<&mut AppFailure> {
    fn add_detail(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.map(|f| f.add_detail(key, value))
    }

    fn add_details<I, K, V>(self, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|f| f.add_details(details))
    }
}
