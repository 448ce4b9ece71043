//! The ChainableError sum type and its capability trait

use crate::{AppError, AppFailure, Details, ErrorKind};

/// The capability set shared by every managed error.
pub trait ErrorInfo: std::error::Error {
    /// Human-readable message
    fn message(&self) -> &str;

    /// Machine-readable code, empty when unset
    fn code(&self) -> &str;

    /// Status, 0 when unset
    fn status(&self) -> i32;

    /// A fresh copy of the detail entries
    fn details(&self) -> Details;

    /// Expected error or unexpected failure
    fn kind(&self) -> ErrorKind;

    /// The underlying cause (if any)
    fn cause_ref(&self) -> Option<&anyhow::Error>;
}

impl ErrorInfo for AppError {
    fn message(&self) -> &str {
        AppError::message(self)
    }

    fn code(&self) -> &str {
        AppError::code(self)
    }

    fn status(&self) -> i32 {
        AppError::status(self)
    }

    fn details(&self) -> Details {
        AppError::details(self)
    }

    fn kind(&self) -> ErrorKind {
        AppError::kind(self)
    }

    fn cause_ref(&self) -> Option<&anyhow::Error> {
        AppError::cause_ref(self)
    }
}

impl ErrorInfo for AppFailure {
    fn message(&self) -> &str {
        AppFailure::message(self)
    }

    fn code(&self) -> &str {
        AppFailure::code(self)
    }

    fn status(&self) -> i32 {
        AppFailure::status(self)
    }

    fn details(&self) -> Details {
        AppFailure::details(self)
    }

    fn kind(&self) -> ErrorKind {
        AppFailure::kind(self)
    }

    fn cause_ref(&self) -> Option<&anyhow::Error> {
        AppFailure::cause_ref(self)
    }
}

/// A managed error carried by an [`Outcome`](crate::Outcome).
///
/// Recovery operators match on the variant, so an `on_error` handler never
/// sees a failure and an `on_fail` handler never sees an expected error.
#[derive(Debug, thiserror::Error)]
pub enum ChainableError {
    /// An expected error
    #[error(transparent)]
    Error(#[from] AppError),

    /// An unexpected failure
    #[error(transparent)]
    Failure(#[from] AppFailure),
}

impl ChainableError {
    /// Adapt any error into the model.
    ///
    /// An error that already is managed (a `ChainableError`, `AppError` or
    /// `AppFailure`) at the top level is taken as it is. Anything else,
    /// including a managed error wrapped in context, is boxed with
    /// [`AppFailure::unexpected`] so the whole chain survives as the cause.
    pub fn from_foreign(err: impl Into<anyhow::Error>) -> Self {
        let err = match take_top_level::<ChainableError>(err.into()) {
            Ok(managed) => return managed,
            Err(err) => err,
        };
        let err = match take_top_level::<AppError>(err) {
            Ok(app_err) => return app_err.into(),
            Err(err) => err,
        };
        match take_top_level::<AppFailure>(err) {
            Ok(failure) => failure.into(),
            Err(err) => Self::unexpected(err),
        }
    }

    /// Adapt a boxed trait-object error the same way as [`ChainableError::from_foreign`]
    pub fn from_boxed(err: Box<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        let err = match err.downcast::<ChainableError>() {
            Ok(managed) => return *managed,
            Err(err) => err,
        };
        let err = match err.downcast::<AppError>() {
            Ok(app_err) => return (*app_err).into(),
            Err(err) => err,
        };
        match err.downcast::<AppFailure>() {
            Ok(failure) => (*failure).into(),
            Err(err) => Self::unexpected(anyhow::anyhow!(err)),
        }
    }

    fn unexpected(err: anyhow::Error) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(error = %err, "boxing foreign error as unexpected failure");
        AppFailure::unexpected(err).into()
    }

    /// Check if this is an expected error
    pub fn is_error(&self) -> bool {
        matches!(self, ChainableError::Error(_))
    }

    /// Check if this is an unexpected failure
    pub fn is_failure(&self) -> bool {
        matches!(self, ChainableError::Failure(_))
    }

    /// Borrow the expected error, if that is the variant held
    pub fn as_error(&self) -> Option<&AppError> {
        match self {
            ChainableError::Error(err) => Some(err),
            ChainableError::Failure(_) => None,
        }
    }

    /// Borrow the unexpected failure, if that is the variant held
    pub fn as_failure(&self) -> Option<&AppFailure> {
        match self {
            ChainableError::Failure(failure) => Some(failure),
            ChainableError::Error(_) => None,
        }
    }

    /// Take the expected error, if that is the variant held
    pub fn into_error(self) -> Option<AppError> {
        match self {
            ChainableError::Error(err) => Some(err),
            ChainableError::Failure(_) => None,
        }
    }

    /// Take the unexpected failure, if that is the variant held
    pub fn into_failure(self) -> Option<AppFailure> {
        match self {
            ChainableError::Failure(failure) => Some(failure),
            ChainableError::Error(_) => None,
        }
    }

    fn info(&self) -> &dyn ErrorInfo {
        match self {
            ChainableError::Error(err) => err,
            ChainableError::Failure(failure) => failure,
        }
    }
}

impl ErrorInfo for ChainableError {
    fn message(&self) -> &str {
        self.info().message()
    }

    fn code(&self) -> &str {
        self.info().code()
    }

    fn status(&self) -> i32 {
        self.info().status()
    }

    fn details(&self) -> Details {
        self.info().details()
    }

    fn kind(&self) -> ErrorKind {
        self.info().kind()
    }

    fn cause_ref(&self) -> Option<&anyhow::Error> {
        self.info().cause_ref()
    }
}

/// Downcast only when `E` is the outermost error.
///
/// `anyhow::Error::downcast` also matches through context layers.
fn take_top_level<E>(err: anyhow::Error) -> std::result::Result<E, anyhow::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    if (*err).is::<E>() {
        err.downcast::<E>()
    } else {
        Err(err)
    }
}
