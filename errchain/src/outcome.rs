//! The chainable Outcome type

use crate::{AppError, AppFailure, ChainableError};

/// Either a success value or a managed error, never both.
///
/// Every operator consumes the receiver and returns a new `Outcome`; errors
/// pass through `then` and [`chain`] untouched until a recovery operator
/// whose variant matches replaces them.
///
/// # Example
///
/// ```rust
/// use errchain::{chain, AppError, Outcome};
///
/// fn parse(input: &str) -> Outcome<i64> {
///     Outcome::from_result(input.parse::<i64>())
/// }
///
/// let out = chain(parse("21").then(|v| Outcome::success(v * 2)), |v| {
///     Outcome::success(format!("answer={}", v))
/// });
/// assert_eq!(out.value().0, "answer=42");
///
/// let out = Outcome::<i64>::failure(AppError::new("missing", "E404", 404))
///     .on_fail(|_| Outcome::success(0))
///     .on_error(|_| Outcome::success(-1));
/// assert_eq!(out.value().0, -1);
/// ```
#[must_use]
#[derive(Debug)]
pub enum Outcome<T> {
    /// No error, holds the value
    Success(T),
    /// Holds a managed error
    Failure(ChainableError),
}

impl<T> Outcome<T> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a successful outcome
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    /// Create an errored outcome from a managed error
    pub fn failure(err: impl Into<ChainableError>) -> Self {
        Outcome::Failure(err.into())
    }

    /// Adapt a value and an optional foreign error.
    ///
    /// No error gives `success(value)`. A managed error is carried as is.
    /// Any other error is boxed as an [`AppFailure`] with code
    /// `unexpected_failure`, status 500 and the error as its cause; `value`
    /// is dropped.
    pub fn from_parts<E>(value: T, err: Option<E>) -> Self
    where
        E: Into<anyhow::Error>,
    {
        match err {
            None => Outcome::Success(value),
            Some(err) => Outcome::Failure(ChainableError::from_foreign(err)),
        }
    }

    /// Adapt a std `Result` the same way as [`Outcome::from_parts`]
    pub fn from_result<E>(result: std::result::Result<T, E>) -> Self
    where
        E: Into<anyhow::Error>,
    {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(err) => Outcome::Failure(ChainableError::from_foreign(err)),
        }
    }

    /// Adapt a value and an optional boxed trait-object error.
    ///
    /// Same rules as [`Outcome::from_parts`], for errors already erased to
    /// `Box<dyn Error + Send + Sync>`.
    pub fn from_boxed(
        value: T,
        err: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        match err {
            None => Outcome::Success(value),
            Some(err) => Outcome::Failure(ChainableError::from_boxed(err)),
        }
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Run `f` on the value; an error short-circuits without calling `f`
    pub fn then<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(T) -> Outcome<T>,
    {
        chain(self, f)
    }

    /// Transform the value, leaving any error untouched
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(err) => Outcome::Failure(err),
        }
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Recover from an expected error; failures pass through unchanged
    pub fn on_error<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(AppError) -> Outcome<T>,
    {
        match self {
            Outcome::Failure(ChainableError::Error(err)) => f(err),
            other => other,
        }
    }

    /// Recover from an unexpected failure; expected errors pass through unchanged
    pub fn on_fail<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(AppFailure) -> Outcome<T>,
    {
        match self {
            Outcome::Failure(ChainableError::Failure(failure)) => f(failure),
            other => other,
        }
    }

    /// Recover from any managed error
    pub fn on_any_error<F>(self, f: F) -> Outcome<T>
    where
        F: FnOnce(ChainableError) -> Outcome<T>,
    {
        match self {
            Outcome::Failure(err) => f(err),
            success => success,
        }
    }

    // =========================================================================
    // Extraction
    // =========================================================================

    /// Split into the value and the error.
    ///
    /// An errored outcome yields `T::default()` as its value.
    pub fn value(self) -> (T, Option<ChainableError>)
    where
        T: Default,
    {
        match self {
            Outcome::Success(value) => (value, None),
            Outcome::Failure(err) => (T::default(), Some(err)),
        }
    }

    /// Get the error (if any)
    pub fn error(&self) -> Option<&ChainableError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    /// Take the error (if any), dropping the value
    pub fn into_error(self) -> Option<ChainableError> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(err) => Some(err),
        }
    }

    /// Check if no error is held
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Convert into a std `Result` for use with `?`
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(err),
        }
    }
}

/// Run `f` on the value of `outcome`, changing the carried type.
///
/// An error short-circuits to an `Outcome<U>` carrying the same error
/// without calling `f`.
pub fn chain<T, U, F>(outcome: Outcome<T>, f: F) -> Outcome<U>
where
    F: FnOnce(T) -> Outcome<U>,
{
    match outcome {
        Outcome::Success(value) => f(value),
        Outcome::Failure(err) => Outcome::Failure(err),
    }
}

impl<T, E> From<std::result::Result<T, E>> for Outcome<T>
where
    E: Into<anyhow::Error>,
{
    fn from(result: std::result::Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<T> From<Outcome<T>> for crate::Result<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_error, with_detail, ErrorInfo, ErrorKind};
    use std::cell::Cell;
    use std::io;

    #[test]
    fn test_then_success() {
        let (val, err) = Outcome::success(2).then(|v| Outcome::success(v * 2)).value();
        assert!(err.is_none());
        assert_eq!(val, 4);
    }

    #[test]
    fn test_then_propagates_error() {
        let called = Cell::new(false);
        let out = Outcome::<i32>::failure(AppError::new("invalid", "E002", 422)).then(|v| {
            called.set(true);
            Outcome::success(v)
        });

        assert!(!called.get());
        let err = out.error().expect("error propagated");
        assert!(err.is_error());
        assert_eq!(err.code(), "E002");
        assert_eq!(err.message(), "invalid");
    }

    #[test]
    fn test_chain_maps_type() {
        let (val, err) = chain(Outcome::success(10), |v| Outcome::success(v.to_string())).value();
        assert!(err.is_none());
        assert_eq!(val, "10");
    }

    #[test]
    fn test_chain_propagates_error() {
        let called = Cell::new(false);
        let out: Outcome<String> =
            chain(Outcome::<i32>::failure(AppFailure::new("boom", "F1", 500)), |v| {
                called.set(true);
                Outcome::success(v.to_string())
            });

        assert!(!called.get());
        let (val, err) = out.value();
        assert_eq!(val, "");
        let err = err.expect("error propagated");
        assert_eq!(err.kind(), ErrorKind::Failure);
        assert_eq!(err.code(), "F1");
    }

    #[test]
    fn test_on_error_handles_app_error() {
        let called = Cell::new(false);
        let out = Outcome::<i32>::failure(AppError::new("bad input", "E123", 400)).on_error(|err| {
            called.set(true);
            assert_eq!(err.code(), "E123");
            Outcome::success(99)
        });

        assert!(called.get());
        let (val, err) = out.value();
        assert!(err.is_none());
        assert_eq!(val, 99);
    }

    #[test]
    fn test_on_error_ignores_failure() {
        let called = Cell::new(false);
        let out = Outcome::<i32>::failure(AppFailure::new("boom", "F999", 500)).on_error(|_| {
            called.set(true);
            Outcome::success(1)
        });

        assert!(!called.get());
        let err = out.into_error().expect("failure kept");
        assert_eq!(err.as_failure().map(|f| f.code()), Some("F999"));
    }

    #[test]
    fn test_on_fail_handles_app_failure() {
        let called = Cell::new(false);
        let out = Outcome::<i32>::failure(AppFailure::new("boom", "F999", 500)).on_fail(|failure| {
            called.set(true);
            assert_eq!(failure.code(), "F999");
            Outcome::success(7)
        });

        assert!(called.get());
        let (val, err) = out.value();
        assert!(err.is_none());
        assert_eq!(val, 7);
    }

    #[test]
    fn test_on_fail_ignores_app_error() {
        let called = Cell::new(false);
        let out = Outcome::<i32>::failure(AppError::new("bad input", "E1", 400)).on_fail(|_| {
            called.set(true);
            Outcome::success(1)
        });

        assert!(!called.get());
        assert!(out.error().map(ChainableError::is_error).unwrap_or(false));
    }

    #[test]
    fn test_on_any_error_handles_both_kinds() {
        let calls = Cell::new(0);
        let recover = |err: ChainableError| {
            calls.set(calls.get() + 1);
            Outcome::success(err.status())
        };

        let a = Outcome::<i32>::failure(AppError::new("bad", "E1", 400)).on_any_error(recover);
        let b = Outcome::<i32>::failure(AppFailure::new("boom", "F1", 500)).on_any_error(recover);

        assert_eq!(calls.get(), 2);
        assert_eq!(a.value().0, 400);
        assert_eq!(b.value().0, 500);
    }

    #[test]
    fn test_recovery_skipped_on_success() {
        let out = Outcome::success(5)
            .on_error(|_| Outcome::success(0))
            .on_fail(|_| Outcome::success(0))
            .on_any_error(|_| Outcome::success(0));
        assert!(out.is_ok());
        assert_eq!(out.value().0, 5);
    }

    #[test]
    fn test_from_parts_success() {
        let out = Outcome::from_parts("value", None::<io::Error>);
        assert!(out.is_ok());
        assert!(out.error().is_none());
        let (val, err) = out.value();
        assert!(err.is_none());
        assert_eq!(val, "value");
    }

    #[test]
    fn test_from_parts_wraps_foreign_error_as_failure() {
        let out = Outcome::from_parts(0, Some(io::Error::new(io::ErrorKind::Other, "plain error")));

        assert!(!out.is_ok());
        let failure = out
            .into_error()
            .and_then(ChainableError::into_failure)
            .expect("wrapped as AppFailure");
        assert_eq!(failure.code(), "unexpected_failure");
        assert_eq!(failure.status(), 500);
        let cause = failure.cause_ref().expect("original error as cause");
        assert_eq!(cause.downcast_ref::<io::Error>().map(|e| e.to_string()).as_deref(), Some("plain error"));
    }

    #[test]
    fn test_from_parts_does_not_rebox_managed_error() {
        let err = new_error("bad input", "E1", 400, [with_detail("field", "name")]);
        let out = Outcome::from_parts(0, Some(err));

        let app_err = out
            .into_error()
            .and_then(ChainableError::into_error)
            .expect("kept as AppError");
        assert_eq!(app_err.code(), "E1");
        assert_eq!(app_err.details()["field"], "name");
        assert!(app_err.cause_ref().is_none());
    }

    #[test]
    fn test_std_result_conversions() {
        let out: Outcome<u8> = "300".parse::<u8>().into();
        assert_eq!(out.error().map(|e| e.code()), Some("unexpected_failure"));

        let res: crate::Result<u8> = Outcome::success(3).into();
        assert_eq!(res.ok(), Some(3));

        fn pipeline() -> crate::Result<i32> {
            let v = Outcome::success(1).map(|v| v + 1).into_result()?;
            Outcome::<i32>::failure(AppError::new("stop", "E9", 0)).into_result()?;
            Ok(v)
        }
        let err = pipeline().unwrap_err();
        assert_eq!(err.to_string(), "stop (code=E9)");
    }

    #[test]
    fn test_from_boxed_accepts_trait_object_errors() {
        let out = Outcome::<i32>::from_boxed(0, Some(Box::from("bad")));
        let err = out.into_error().expect("boxed error kept");
        assert!(err.is_failure());
        assert_eq!(err.code(), "unexpected_failure");
        assert_eq!(err.message(), "bad");

        let out = Outcome::from_boxed(5, None);
        assert!(out.is_ok());
        assert_eq!(out.value().0, 5);
    }

    #[test]
    fn test_from_parts_boxes_context_wrapped_managed_error() {
        use anyhow::Context as _;

        let wrapped = Err::<(), _>(AppError::new("invalid", "E1", 400))
            .context("loading user")
            .unwrap_err();
        let out = Outcome::from_parts(0, Some(wrapped));

        let called = Cell::new(false);
        let out = out.on_error(|_| {
            called.set(true);
            Outcome::success(1)
        });
        assert!(!called.get());

        let err = out.into_error().expect("failure kept");
        assert_eq!(err.kind(), ErrorKind::Failure);
        assert_eq!(err.code(), "unexpected_failure");
        assert_eq!(err.to_string(), "loading user (code=unexpected_failure status=500)");
    }
}
