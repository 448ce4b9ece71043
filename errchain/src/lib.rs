//! # errchain
//!
//! Structured errors and a chainable result type that keeps expected errors
//! apart from unexpected failures.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: `Error` for expected domain conditions, `Failure` for
//!   unexpected ones
//! - **AppError / AppFailure**: message, code, status, details and an
//!   optional cause
//! - **Outcome**: compose fallible steps with `then` and [`chain`], recover
//!   selectively with `on_error`, `on_fail` or `on_any_error`
//! - **Foreign errors**: adapted once at the `Outcome` boundary, boxed as an
//!   `unexpected_failure` with the original kept as cause
//!
//! ## Usage
//!
//! ```rust
//! use errchain::{chain, new_error, with_detail, AppError, ErrorInfo, Outcome};
//!
//! fn find_user(id: u32) -> Outcome<String> {
//!     if id == 0 {
//!         return Outcome::failure(new_error("user not found", "E404", 404, [
//!             with_detail("id", id.to_string()),
//!         ]));
//!     }
//!     Outcome::success(format!("user-{}", id))
//! }
//!
//! let greeting = chain(find_user(0), |name| Outcome::success(name.len()))
//!     .on_error(|err: AppError| {
//!         assert_eq!(err.details()["id"], "0");
//!         Outcome::success(0)
//!     });
//! assert_eq!(greeting.value().0, 0);
//!
//! let out = Outcome::from_result("x".parse::<u8>()).then(|v| Outcome::success(v + 1));
//! let err = out.error().expect("parse error boxed");
//! assert_eq!(err.code(), "unexpected_failure");
//! assert_eq!(err.status(), 500);
//! ```
//!
//! ## Principles
//!
//! - Recovery is opt-in and matched on the variant; nothing is swallowed
//! - `details()` always hands out a copy
//! - The library never logs or prints; with the `tracing` feature it emits a
//!   debug event when a foreign error is boxed

mod chainable;
mod error;
mod kind;
mod outcome;

pub use chainable::{ChainableError, ErrorInfo};
pub use error::{
    new_error, new_failure, with_cause, with_detail, with_details, AppError, AppFailure, Details,
    ErrorOption, OptionalDetails, UNEXPECTED_FAILURE_CODE, UNEXPECTED_FAILURE_STATUS,
};
pub use kind::ErrorKind;
pub use outcome::{chain, Outcome};

/// Result type alias using ChainableError
pub type Result<T> = std::result::Result<T, ChainableError>;
