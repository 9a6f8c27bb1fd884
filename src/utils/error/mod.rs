//! Error handling for the service
//!
//! Every failure surfaces as an [`AppError`], which carries a stable
//! [`ErrorCode`] and renders to the `{code, message}` envelope.

#![allow(missing_docs)]

mod codes;
mod helpers;
mod response;
mod types;

pub use codes::ErrorCode;
pub use response::ErrorResponse;
pub use types::{AppError, AuthError, Result};
