//! Shared utilities: error handling, logging bootstrap and input validation

pub mod error;
pub mod logging;
pub mod validation;
