//! Domain models and request/response payloads

pub mod context_element;
pub mod user;

pub use context_element::*;
pub use user::*;
