//! Services module
//!
//! Business logic sitting between the HTTP routes and the repositories.

pub mod context_element;
pub mod user;

pub use context_element::ContextElementService;
pub use user::UserService;
