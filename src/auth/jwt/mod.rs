//! Session token handling
//!
//! Issues and verifies HS256 signed access and refresh tokens. Both token
//! kinds share one claims shape and are told apart by `token_type`.

mod handler;
pub mod types;
mod utils;


pub use types::{Claims, SessionTokenService, TokenPair, TokenType};
pub use utils::unix_now;
