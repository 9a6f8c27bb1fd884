//! Authentication primitives: session tokens and password hashing

pub mod jwt;
pub mod password;

pub use jwt::{Claims, SessionTokenService, TokenPair, TokenType};
pub use password::{hash_password, verify_password};
