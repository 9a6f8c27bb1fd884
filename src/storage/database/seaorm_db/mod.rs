// Module declarations
mod connection;
mod element_ops;
mod types;
mod user_ops;

pub use types::{DatabaseBackendType, SeaOrmDatabase};
