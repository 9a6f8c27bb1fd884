//! HTTP server implementation
//!
//! Application assembly, middleware, routes and shared state.

pub mod middleware;
pub mod routes;

pub mod builder;
mod handlers;
pub mod server;
pub mod state;


pub use server::{HttpServer, create_app};
pub use state::{AppState, RateLimiters};
