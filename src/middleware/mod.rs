//! Middleware del sistema
//!
//! Capas transversales del router: CORS y trazas HTTP.

pub mod cors;

pub use cors::{cors_layer, cors_middleware, cors_middleware_with_origins};
