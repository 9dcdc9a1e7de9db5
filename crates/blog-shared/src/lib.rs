//! # Blog Shared
//!
//! Wire types shared between the server and HTTP clients.

pub mod dto;
pub mod response;

pub use dto::HealthResponse;
pub use response::ErrorResponse;
