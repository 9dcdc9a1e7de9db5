//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Entities, the error taxonomy, ports implemented by `blog-infra`, and the
//! services the API layer calls. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
