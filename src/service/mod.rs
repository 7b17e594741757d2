//! Service layer: business logic orchestration.
//!
//! [`UserService`] sits between route handlers and the repositories,
//! owning uniqueness checks, credential handling, and error mapping.

pub mod user_service;

pub use user_service::UserService;
