//! Data Transfer Objects for REST request/response serialization.
//!
//! Requests validate themselves explicitly via `validate()` methods
//! rather than relying on deserialization alone, so clients get
//! per-field error bodies.

pub mod auth_dto;
pub mod common_dto;
pub mod job_dto;
pub mod user_dto;

pub use auth_dto::*;
pub use common_dto::*;
pub use job_dto::*;
pub use user_dto::*;
