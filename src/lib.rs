//! # vibeify-api
//!
//! Async REST API service backed by PostgreSQL, with a database-backed
//! background job queue. The HTTP process serves the versioned API; a
//! separate worker process executes queued jobs and a scheduler process
//! emits recurring ones. The processes share state only through the
//! database.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── UserService (service/)
//!     ├── JobDispatcher (jobs/)
//!     │
//!     └── PostgreSQL (persistence/)
//!           ▲
//!           │  FOR UPDATE SKIP LOCKED
//!     Worker / Scheduler (separate processes)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod error;
pub mod jobs;
pub mod persistence;
pub mod service;
