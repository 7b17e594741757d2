//! Persistence layer: PostgreSQL pool, migrations, and repositories.
//!
//! Repositories own all SQL and row mapping. The pool is built once at
//! startup and shared; each request's queries acquire a pooled
//! connection for the duration of the call, so the pool size bounds
//! database concurrency.

pub mod jobs;
pub mod models;
pub mod postgres;
pub mod users;

pub use jobs::JobRepository;
pub use users::UserRepository;
