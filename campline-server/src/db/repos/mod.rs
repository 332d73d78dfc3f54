//! Repository implementations for database access
//!
//! Each repository borrows the pool and commits synchronously.
//! Multi-step writes (cascade delete, signup creation with its
//! reference checks) run inside a single transaction.

pub mod activities;
pub mod campers;
pub mod signups;

pub use activities::{Activity, ActivityRepo};
pub use campers::{Camper, CamperDetail, CamperRepo};
pub use signups::{Signup, SignupDetail, SignupRepo, SignupWithActivity};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i64 },
}
