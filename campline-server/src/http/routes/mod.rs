//! Route handlers, one module per resource

pub mod activities;
pub mod campers;
pub mod health;
pub mod signups;
