//! Test helpers shared across Pantry services.

pub mod auth;
