//! Auth types shared across Pantry services.
//!
//! Provides JWT issuing/validation, the session cookie builders, and the
//! `Identity` / `MaybeIdentity` extractors.

pub mod cookie;
pub mod identity;
pub mod token;
