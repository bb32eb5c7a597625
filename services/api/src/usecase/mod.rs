pub mod auth;
pub mod collection;
pub mod follow;
pub mod ingredient;
pub mod recipe;
pub mod shopping_list;
pub mod tag;
pub mod user;

#[cfg(test)]
pub(crate) mod mock;

use uuid::Uuid;

use pantry_auth_types::identity::Identity;

use crate::error::ApiError;

/// Owners may change their own resources; admins may change anything.
pub(crate) fn ensure_owner_or_admin(owner_id: Uuid, actor: &Identity) -> Result<(), ApiError> {
    if actor.user_id == owner_id || actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

pub(crate) fn ensure_admin(actor: &Identity) -> Result<(), ApiError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Trim `value`, rejecting it when nothing is left.
pub(crate) fn required(value: &str, field: &'static str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ApiError::EmptyField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}
