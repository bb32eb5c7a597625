//! sea-orm implementations of the repository traits.

mod catalog;
mod collection;
mod follow;
mod recipe;
mod shopping_list;
mod user;

use sea_orm::DbErr;

use pantry_core::sea_ext::is_unique_violation;

use crate::error::ApiError;

pub use catalog::{DbIngredientRepository, DbTagRepository};
pub use collection::DbCollectionRepository;
pub use follow::DbFollowRepository;
pub use recipe::DbRecipeRepository;
pub use shopping_list::DbShoppingListRepository;
pub use user::DbUserRepository;

/// Map a unique-constraint violation to `conflict`; everything else is internal.
fn conflict_or_internal(err: DbErr, conflict: ApiError, context: &'static str) -> ApiError {
    if is_unique_violation(&err) {
        conflict
    } else {
        ApiError::Internal(anyhow::Error::new(err).context(context))
    }
}
