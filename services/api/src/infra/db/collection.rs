use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use pantry_api_schema::{favorites, recipes, shopping_carts};

use super::recipe::recipe_from_model;
use crate::domain::repository::CollectionRepository;
use crate::domain::types::{Collection, Recipe};
use crate::error::ApiError;

/// Favorites and shopping carts share one shape: `(user_id, recipe_id, created_at)`.
#[derive(Clone)]
pub struct DbCollectionRepository {
    pub db: DatabaseConnection,
}

impl CollectionRepository for DbCollectionRepository {
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let now = Utc::now();
        let rows = match collection {
            Collection::Favorites => {
                favorites::Entity::insert(favorites::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([favorites::Column::UserId, favorites::Column::RecipeId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::insert(shopping_carts::ActiveModel {
                    user_id: Set(user_id),
                    recipe_id: Set(recipe_id),
                    created_at: Set(now),
                })
                .on_conflict(
                    OnConflict::columns([
                        shopping_carts::Column::UserId,
                        shopping_carts::Column::RecipeId,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
            }
        }
        .with_context(|| format!("add recipe to {collection}"))?;
        Ok(rows > 0)
    }

    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let result = match collection {
            Collection::Favorites => {
                favorites::Entity::delete_many()
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::delete_many()
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.eq(recipe_id))
                    .exec(&self.db)
                    .await
            }
        }
        .with_context(|| format!("remove recipe from {collection}"))?;
        Ok(result.rows_affected > 0)
    }

    async fn list(&self, collection: Collection, user_id: Uuid) -> Result<Vec<Recipe>, ApiError> {
        let models = match collection {
            Collection::Favorites => {
                recipes::Entity::find()
                    .join(
                        sea_orm::JoinType::InnerJoin,
                        recipes::Relation::Favorites.def(),
                    )
                    .filter(favorites::Column::UserId.eq(user_id))
                    .order_by_desc(favorites::Column::CreatedAt)
                    .all(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                recipes::Entity::find()
                    .join(
                        sea_orm::JoinType::InnerJoin,
                        recipes::Relation::ShoppingCarts.def(),
                    )
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .order_by_desc(shopping_carts::Column::CreatedAt)
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("list {collection}"))?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn contained_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = match collection {
            Collection::Favorites => {
                favorites::Entity::find()
                    .select_only()
                    .column(favorites::Column::RecipeId)
                    .filter(favorites::Column::UserId.eq(user_id))
                    .filter(favorites::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
            Collection::ShoppingCart => {
                shopping_carts::Entity::find()
                    .select_only()
                    .column(shopping_carts::Column::RecipeId)
                    .filter(shopping_carts::Column::UserId.eq(user_id))
                    .filter(shopping_carts::Column::RecipeId.is_in(recipe_ids.iter().copied()))
                    .into_tuple::<i32>()
                    .all(&self.db)
                    .await
            }
        }
        .with_context(|| format!("find recipes in {collection}"))?;
        Ok(ids)
    }
}
