use anyhow::Context as _;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
    Select, sea_query::Query,
};
use uuid::Uuid;

use pantry_api_schema::{ingredients, recipe_ingredients, shopping_carts};
use pantry_domain::shopping_list::ShoppingListItem;

use crate::domain::repository::ShoppingListRepository;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbShoppingListRepository {
    pub db: DatabaseConnection,
}

/// Ingredient lines of every recipe in `user_id`'s cart.
fn cart_lines_query(user_id: Uuid) -> Select<recipe_ingredients::Entity> {
    recipe_ingredients::Entity::find()
        .select_only()
        .column(ingredients::Column::Name)
        .column(ingredients::Column::MeasurementUnit)
        .column(recipe_ingredients::Column::Amount)
        .join(
            JoinType::InnerJoin,
            recipe_ingredients::Relation::Ingredient.def(),
        )
        .filter(
            recipe_ingredients::Column::RecipeId.in_subquery(
                Query::select()
                    .column(shopping_carts::Column::RecipeId)
                    .from(shopping_carts::Entity)
                    .and_where(shopping_carts::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        )
}

impl ShoppingListRepository for DbShoppingListRepository {
    async fn cart_lines(&self, user_id: Uuid) -> Result<Vec<ShoppingListItem>, ApiError> {
        let rows = cart_lines_query(user_id)
            .into_tuple::<(String, String, i32)>()
            .all(&self.db)
            .await
            .context("load shopping cart lines")?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| ShoppingListItem {
                name,
                measurement_unit,
                amount: i64::from(amount),
            })
            .collect())
    }
}
