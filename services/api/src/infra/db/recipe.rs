use std::collections::HashMap;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use pantry_api_schema::{
    favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_carts, tags, users,
};
use pantry_core::sea_ext::flatten_transaction_error;
use pantry_domain::pagination::{Page, PageRequest};

use super::catalog::{ingredient_from_model, tag_from_model};
use super::conflict_or_internal;
use super::user::user_from_model;
use crate::domain::repository::RecipeRepository;
use crate::domain::types::{
    IngredientAmount, NewRecipe, Recipe, RecipeChanges, RecipeDetail, RecipeFilter,
    RecipeIngredient,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbRecipeRepository {
    pub db: DatabaseConnection,
}

fn filtered(filter: &RecipeFilter) -> Select<recipes::Entity> {
    let mut query = recipes::Entity::find();
    if !filter.tag_slugs.is_empty() {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column((recipe_tags::Entity, recipe_tags::Column::RecipeId))
                    .from(recipe_tags::Entity)
                    .inner_join(
                        tags::Entity,
                        Expr::col((tags::Entity, tags::Column::Id))
                            .equals((recipe_tags::Entity, recipe_tags::Column::TagId)),
                    )
                    .and_where(tags::Column::Slug.is_in(filter.tag_slugs.iter().cloned()))
                    .to_owned(),
            ),
        );
    }
    if !filter.tag_ids.is_empty() {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(recipe_tags::Column::RecipeId)
                    .from(recipe_tags::Entity)
                    .and_where(recipe_tags::Column::TagId.is_in(filter.tag_ids.iter().copied()))
                    .to_owned(),
            ),
        );
    }
    if let Some(author_id) = filter.author_id {
        query = query.filter(recipes::Column::AuthorId.eq(author_id));
    }
    if let Some(user_id) = filter.favorited_by {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(favorites::Column::RecipeId)
                    .from(favorites::Entity)
                    .and_where(favorites::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
    }
    if let Some(user_id) = filter.in_cart_of {
        query = query.filter(
            recipes::Column::Id.in_subquery(
                Query::select()
                    .column(shopping_carts::Column::RecipeId)
                    .from(shopping_carts::Entity)
                    .and_where(shopping_carts::Column::UserId.eq(user_id))
                    .to_owned(),
            ),
        );
    }
    query
}

fn recipe_ingredient_models(
    recipe_id: i32,
    items: &[IngredientAmount],
) -> Vec<recipe_ingredients::ActiveModel> {
    items
        .iter()
        .map(|item| recipe_ingredients::ActiveModel {
            recipe_id: Set(recipe_id),
            ingredient_id: Set(item.ingredient_id),
            amount: Set(item.amount),
        })
        .collect()
}

fn recipe_tag_models(recipe_id: i32, tag_ids: &[i32]) -> Vec<recipe_tags::ActiveModel> {
    tag_ids
        .iter()
        .map(|&tag_id| recipe_tags::ActiveModel {
            recipe_id: Set(recipe_id),
            tag_id: Set(tag_id),
        })
        .collect()
}

impl RecipeRepository for DbRecipeRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        let model = recipes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find recipe by id")?;
        Ok(model.map(recipe_from_model))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        let page = page.clamped();
        let query = filtered(filter);
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count recipes")?;
        let models = query
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list recipes")?;
        Ok(Page::new(
            count,
            models.into_iter().map(recipe_from_model).collect(),
        ))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError> {
        let models = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .order_by_desc(recipes::Column::CreatedAt)
            .order_by_desc(recipes::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recipes by author")?;
        Ok(models.into_iter().map(recipe_from_model).collect())
    }

    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetail>, ApiError> {
        if recipes.is_empty() {
            return Ok(Vec::new());
        }
        let recipe_ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
        let mut author_ids: Vec<Uuid> = recipes.iter().map(|r| r.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<Uuid, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids))
            .all(&self.db)
            .await
            .context("load recipe authors")?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut tags_by_recipe: HashMap<i32, Vec<tags::Model>> = HashMap::new();
        for (link, tag) in recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load recipe tags")?
        {
            if let Some(tag) = tag {
                tags_by_recipe.entry(link.recipe_id).or_default().push(tag);
            }
        }

        let mut ingredients_by_recipe: HashMap<i32, Vec<(i32, ingredients::Model)>> =
            HashMap::new();
        for (link, ingredient) in recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids.iter().copied()))
            .find_also_related(ingredients::Entity)
            .all(&self.db)
            .await
            .context("load recipe ingredients")?
        {
            if let Some(ingredient) = ingredient {
                ingredients_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push((link.amount, ingredient));
            }
        }

        let mut details = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            let author = authors.get(&recipe.author_id).cloned().ok_or_else(|| {
                anyhow::anyhow!("author {} of recipe {} missing", recipe.author_id, recipe.id)
            })?;

            let mut tags: Vec<_> = tags_by_recipe
                .remove(&recipe.id)
                .unwrap_or_default()
                .into_iter()
                .map(tag_from_model)
                .collect();
            tags.sort_by(|a, b| a.name.cmp(&b.name));

            let mut ingredients: Vec<_> = ingredients_by_recipe
                .remove(&recipe.id)
                .unwrap_or_default()
                .into_iter()
                .map(|(amount, model)| RecipeIngredient {
                    ingredient: ingredient_from_model(model),
                    amount,
                })
                .collect();
            ingredients.sort_by(|a, b| a.ingredient.name.cmp(&b.ingredient.name));

            details.push(RecipeDetail {
                recipe,
                author: user_from_model(author),
                tags,
                ingredients,
            });
        }
        Ok(details)
    }

    async fn name_taken(
        &self,
        author_id: Uuid,
        name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, ApiError> {
        let mut query = recipes::Entity::find()
            .filter(recipes::Column::AuthorId.eq(author_id))
            .filter(recipes::Column::Name.eq(name));
        if let Some(id) = except_id {
            query = query.filter(recipes::Column::Id.ne(id));
        }
        let count = query
            .count(&self.db)
            .await
            .context("check recipe name")?;
        Ok(count > 0)
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, ApiError> {
        let recipe = recipe.clone();
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let model = recipes::ActiveModel {
                        author_id: Set(recipe.author_id),
                        name: Set(recipe.name),
                        text: Set(recipe.text),
                        cooking_time: Set(recipe.cooking_time),
                        image: Set(recipe.image),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;
                    recipe_ingredients::Entity::insert_many(recipe_ingredient_models(
                        model.id,
                        &recipe.ingredients,
                    ))
                    .exec(txn)
                    .await?;
                    if !recipe.tag_ids.is_empty() {
                        recipe_tags::Entity::insert_many(recipe_tag_models(
                            model.id,
                            &recipe.tag_ids,
                        ))
                        .exec(txn)
                        .await?;
                    }
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::RecipesCount,
                            Expr::col(users::Column::RecipesCount).add(1),
                        )
                        .filter(users::Column::Id.eq(recipe.author_id))
                        .exec(txn)
                        .await?;
                    Ok(model)
                })
            })
            .await
            .map_err(|e| {
                conflict_or_internal(
                    flatten_transaction_error(e),
                    ApiError::RecipeAlreadyExists,
                    "create recipe",
                )
            })?;
        Ok(recipe_from_model(model))
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, ApiError> {
        let changes = changes.clone();
        let model = self
            .db
            .transaction::<_, recipes::Model, DbErr>(|txn| {
                Box::pin(async move {
                    let mut am = recipes::ActiveModel {
                        id: Set(id),
                        updated_at: Set(Utc::now()),
                        ..Default::default()
                    };
                    if let Some(name) = changes.name {
                        am.name = Set(name);
                    }
                    if let Some(text) = changes.text {
                        am.text = Set(text);
                    }
                    if let Some(cooking_time) = changes.cooking_time {
                        am.cooking_time = Set(cooking_time);
                    }
                    if let Some(image) = changes.image {
                        am.image = Set(image);
                    }
                    let model = am.update(txn).await?;

                    if let Some(items) = changes.ingredients {
                        recipe_ingredients::Entity::delete_many()
                            .filter(recipe_ingredients::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        recipe_ingredients::Entity::insert_many(recipe_ingredient_models(
                            id, &items,
                        ))
                        .exec(txn)
                        .await?;
                    }
                    if let Some(tag_ids) = changes.tag_ids {
                        recipe_tags::Entity::delete_many()
                            .filter(recipe_tags::Column::RecipeId.eq(id))
                            .exec(txn)
                            .await?;
                        if !tag_ids.is_empty() {
                            recipe_tags::Entity::insert_many(recipe_tag_models(id, &tag_ids))
                                .exec(txn)
                                .await?;
                        }
                    }
                    Ok(model)
                })
            })
            .await
            .map_err(|e| {
                conflict_or_internal(
                    flatten_transaction_error(e),
                    ApiError::RecipeAlreadyExists,
                    "update recipe",
                )
            })?;
        Ok(recipe_from_model(model))
    }

    async fn delete(&self, recipe: &Recipe) -> Result<(), ApiError> {
        let (id, author_id) = (recipe.id, recipe.author_id);
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    let result = recipes::Entity::delete_by_id(id).exec(txn).await?;
                    if result.rows_affected > 0 {
                        users::Entity::update_many()
                            .col_expr(
                                users::Column::RecipesCount,
                                Expr::col(users::Column::RecipesCount).sub(1),
                            )
                            .filter(users::Column::Id.eq(author_id))
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(flatten_transaction_error)
            .context("delete recipe")?;
        Ok(())
    }
}

pub(super) fn recipe_from_model(model: recipes::Model) -> Recipe {
    Recipe {
        id: model.id,
        author_id: model.author_id,
        name: model.name,
        text: model.text,
        cooking_time: model.cooking_time,
        image: model.image,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
