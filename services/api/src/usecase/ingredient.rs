use pantry_auth_types::identity::Identity;

use crate::domain::repository::IngredientRepository;
use crate::domain::types::{Ingredient, NewIngredient};
use crate::error::ApiError;
use crate::usecase::{ensure_admin, required};

pub struct ListIngredientsUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> ListIngredientsUseCase<R> {
    /// Ingredients whose name starts with `name_prefix`, ignoring case.
    pub async fn execute(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let prefix = name_prefix.map(str::trim).filter(|p| !p.is_empty());
        self.repo.list(prefix).await
    }
}

pub struct GetIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> GetIngredientUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Ingredient, ApiError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ApiError::IngredientNotFound)
    }
}

pub struct CreateIngredientUseCase<R: IngredientRepository> {
    pub repo: R,
}

impl<R: IngredientRepository> CreateIngredientUseCase<R> {
    pub async fn execute(
        &self,
        actor: &Identity,
        input: NewIngredient,
    ) -> Result<Ingredient, ApiError> {
        ensure_admin(actor)?;
        let ingredient = NewIngredient {
            name: required(&input.name, "name")?,
            measurement_unit: required(&input.measurement_unit, "measurement_unit")?,
        };
        self.repo.create(&ingredient).await
    }
}
