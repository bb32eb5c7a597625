use pantry_auth_types::identity::Identity;

use crate::domain::repository::TagRepository;
use crate::domain::types::{NewTag, Tag, validate_color, validate_slug};
use crate::error::ApiError;
use crate::usecase::{ensure_admin, required};

pub struct ListTagsUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, ApiError> {
        self.repo.list().await
    }
}

pub struct GetTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> GetTagUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Tag, ApiError> {
        self.repo.find_by_id(id).await?.ok_or(ApiError::TagNotFound)
    }
}

pub struct CreateTagUseCase<R: TagRepository> {
    pub repo: R,
}

impl<R: TagRepository> CreateTagUseCase<R> {
    pub async fn execute(&self, actor: &Identity, input: NewTag) -> Result<Tag, ApiError> {
        ensure_admin(actor)?;
        let name = required(&input.name, "name")?;
        let color = input.color.trim().to_uppercase();
        if !validate_color(&color) {
            return Err(ApiError::InvalidColor);
        }
        let slug = input.slug.trim().to_owned();
        if !validate_slug(&slug) {
            return Err(ApiError::InvalidSlug);
        }
        self.repo.create(&NewTag { name, color, slug }).await
    }
}
