use chrono::Utc;
use uuid::Uuid;

use pantry_auth_types::identity::Identity;
use pantry_domain::pagination::{Page, PageRequest};
use pantry_domain::user::UserRole;

use crate::domain::repository::{FollowRepository, ImageStore, RecipeRepository, UserRepository};
use crate::domain::types::{
    ProfilePatch, ProfileView, Recipe, User, validate_email, validate_password,
    validate_username,
};
use crate::error::ApiError;
use crate::infra::password::{hash_password, verify_password};
use crate::usecase::{ensure_owner_or_admin, required};

/// Attach `is_subscribed` for `viewer` to each user.
pub(crate) async fn profile_views<F: FollowRepository>(
    follows: &F,
    viewer: Option<Uuid>,
    users: Vec<User>,
) -> Result<Vec<ProfileView>, ApiError> {
    let followed = match viewer {
        Some(viewer) => {
            let ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();
            follows.followed_among(viewer, &ids).await?
        }
        None => Vec::new(),
    };
    Ok(users
        .into_iter()
        .map(|user| ProfileView {
            is_subscribed: followed.contains(&user.id),
            user,
        })
        .collect())
}

// ── RegisterUser ─────────────────────────────────────────────────────────────

pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirm: Option<String>,
}

pub struct RegisterUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUserUseCase<R> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, ApiError> {
        let email = input.email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(ApiError::InvalidEmail);
        }
        let username = input.username.trim().to_owned();
        if !validate_username(&username) {
            return Err(ApiError::InvalidUsername);
        }
        let first_name = required(&input.first_name, "first_name")?;
        let last_name = required(&input.last_name, "last_name")?;
        if !validate_password(&input.password) {
            return Err(ApiError::WeakPassword);
        }
        if input
            .password_confirm
            .as_deref()
            .is_some_and(|confirm| confirm != input.password)
        {
            return Err(ApiError::PasswordMismatch);
        }
        if self
            .repo
            .exists_by_email_or_username(&email, &username)
            .await?
        {
            return Err(ApiError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            username,
            first_name,
            last_name,
            password_hash: hash_password(&input.password).await?,
            bio: String::new(),
            avatar: None,
            website: String::new(),
            location: String::new(),
            is_verified: false,
            role: UserRole::Normal,
            followers_count: 0,
            following_count: 0,
            recipes_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> ListUsersUseCase<U, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<ProfileView>, ApiError> {
        let Page { count, results } = self.users.list(page).await?;
        let results = profile_views(&self.follows, viewer, results).await?;
        Ok(Page::new(count, results))
    }
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> GetProfileUseCase<U, F> {
    pub async fn execute(
        &self,
        viewer: Option<Uuid>,
        user_id: Uuid,
    ) -> Result<ProfileView, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let mut views = profile_views(&self.follows, viewer, vec![user]).await?;
        views.pop().ok_or(ApiError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateProfileInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    /// Base64 image data URL.
    pub avatar: Option<String>,
}

pub struct UpdateProfileUseCase<U: UserRepository, S: ImageStore> {
    pub users: U,
    pub images: S,
}

impl<U: UserRepository, S: ImageStore> UpdateProfileUseCase<U, S> {
    pub async fn execute(
        &self,
        actor: &Identity,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, ApiError> {
        let mut patch = ProfilePatch {
            first_name: input
                .first_name
                .as_deref()
                .map(|v| required(v, "first_name"))
                .transpose()?,
            last_name: input
                .last_name
                .as_deref()
                .map(|v| required(v, "last_name"))
                .transpose()?,
            bio: input.bio,
            website: input.website.map(|v| v.trim().to_owned()),
            location: input.location.map(|v| v.trim().to_owned()),
            avatar: None,
        };
        if patch.is_empty() && input.avatar.is_none() {
            return Err(ApiError::MissingData);
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        ensure_owner_or_admin(user.id, actor)?;

        if let Some(ref data_url) = input.avatar {
            patch.avatar = Some(self.images.save(data_url, "users").await?);
        }
        let updated = self.users.update_profile(user.id, &patch).await;
        let stale = match (&updated, patch.avatar) {
            (Ok(_), Some(_)) => user.avatar,
            (Err(_), new_avatar) => new_avatar,
            (Ok(_), None) => None,
        };
        if let Some(path) = stale {
            self.images.remove(&path).await;
        }
        updated
    }
}

// ── SetPassword ──────────────────────────────────────────────────────────────

pub struct SetPasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetPasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !verify_password(current_password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        if !validate_password(new_password) {
            return Err(ApiError::WeakPassword);
        }
        let hash = hash_password(new_password).await?;
        self.users.set_password_hash(user.id, &hash).await
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> DeleteUserUseCase<U> {
    pub async fn execute(&self, actor: &Identity, user_id: Uuid) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        ensure_owner_or_admin(user.id, actor)?;
        self.users.delete(user.id).await?;
        tracing::info!(user_id = %user.id, deleted_by = %actor.user_id, "user deleted");
        Ok(())
    }
}

// ── ListAuthorRecipes ────────────────────────────────────────────────────────

pub struct ListAuthorRecipesUseCase<U: UserRepository, R: RecipeRepository> {
    pub users: U,
    pub recipes: R,
}

impl<U: UserRepository, R: RecipeRepository> ListAuthorRecipesUseCase<U, R> {
    pub async fn execute(
        &self,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<(User, Vec<Recipe>), ApiError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let recipes = self.recipes.list_by_author(author.id, recipes_limit).await?;
        Ok((author, recipes))
    }
}
