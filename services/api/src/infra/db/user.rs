use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use pantry_api_schema::{follows, users};
use pantry_core::sea_ext::flatten_transaction_error;
use pantry_domain::pagination::{Page, PageRequest};
use pantry_domain::user::UserRole;

use super::conflict_or_internal;
use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfilePatch, User};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, ApiError> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Email.eq(email))
                    .add(users::Column::Username.eq(username)),
            )
            .count(&self.db)
            .await
            .context("check user uniqueness")?;
        Ok(count > 0)
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            username: Set(user.username.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            bio: Set(user.bio.clone()),
            avatar: Set(user.avatar.clone()),
            website: Set(user.website.clone()),
            location: Set(user.location.clone()),
            is_verified: Set(user.is_verified),
            role: Set(i16::from(user.role.as_u8())),
            followers_count: Set(0),
            following_count: Set(0),
            recipes_count: Set(0),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_internal(e, ApiError::UserAlreadyExists, "create user"))?;
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let count = users::Entity::find()
            .count(&self.db)
            .await
            .context("count users")?;
        let models = newest_first()
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(Page::new(
            count,
            models.into_iter().map(user_from_model).collect(),
        ))
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<User, ApiError> {
        let mut am = users::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref first_name) = patch.first_name {
            am.first_name = Set(first_name.clone());
        }
        if let Some(ref last_name) = patch.last_name {
            am.last_name = Set(last_name.clone());
        }
        if let Some(ref bio) = patch.bio {
            am.bio = Set(bio.clone());
        }
        if let Some(ref website) = patch.website {
            am.website = Set(website.clone());
        }
        if let Some(ref location) = patch.location {
            am.location = Set(location.clone());
        }
        if let Some(ref avatar) = patch.avatar {
            am.avatar = Set(Some(avatar.clone()));
        }
        am.updated_at = Set(Utc::now());
        let model = am.update(&self.db).await.context("update user profile")?;
        Ok(user_from_model(model))
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    // Authors this user follows lose a follower.
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::FollowersCount,
                            Expr::col(users::Column::FollowersCount).sub(1),
                        )
                        .filter(
                            users::Column::Id.in_subquery(
                                Query::select()
                                    .column(follows::Column::AuthorId)
                                    .from(follows::Entity)
                                    .and_where(follows::Column::UserId.eq(id))
                                    .to_owned(),
                            ),
                        )
                        .exec(txn)
                        .await?;
                    // Followers of this user follow one author fewer.
                    users::Entity::update_many()
                        .col_expr(
                            users::Column::FollowingCount,
                            Expr::col(users::Column::FollowingCount).sub(1),
                        )
                        .filter(
                            users::Column::Id.in_subquery(
                                Query::select()
                                    .column(follows::Column::UserId)
                                    .from(follows::Entity)
                                    .and_where(follows::Column::AuthorId.eq(id))
                                    .to_owned(),
                            ),
                        )
                        .exec(txn)
                        .await?;
                    users::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(flatten_transaction_error)
            .context("delete user")?;
        Ok(())
    }
}

/// Newest accounts first; id breaks ties so pages stay stable.
fn newest_first() -> Select<users::Entity> {
    users::Entity::find()
        .order_by_desc(users::Column::CreatedAt)
        .order_by_desc(users::Column::Id)
}

pub(super) fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        bio: model.bio,
        avatar: model.avatar,
        website: model.website,
        location: model.location,
        is_verified: model.is_verified,
        role: u8::try_from(model.role)
            .ok()
            .and_then(UserRole::from_u8)
            .unwrap_or(UserRole::Normal),
        followers_count: model.followers_count,
        following_count: model.following_count,
        recipes_count: model.recipes_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
