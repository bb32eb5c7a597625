use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, OnConflict, Query},
};
use uuid::Uuid;

use pantry_api_schema::{follows, users};
use pantry_core::sea_ext::flatten_transaction_error;
use pantry_domain::pagination::{Page, PageRequest};

use super::user::user_from_model;
use crate::domain::repository::FollowRepository;
use crate::domain::types::User;
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl DbFollowRepository {
    /// Page of users whose id is in `follows.<select_col>` where `follows.<match_col> = id`.
    async fn users_linked_by(
        &self,
        select_col: follows::Column,
        match_col: follows::Column,
        id: Uuid,
        page: PageRequest,
    ) -> Result<Page<User>, ApiError> {
        let page = page.clamped();
        let query = users::Entity::find().filter(
            users::Column::Id.in_subquery(
                Query::select()
                    .column(select_col)
                    .from(follows::Entity)
                    .and_where(match_col.eq(id))
                    .to_owned(),
            ),
        );
        let count = query
            .clone()
            .count(&self.db)
            .await
            .context("count follow edges")?;
        let models = query
            .order_by_asc(users::Column::Username)
            .offset(page.offset())
            .limit(u64::from(page.limit))
            .all(&self.db)
            .await
            .context("list followed users")?;
        Ok(Page::new(
            count,
            models.into_iter().map(user_from_model).collect(),
        ))
    }
}

/// Shift both counters of a follow edge by `delta` (±1).
async fn adjust_counters<C: sea_orm::ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    author_id: Uuid,
    delta: i32,
) -> Result<(), DbErr> {
    users::Entity::update_many()
        .col_expr(
            users::Column::FollowingCount,
            Expr::col(users::Column::FollowingCount).add(delta),
        )
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?;
    users::Entity::update_many()
        .col_expr(
            users::Column::FollowersCount,
            Expr::col(users::Column::FollowersCount).add(delta),
        )
        .filter(users::Column::Id.eq(author_id))
        .exec(conn)
        .await?;
    Ok(())
}

impl FollowRepository for DbFollowRepository {
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let inserted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let rows = follows::Entity::insert(follows::ActiveModel {
                        user_id: Set(user_id),
                        author_id: Set(author_id),
                        created_at: Set(Utc::now()),
                    })
                    .on_conflict(
                        OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(txn)
                    .await?;
                    if rows == 0 {
                        return Ok(false);
                    }
                    adjust_counters(txn, user_id, author_id, 1).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(flatten_transaction_error)
            .context("follow author")?;
        Ok(inserted)
    }

    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let removed = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let result = follows::Entity::delete_many()
                        .filter(follows::Column::UserId.eq(user_id))
                        .filter(follows::Column::AuthorId.eq(author_id))
                        .exec(txn)
                        .await?;
                    if result.rows_affected == 0 {
                        return Ok(false);
                    }
                    adjust_counters(txn, user_id, author_id, -1).await?;
                    Ok(true)
                })
            })
            .await
            .map_err(flatten_transaction_error)
            .context("unfollow author")?;
        Ok(removed)
    }

    async fn following(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        self.users_linked_by(
            follows::Column::AuthorId,
            follows::Column::UserId,
            user_id,
            page,
        )
        .await
    }

    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        self.users_linked_by(
            follows::Column::UserId,
            follows::Column::AuthorId,
            user_id,
            page,
        )
        .await
    }

    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::UserId.eq(user_id))
            .filter(follows::Column::AuthorId.is_in(author_ids.iter().copied()))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await
            .context("find followed authors")?;
        Ok(ids)
    }
}
