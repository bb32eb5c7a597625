use uuid::Uuid;

use pantry_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{FollowRepository, RecipeRepository, UserRepository};
use crate::domain::types::{ProfileView, SubscriptionView, User};
use crate::error::ApiError;
use crate::usecase::user::profile_views;

async fn subscription_view<R: RecipeRepository>(
    recipes: &R,
    author: User,
    recipes_limit: Option<u64>,
) -> Result<SubscriptionView, ApiError> {
    let preview = recipes.list_by_author(author.id, recipes_limit).await?;
    Ok(SubscriptionView {
        recipes_count: author.recipes_count,
        recipes: preview,
        author,
    })
}

// ── Follow ───────────────────────────────────────────────────────────────────

pub struct FollowUseCase<U: UserRepository, F: FollowRepository, R: RecipeRepository> {
    pub users: U,
    pub follows: F,
    pub recipes: R,
}

impl<U: UserRepository, F: FollowRepository, R: RecipeRepository> FollowUseCase<U, F, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        author_id: Uuid,
        recipes_limit: Option<u64>,
    ) -> Result<SubscriptionView, ApiError> {
        if user_id == author_id {
            return Err(ApiError::SelfFollow);
        }
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if !self.follows.follow(user_id, author_id).await? {
            return Err(ApiError::AlreadyFollowing);
        }
        // Re-read so the counters reflect the new edge.
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        subscription_view(&self.recipes, author, recipes_limit).await
    }
}

// ── Unfollow ─────────────────────────────────────────────────────────────────

pub struct UnfollowUseCase<U: UserRepository, F: FollowRepository> {
    pub users: U,
    pub follows: F,
}

impl<U: UserRepository, F: FollowRepository> UnfollowUseCase<U, F> {
    pub async fn execute(&self, user_id: Uuid, author_id: Uuid) -> Result<(), ApiError> {
        if user_id == author_id {
            return Err(ApiError::SelfFollow);
        }
        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ApiError::UserNotFound);
        }
        if !self.follows.unfollow(user_id, author_id).await? {
            return Err(ApiError::NotFollowing);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<F: FollowRepository, R: RecipeRepository> {
    pub follows: F,
    pub recipes: R,
}

impl<F: FollowRepository, R: RecipeRepository> ListSubscriptionsUseCase<F, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
        recipes_limit: Option<u64>,
    ) -> Result<Page<SubscriptionView>, ApiError> {
        let Page { count, results } = self.follows.following(user_id, page).await?;
        let mut views = Vec::with_capacity(results.len());
        for author in results {
            views.push(subscription_view(&self.recipes, author, recipes_limit).await?);
        }
        Ok(Page::new(count, views))
    }
}

// ── ListFollowers ────────────────────────────────────────────────────────────

pub struct ListFollowersUseCase<F: FollowRepository> {
    pub follows: F,
}

impl<F: FollowRepository> ListFollowersUseCase<F> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<ProfileView>, ApiError> {
        let Page { count, results } = self.follows.followers(user_id, page).await?;
        let results = profile_views(&self.follows, Some(user_id), results).await?;
        Ok(Page::new(count, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::mock::{MockFollows, MockRecipes, MockUsers, recipe, user};

    fn follow_usecase(
        users: Vec<User>,
        edges: Vec<(Uuid, Uuid)>,
    ) -> FollowUseCase<MockUsers, MockFollows, MockRecipes> {
        FollowUseCase {
            users: MockUsers::with(users.clone()),
            follows: MockFollows::with(users.clone(), edges),
            recipes: MockRecipes::with(vec![], users),
        }
    }

    #[tokio::test]
    async fn should_reject_self_follow_without_creating_edge() {
        let me = user("me_myself");
        let usecase = follow_usecase(vec![me.clone()], vec![]);
        let result = usecase.execute(me.id, me.id, None).await;
        assert!(matches!(result, Err(ApiError::SelfFollow)));
        assert!(usecase.follows.edges.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_author() {
        let me = user("me_myself");
        let usecase = follow_usecase(vec![me.clone()], vec![]);
        let result = usecase.execute(me.id, Uuid::now_v7(), None).await;
        assert!(matches!(result, Err(ApiError::UserNotFound)));
    }

    #[tokio::test]
    async fn should_reject_duplicate_follow() {
        let me = user("me_myself");
        let author = user("author");
        let usecase = follow_usecase(vec![me.clone(), author.clone()], vec![(me.id, author.id)]);
        let result = usecase.execute(me.id, author.id, None).await;
        assert!(matches!(result, Err(ApiError::AlreadyFollowing)));
        assert_eq!(usecase.follows.edges.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_follow_and_return_author_preview() {
        let me = user("me_myself");
        let author = user("author");
        let mut usecase = follow_usecase(vec![me.clone(), author.clone()], vec![]);
        usecase.recipes = MockRecipes::with(
            vec![recipe(1, author.id), recipe(2, author.id)],
            vec![author.clone()],
        );

        let view = usecase.execute(me.id, author.id, Some(1)).await.unwrap();
        assert_eq!(view.author.id, author.id);
        assert_eq!(view.recipes.len(), 1);
        assert_eq!(
            *usecase.follows.edges.lock().unwrap(),
            vec![(me.id, author.id)]
        );
    }

    #[tokio::test]
    async fn should_reject_unfollow_without_edge() {
        let me = user("me_myself");
        let author = user("author");
        let usecase = UnfollowUseCase {
            users: MockUsers::with(vec![me.clone(), author.clone()]),
            follows: MockFollows::default(),
        };
        let result = usecase.execute(me.id, author.id).await;
        assert!(matches!(result, Err(ApiError::NotFollowing)));
    }

    #[tokio::test]
    async fn should_unfollow_existing_edge() {
        let me = user("me_myself");
        let author = user("author");
        let usecase = UnfollowUseCase {
            users: MockUsers::with(vec![me.clone(), author.clone()]),
            follows: MockFollows::with(vec![], vec![(me.id, author.id)]),
        };
        usecase.execute(me.id, author.id).await.unwrap();
        assert!(usecase.follows.edges.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_subscriptions_with_recipe_previews() {
        let me = user("me_myself");
        let mut author = user("author");
        author.recipes_count = 3;
        let usecase = ListSubscriptionsUseCase {
            follows: MockFollows::with(vec![author.clone()], vec![(me.id, author.id)]),
            recipes: MockRecipes::with(
                vec![recipe(1, author.id), recipe(2, author.id), recipe(3, author.id)],
                vec![author.clone()],
            ),
        };
        let page = usecase
            .execute(me.id, PageRequest::default(), Some(2))
            .await
            .unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.results[0].recipes.len(), 2);
        assert_eq!(page.results[0].recipes_count, 3);
    }

    #[tokio::test]
    async fn should_flag_followers_followed_back() {
        let me = user("me_myself");
        let mutual = user("mutual");
        let fan = user("fan");
        let usecase = ListFollowersUseCase {
            follows: MockFollows::with(
                vec![mutual.clone(), fan.clone()],
                vec![(mutual.id, me.id), (fan.id, me.id), (me.id, mutual.id)],
            ),
        };
        let page = usecase.execute(me.id, PageRequest::default()).await.unwrap();
        assert_eq!(page.count, 2);
        assert!(page.results[0].is_subscribed);
        assert!(!page.results[1].is_subscribed);
    }
}
