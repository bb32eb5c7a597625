use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use pantry_auth_types::identity::JwtSecret;

use crate::config::ApiConfig;
use crate::infra::db::{
    DbCollectionRepository, DbFollowRepository, DbIngredientRepository, DbRecipeRepository,
    DbShoppingListRepository, DbTagRepository, DbUserRepository,
};
use crate::infra::media::FsImageStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub media: FsImageStore,
    pub cookie_domain: Option<String>,
    pub token_ttl: u64,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &ApiConfig) -> Self {
        Self {
            db,
            jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
            media: FsImageStore::new(&config.media_root, &config.media_url),
            cookie_domain: config.cookie_domain.clone(),
            token_ttl: config.token_ttl_secs,
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn tag_repo(&self) -> DbTagRepository {
        DbTagRepository {
            db: self.db.clone(),
        }
    }

    pub fn ingredient_repo(&self) -> DbIngredientRepository {
        DbIngredientRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn collection_repo(&self) -> DbCollectionRepository {
        DbCollectionRepository {
            db: self.db.clone(),
        }
    }

    pub fn shopping_list_repo(&self) -> DbShoppingListRepository {
        DbShoppingListRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
