use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::Collection;

/// API service error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("tag not found")]
    TagNotFound,
    #[error("ingredient not found")]
    IngredientNotFound,
    #[error("recipe must have at least one ingredient")]
    EmptyIngredients,
    #[error("ingredients must not repeat")]
    DuplicateIngredients,
    #[error("tags must not repeat")]
    DuplicateTags,
    #[error("ingredient amount must be at least 1")]
    InvalidAmount,
    #[error("cooking time must be at least 1 minute")]
    InvalidCookingTime,
    #[error("ingredient {0} does not exist")]
    UnknownIngredient(i32),
    #[error("tag {0} does not exist")]
    UnknownTag(i32),
    #[error("invalid image")]
    InvalidImage,
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must be at least 8 characters")]
    WeakPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("color must be #RRGGBB")]
    InvalidColor,
    #[error("invalid slug")]
    InvalidSlug,
    #[error("cannot subscribe to yourself")]
    SelfFollow,
    #[error("already subscribed")]
    AlreadyFollowing,
    #[error("not subscribed")]
    NotFollowing,
    #[error("recipe already in {0}")]
    AlreadyInCollection(Collection),
    #[error("recipe not in {0}")]
    NotInCollection(Collection),
    #[error("shopping list is empty")]
    ShoppingListEmpty,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("recipe already exists")]
    RecipeAlreadyExists,
    #[error("tag already exists")]
    TagAlreadyExists,
    #[error("ingredient already exists")]
    IngredientAlreadyExists,
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid query string: {0}")]
    InvalidQuery(String),
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::TagNotFound => "TAG_NOT_FOUND",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
            Self::EmptyIngredients => "EMPTY_INGREDIENTS",
            Self::DuplicateIngredients => "DUPLICATE_INGREDIENTS",
            Self::DuplicateTags => "DUPLICATE_TAGS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidCookingTime => "INVALID_COOKING_TIME",
            Self::UnknownIngredient(_) => "UNKNOWN_INGREDIENT",
            Self::UnknownTag(_) => "UNKNOWN_TAG",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::EmptyField(_) => "EMPTY_FIELD",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidColor => "INVALID_COLOR",
            Self::InvalidSlug => "INVALID_SLUG",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::NotFollowing => "NOT_FOLLOWING",
            Self::AlreadyInCollection(_) => "ALREADY_IN_COLLECTION",
            Self::NotInCollection(_) => "NOT_IN_COLLECTION",
            Self::ShoppingListEmpty => "SHOPPING_LIST_EMPTY",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::RecipeAlreadyExists => "RECIPE_ALREADY_EXISTS",
            Self::TagAlreadyExists => "TAG_ALREADY_EXISTS",
            Self::IngredientAlreadyExists => "INGREDIENT_ALREADY_EXISTS",
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::InvalidQuery(_) => "INVALID_QUERY",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::RecipeNotFound
            | Self::TagNotFound
            | Self::IngredientNotFound => StatusCode::NOT_FOUND,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
