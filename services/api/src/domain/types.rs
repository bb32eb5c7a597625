use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pantry_domain::user::UserRole;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub bio: String,
    /// Media path of the avatar image.
    pub avatar: Option<String>,
    pub website: String,
    pub location: String,
    pub is_verified: bool,
    pub role: UserRole,
    pub followers_count: i32,
    pub following_count: i32,
    pub recipes_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields a user may change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.website.is_none()
            && self.location.is_none()
            && self.avatar.is_none()
    }
}

/// A user as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user: User,
    pub is_subscribed: bool,
}

/// A followed author with a preview of their recipes.
#[derive(Debug, Clone)]
pub struct SubscriptionView {
    pub author: User,
    pub recipes: Vec<Recipe>,
    pub recipes_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    /// Media path of the recipe image.
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ingredient reference in a recipe write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: i32,
    pub amount: i32,
}

#[derive(Debug, Clone)]
pub struct RecipeIngredient {
    pub ingredient: Ingredient,
    pub amount: i32,
}

/// Recipe with its author, tags and ingredient amounts loaded.
#[derive(Debug, Clone)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub author: User,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// A recipe as seen by a (possibly anonymous) viewer.
#[derive(Debug, Clone)]
pub struct RecipeView {
    pub detail: RecipeDetail,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub author_subscribed: bool,
}

#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub author_id: Uuid,
    pub name: String,
    pub text: String,
    pub cooking_time: i32,
    pub image: String,
    pub ingredients: Vec<IngredientAmount>,
    pub tag_ids: Vec<i32>,
}

/// Partial recipe update. `ingredients` / `tag_ids` replace the whole set when present.
#[derive(Debug, Clone, Default)]
pub struct RecipeChanges {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i32>,
    pub image: Option<String>,
    pub ingredients: Option<Vec<IngredientAmount>>,
    pub tag_ids: Option<Vec<i32>>,
}

/// Recipe list filters. Empty vectors and `None` mean "no constraint".
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub tag_slugs: Vec<String>,
    pub tag_ids: Vec<i32>,
    pub author_id: Option<Uuid>,
    pub favorited_by: Option<Uuid>,
    pub in_cart_of: Option<Uuid>,
}

/// Per-user recipe collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Favorites,
    ShoppingCart,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Favorites => f.write_str("favorites"),
            Self::ShoppingCart => f.write_str("shopping cart"),
        }
    }
}

/// Usernames: 1–150 chars of letters, digits and `.@+-_`; `me` is reserved.
pub fn validate_username(username: &str) -> bool {
    let len = username.chars().count();
    (1..=150).contains(&len)
        && username != "me"
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '@' | '+' | '-' | '_'))
}

pub fn validate_email(email: &str) -> bool {
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|part| !part.is_empty())
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// `#RRGGBB` hex color.
pub fn validate_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn validate_slug(slug: &str) -> bool {
    (1..=200).contains(&slug.len())
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_usernames_with_allowed_symbols() {
        assert!(validate_username("chef.anna+1@home_made-2"));
    }

    #[test]
    fn should_reject_reserved_and_malformed_usernames() {
        assert!(!validate_username("me"));
        assert!(!validate_username(""));
        assert!(!validate_username("has space"));
        assert!(!validate_username(&"a".repeat(151)));
    }

    #[test]
    fn should_validate_email_shape() {
        assert!(validate_email("cook@example.com"));
        assert!(!validate_email("cook.example.com"));
        assert!(!validate_email("cook@localhost"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("a@b@example.com"));
        assert!(!validate_email("cook@example..com"));
    }

    #[test]
    fn should_require_eight_char_password() {
        assert!(!validate_password("short"));
        assert!(validate_password("longenough"));
    }

    #[test]
    fn should_validate_hex_color() {
        assert!(validate_color("#E26C2D"));
        assert!(validate_color("#49b64e"));
        assert!(!validate_color("E26C2D"));
        assert!(!validate_color("#E26C2"));
        assert!(!validate_color("#GGGGGG"));
    }

    #[test]
    fn should_validate_slug() {
        assert!(validate_slug("breakfast"));
        assert!(validate_slug("low-carb_2"));
        assert!(!validate_slug(""));
        assert!(!validate_slug("with space"));
        assert!(!validate_slug("ünicode"));
    }

    #[test]
    fn should_detect_empty_profile_patch() {
        assert!(ProfilePatch::default().is_empty());
        let patch = ProfilePatch {
            bio: Some("Loves soup".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
