//! In-memory repositories for use case tests.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use pantry_auth_types::identity::Identity;
use pantry_domain::pagination::{Page, PageRequest};
use pantry_domain::shopping_list::ShoppingListItem;
use pantry_domain::user::UserRole;

use crate::domain::repository::{
    CollectionRepository, FollowRepository, ImageStore, IngredientRepository, RecipeRepository,
    ShoppingListRepository, TagRepository, UserRepository,
};
use crate::domain::types::{
    Collection, Ingredient, NewIngredient, NewRecipe, NewTag, ProfilePatch, Recipe,
    RecipeChanges, RecipeDetail, RecipeFilter, RecipeIngredient, Tag, User,
};
use crate::error::ApiError;

pub fn user(username: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: format!("{username}@example.com"),
        username: username.to_owned(),
        first_name: "Test".into(),
        last_name: "User".into(),
        password_hash: String::new(),
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
    }
}

pub fn recipe(id: i32, author_id: Uuid) -> Recipe {
    let now = Utc::now();
    Recipe {
        id,
        author_id,
        name: format!("recipe {id}"),
        text: "Mix and serve.".into(),
        cooking_time: 10,
        image: format!("recipes/{id}.png"),
        created_at: now,
        updated_at: now,
    }
}

pub fn identity(user_id: Uuid) -> Identity {
    Identity {
        user_id,
        user_role: UserRole::Normal,
    }
}

pub fn admin(user_id: Uuid) -> Identity {
    Identity {
        user_id,
        user_role: UserRole::Admin,
    }
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let page = page.clamped();
    let results = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .cloned()
        .collect();
    Page::new(items.len() as u64, results)
}

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUsers {
    pub users: Mutex<Vec<User>>,
    pub deleted: Mutex<Vec<Uuid>>,
}

impl MockUsers {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl UserRepository for MockUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<bool, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.email == email || u.username == username))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, ApiError> {
        Ok(paginate(&self.users.lock().unwrap(), page))
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<User, ApiError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        if let Some(ref v) = patch.first_name {
            user.first_name = v.clone();
        }
        if let Some(ref v) = patch.last_name {
            user.last_name = v.clone();
        }
        if let Some(ref v) = patch.bio {
            user.bio = v.clone();
        }
        if let Some(ref v) = patch.website {
            user.website = v.clone();
        }
        if let Some(ref v) = patch.location {
            user.location = v.clone();
        }
        if let Some(ref v) = patch.avatar {
            user.avatar = Some(v.clone());
        }
        Ok(user.clone())
    }

    async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_owned();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.users.lock().unwrap().retain(|u| u.id != id);
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

// ── Follows ──────────────────────────────────────────────────────────────────

/// Edges are `(user_id, author_id)`; `users` resolves ids for list queries.
#[derive(Default)]
pub struct MockFollows {
    pub edges: Mutex<Vec<(Uuid, Uuid)>>,
    pub users: Vec<User>,
}

impl MockFollows {
    pub fn with(users: Vec<User>, edges: Vec<(Uuid, Uuid)>) -> Self {
        Self {
            edges: Mutex::new(edges),
            users,
        }
    }

    fn resolve(&self, ids: Vec<Uuid>) -> Vec<User> {
        ids.into_iter()
            .filter_map(|id| self.users.iter().find(|u| u.id == id).cloned())
            .collect()
    }
}

impl FollowRepository for MockFollows {
    async fn follow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let mut edges = self.edges.lock().unwrap();
        if edges.contains(&(user_id, author_id)) {
            return Ok(false);
        }
        edges.push((user_id, author_id));
        Ok(true)
    }

    async fn unfollow(&self, user_id: Uuid, author_id: Uuid) -> Result<bool, ApiError> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| *e != (user_id, author_id));
        Ok(edges.len() < before)
    }

    async fn following(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        let ids = self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| *u == user_id)
            .map(|(_, a)| *a)
            .collect();
        Ok(paginate(&self.resolve(ids), page))
    }

    async fn followers(&self, user_id: Uuid, page: PageRequest) -> Result<Page<User>, ApiError> {
        let ids = self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, a)| *a == user_id)
            .map(|(u, _)| *u)
            .collect();
        Ok(paginate(&self.resolve(ids), page))
    }

    async fn followed_among(
        &self,
        user_id: Uuid,
        author_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, a)| *u == user_id && author_ids.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }
}

// ── Tags / ingredients ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockTags {
    pub tags: Mutex<Vec<Tag>>,
}

impl MockTags {
    pub fn with(tags: Vec<Tag>) -> Self {
        Self {
            tags: Mutex::new(tags),
        }
    }
}

impl TagRepository for MockTags {
    async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        Ok(self.tags.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Tag>, ApiError> {
        Ok(self.tags.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let mut tags = self.tags.lock().unwrap();
        if tags
            .iter()
            .any(|t| t.name == tag.name || t.color == tag.color || t.slug == tag.slug)
        {
            return Err(ApiError::TagAlreadyExists);
        }
        let created = Tag {
            id: tags.len() as i32 + 1,
            name: tag.name.clone(),
            color: tag.color.clone(),
            slug: tag.slug.clone(),
        };
        tags.push(created.clone());
        Ok(created)
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        Ok(self
            .tags
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

pub fn tag(id: i32, slug: &str) -> Tag {
    Tag {
        id,
        name: slug.to_uppercase(),
        color: format!("#{:06X}", id),
        slug: slug.to_owned(),
    }
}

#[derive(Default)]
pub struct MockIngredients {
    pub ingredients: Mutex<Vec<Ingredient>>,
}

impl MockIngredients {
    pub fn with(ingredients: Vec<Ingredient>) -> Self {
        Self {
            ingredients: Mutex::new(ingredients),
        }
    }
}

impl IngredientRepository for MockIngredients {
    async fn list(&self, name_prefix: Option<&str>) -> Result<Vec<Ingredient>, ApiError> {
        let prefix = name_prefix.map(str::to_lowercase).unwrap_or_default();
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.name.to_lowercase().starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Ingredient>, ApiError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn create(&self, ingredient: &NewIngredient) -> Result<Ingredient, ApiError> {
        let mut ingredients = self.ingredients.lock().unwrap();
        if ingredients.iter().any(|i| {
            i.name == ingredient.name && i.measurement_unit == ingredient.measurement_unit
        }) {
            return Err(ApiError::IngredientAlreadyExists);
        }
        let created = Ingredient {
            id: ingredients.len() as i32 + 1,
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
        };
        ingredients.push(created.clone());
        Ok(created)
    }

    async fn existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, ApiError> {
        Ok(self
            .ingredients
            .lock()
            .unwrap()
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }
}

pub fn ingredient(id: i32, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id,
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
    }
}

// ── Recipes ──────────────────────────────────────────────────────────────────

/// Details are built from `authors` and `ingredients`; tags are left empty.
#[derive(Default)]
pub struct MockRecipes {
    pub recipes: Mutex<Vec<Recipe>>,
    pub authors: Vec<User>,
    pub ingredients: Vec<Ingredient>,
    pub created: Mutex<Vec<NewRecipe>>,
    pub updated: Mutex<Vec<(i32, RecipeChanges)>>,
    pub deleted: Mutex<Vec<i32>>,
    pub last_filter: Mutex<Option<RecipeFilter>>,
    /// Make `create` and `update` fail as if a concurrent write took the name.
    pub fail_writes: bool,
}

impl MockRecipes {
    pub fn with(recipes: Vec<Recipe>, authors: Vec<User>) -> Self {
        Self {
            recipes: Mutex::new(recipes),
            authors,
            ..Default::default()
        }
    }
}

impl RecipeRepository for MockRecipes {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, ApiError> {
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        let matching: Vec<Recipe> = self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| filter.author_id.is_none_or(|a| r.author_id == a))
            .cloned()
            .collect();
        Ok(paginate(&matching, page))
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, ApiError> {
        Ok(self
            .recipes
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.author_id == author_id)
            .take(limit.map_or(usize::MAX, |l| l as usize))
            .cloned()
            .collect())
    }

    async fn load_details(&self, recipes: Vec<Recipe>) -> Result<Vec<RecipeDetail>, ApiError> {
        recipes
            .into_iter()
            .map(|recipe| {
                let author = self
                    .authors
                    .iter()
                    .find(|u| u.id == recipe.author_id)
                    .cloned()
                    .ok_or(ApiError::UserNotFound)?;
                Ok(RecipeDetail {
                    recipe,
                    author,
                    tags: Vec::new(),
                    ingredients: self
                        .ingredients
                        .iter()
                        .map(|i| RecipeIngredient {
                            ingredient: i.clone(),
                            amount: 1,
                        })
                        .collect(),
                })
            })
            .collect()
    }

    async fn name_taken(
        &self,
        author_id: Uuid,
        name: &str,
        except_id: Option<i32>,
    ) -> Result<bool, ApiError> {
        Ok(self.recipes.lock().unwrap().iter().any(|r| {
            r.author_id == author_id && r.name == name && Some(r.id) != except_id
        }))
    }

    async fn create(&self, new: &NewRecipe) -> Result<Recipe, ApiError> {
        if self.fail_writes {
            return Err(ApiError::RecipeAlreadyExists);
        }
        let mut recipes = self.recipes.lock().unwrap();
        let mut created = recipe(recipes.len() as i32 + 1, new.author_id);
        created.name = new.name.clone();
        created.text = new.text.clone();
        created.cooking_time = new.cooking_time;
        created.image = new.image.clone();
        recipes.push(created.clone());
        self.created.lock().unwrap().push(new.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &RecipeChanges) -> Result<Recipe, ApiError> {
        if self.fail_writes {
            return Err(ApiError::RecipeAlreadyExists);
        }
        self.updated.lock().unwrap().push((id, changes.clone()));
        let mut recipes = self.recipes.lock().unwrap();
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ApiError::RecipeNotFound)?;
        if let Some(ref name) = changes.name {
            recipe.name = name.clone();
        }
        if let Some(cooking_time) = changes.cooking_time {
            recipe.cooking_time = cooking_time;
        }
        if let Some(ref image) = changes.image {
            recipe.image = image.clone();
        }
        Ok(recipe.clone())
    }

    async fn delete(&self, recipe: &Recipe) -> Result<(), ApiError> {
        self.recipes.lock().unwrap().retain(|r| r.id != recipe.id);
        self.deleted.lock().unwrap().push(recipe.id);
        Ok(())
    }
}

// ── Collections ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCollections {
    pub entries: Mutex<Vec<(Collection, Uuid, i32)>>,
    pub recipes: Vec<Recipe>,
}

impl MockCollections {
    pub fn with(entries: Vec<(Collection, Uuid, i32)>) -> Self {
        Self {
            entries: Mutex::new(entries),
            recipes: Vec::new(),
        }
    }
}

impl CollectionRepository for MockCollections {
    async fn add(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = (collection, user_id, recipe_id);
        if entries.contains(&entry) {
            return Ok(false);
        }
        entries.push(entry);
        Ok(true)
    }

    async fn remove(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_id: i32,
    ) -> Result<bool, ApiError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| *e != (collection, user_id, recipe_id));
        Ok(entries.len() < before)
    }

    async fn list(&self, collection: Collection, user_id: Uuid) -> Result<Vec<Recipe>, ApiError> {
        let entries = self.entries.lock().unwrap();
        Ok(self
            .recipes
            .iter()
            .filter(|r| entries.contains(&(collection, user_id, r.id)))
            .cloned()
            .collect())
    }

    async fn contained_among(
        &self,
        collection: Collection,
        user_id: Uuid,
        recipe_ids: &[i32],
    ) -> Result<Vec<i32>, ApiError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, u, r)| *c == collection && *u == user_id && recipe_ids.contains(r))
            .map(|(_, _, r)| *r)
            .collect())
    }
}

// ── Shopping list / images ───────────────────────────────────────────────────

pub struct MockShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingListRepository for MockShoppingList {
    async fn cart_lines(&self, _user_id: Uuid) -> Result<Vec<ShoppingListItem>, ApiError> {
        Ok(self.items.clone())
    }
}

/// Accepts any `data:image/` URL without decoding it.
#[derive(Default)]
pub struct MockImages {
    pub saved: Mutex<Vec<String>>,
    pub removed: Mutex<Vec<String>>,
}

impl ImageStore for MockImages {
    async fn save(&self, data_url: &str, folder: &str) -> Result<String, ApiError> {
        if !data_url.starts_with("data:image/") {
            return Err(ApiError::InvalidImage);
        }
        let mut saved = self.saved.lock().unwrap();
        let path = format!("{folder}/{}.png", saved.len() + 1);
        saved.push(path.clone());
        Ok(path)
    }

    async fn remove(&self, path: &str) {
        self.removed.lock().unwrap().push(path.to_owned());
    }

    fn url(&self, path: &str) -> String {
        format!("/media/{path}")
    }
}
