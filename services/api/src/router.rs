use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use pantry_core::health::{healthz, readyz};
use pantry_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, logout},
    collection::{
        add_favorite, add_to_shopping_cart, list_favorites, list_shopping_cart, remove_favorite,
        remove_from_shopping_cart,
    },
    follow::{follow, followers, subscriptions, unfollow},
    ingredient::{create_ingredient, get_ingredient, list_ingredients},
    recipe::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe},
    shopping_list::download_shopping_list,
    tag::{create_tag, get_tag, list_tags},
    user::{
        author_recipes, delete_user, get_me, get_user, list_users, register, set_password,
        update_me, update_user,
    },
};
use crate::state::AppState;

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register))
        .route("/me", get(get_me).patch(update_me))
        .route("/set_password", post(set_password))
        // Follows
        .route("/subscriptions", get(subscriptions))
        .route("/following", get(subscriptions))
        .route("/followers", get(followers))
        .route("/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/{id}/subscribe", post(follow).delete(unfollow))
        .route("/{id}/follow", post(follow).delete(unfollow))
        .route("/{id}/recipes", get(author_recipes))
        .route("/{id}/meals", get(author_recipes))
}

fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags).post(create_tag))
        .route("/{id}", get(get_tag))
}

fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ingredients).post(create_ingredient))
        .route("/{id}", get(get_ingredient))
}

fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes).post(create_recipe))
        .route(
            "/{id}",
            get(get_recipe).patch(update_recipe).delete(delete_recipe),
        )
        // Favorites
        .route("/favorites", get(list_favorites))
        .route("/{id}/favorite", post(add_favorite).delete(remove_favorite))
        .route("/{id}/bookmark", post(add_favorite).delete(remove_favorite))
        // Shopping cart
        .route("/shopping_cart", get(list_shopping_cart))
        .route(
            "/{id}/shopping_cart",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .route(
            "/{id}/meal_plan",
            post(add_to_shopping_cart).delete(remove_from_shopping_cart),
        )
        .route("/download_shopping_cart", get(download_shopping_list))
        .route("/download_shopping_list", get(download_shopping_list))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/token/login", post(login))
        .route("/auth/token/logout", post(logout))
        .nest("/users", user_routes())
        .nest("/chefs", user_routes())
        .nest("/tags", tag_routes())
        .nest("/categories", tag_routes())
        .nest("/ingredients", ingredient_routes())
        .nest("/products", ingredient_routes())
        .nest("/recipes", recipe_routes())
        .nest("/dishes", recipe_routes())
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes());

    if let Some(mount) = state.media.mount_path() {
        router = router.nest_service(&mount, ServeDir::new(&state.media.root));
    }

    router
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
