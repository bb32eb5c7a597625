use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};

use pantry_auth_types::identity::Identity;
use pantry_domain::shopping_list::SHOPPING_LIST_FILENAME;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_list(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = DownloadShoppingListUseCase {
        repo: state.shopping_list_repo(),
    };
    let document = usecase.execute(identity.user_id).await?;
    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_LIST_FILENAME}\""),
            ),
        ],
        document,
    ))
}
