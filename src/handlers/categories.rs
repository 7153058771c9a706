//! Category listing and category-filtered question listing.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::Page;
use crate::response::{CategoriesBody, QuestionPage};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoriesBody>, AppError> {
    Ok(Json(state.service().categories().await?))
}

pub async fn questions_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Page(page): Page,
) -> Result<Json<QuestionPage>, AppError> {
    let category_id = parse_id(&category_id)?;
    Ok(Json(state.service().questions_in_category(category_id, page).await?))
}
