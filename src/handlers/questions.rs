//! Question listing, deletion, and the dual-purpose create/search POST.

use super::parse_id;
use crate::error::AppError;
use crate::extractors::{JsonObject, Page};
use crate::model::NewQuestion;
use crate::response::QuestionPage;
use crate::service::QuestionsRequest;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

pub async fn list_questions(State(state): State<AppState>, Page(page): Page) -> Result<Json<QuestionPage>, AppError> {
    Ok(Json(state.service().list_questions(page).await?))
}

pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Page(page): Page,
) -> Result<Json<QuestionPage>, AppError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service().delete_question(id, page).await?))
}

/// `{searchTerm}` searches; `{question, answer, difficulty, category}` creates.
pub async fn create_or_search(
    State(state): State<AppState>,
    Page(page): Page,
    JsonObject(body): JsonObject,
) -> Result<Response, AppError> {
    let service = state.service();
    match QuestionsRequest::parse(body)? {
        QuestionsRequest::Search { term } => Ok(Json(service.search_questions(&term, page).await?).into_response()),
        QuestionsRequest::Create(draft) => {
            let new = NewQuestion::try_from(draft)?;
            Ok(Json(service.create_question(new).await?).into_response())
        }
    }
}
