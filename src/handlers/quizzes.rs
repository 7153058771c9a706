//! Random question selection for quiz play.

use crate::error::AppError;
use crate::extractors::JsonObject;
use crate::response::QuizBody;
use crate::service::QuizRequest;
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn next_question(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<QuizBody>, AppError> {
    let req = QuizRequest::parse(body)?;
    Ok(Json(state.service().next_quiz_question(&req).await?))
}
