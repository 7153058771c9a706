//! Typed request schemas for the JSON bodies, checked before any store call.
//!
//! Shape problems (missing keys, wrong container types) are `BadRequest`.
//! Values the `questions` columns cannot hold are `Unprocessable`.

use crate::error::AppError;
use crate::model::{NewQuestion, QuizFilter};
use serde_json::{Map, Value};

const CREATE_FIELDS: [&str; 4] = ["question", "answer", "difficulty", "category"];

/// `POST /questions` is either a search or a creation.
#[derive(Clone, Debug, PartialEq)]
pub enum QuestionsRequest {
    Search { term: String },
    Create(QuestionDraft),
}

/// A creation payload whose four keys are present and non-null but not yet type-checked.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionDraft {
    pub question: Value,
    pub answer: Value,
    pub difficulty: Value,
    pub category: Value,
}

fn present<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

impl QuestionsRequest {
    pub fn parse(body: Map<String, Value>) -> Result<Self, AppError> {
        if let Some(term) = present(&body, "searchTerm") {
            return match term {
                Value::String(s) => Ok(QuestionsRequest::Search { term: s.clone() }),
                other => Err(AppError::BadRequest(format!("searchTerm must be a string, got {}", other))),
            };
        }
        let missing: Vec<&str> = CREATE_FIELDS
            .iter()
            .copied()
            .filter(|k| present(&body, k).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::BadRequest(format!(
                "expected searchTerm or all of {:?}; missing {:?}",
                CREATE_FIELDS, missing
            )));
        }
        let mut body = body;
        let mut take = |k: &str| body.remove(k).unwrap_or(Value::Null);
        Ok(QuestionsRequest::Create(QuestionDraft {
            question: take("question"),
            answer: take("answer"),
            difficulty: take("difficulty"),
            category: take("category"),
        }))
    }
}

impl TryFrom<QuestionDraft> for NewQuestion {
    type Error = AppError;

    fn try_from(draft: QuestionDraft) -> Result<Self, Self::Error> {
        Ok(NewQuestion {
            question: text_column("question", draft.question)?,
            answer: text_column("answer", draft.answer)?,
            difficulty: int_column("difficulty", &draft.difficulty)?,
            category: int_column("category", &draft.category)?,
        })
    }
}

fn text_column(field: &str, v: Value) -> Result<String, AppError> {
    match v {
        Value::String(s) => Ok(s),
        other => Err(AppError::Unprocessable(format!("{} must be text, got {}", field, other))),
    }
}

/// Accepts JSON integers and integer-valued strings that fit an INTEGER column.
pub fn int_column(field: &str, v: &Value) -> Result<i32, AppError> {
    let n = match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    n.and_then(|n| i32::try_from(n).ok())
        .ok_or_else(|| AppError::Unprocessable(format!("{} must be an integer, got {}", field, v)))
}

/// `POST /quizzes` body after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizRequest {
    pub previous_questions: Vec<i32>,
    /// Raw `quiz_category.id`; 0 means any category.
    pub category_id: i32,
}

impl QuizRequest {
    pub fn parse(body: Map<String, Value>) -> Result<Self, AppError> {
        let (previous, quiz_category) = match (present(&body, "previous_questions"), present(&body, "quiz_category")) {
            (Some(p), Some(c)) => (p, c),
            _ => {
                return Err(AppError::BadRequest(
                    "previous_questions and quiz_category are required".into(),
                ))
            }
        };
        let id = quiz_category
            .as_object()
            .and_then(|c| present(c, "id"))
            .ok_or_else(|| AppError::BadRequest("quiz_category.id is required".into()))?;

        let category_id = int_column("quiz_category.id", id)?;
        let previous_questions = match previous {
            Value::Array(items) => items
                .iter()
                .map(|v| int_column("previous_questions[]", v))
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(AppError::Unprocessable(format!(
                    "previous_questions must be an array, got {}",
                    other
                )))
            }
        };
        Ok(QuizRequest { previous_questions, category_id })
    }

    pub fn filter(&self) -> QuizFilter {
        QuizFilter {
            exclude: self.previous_questions.clone(),
            category: (self.category_id != 0).then_some(self.category_id),
        }
    }
}
