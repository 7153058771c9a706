//! Success envelopes. Every body carries `success: true`.

use crate::model::{CategoryMap, Question};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CategoriesBody {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Paginated question listing, shared by list, search, category filter and delete.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    /// Always serialized; `null` outside the category-filtered listing.
    pub current_category: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_question: Option<i32>,
}

impl QuestionPage {
    pub fn new(questions: Vec<Question>, total_questions: usize, categories: CategoryMap) -> Self {
        QuestionPage {
            success: true,
            questions,
            total_questions,
            categories,
            current_category: None,
            deleted_question: None,
        }
    }

    pub fn in_category(mut self, category_id: i32) -> Self {
        self.current_category = Some(category_id);
        self
    }

    pub fn after_delete(mut self, id: i32) -> Self {
        self.deleted_question = Some(id);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct QuizBody {
    pub success: bool,
    pub question: Option<Question>,
    pub total_cat_questions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_serializes_null_current_category_and_omits_deleted() {
        let body = serde_json::to_value(QuestionPage::new(vec![], 0, CategoryMap::new())).unwrap();
        assert!(body["current_category"].is_null());
        assert!(body.get("current_category").is_some());
        assert!(body.get("deleted_question").is_none());
    }

    #[test]
    fn delete_envelope_carries_id() {
        let body = serde_json::to_value(QuestionPage::new(vec![], 3, CategoryMap::new()).after_delete(9)).unwrap();
        assert_eq!(body["deleted_question"], 9);
        assert_eq!(body["total_questions"], 3);
    }
}
