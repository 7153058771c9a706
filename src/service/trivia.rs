//! Trivia operations composed from store calls and pagination.

use crate::error::AppError;
use crate::model::{category_map, NewQuestion, Question, SortOrder};
use crate::pagination::Paginator;
use crate::response::{CategoriesBody, CreatedBody, QuestionPage, QuizBody};
use crate::service::validation::QuizRequest;
use crate::store::TriviaStore;

pub struct TriviaService<'a> {
    store: &'a dyn TriviaStore,
    paginator: Paginator,
}

impl<'a> TriviaService<'a> {
    pub fn new(store: &'a dyn TriviaStore, paginator: Paginator) -> Self {
        TriviaService { store, paginator }
    }

    /// Category id to label. An empty table yields an empty map.
    pub async fn categories(&self) -> Result<CategoriesBody, AppError> {
        let categories = category_map(self.store.categories().await?);
        Ok(CategoriesBody { success: true, categories })
    }

    /// Newest-first listing. 404 when the table is empty or the page is past the end.
    pub async fn list_questions(&self, page: i64) -> Result<QuestionPage, AppError> {
        let all = self.store.questions(SortOrder::Descending).await?;
        if all.is_empty() {
            return Err(AppError::NotFound("no questions stored".into()));
        }
        let items = self.page_or_not_found(&all, page)?;
        Ok(QuestionPage::new(items, all.len(), self.category_map().await?))
    }

    /// Delete by id, then list the remaining questions ascending by id.
    pub async fn delete_question(&self, id: i32, page: i64) -> Result<QuestionPage, AppError> {
        if !self.store.delete_question(id).await? {
            return Err(AppError::NotFound(format!("question {}", id)));
        }
        tracing::info!(id, "deleted question");
        let remaining = self.store.questions(SortOrder::Ascending).await?;
        let items = self.paginator.slice(&remaining, page).to_vec();
        Ok(QuestionPage::new(items, remaining.len(), self.category_map().await?).after_delete(id))
    }

    /// Literal substring search; an empty result is a success.
    pub async fn search_questions(&self, term: &str, page: i64) -> Result<QuestionPage, AppError> {
        let hits = self.store.search_questions(term).await?;
        let items = self.paginator.slice(&hits, page).to_vec();
        tracing::debug!(term, matches = hits.len(), "search");
        Ok(QuestionPage::new(items, hits.len(), self.category_map().await?))
    }

    pub async fn create_question(&self, new: NewQuestion) -> Result<CreatedBody, AppError> {
        let created = self.store.insert_question(&new).await?;
        tracing::info!(id = created.id, category = created.category, "created question");
        Ok(CreatedBody { success: true })
    }

    /// Listing filtered to one category. 404 when nothing matches, whether or not the category exists.
    pub async fn questions_in_category(&self, category_id: i32, page: i64) -> Result<QuestionPage, AppError> {
        let matching = self.store.questions_in_category(category_id).await?;
        if matching.is_empty() {
            return Err(AppError::NotFound(format!("no questions in category {}", category_id)));
        }
        let items = self.page_or_not_found(&matching, page)?;
        Ok(QuestionPage::new(items, matching.len(), self.category_map().await?).in_category(category_id))
    }

    /// Pick one unseen question at random. `question` is null once the pool is exhausted.
    pub async fn next_quiz_question(&self, req: &QuizRequest) -> Result<QuizBody, AppError> {
        let filter = req.filter();
        let question = self.store.random_question(&filter).await?;
        let total_cat_questions = self.store.count_questions(filter.category).await?;
        Ok(QuizBody {
            success: true,
            question,
            total_cat_questions,
        })
    }

    async fn category_map(&self) -> Result<crate::model::CategoryMap, AppError> {
        Ok(category_map(self.store.categories().await?))
    }

    fn page_or_not_found(&self, items: &[Question], page: i64) -> Result<Vec<Question>, AppError> {
        let slice = self.paginator.slice(items, page);
        if slice.is_empty() {
            return Err(AppError::NotFound(format!("page {} is out of range", page)));
        }
        Ok(slice.to_vec())
    }
}
