//! In-process store with the same observable behavior as [`super::PgStore`].

use super::TriviaStore;
use crate::error::StoreError;
use crate::model::{Category, NewQuestion, Question, QuizFilter, SortOrder};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    /// Kept ascending by id.
    questions: Vec<Question>,
    next_question_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given category labels (ids 1..=n).
    pub fn with_categories<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories = labels
            .into_iter()
            .zip(1..)
            .map(|(label, id)| Category { id, kind: label.into() })
            .collect();
        MemoryStore {
            tables: RwLock::new(Tables {
                categories,
                ..Tables::default()
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl TriviaStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.read()?.categories.clone())
    }

    async fn questions(&self, order: SortOrder) -> Result<Vec<Question>, StoreError> {
        let mut out = self.read()?.questions.clone();
        if order == SortOrder::Descending {
            out.reverse();
        }
        Ok(out)
    }

    async fn questions_in_category(&self, category_id: i32) -> Result<Vec<Question>, StoreError> {
        Ok(self
            .read()?
            .questions
            .iter()
            .filter(|q| q.category == category_id)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        Ok(self
            .read()?
            .questions
            .iter()
            .rev()
            .filter(|q| q.question.to_lowercase().contains(&needle) || q.answer.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, new: &NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.write()?;
        tables.next_question_id = tables
            .next_question_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Rejected("question id sequence exhausted".into()))?;
        let question = Question {
            id: tables.next_question_id,
            question: new.question.clone(),
            answer: new.answer.clone(),
            category: new.category,
            difficulty: new.difficulty,
        };
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn delete_question(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() != before)
    }

    async fn random_question(&self, filter: &QuizFilter) -> Result<Option<Question>, StoreError> {
        let tables = self.read()?;
        let candidates: Vec<&Question> = tables
            .questions
            .iter()
            .filter(|q| !filter.exclude.contains(&q.id))
            .filter(|q| filter.category.map_or(true, |c| q.category == c))
            .collect();
        Ok(candidates.choose(&mut rand::thread_rng()).map(|q| (*q).clone()))
    }

    async fn count_questions(&self, category: Option<i32>) -> Result<i64, StoreError> {
        let tables = self.read()?;
        let n = tables
            .questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .count();
        Ok(n as i64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(text: &str, answer: &str, category: i32) -> NewQuestion {
        NewQuestion {
            question: text.into(),
            answer: answer.into(),
            difficulty: 1,
            category,
        }
    }

    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let store = MemoryStore::new();
        let a = store.insert_question(&new_question("a", "a", 1)).await.unwrap();
        let b = store.insert_question(&new_question("b", "b", 1)).await.unwrap();
        assert!(b.id > a.id);
        assert!(store.delete_question(b.id).await.unwrap());
        let c = store.insert_question(&new_question("c", "c", 1)).await.unwrap();
        assert!(c.id > b.id);
    }

    #[tokio::test]
    async fn delete_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_question(42).await.unwrap());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_newest_first() {
        let store = MemoryStore::new();
        store.insert_question(&new_question("What is the TITLE?", "x", 1)).await.unwrap();
        store.insert_question(&new_question("Unrelated", "no", 1)).await.unwrap();
        store.insert_question(&new_question("Other", "subtitle", 2)).await.unwrap();
        let hits = store.search_questions("title").await.unwrap();
        let ids: Vec<i32> = hits.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn random_respects_exclusion_and_category() {
        let store = MemoryStore::with_categories(["Science", "Art"]);
        for i in 0..4 {
            store
                .insert_question(&new_question(&format!("q{}", i), "a", if i % 2 == 0 { 1 } else { 2 }))
                .await
                .unwrap();
        }
        let filter = QuizFilter { exclude: vec![1], category: Some(1) };
        let picked = store.random_question(&filter).await.unwrap().unwrap();
        assert_eq!(picked.id, 3);
        let filter = QuizFilter { exclude: vec![1, 3], category: Some(1) };
        assert!(store.random_question(&filter).await.unwrap().is_none());
        assert_eq!(store.count_questions(Some(2)).await.unwrap(), 2);
        assert_eq!(store.count_questions(None).await.unwrap(), 4);
    }
}
