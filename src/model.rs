//! Row types for the trivia tables and their JSON projections.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub kind: String,
}

/// A stored question. Serializes as the formatted projection
/// `{id, question, answer, category, difficulty}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

/// A question that passed request validation and is ready to insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i32,
}

/// Category id to label, as returned under `categories` in every listing.
/// Keys serialize as strings, matching JSON object semantics.
pub type CategoryMap = BTreeMap<i32, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}

/// Id ordering for question listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Selection criteria for a quiz round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizFilter {
    pub exclude: Vec<i32>,
    /// `None` means any category.
    pub category: Option<i32>,
}
