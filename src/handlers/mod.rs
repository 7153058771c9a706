//! HTTP handlers for categories, questions and quizzes.

pub mod categories;
pub mod questions;
pub mod quizzes;

use crate::error::AppError;

/// Integer path id. A non-integer segment does not name any resource.
fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("'{}' is not a valid id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_non_integers_as_not_found() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound(_))));
    }
}
