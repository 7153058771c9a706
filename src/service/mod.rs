pub mod trivia;
pub mod validation;

pub use trivia::TriviaService;
pub use validation::{QuestionDraft, QuestionsRequest, QuizRequest};
