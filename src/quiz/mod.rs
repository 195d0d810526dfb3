pub mod builtin;
pub mod types;

pub use builtin::builtin_questionnaire;
pub use types::{AnswerOption, Profile, ProfileCatalog, Question, QuizDefinition, ResultStrings};
