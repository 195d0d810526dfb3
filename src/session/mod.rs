use crate::quiz::{ProfileCatalog, Question, QuizDefinition, ResultStrings};
use crate::scoring::{compute_profile, ProfileResult};

/// Result of an `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the next question.
    Next,
    /// Was on the last question; the session is now completed and the
    /// final result is available.
    Completed,
    /// Rejected: the current question has no recorded answer.
    NeedsAnswer,
    /// Rejected: the session already completed; only `reset` leaves it.
    AlreadyCompleted,
}

/// Result of a `retreat` call.
#[derive(Debug, Clone, PartialEq)]
pub enum Retreat {
    /// Moved to the previous question.
    Previous,
    /// Already on the first question; the caller decides what "exit to
    /// start" means (the TUI returns to the landing screen).
    AtStart,
    /// Rejected: the session already completed.
    AlreadyCompleted,
}

/// Rejected `select_answer` calls. State is never mutated on rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectError {
    QuestionOutOfRange,
    OptionOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
}

/// One user's traversal of the quiz: the single source of truth for where
/// the user is and what they have chosen so far.
///
/// The definition and catalog are expected to have passed `validate_quiz`
/// before a session is constructed.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: QuizDefinition,
    catalog: ProfileCatalog,
    strings: ResultStrings,
    current_index: usize,
    answers: Vec<Option<usize>>,
    final_result: Option<ProfileResult>,
}

impl QuizSession {
    pub fn new(quiz: QuizDefinition, catalog: ProfileCatalog, strings: ResultStrings) -> Self {
        let answers = vec![None; quiz.len()];
        Self {
            quiz,
            catalog,
            strings,
            current_index: 0,
            answers,
            final_result: None,
        }
    }

    pub fn quiz(&self) -> &QuizDefinition {
        &self.quiz
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    /// The question at the current position. `None` once completed.
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_completed() {
            return None;
        }
        self.quiz.question(self.current_index)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            index: self.current_index,
            total: self.quiz.len(),
        }
    }

    /// The recorded option index for the current question, surfaced so the
    /// presentation layer can pre-select it.
    pub fn selected_option(&self) -> Option<usize> {
        self.answer_at(self.current_index)
    }

    pub fn answer_at(&self, question_index: usize) -> Option<usize> {
        self.answers.get(question_index).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn can_advance(&self) -> bool {
        !self.is_completed() && self.selected_option().is_some()
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_completed() && self.current_index > 0
    }

    pub fn is_completed(&self) -> bool {
        self.final_result.is_some()
    }

    pub fn final_result(&self) -> Option<&ProfileResult> {
        self.final_result.as_ref()
    }

    /// Record an answer. Re-selection overwrites; last selection wins.
    /// Out-of-range indices are rejected without mutating state.
    pub fn select_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), SelectError> {
        let Some(question) = self.quiz.question(question_index) else {
            return Err(SelectError::QuestionOutOfRange);
        };
        if option_index >= question.options.len() {
            return Err(SelectError::OptionOutOfRange);
        }
        self.answers[question_index] = Some(option_index);
        Ok(())
    }

    /// Move forward. Requires a recorded answer for the current question;
    /// the presentation layer is expected to have disabled the control,
    /// but the session re-validates rather than trusting it.
    ///
    /// Advancing past the last question completes the session and computes
    /// the final result. Completion is one-way; only `reset` leaves it.
    pub fn advance(&mut self) -> Advance {
        if self.is_completed() {
            return Advance::AlreadyCompleted;
        }
        if self.selected_option().is_none() {
            return Advance::NeedsAnswer;
        }
        if self.current_index + 1 < self.quiz.len() {
            self.current_index += 1;
            Advance::Next
        } else {
            self.final_result = Some(compute_profile(
                &self.answers,
                &self.quiz,
                &self.catalog,
                &self.strings,
            ));
            Advance::Completed
        }
    }

    /// Move backward. At the first question this is a no-op signal; the
    /// recorded answer for the position moved to stays in place.
    pub fn retreat(&mut self) -> Retreat {
        if self.is_completed() {
            return Retreat::AlreadyCompleted;
        }
        if self.current_index == 0 {
            return Retreat::AtStart;
        }
        self.current_index -= 1;
        Retreat::Previous
    }

    /// Back to the initial state: first question, no answers, no result.
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.answers = vec![None; self.quiz.len()];
        self.final_result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::builtin_questionnaire;
    use crate::scoring::ResultKind;

    fn session() -> QuizSession {
        let (quiz, catalog) = builtin_questionnaire();
        QuizSession::new(quiz, catalog, ResultStrings::default())
    }

    fn answer_and_advance(session: &mut QuizSession, option: usize) -> Advance {
        let index = session.progress().index;
        session.select_answer(index, option).unwrap();
        session.advance()
    }

    #[test]
    fn starts_at_first_question_with_nothing_selected() {
        let session = session();
        assert_eq!(session.progress(), Progress { index: 0, total: 5 });
        assert_eq!(session.selected_option(), None);
        assert!(!session.can_advance());
        assert!(!session.can_retreat());
        assert!(session.final_result().is_none());
    }

    #[test]
    fn advance_without_answer_is_rejected_without_mutation() {
        let mut session = session();
        assert_eq!(session.advance(), Advance::NeedsAnswer);
        assert_eq!(session.progress().index, 0);
    }

    #[test]
    fn retreat_at_start_is_rejected_without_mutation() {
        let mut session = session();
        assert_eq!(session.retreat(), Retreat::AtStart);
        assert_eq!(session.progress().index, 0);
    }

    #[test]
    fn select_enables_advance() {
        let mut session = session();
        session.select_answer(0, 1).unwrap();
        assert!(session.can_advance());
        assert_eq!(session.advance(), Advance::Next);
        assert_eq!(session.progress().index, 1);
        assert!(session.can_retreat());
    }

    #[test]
    fn reselection_overwrites_last_wins() {
        let mut session = session();
        session.select_answer(0, 1).unwrap();
        session.select_answer(0, 3).unwrap();
        assert_eq!(session.selected_option(), Some(3));
    }

    #[test]
    fn out_of_range_selection_rejected() {
        let mut session = session();
        assert_eq!(
            session.select_answer(99, 0),
            Err(SelectError::QuestionOutOfRange)
        );
        assert_eq!(
            session.select_answer(0, 99),
            Err(SelectError::OptionOutOfRange)
        );
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn retreat_surfaces_prior_answer() {
        let mut session = session();
        session.select_answer(0, 2).unwrap();
        session.advance();
        assert_eq!(session.selected_option(), None);
        assert_eq!(session.retreat(), Retreat::Previous);
        assert_eq!(session.selected_option(), Some(2));
    }

    #[test]
    fn completing_the_quiz_produces_a_result() {
        let mut session = session();
        for _ in 0..4 {
            assert_eq!(answer_and_advance(&mut session, 0), Advance::Next);
        }
        assert_eq!(answer_and_advance(&mut session, 0), Advance::Completed);
        assert!(session.is_completed());
        let result = session.final_result().unwrap();
        // Option 0 of every builtin question scores "chocolatey".
        assert_eq!(
            result.kind,
            ResultKind::Dominant {
                key: "chocolatey".to_string()
            }
        );
    }

    #[test]
    fn completion_is_one_way() {
        let mut session = session();
        for _ in 0..5 {
            answer_and_advance(&mut session, 0);
        }
        assert_eq!(session.advance(), Advance::AlreadyCompleted);
        assert_eq!(session.retreat(), Retreat::AlreadyCompleted);
        assert!(session.is_completed());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn answers_survive_navigation_for_final_scoring() {
        let mut session = session();
        // Walk forward picking option 1 everywhere, then back to the
        // start, then forward again without re-answering.
        for _ in 0..4 {
            answer_and_advance(&mut session, 1);
        }
        session.select_answer(4, 1).unwrap();
        for _ in 0..4 {
            session.retreat();
        }
        assert_eq!(session.progress().index, 0);
        assert_eq!(session.answered_count(), 5);
        for _ in 0..4 {
            assert_eq!(session.advance(), Advance::Next);
        }
        assert_eq!(session.advance(), Advance::Completed);
        assert_eq!(
            session.final_result().unwrap().kind,
            ResultKind::Dominant {
                key: "fruity".to_string()
            }
        );
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut session = session();
        for _ in 0..5 {
            answer_and_advance(&mut session, 0);
        }
        assert!(session.is_completed());
        session.reset();
        assert_eq!(session.progress(), Progress { index: 0, total: 5 });
        assert_eq!(session.answered_count(), 0);
        assert!(session.final_result().is_none());
        assert!(!session.is_completed());
    }

    #[test]
    fn selecting_a_non_current_question_is_allowed_in_range() {
        let mut session = session();
        session.select_answer(3, 2).unwrap();
        assert_eq!(session.answer_at(3), Some(2));
        assert_eq!(session.selected_option(), None);
    }
}
