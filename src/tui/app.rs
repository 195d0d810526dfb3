use std::time::Instant;

use crate::config::CtaConfig;
use crate::contact::ContactDetails;
use crate::session::{Advance, QuizSession, Retreat};
use crate::submit::WebhookTarget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Landing,
    Question,
    Contact,
    ThankYou,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactField {
    Name,
    Email,
    Whatsapp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Sending,
    Delivered,
    Failed(String),
    Skipped,
}

pub struct App {
    pub session: QuizSession,
    pub screen: Screen,
    /// Option the cursor is on (question screen only).
    pub highlighted: usize,
    pub contact: ContactDetails,
    pub focused_field: ContactField,
    pub submit_state: SubmitState,
    /// Set by the key handler; the event loop spawns the delivery task.
    pub submit_requested: bool,
    pub webhook: Option<WebhookTarget>,
    pub cta: Option<CtaConfig>,
    pub show_breakdown: bool,
    pub flash_message: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    pub verbose: bool,
}

impl App {
    pub fn new(
        session: QuizSession,
        webhook: Option<WebhookTarget>,
        cta: Option<CtaConfig>,
        verbose: bool,
    ) -> Self {
        Self {
            session,
            screen: Screen::Landing,
            highlighted: 0,
            contact: ContactDetails::default(),
            focused_field: ContactField::Name,
            submit_state: SubmitState::Idle,
            submit_requested: false,
            webhook,
            cta,
            show_breakdown: false,
            flash_message: None,
            spinner_frame: 0,
            should_quit: false,
            verbose,
        }
    }

    pub fn start_quiz(&mut self) {
        self.screen = Screen::Question;
        self.sync_highlight();
    }

    /// Put the cursor on the previously recorded answer, if any.
    fn sync_highlight(&mut self) {
        self.highlighted = self.session.selected_option().unwrap_or(0);
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map(|q| q.options.len())
            .unwrap_or(0)
    }

    pub fn highlight_next(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted = (self.highlighted + 1) % count;
        }
    }

    pub fn highlight_previous(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.highlighted = (self.highlighted + count - 1) % count;
        }
    }

    /// Record the highlighted option for the current question.
    pub fn choose_highlighted(&mut self) {
        let index = self.session.progress().index;
        // In-range by construction; a rejection here means the cursor
        // desynced, in which case selecting nothing is the right outcome.
        let _ = self.session.select_answer(index, self.highlighted);
    }

    /// Record a 1-based option number typed on the keyboard.
    pub fn choose_numbered(&mut self, number: usize) {
        if number >= 1 && number <= self.option_count() {
            self.highlighted = number - 1;
            self.choose_highlighted();
        }
    }

    /// Continue to the next question or, from the last one, to the
    /// contact screen. The session re-validates; an unanswered question
    /// flashes instead of moving.
    pub fn continue_quiz(&mut self) {
        match self.session.advance() {
            Advance::Next => self.sync_highlight(),
            Advance::Completed => {
                self.focused_field = ContactField::Name;
                self.screen = Screen::Contact;
            }
            Advance::NeedsAnswer => {
                self.show_flash("Choose an option to continue".to_string());
            }
            Advance::AlreadyCompleted => {}
        }
    }

    /// Back one question; from the first question, back to the landing
    /// screen (answers stay recorded).
    pub fn back(&mut self) {
        match self.session.retreat() {
            Retreat::Previous => self.sync_highlight(),
            Retreat::AtStart => self.screen = Screen::Landing,
            Retreat::AlreadyCompleted => {}
        }
    }

    pub fn focus_next_field(&mut self) {
        self.focused_field = match self.focused_field {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Whatsapp,
            ContactField::Whatsapp => ContactField::Name,
        };
    }

    pub fn focus_previous_field(&mut self) {
        self.focused_field = match self.focused_field {
            ContactField::Name => ContactField::Whatsapp,
            ContactField::Email => ContactField::Name,
            ContactField::Whatsapp => ContactField::Email,
        };
    }

    pub fn contact_input(&mut self, c: char) {
        match self.focused_field {
            ContactField::Name => self.contact.name.push(c),
            ContactField::Email => {
                if !c.is_whitespace() {
                    self.contact.email.push(c);
                }
            }
            // Digits only, mirroring the validation rule.
            ContactField::Whatsapp => {
                if c.is_ascii_digit() && self.contact.whatsapp.len() < 11 {
                    self.contact.whatsapp.push(c);
                }
            }
        }
    }

    pub fn contact_backspace(&mut self) {
        match self.focused_field {
            ContactField::Name => self.contact.name.pop(),
            ContactField::Email => self.contact.email.pop(),
            ContactField::Whatsapp => self.contact.whatsapp.pop(),
        };
    }

    /// Submit the contact form. The result screen is shown immediately;
    /// delivery runs in the background and only updates the status line.
    pub fn request_submit(&mut self) {
        if !self.contact.is_submittable() {
            self.show_flash("Enter your name and a valid e-mail first".to_string());
            return;
        }
        self.submit_requested = true;
        self.screen = Screen::ThankYou;
    }

    /// Skip data collection and go straight to the result.
    pub fn skip_contact(&mut self) {
        self.submit_state = SubmitState::Skipped;
        self.screen = Screen::ThankYou;
    }

    pub fn toggle_breakdown(&mut self) {
        self.show_breakdown = !self.show_breakdown;
    }

    pub fn open_cta(&mut self) {
        let Some(cta) = &self.cta else {
            return;
        };
        let url = cta.url.clone();
        if let Err(e) = crate::browser::open_url(&url) {
            self.show_flash(format!("Failed to open browser: {}", e));
        } else {
            self.show_flash("Opened in your browser".to_string());
        }
    }

    /// Restart from the landing screen with a fresh session.
    pub fn restart(&mut self) {
        self.session.reset();
        self.contact = ContactDetails::default();
        self.focused_field = ContactField::Name;
        self.submit_state = SubmitState::Idle;
        self.submit_requested = false;
        self.show_breakdown = false;
        self.highlighted = 0;
        self.screen = Screen::Landing;
    }

    /// First name for the thank-you greeting, when one was given.
    pub fn greeting_name(&self) -> Option<String> {
        self.contact.first_name().map(|s| s.to_string())
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    /// Advance the delivery spinner animation frame
    pub fn advance_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{builtin_questionnaire, ResultStrings};

    fn app() -> App {
        let (quiz, catalog) = builtin_questionnaire();
        let session = QuizSession::new(quiz, catalog, ResultStrings::default());
        App::new(session, None, None, false)
    }

    fn complete_quiz(app: &mut App) {
        app.start_quiz();
        for _ in 0..5 {
            app.choose_highlighted();
            app.continue_quiz();
        }
    }

    #[test]
    fn landing_to_question_to_contact_flow() {
        let mut app = app();
        assert_eq!(app.screen, Screen::Landing);
        complete_quiz(&mut app);
        assert_eq!(app.screen, Screen::Contact);
        assert!(app.session.is_completed());
    }

    #[test]
    fn continue_without_answer_stays_put() {
        let mut app = app();
        app.start_quiz();
        app.continue_quiz();
        assert_eq!(app.screen, Screen::Question);
        assert_eq!(app.session.progress().index, 0);
        assert!(app.flash_message.is_some());
    }

    #[test]
    fn back_from_first_question_returns_to_landing() {
        let mut app = app();
        app.start_quiz();
        app.back();
        assert_eq!(app.screen, Screen::Landing);
    }

    #[test]
    fn highlight_wraps_and_restores_selection() {
        let mut app = app();
        app.start_quiz();
        app.highlight_previous();
        assert_eq!(app.highlighted, 4);
        app.highlight_next();
        assert_eq!(app.highlighted, 0);

        app.choose_numbered(3);
        app.continue_quiz();
        app.back();
        // Cursor lands back on the recorded answer.
        assert_eq!(app.highlighted, 2);
    }

    #[test]
    fn submit_rejected_until_form_is_valid() {
        let mut app = app();
        complete_quiz(&mut app);
        app.request_submit();
        assert_eq!(app.screen, Screen::Contact);
        assert!(!app.submit_requested);

        app.contact.name = "Juliana".to_string();
        app.contact.email = "julia@example.com".to_string();
        app.request_submit();
        assert_eq!(app.screen, Screen::ThankYou);
        assert!(app.submit_requested);
    }

    #[test]
    fn skip_goes_to_result_without_submit() {
        let mut app = app();
        complete_quiz(&mut app);
        app.skip_contact();
        assert_eq!(app.screen, Screen::ThankYou);
        assert_eq!(app.submit_state, SubmitState::Skipped);
        assert!(!app.submit_requested);
        // The result was computed before any delivery decision.
        assert!(app.session.final_result().is_some());
    }

    #[test]
    fn whatsapp_field_accepts_digits_only() {
        let mut app = app();
        app.focused_field = ContactField::Whatsapp;
        for c in "55a99-999b99999xx9".chars() {
            app.contact_input(c);
        }
        assert_eq!(app.contact.whatsapp, "55999999999");
    }

    #[test]
    fn restart_clears_everything() {
        let mut app = app();
        complete_quiz(&mut app);
        app.contact.name = "Juliana".to_string();
        app.skip_contact();
        app.restart();
        assert_eq!(app.screen, Screen::Landing);
        assert_eq!(app.session.progress().index, 0);
        assert_eq!(app.session.answered_count(), 0);
        assert!(app.session.final_result().is_none());
        assert_eq!(app.contact, ContactDetails::default());
        assert_eq!(app.submit_state, SubmitState::Idle);
    }
}
