//! Application state: screens, the view state wrapped around the session,
//! and the wiring between loader completions and session replacement.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::Catalog;
use crate::loader::{self, LoadOutcome, LoadTicket};
use crate::session::QuizSession;

/// How long the go-to prompt keeps showing a rejected input.
pub const GOTO_ERROR_TTL: Duration = Duration::from_secs(2);

/// Horizontal pixels represented by one terminal cell when a drag is
/// translated into a swipe distance.
pub const CELL_WIDTH_PX: f32 = 10.0;

const GOTO_INPUT_MAX: usize = 6;

/// Which screen receives input and gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Subjects,
    Quiz,
}

/// The go-to-question input overlay on the quiz screen.
pub struct GotoPrompt {
    input: String,
    error_until: Option<Instant>,
}

impl GotoPrompt {
    fn new() -> Self {
        Self {
            input: String::new(),
            error_until: None,
        }
    }

    fn flag_error(&mut self, now: Instant) {
        self.error_until = Some(now + GOTO_ERROR_TTL);
    }

    fn tick(&mut self, now: Instant) {
        if self.error_until.is_some_and(|until| now >= until) {
            self.error_until = None;
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the transient rejection message is still showing.
    pub fn error_active(&self) -> bool {
        self.error_until.is_some()
    }
}

/// Accumulates one press-drag-release mouse gesture.
#[derive(Debug, Clone, Copy, Default)]
struct DragTracker {
    origin: Option<u16>,
}

impl DragTracker {
    fn press(&mut self, column: u16) {
        self.origin = Some(column);
    }

    /// Close the gesture and return its horizontal distance in pixels,
    /// positive to the right.
    fn release(&mut self, column: u16) -> Option<f32> {
        let origin = self.origin.take()?;
        Some((f32::from(column) - f32::from(origin)) * CELL_WIDTH_PX)
    }
}

/// Top-level application state.
pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    catalog: Catalog,
    subject_cursor: usize,
    session: Option<QuizSession>,
    session_subject: Option<String>,
    option_cursor: usize,
    show_explanation: bool,
    goto: Option<GotoPrompt>,
    pending_load: Option<LoadTicket>,
    load_error: Option<String>,
    loader_tx: UnboundedSender<LoadOutcome>,
    drag: DragTracker,
}

impl App {
    pub fn new(catalog: Catalog, loader_tx: UnboundedSender<LoadOutcome>) -> Self {
        Self {
            screen: Screen::Subjects,
            should_quit: false,
            catalog,
            subject_cursor: 0,
            session: None,
            session_subject: None,
            option_cursor: 0,
            show_explanation: false,
            goto: None,
            pending_load: None,
            load_error: None,
            loader_tx,
            drag: DragTracker::default(),
        }
    }

    /// Advance time-based state; called once per poll interval.
    pub fn tick(&mut self, now: Instant) {
        if let Some(prompt) = self.goto.as_mut() {
            prompt.tick(now);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn subject_cursor(&self) -> usize {
        self.subject_cursor
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn session_subject(&self) -> Option<&str> {
        self.session_subject.as_deref()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn show_explanation(&self) -> bool {
        self.show_explanation
    }

    pub fn goto(&self) -> Option<&GotoPrompt> {
        self.goto.as_ref()
    }

    pub fn goto_open(&self) -> bool {
        self.goto.is_some()
    }

    /// Whether a load request is still in flight.
    pub fn loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Move the subject cursor down, clamped to the last entry.
    pub fn select_next_subject(&mut self) {
        let max = self.catalog.subjects().len().saturating_sub(1);
        self.subject_cursor = (self.subject_cursor + 1).min(max);
    }

    /// Move the subject cursor up, clamped to the first entry.
    pub fn select_previous_subject(&mut self) {
        self.subject_cursor = self.subject_cursor.saturating_sub(1);
    }

    /// Request a load of the subject under the cursor.
    pub fn confirm_subject(&mut self) {
        if self.catalog.subjects().is_empty() {
            self.load_error = Some("nenhuma matéria encontrada".to_string());
            return;
        }
        self.request_load(self.subject_cursor);
    }

    /// Request a load of a subject by display name, as `--subject` does.
    pub fn load_subject_by_name(&mut self, name: &str) {
        match self.catalog.position_of(name) {
            Some(index) => {
                self.subject_cursor = index;
                self.request_load(index);
            }
            None => {
                self.load_error = Some(format!("matéria desconhecida: {}", name));
            }
        }
    }

    fn request_load(&mut self, index: usize) {
        let Some(subject) = self.catalog.subjects().get(index) else {
            return;
        };
        self.load_error = None;
        self.pending_load = Some(loader::spawn_load(subject, &self.loader_tx));
    }

    /// Apply a loader completion. Outcomes whose ticket is not the most
    /// recently issued one are dropped unexamined.
    pub fn apply_load_outcome(&mut self, outcome: LoadOutcome) {
        if self.pending_load != Some(outcome.ticket) {
            log::debug!("discarding stale load of {}", outcome.subject);
            return;
        }
        self.pending_load = None;

        match outcome.result {
            Ok(questions) => match QuizSession::new(questions) {
                Some(session) => {
                    self.session = Some(session);
                    self.session_subject = Some(outcome.subject);
                    self.load_error = None;
                    self.screen = Screen::Quiz;
                    self.reset_question_view();
                }
                None => {
                    self.load_error = Some("nenhuma pergunta encontrada".to_string());
                }
            },
            Err(err) => {
                log::error!("loading {} failed: {}", outcome.subject, err);
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Return to the quiz screen if a session exists.
    pub fn resume_session(&mut self) -> bool {
        if self.session.is_some() {
            self.screen = Screen::Quiz;
            true
        } else {
            false
        }
    }

    /// Leave the quiz screen for the subject list; the session stays live.
    pub fn show_subjects(&mut self) {
        self.screen = Screen::Subjects;
        self.goto = None;
    }

    /// Move the option cursor down; frozen once the question is answered.
    pub fn option_down(&mut self) {
        if let Some(count) = self.unanswered_option_count() {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    /// Move the option cursor up; frozen once the question is answered.
    pub fn option_up(&mut self) {
        if let Some(count) = self.unanswered_option_count() {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    fn unanswered_option_count(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        if session.current_answer().is_some() {
            return None;
        }
        let count = session.current_question().options.len();
        if count == 0 { None } else { Some(count) }
    }

    /// Record the option under the cursor as the answer.
    pub fn select_current_option(&mut self) {
        let option = self.option_cursor;
        if let Some(session) = self.session.as_mut() {
            session.select_option(option);
        }
    }

    /// Record a specific option as the answer, as the letter keys do.
    pub fn select_option_direct(&mut self, option: usize) {
        if let Some(session) = self.session.as_mut() {
            if session.select_option(option) {
                self.option_cursor = option;
            }
        }
    }

    /// Show or hide the explanation; only available once answered.
    pub fn toggle_explanation(&mut self) {
        let answered = self
            .session
            .as_ref()
            .is_some_and(|session| session.current_answer().is_some());
        if answered {
            self.show_explanation = !self.show_explanation;
        }
    }

    pub fn next_question(&mut self) {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|session| session.go_next());
        if moved {
            self.reset_question_view();
        }
    }

    pub fn previous_question(&mut self) {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|session| session.go_previous());
        if moved {
            self.reset_question_view();
        }
    }

    /// Per-question view state: explanation hidden, cursor on the recorded
    /// answer or the first option.
    fn reset_question_view(&mut self) {
        self.show_explanation = false;
        self.option_cursor = self
            .session
            .as_ref()
            .and_then(|session| session.current_answer())
            .unwrap_or(0);
    }

    pub fn open_goto(&mut self) {
        if self.session.is_some() {
            self.goto = Some(GotoPrompt::new());
        }
    }

    pub fn close_goto(&mut self) {
        self.goto = None;
    }

    pub fn goto_push(&mut self, c: char) {
        if let Some(prompt) = self.goto.as_mut() {
            if !c.is_control() && prompt.input.len() < GOTO_INPUT_MAX {
                prompt.input.push(c);
            }
        }
    }

    pub fn goto_pop(&mut self) {
        if let Some(prompt) = self.goto.as_mut() {
            prompt.input.pop();
        }
    }

    /// Parse the prompt and jump. Invalid input flags the transient error
    /// and leaves the prompt open; a successful jump closes it.
    pub fn submit_goto(&mut self, now: Instant) {
        let Some(prompt) = self.goto.as_ref() else {
            return;
        };
        let target = prompt.input.parse::<usize>().ok();

        let jumped = match (target, self.session.as_mut()) {
            (Some(number), Some(session)) => session.go_to(number),
            _ => false,
        };

        if jumped {
            self.goto = None;
            self.reset_question_view();
        } else if let Some(prompt) = self.goto.as_mut() {
            prompt.flag_error(now);
        }
    }

    pub fn mouse_press(&mut self, column: u16) {
        if self.screen == Screen::Quiz {
            self.drag.press(column);
        }
    }

    /// Close a drag gesture and hand the distance to the session.
    pub fn mouse_release(&mut self, column: u16) {
        let Some(delta_x) = self.drag.release(column) else {
            return;
        };
        if self.screen != Screen::Quiz || self.goto.is_some() {
            return;
        }
        let swiped = self
            .session
            .as_mut()
            .is_some_and(|session| session.swipe(delta_x));
        if swiped {
            self.reset_question_view();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Subject;
    use crate::loader::LoadError;
    use crate::models::{Question, QuizOption};
    use std::path::PathBuf;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    fn question(number: usize) -> Question {
        let options = ['a', 'b', 'c', 'd']
            .into_iter()
            .enumerate()
            .map(|(index, letter)| QuizOption {
                letter,
                text: format!("opção {}", letter),
                correct: index == 1,
            })
            .collect();

        Question {
            number,
            text: format!("Pergunta {}?", number),
            options,
            explanation: "porque sim".to_string(),
        }
    }

    fn questions(len: usize) -> Vec<Question> {
        (1..=len).map(question).collect()
    }

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Catalog::default(), tx)
    }

    fn app_with_session(len: usize) -> App {
        let mut app = app();
        app.session = QuizSession::new(questions(len));
        app.session_subject = Some("português".to_string());
        app.screen = Screen::Quiz;
        app
    }

    fn outcome(ticket: Uuid, len: usize) -> LoadOutcome {
        LoadOutcome {
            ticket,
            subject: "história".to_string(),
            result: Ok(questions(len)),
        }
    }

    #[test]
    fn confirm_with_empty_catalog_reports_an_error() {
        let mut app = app();
        app.confirm_subject();

        assert_eq!(app.screen, Screen::Subjects);
        assert!(app.load_error().is_some());
        assert!(!app.loading());
    }

    #[test]
    fn subject_cursor_clamps_to_the_list() {
        let subjects = vec![
            Subject {
                name: "a".to_string(),
                path: PathBuf::from("a.txt"),
            },
            Subject {
                name: "b".to_string(),
                path: PathBuf::from("b.txt"),
            },
        ];
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(Catalog::from_subjects(subjects), tx);

        app.select_previous_subject();
        assert_eq!(app.subject_cursor(), 0);

        app.select_next_subject();
        app.select_next_subject();
        app.select_next_subject();
        assert_eq!(app.subject_cursor(), 1);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut app = app();
        let current = Uuid::new_v4();
        app.pending_load = Some(current);

        app.apply_load_outcome(outcome(Uuid::new_v4(), 3));
        assert!(app.session().is_none());
        assert!(app.loading());

        app.apply_load_outcome(outcome(current, 3));
        assert!(app.session().is_some());
        assert_eq!(app.screen, Screen::Quiz);
        assert_eq!(app.session_subject(), Some("história"));
        assert!(!app.loading());
    }

    #[test]
    fn failed_load_keeps_the_previous_session() {
        let mut app = app_with_session(3);
        app.next_question();

        let ticket = Uuid::new_v4();
        app.pending_load = Some(ticket);
        app.apply_load_outcome(LoadOutcome {
            ticket,
            subject: "história".to_string(),
            result: Err(LoadError::Empty {
                path: PathBuf::from("história.txt"),
            }),
        });

        assert!(app.load_error().is_some());
        assert_eq!(app.session_subject(), Some("português"));
        assert_eq!(app.session().unwrap().current_index(), 1);
    }

    #[test]
    fn goto_jump_closes_the_prompt() {
        let mut app = app_with_session(5);
        app.open_goto();
        app.goto_push('3');
        app.submit_goto(Instant::now());

        assert!(!app.goto_open());
        assert_eq!(app.session().unwrap().current_number(), 3);
    }

    #[test]
    fn goto_rejection_flags_a_transient_error() {
        let mut app = app_with_session(5);
        let now = Instant::now();

        app.open_goto();
        app.goto_push('9');
        app.submit_goto(now);

        assert!(app.goto_open());
        assert!(app.goto().unwrap().error_active());
        assert_eq!(app.session().unwrap().current_number(), 1);

        app.tick(now + Duration::from_secs(1));
        assert!(app.goto().unwrap().error_active());

        app.tick(now + GOTO_ERROR_TTL);
        assert!(!app.goto().unwrap().error_active());
    }

    #[test]
    fn goto_rejects_non_numeric_input() {
        let mut app = app_with_session(5);
        let now = Instant::now();

        app.open_goto();
        app.goto_push('a');
        app.submit_goto(now);

        assert!(app.goto().unwrap().error_active());
        assert_eq!(app.session().unwrap().current_number(), 1);
    }

    #[test]
    fn goto_input_is_capped() {
        let mut app = app_with_session(5);
        app.open_goto();
        for _ in 0..10 {
            app.goto_push('1');
        }
        assert_eq!(app.goto().unwrap().input(), "111111");
    }

    #[test]
    fn drag_past_threshold_swipes() {
        let mut app = app_with_session(3);

        // 20 cells at 10 px each: 200 px leftwards.
        app.mouse_press(30);
        app.mouse_release(10);
        assert_eq!(app.session().unwrap().current_index(), 1);

        app.mouse_press(10);
        app.mouse_release(30);
        assert_eq!(app.session().unwrap().current_index(), 0);
    }

    #[test]
    fn short_drag_is_ignored() {
        let mut app = app_with_session(3);

        app.mouse_press(30);
        app.mouse_release(25);
        assert_eq!(app.session().unwrap().current_index(), 0);

        // Release without a recorded press.
        app.mouse_release(0);
        assert_eq!(app.session().unwrap().current_index(), 0);
    }

    #[test]
    fn option_cursor_wraps_until_answered() {
        let mut app = app_with_session(2);

        app.option_up();
        assert_eq!(app.option_cursor(), 3);
        app.option_down();
        assert_eq!(app.option_cursor(), 0);

        app.select_current_option();
        app.option_down();
        assert_eq!(app.option_cursor(), 0);
    }

    #[test]
    fn navigation_resets_the_question_view() {
        let mut app = app_with_session(2);

        app.select_option_direct(2);
        app.toggle_explanation();
        assert!(app.show_explanation());

        app.next_question();
        assert!(!app.show_explanation());
        assert_eq!(app.option_cursor(), 0);

        app.previous_question();
        assert_eq!(app.option_cursor(), 2);
    }

    #[test]
    fn explanation_needs_an_answer() {
        let mut app = app_with_session(1);

        app.toggle_explanation();
        assert!(!app.show_explanation());

        app.select_current_option();
        app.toggle_explanation();
        assert!(app.show_explanation());
    }

    #[tokio::test]
    async fn confirm_loads_and_enters_quiz() {
        let dir = std::env::temp_dir().join(format!("simulado-app-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prova.txt");
        std::fs::write(&path, "Pergunta: 2+2?\nA) 3\nB) 4\nCorreta: 2\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let subjects = vec![Subject {
            name: "prova".to_string(),
            path,
        }];
        let mut app = App::new(Catalog::from_subjects(subjects), tx);

        app.confirm_subject();
        assert!(app.loading());

        let outcome = rx.recv().await.unwrap();
        app.apply_load_outcome(outcome);

        assert_eq!(app.screen, Screen::Quiz);
        assert_eq!(app.session().unwrap().total_questions(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
