//! # simulado
//!
//! Terminal study application for multiple-choice question banks in
//! Portuguese. Subjects are plain text files under a resource directory;
//! two line-oriented formats are understood (see [`format`]). The quiz
//! screen records one answer per question, shows correctness immediately,
//! and navigates by keys, a go-to prompt, or horizontal mouse drags.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use simulado::{Catalog, RunOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simulado::AppError> {
//!     let catalog = Catalog::scan("materia")?;
//!     simulado::run(catalog, RunOptions::default()).await
//! }
//! ```

mod app;
pub mod catalog;
pub mod format;
mod loader;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use thiserror::Error;
use tokio::sync::mpsc;

pub use app::{App, GotoPrompt, Screen, CELL_WIDTH_PX, GOTO_ERROR_TTL};
pub use catalog::{Catalog, CatalogError, Subject};
pub use loader::{LoadError, LoadOutcome, LoadTicket};
pub use models::{Question, QuizOption};
pub use session::{QuizSession, SWIPE_THRESHOLD};

/// How long to wait for terminal events before running a tick.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for running the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("erro de terminal: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Startup options for [`run`].
#[derive(Debug, Default)]
pub struct RunOptions {
    /// Subject to load immediately, bypassing the selection screen.
    pub subject: Option<String>,
}

/// Take over the terminal and run the application until the user quits.
pub async fn run(catalog: Catalog, options: RunOptions) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(catalog, tx);

    if let Some(name) = options.subject.as_deref() {
        app.load_subject_by_name(name);
    }

    let mut terminal = terminal::init()?;
    let result = run_event_loop(&mut terminal, &mut app, &mut rx).await;
    terminal::restore()?;
    result
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<LoadOutcome>,
) -> Result<(), AppError> {
    loop {
        if app.should_quit {
            break;
        }

        app.tick(Instant::now());
        while let Ok(outcome) = rx.try_recv() {
            app.apply_load_outcome(outcome);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll with a timeout so ticks fire without input.
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key.code);
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyCode) {
    // The go-to prompt captures the keyboard while open.
    if app.goto_open() {
        handle_goto_key(app, key);
        return;
    }

    match app.screen {
        Screen::Subjects => handle_subjects_key(app, key),
        Screen::Quiz => handle_quiz_key(app, key),
    }
}

fn handle_subjects_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.select_next_subject(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_subject(),
        KeyCode::Enter => app.confirm_subject(),
        KeyCode::Esc => {
            app.resume_session();
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.next_question(),
        KeyCode::Down | KeyCode::Char('j') => app.option_down(),
        KeyCode::Up | KeyCode::Char('k') => app.option_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_current_option(),
        KeyCode::Char(c @ 'a'..='d') => app.select_option_direct((c as u8 - b'a') as usize),
        KeyCode::Char(c @ '1'..='4') => app.select_option_direct((c as u8 - b'1') as usize),
        KeyCode::Char('f') => app.toggle_explanation(),
        KeyCode::Char('g') => app.open_goto(),
        KeyCode::Esc => app.show_subjects(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_goto_key(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.submit_goto(Instant::now()),
        KeyCode::Esc => app.close_goto(),
        KeyCode::Backspace => app.goto_pop(),
        KeyCode::Char(c) => app.goto_push(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.mouse_press(mouse.column),
        MouseEventKind::Up(MouseButton::Left) => app.mouse_release(mouse.column),
        _ => {}
    }
}
