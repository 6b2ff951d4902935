//! Data model shared by the parser, the session, and the UI.

mod question;

pub use question::{Question, QuizOption};
