use serde::{Deserialize, Serialize};

/// A single answer option within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Option letter, `a`-`d`, always lowercase.
    pub letter: char,
    pub text: String,
    /// Whether this option carries the correct-answer mark. The parsers do
    /// not enforce that exactly one option per question has it.
    pub correct: bool,
}

/// A parsed question record. Immutable once produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position of the question within its subject file.
    pub number: usize,
    pub text: String,
    /// Options in the order they appeared in the input.
    pub options: Vec<QuizOption>,
    /// Explanation shown after answering (the "fundamentação"). Empty when
    /// the record had none.
    pub explanation: String,
}

impl Question {
    /// Index of the first option flagged correct, if any.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.correct)
    }
}
