//! Tagged-line question dialect.
//!
//! One tag per line; blank and unrecognized lines are ignored:
//!
//! ```text
//! Pergunta: <question text>
//! A) <option text>
//! B) <option text>
//! C) <option text>
//! D) <option text>
//! Correta: <marker>
//! Fundamentacao: <explanation text>
//! ```
//!
//! A `Pergunta:` line flushes the record under construction and opens a new
//! one; any open record is flushed at end of input, even when incomplete.
//! `<marker>` is the 1-based option position (`Correta: 2` marks the second
//! option) or a bare letter `a`-`d`; markers that resolve to no option leave
//! every option unmarked. `Fundamentação:` (accented) is accepted as the
//! same tag as `Fundamentacao:`. Tag lines seen before the first `Pergunta:`
//! have no record to land in and are dropped.

use crate::models::{Question, QuizOption};

const OPTION_PREFIXES: [(char, &str); 4] = [('a', "A)"), ('b', "B)"), ('c', "C)"), ('d', "D)")];

/// Record under construction; the correct marker is kept raw and resolved on
/// flush so its position relative to the option lines does not matter.
#[derive(Default)]
struct Draft {
    text: String,
    options: Vec<QuizOption>,
    correct: Option<String>,
    explanation: String,
}

impl Draft {
    fn finish(mut self, number: usize) -> Question {
        if let Some(marker) = self.correct.take() {
            mark_correct(&marker, &mut self.options);
        }
        Question {
            number,
            text: self.text,
            options: self.options,
            explanation: self.explanation,
        }
    }
}

/// Parse tagged-line input. Never fails: malformed records come out with
/// default fields instead of being rejected.
pub fn parse(input: &str) -> Vec<Question> {
    let mut questions: Vec<Question> = Vec::new();
    let mut draft: Option<Draft> = None;

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("Pergunta:") {
            if let Some(done) = draft.take() {
                let number = questions.len() + 1;
                questions.push(done.finish(number));
            }
            draft = Some(Draft {
                text: rest.trim().to_string(),
                ..Draft::default()
            });
            continue;
        }

        let Some(current) = draft.as_mut() else {
            continue;
        };

        if let Some((letter, rest)) = match_option(line) {
            current.options.push(QuizOption {
                letter,
                text: rest.trim().to_string(),
                correct: false,
            });
        } else if let Some(rest) = line.strip_prefix("Correta:") {
            current.correct = Some(rest.trim().to_string());
        } else if let Some(rest) = strip_explanation_tag(line) {
            current.explanation = rest.trim().to_string();
        }
    }

    if let Some(done) = draft.take() {
        let number = questions.len() + 1;
        questions.push(done.finish(number));
    }

    questions
}

fn match_option(line: &str) -> Option<(char, &str)> {
    OPTION_PREFIXES
        .iter()
        .find_map(|(letter, prefix)| line.strip_prefix(prefix).map(|rest| (*letter, rest)))
}

fn strip_explanation_tag(line: &str) -> Option<&str> {
    line.strip_prefix("Fundamentacao:")
        .or_else(|| line.strip_prefix("Fundamentação:"))
}

/// Flag the option the marker points at: a number is a 1-based position, a
/// single letter `a`-`d` the position of that letter in the sequence.
fn mark_correct(marker: &str, options: &mut [QuizOption]) {
    let position = match marker.parse::<usize>() {
        Ok(number) => number.checked_sub(1),
        Err(_) => letter_position(marker),
    };

    if let Some(index) = position {
        if let Some(option) = options.get_mut(index) {
            option.correct = true;
        }
    }
}

fn letter_position(marker: &str) -> Option<usize> {
    let mut chars = marker.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            let c = c.to_ascii_lowercase();
            c.is_ascii_lowercase()
                .then(|| (c as usize) - ('a' as usize))
                .filter(|index| *index < OPTION_PREFIXES.len())
        }
        _ => None,
    }
}
