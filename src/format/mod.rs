//! Question-file parsing.
//!
//! Subject files come in two line-oriented dialects: the tagged one
//! (`Pergunta:` / `A)`-`D)` / `Correta:` / `Fundamentacao:` lines) and the
//! delimiter one (records separated by `---`, correct option marked with
//! `*`). [`parse_questions`] detects which dialect a file uses and
//! dispatches; [`parse_tagged`] and [`parse_delimited`] are available when
//! the dialect is known.
//!
//! Parsing is a pure function of the input text and never fails: malformed
//! input degrades per the rules documented on each dialect module.

mod delimited;
mod tagged;

pub use delimited::parse as parse_delimited;
pub use tagged::parse as parse_tagged;

use crate::models::Question;

/// Parse question-file text, detecting the dialect: tagged iff any line
/// starts with `Pergunta:`, delimited otherwise.
pub fn parse_questions(input: &str) -> Vec<Question> {
    if is_tagged(input) {
        tagged::parse(input)
    } else {
        delimited::parse(input)
    }
}

fn is_tagged(input: &str) -> bool {
    input
        .lines()
        .any(|line| line.trim_start().starts_with("Pergunta:"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tagged_input() {
        let input = "Pergunta: 2+2?\nA) 3\nB) 4\nCorreta: 2\n";
        let questions = parse_questions(input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options[0].letter, 'a');
        assert_eq!(questions[0].correct_index(), Some(1));
    }

    #[test]
    fn falls_back_to_delimited() {
        let input = "1. Capital do Brasil?\na) Rio\n*b) Brasília\nc) SP\n";
        let questions = parse_questions(input);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_index(), Some(1));
    }

    #[test]
    fn pergunta_anywhere_selects_tagged() {
        let input = "\n  Pergunta: indentada?\nA) sim\nB) não\nCorreta: 1\n";
        assert_eq!(parse_questions(input)[0].text, "indentada?");
    }

    #[test]
    fn empty_input_is_empty() {
        assert!(parse_questions("").is_empty());
    }
}
