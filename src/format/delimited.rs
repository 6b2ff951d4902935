//! Delimiter-separated question dialect.
//!
//! ```text
//! <N>. <question text>
//! <letter>) <option text>
//! *<letter>) <option text>
//! #<explanation text>
//! ---
//! ```
//!
//! Records are separated by a line whose trimmed content is exactly `---`.
//! Within a record only non-empty trimmed lines count: the first is the
//! question text (a leading `N.` numeral prefix is stripped and discarded),
//! a `*` line is the correct option, a `#` line the explanation (the last
//! one wins), and every other line an incorrect option. Option letters are
//! the line's first character, lowercased; the text is the remainder after
//! one optional separator character. Records with fewer than three counted
//! lines are silently dropped.

use crate::models::{Question, QuizOption};

/// Question text plus at least two option/explanation lines.
const MIN_RECORD_LINES: usize = 3;

/// Parse delimiter-separated input. Never fails: sub-minimal records are
/// dropped and everything else degrades to whatever fields were present.
pub fn parse(input: &str) -> Vec<Question> {
    let mut questions: Vec<Question> = Vec::new();
    let mut record: Vec<&str> = Vec::new();

    for line in input.lines() {
        let line = line.trim();
        if line == "---" {
            flush_record(&record, &mut questions);
            record.clear();
        } else if !line.is_empty() {
            record.push(line);
        }
    }
    flush_record(&record, &mut questions);

    questions
}

fn flush_record(lines: &[&str], questions: &mut Vec<Question>) {
    let number = questions.len() + 1;
    if let Some(question) = parse_record(lines, number) {
        questions.push(question);
    }
}

fn parse_record(lines: &[&str], number: usize) -> Option<Question> {
    if lines.len() < MIN_RECORD_LINES {
        return None;
    }

    let text = strip_numeral_prefix(lines[0]).to_string();
    let mut options = Vec::new();
    let mut explanation = String::new();

    for line in &lines[1..] {
        if let Some(rest) = line.strip_prefix('#') {
            explanation = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix('*') {
            if let Some(option) = parse_option(rest, true) {
                options.push(option);
            }
        } else if let Some(option) = parse_option(line, false) {
            options.push(option);
        }
    }

    Some(Question {
        number,
        text,
        options,
        explanation,
    })
}

/// Split an option line into letter and text: the first character is the
/// letter, followed by an optional `)`, `.`, `:` or `-` separator.
fn parse_option(line: &str, correct: bool) -> Option<QuizOption> {
    let mut chars = line.chars();
    let letter = chars.next()?.to_ascii_lowercase();
    let text = chars
        .as_str()
        .trim_start()
        .trim_start_matches([')', '.', ':', '-'])
        .trim()
        .to_string();

    Some(QuizOption {
        letter,
        text,
        correct,
    })
}

/// Strip a leading `12.`-style numeral prefix from the question line.
fn strip_numeral_prefix(line: &str) -> &str {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return line;
    }
    match line[digits..].strip_prefix('.') {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
