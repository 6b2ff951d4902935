//! Quiz session state: the question list, the cursor, and recorded answers.
//!
//! Everything goes through `&mut self` methods on [`QuizSession`]; nothing
//! here touches the terminal or the filesystem. A session is replaced
//! wholesale when a new subject loads, never merged.

use crate::models::Question;

/// Horizontal drag distance, in gesture units (source pixels), that a swipe
/// must exceed to navigate.
pub const SWIPE_THRESHOLD: f32 = 120.0;

/// In-memory state of an active quiz attempt.
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
}

impl QuizSession {
    /// Create a session positioned on the first question with no answers
    /// recorded. Refuses an empty question list.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let answers = vec![None; questions.len()];
        Some(Self {
            questions,
            current: 0,
            answers,
        })
    }

    /// The question under the cursor.
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// 1-based display number of the current question.
    pub fn current_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Recorded option index for the current question, if answered.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    /// Whether the recorded answer for the current question hit an option
    /// flagged correct. `None` while unanswered.
    pub fn current_answer_correct(&self) -> Option<bool> {
        self.current_answer().map(|index| {
            self.current_question()
                .options
                .get(index)
                .is_some_and(|option| option.correct)
        })
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    /// Record `option` as the answer to the current question. Rejected once
    /// the question is answered or when `option` is out of range.
    pub fn select_option(&mut self, option: usize) -> bool {
        if self.answers[self.current].is_some() {
            return false;
        }
        if option >= self.current_question().options.len() {
            return false;
        }
        self.answers[self.current] = Some(option);
        true
    }

    /// Move to the next question; `false` at the last one.
    pub fn go_next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Move to the previous question; `false` at the first one.
    pub fn go_previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump to a question by its 1-based number. Out-of-range numbers leave
    /// the cursor untouched and return `false`.
    pub fn go_to(&mut self, number: usize) -> bool {
        if number == 0 || number > self.questions.len() {
            return false;
        }
        self.current = number - 1;
        true
    }

    /// Interpret a horizontal drag: a leftward gesture (negative `delta_x`)
    /// past [`SWIPE_THRESHOLD`] advances, a rightward one goes back.
    /// Gestures at or below the threshold are ignored.
    pub fn swipe(&mut self, delta_x: f32) -> bool {
        if delta_x.abs() <= SWIPE_THRESHOLD {
            return false;
        }
        if delta_x < 0.0 {
            self.go_next()
        } else {
            self.go_previous()
        }
    }

    /// Number of questions answered so far.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    /// Number of answers that hit an option flagged correct.
    pub fn correct_count(&self) -> usize {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| {
                answer.is_some_and(|index| {
                    question.options.get(index).is_some_and(|option| option.correct)
                })
            })
            .count()
    }
}
