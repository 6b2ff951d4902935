//! Quiz screen: question, options, explanation, and the go-to prompt.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::app::App;
use crate::models::{Question, QuizOption};
use crate::session::QuizSession;

/// Render the quiz screen for the live session.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };

    let question = session.current_question();
    let show_explanation = app.show_explanation() && !question.explanation.is_empty();

    let chunks = if show_explanation {
        Layout::vertical([
            Constraint::Length(1), // Progress
            Constraint::Length(6), // Question text
            Constraint::Min(6),    // Options
            Constraint::Length(7), // Explanation
            Constraint::Length(1), // Status line
            Constraint::Length(2), // Controls
        ])
        .margin(1)
        .split(area)
    } else {
        Layout::vertical([
            Constraint::Length(1), // Progress
            Constraint::Length(6), // Question text
            Constraint::Min(6),    // Options
            Constraint::Length(1), // Status line
            Constraint::Length(2), // Controls
        ])
        .margin(1)
        .split(area)
    };

    render_progress(frame, chunks[0], app, session);
    render_question_text(frame, chunks[1], question);
    render_options(frame, chunks[2], app, session);

    if show_explanation {
        render_explanation(frame, chunks[3], &question.explanation);
        render_status(frame, chunks[4], app, session);
        render_controls(frame, chunks[5], session);
    } else {
        render_status(frame, chunks[3], app, session);
        render_controls(frame, chunks[4], session);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let subject = Paragraph::new(app.session_subject().unwrap_or("")).fg(Color::DarkGray);
    frame.render_widget(subject, halves[0]);

    let progress = Paragraph::new(format!(
        "Pergunta {} de {}",
        session.current_number(),
        session.total_questions()
    ))
    .alignment(Alignment::Right)
    .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(progress, halves[1]);
}

fn render_question_text(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.text.clone())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    let question = session.current_question();
    let answer = session.current_answer();

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let (prefix, style) = option_appearance(i, option, answer, app.option_cursor());

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(format!("{}) ", option.letter), style),
                Span::styled(option.text.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Alternativas ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

/// Cursor styling before an answer, correctness coloring after.
fn option_appearance(
    index: usize,
    option: &QuizOption,
    answer: Option<usize>,
    cursor: usize,
) -> (&'static str, Style) {
    match answer {
        None => {
            if index == cursor {
                ("> ", Style::default().fg(Color::Yellow).bold())
            } else {
                ("  ", Style::default().fg(Color::White))
            }
        }
        Some(chosen) => {
            if option.correct {
                ("+ ", Style::default().fg(Color::Green).bold())
            } else if index == chosen {
                ("- ", Style::default().fg(Color::Red).bold())
            } else {
                ("  ", Style::default().fg(Color::DarkGray))
            }
        }
    }
}

fn render_explanation(frame: &mut Frame, area: Rect, explanation: &str) {
    let widget = Paragraph::new(explanation)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Fundamentação ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, session: &QuizSession) {
    if let Some(prompt) = app.goto() {
        let mut spans = vec![
            Span::styled("Ir para a pergunta: ", Style::default().fg(Color::White)),
            Span::styled(prompt.input(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ];
        if prompt.error_active() {
            spans.push(Span::styled(
                "  pergunta inválida",
                Style::default().fg(Color::Red),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    }

    let mut spans = vec![Span::styled(
        format!(
            "{} respondidas · {} certas",
            session.answered_count(),
            session.correct_count()
        ),
        Style::default().fg(Color::DarkGray),
    )];
    match session.current_answer_correct() {
        Some(true) => spans.push(Span::styled(
            "  Correta!",
            Style::default().fg(Color::Green).bold(),
        )),
        Some(false) => spans.push(Span::styled(
            "  Incorreta.",
            Style::default().fg(Color::Red).bold(),
        )),
        None => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(frame: &mut Frame, area: Rect, session: &QuizSession) {
    let mut parts: Vec<&str> = Vec::new();
    if !session.is_first() {
        parts.push("h anterior");
    }
    if !session.is_last() {
        parts.push("l próxima");
    }
    if session.current_answer().is_none() {
        parts.push("j/k opção");
        parts.push("Enter responder");
    } else if !session.current_question().explanation.is_empty() {
        parts.push("f fundamentação");
    }
    parts.push("g ir para");
    parts.push("Esc matérias");
    parts.push("q sair");

    let widget = Paragraph::new(parts.join("  ·  "))
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
