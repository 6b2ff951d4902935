//! Subject selection screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::App;

/// Render the subject list with its status and key hints.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // Title
        Constraint::Fill(1),   // Subject list
        Constraint::Length(1), // Status line
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_list(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_controls(frame, chunks[3], app);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SIMULADO",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("escolha uma matéria".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let subjects = app.catalog().subjects();

    if subjects.is_empty() {
        let widget = Paragraph::new("nenhuma matéria encontrada")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    }

    let lines: Vec<Line> = subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let is_selected = i == app.subject_cursor();
            let prefix = if is_selected { "> " } else { "  " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(subject.name.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Matérias ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let widget = if app.loading() {
        Paragraph::new("Carregando matéria...")
            .alignment(Alignment::Center)
            .fg(Color::Yellow)
    } else if let Some(error) = app.load_error() {
        Paragraph::new(error)
            .alignment(Alignment::Center)
            .fg(Color::Red)
    } else {
        return;
    };

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let text = if app.session().is_some() {
        "j/k mover  ·  Enter carregar  ·  Esc voltar ao simulado  ·  q sair"
    } else {
        "j/k mover  ·  Enter carregar  ·  q sair"
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
