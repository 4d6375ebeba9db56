use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::session::View;

pub fn render(frame: &mut Frame, area: Rect, view: &View) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let resume = if view.level > 1 || view.score > 0 {
        format!("Resuming at level {} with {} points", view.level, view.score)
    } else {
        "10 Levels · 100 Questions each".to_string()
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "TRIVIA LEVELS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(resume, Style::default().fg(Color::DarkGray))),
        Line::from("Every 10th question is timed".fg(Color::DarkGray)),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  m mute  ·  q quit".fg(Color::DarkGray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
