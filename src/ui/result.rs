use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::session::rules::MAX_SCORE;
use crate::session::{Ending, View};

pub fn render(frame: &mut Frame, area: Rect, view: &View, ending: Ending) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let (title, verdict, color) = match ending {
        Ending::Good => ("YOU WIN", "A near-perfect run. Well played!", Color::Green),
        Ending::Bad => ("GAME OVER", "Not enough correct answers this time.", Color::Red),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(title, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}", view.score, MAX_SCORE),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
        Line::from(verdict.fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);

    render_controls(frame, chunks[3]);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
