//! Popups drawn on top of the current panel.

use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

pub fn render_ten_correct(frame: &mut Frame, area: Rect) {
    let upper_half = Rect {
        height: area.height / 2,
        ..area
    };
    let popup = centered(upper_half, 30, 3);
    let widget = Paragraph::new("10 correct answers!")
        .alignment(Alignment::Center)
        .fg(Color::Green)
        .bold()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::Green),
        );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

pub fn render_confirm_restart(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 40, 5);
    let content = vec![
        Line::from("Restart the game?".bold()),
        Line::from(""),
        Line::from("y yes  ·  n no".fg(Color::DarkGray)),
    ];
    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::Yellow),
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(widget, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
