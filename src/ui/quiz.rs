use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::session::View;

pub fn render(frame: &mut Frame, area: Rect, view: &View, selected: usize) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_status(frame, chunks[0], view);
    render_timer(frame, chunks[1], view.timer);

    match &view.question {
        Some(question) => {
            render_question_text(frame, chunks[2], &question.text);
            render_choices(frame, chunks[3], &question.choices, selected);
        }
        None => {
            let waiting = Paragraph::new("Loading questions...")
                .alignment(Alignment::Center)
                .fg(Color::Yellow);
            frame.render_widget(waiting, chunks[2]);
        }
    }

    render_controls(frame, chunks[4]);
}

fn render_status(frame: &mut Frame, area: Rect, view: &View) {
    let sound = if view.muted { "muted" } else { "sound on" };
    let line = Line::from(vec![
        Span::styled(format!("Level {}", view.level), Style::default().fg(Color::Cyan).bold()),
        Span::raw("   "),
        Span::styled(format!("Score {}", view.score), Style::default().fg(Color::Green)),
        Span::raw("   "),
        Span::styled(sound, Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
}

fn render_timer(frame: &mut Frame, area: Rect, timer: Option<u32>) {
    let Some(remaining) = timer else {
        return;
    };

    let color = if remaining <= 3 { Color::Red } else { Color::Yellow };
    let widget = Paragraph::new(format!("{}s left", remaining))
        .alignment(Alignment::Right)
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_choices(frame: &mut Frame, area: Rect, choices: &[String], selected: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let is_selected = index == selected;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(choice.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k navigate  ·  enter or 1-9 answer  ·  m mute  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
