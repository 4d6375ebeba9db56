mod celebration;
mod overlay;
mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::session::{Panel, View};

pub fn render(frame: &mut Frame, view: &View, selected: usize) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match view.panel {
        Panel::Intro => welcome::render(frame, area, view),
        Panel::Quiz => quiz::render(frame, area, view, selected),
        Panel::Celebration => celebration::render(frame, area, view),
        Panel::Final(ending) => result::render(frame, area, view, ending),
    }

    if view.ten_correct_popup {
        overlay::render_ten_correct(frame, area);
    }
    if view.confirm_restart {
        overlay::render_confirm_restart(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::models::Question;
    use crate::session::Ending;

    fn rendered(view: &View) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, view, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn quiz_view() -> View {
        let mut view = View::new(3, 27);
        view.panel = Panel::Quiz;
        view.question = Some(Question {
            text: "What is the capital of Japan?".to_string(),
            choices: vec!["Kyoto".to_string(), "Tokyo".to_string()],
            correct: Some(1),
        });
        view
    }

    #[test]
    fn test_quiz_screen_shows_question_and_status() {
        let mut view = quiz_view();
        view.timer = Some(7);
        let screen = rendered(&view);

        assert!(screen.contains("What is the capital of Japan?"));
        assert!(screen.contains("Tokyo"));
        assert!(screen.contains("Level 3"));
        assert!(screen.contains("Score 27"));
        assert!(screen.contains("7s left"));
    }

    #[test]
    fn test_overlays() {
        let mut view = quiz_view();
        view.ten_correct_popup = true;
        view.confirm_restart = true;
        let screen = rendered(&view);

        assert!(screen.contains("10 correct answers"));
        assert!(screen.contains("Restart the game?"));
    }

    #[test]
    fn test_final_screens() {
        let mut view = View::new(10, 960);
        view.panel = Panel::Final(Ending::Good);
        assert!(rendered(&view).contains("960 / 1000"));

        view.panel = Panel::Final(Ending::Bad);
        view.score = 12;
        assert!(rendered(&view).contains("12 / 1000"));
    }
}
