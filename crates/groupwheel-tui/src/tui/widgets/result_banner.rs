// Result banner: the latest pick, the finished message, or a fault.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use groupwheel_core::draw::session::SessionPhase;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = banner_lines(state);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    frame.render_widget(paragraph, area);
}

pub fn banner_lines(state: &ViewState) -> Vec<Line<'static>> {
    if let Some(fault) = &state.fault {
        return vec![
            Line::from(Span::styled(
                format!("Error: {fault}"),
                Style::default().fg(Color::Red),
            )),
            Line::from("Press r to start over."),
        ];
    }

    let snap = &state.snapshot;
    let mut lines = Vec::new();
    if state.spin.is_some() || snap.phase == SessionPhase::Revealing {
        lines.push(Line::from("Spinning..."));
    } else if let Some(reveal) = &snap.last_reveal {
        lines.push(Line::from(vec![
            Span::raw("Picked: "),
            Span::styled(
                reveal.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" -> Group {}", reveal.group_index + 1)),
        ]));
    } else {
        lines.push(Line::from("Press Space to spin the wheel."));
    }

    if snap.is_complete {
        lines.push(Line::from(Span::styled(
            "Finished! Every member has a group. Press r to start over.",
            Style::default().fg(Color::Green),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::protocol::UiUpdate;
    use groupwheel_core::draw::selector::RandSource;
    use groupwheel_core::draw::session::GameSession;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_last_pick_and_finish() {
        let mut session = GameSession::new(RandSource::seeded(4));
        session.prepare("Ani", "", 1).unwrap();
        let token = session.draw().unwrap().unwrap();
        session.commit_selection(token).unwrap();

        let mut state = ViewState::new(&Config::default());
        state.apply_update(UiUpdate::Snapshot(Box::new(session.snapshot())));
        let text = text(&banner_lines(&state));
        assert!(text.contains("Picked: Ani -> Group 1"));
        assert!(text.contains("Finished!"));
    }

    #[test]
    fn fault_takes_over() {
        let mut state = ViewState::new(&Config::default());
        state.fault = Some("forced participant missing".into());
        let text = text(&banner_lines(&state));
        assert!(text.starts_with("Error: forced participant missing"));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::new(&Config::default());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
