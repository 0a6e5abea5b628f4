// Status bar: session phase, draw mode, and progress.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use groupwheel_core::draw::session::{ModeKind, SessionPhase};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        status_text(state),
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn status_text(state: &ViewState) -> String {
    let snap = &state.snapshot;
    let mut text = format!(" Wheel of Groups | {}", phase_label(snap.phase));
    if let Some(mode) = snap.mode {
        let mode = match mode {
            ModeKind::Random => "Random",
            ModeKind::Directed => "Director",
        };
        text.push_str(&format!(
            " | Mode: {} | {} remaining",
            mode,
            snap.pool.len()
        ));
    }
    if matches!(snap.phase, SessionPhase::Ready | SessionPhase::AwaitingReveal) {
        text.push_str(&format!(" | Next: Group {}", snap.current_group_index + 1));
    }
    text
}

pub fn phase_label(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Setup => "Setup",
        SessionPhase::Ready => "Ready",
        SessionPhase::AwaitingReveal => "Waiting for spin",
        SessionPhase::Revealing => "Spinning...",
        SessionPhase::Complete => "Finished",
        SessionPhase::Faulted => "Error",
    }
}
