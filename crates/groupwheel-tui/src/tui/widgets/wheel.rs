// Wheel panel: the remaining pool with the spinning highlight.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

/// Pool position to highlight, if a spin is animating.
pub fn highlight_index(state: &ViewState) -> Option<usize> {
    let pool_len = state.snapshot.pool.len();
    state
        .spin
        .filter(|_| pool_len > 0)
        .map(|spin| spin.highlight(pool_len))
}

pub fn remaining_text(count: usize) -> String {
    match count {
        1 => "1 member remaining".to_string(),
        n => format!("{n} members remaining"),
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let pool = &state.snapshot.pool;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Wheel - {}", remaining_text(pool.len())));

    if pool.is_empty() {
        let paragraph = Paragraph::new("All members have been picked!")
            .style(Style::default().fg(Color::Green))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = pool.iter().map(|name| ListItem::new(name.as_str())).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(highlight_index(state));
    frame.render_stateful_widget(list, area, &mut list_state);
}
