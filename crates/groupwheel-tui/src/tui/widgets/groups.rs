// Group cards: each group's members in assignment order.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use groupwheel_core::draw::session::SessionPhase;

use crate::tui::layout::group_cards;
use crate::tui::ViewState;

pub fn card_title(index: usize, members: usize) -> String {
    let noun = if members == 1 { "member" } else { "members" };
    format!("Group {} ({} {})", index + 1, members, noun)
}

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snap = &state.snapshot;
    let next_group = (snap.phase != SessionPhase::Complete).then_some(snap.current_group_index);

    for (index, (members, card)) in snap
        .groups
        .iter()
        .zip(group_cards(area, snap.groups.len()))
        .enumerate()
    {
        let border = if next_group == Some(index) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let items: Vec<ListItem> = members
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(card_title(index, members.len()))
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(list, card);
    }
}
