// Setup form: member list, optional reveal order, and group count.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::layout::SetupLayout;
use crate::tui::{FormField, ViewState};

pub fn render(frame: &mut Frame, layout: &SetupLayout, state: &ViewState) {
    let form = &state.form;

    render_field(
        frame,
        layout.members,
        "Members (comma separated)",
        &form.members,
        form.focus == FormField::Members,
    );
    render_field(
        frame,
        layout.sequence,
        "Reveal order (director mode, optional)",
        &form.sequence,
        form.focus == FormField::Sequence,
    );
    render_field(
        frame,
        layout.group_count,
        "Number of groups",
        &form.group_count,
        form.focus == FormField::GroupCount,
    );

    let message = match &state.setup_error {
        Some(err) => Paragraph::new(err.as_str()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new("Press Enter to set up the wheel.")
            .style(Style::default().add_modifier(Modifier::DIM)),
    };
    frame.render_widget(message.wrap(Wrap { trim: true }), layout.message);
}

fn render_field(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    title: &str,
    value: &str,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if focused {
        format!("{value}_")
    } else {
        value.to_string()
    };
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tui::layout::build_setup_layout;

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::new(&Config::default());
        state.setup_error = Some("member list must not be empty".into());
        terminal
            .draw(|frame| {
                let layout = build_setup_layout(frame.area());
                render(frame, &layout, &state);
            })
            .unwrap();
    }
}
