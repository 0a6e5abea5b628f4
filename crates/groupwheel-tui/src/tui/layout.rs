// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Setup form                                        |
// |   or                                              |
// | Wheel (40%)          | Result banner (5 rows)     |
// |                      | Group cards (fill)         |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows shared by every screen.
#[derive(Debug, Clone)]
pub struct ShellLayout {
    pub status_bar: Rect,
    pub body: Rect,
    pub help_bar: Rect,
}

#[derive(Debug, Clone)]
pub struct SetupLayout {
    pub members: Rect,
    pub sequence: Rect,
    pub group_count: Rect,
    pub message: Rect,
}

#[derive(Debug, Clone)]
pub struct GameLayout {
    pub wheel: Rect,
    pub result_banner: Rect,
    pub groups: Rect,
}

pub fn build_shell_layout(area: Rect) -> ShellLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    ShellLayout {
        status_bar: vertical[0],
        body: vertical[1],
        help_bar: vertical[2],
    }
}

pub fn build_setup_layout(area: Rect) -> SetupLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // members
            Constraint::Length(5), // sequence
            Constraint::Length(3), // group count
            Constraint::Min(2),    // error / hint
        ])
        .split(area);

    SetupLayout {
        members: vertical[0],
        sequence: vertical[1],
        group_count: vertical[2],
        message: vertical[3],
    }
}

pub fn build_game_layout(area: Rect) -> GameLayout {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(horizontal[1]);

    GameLayout {
        wheel: horizontal[0],
        result_banner: right[0],
        groups: right[1],
    }
}

/// Rows and columns for `count` group cards: at most 4 per row.
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (0, 0);
    }
    let cols = count.min(4);
    let rows = count.div_ceil(cols);
    (rows, cols)
}

/// Split `area` into `count` card areas in row-major order.
pub fn group_cards(area: Rect, count: usize) -> Vec<Rect> {
    let (rows, cols) = grid_shape(count);
    if rows == 0 {
        return Vec::new();
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_reserves_bars() {
        let layout = build_shell_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.body.height, 22);
        assert_eq!(layout.help_bar.y, 23);
    }

    #[test]
    fn game_layout_splits_columns() {
        let layout = build_game_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.wheel.width, 40);
        assert_eq!(layout.result_banner.height, 5);
        assert_eq!(layout.groups.x, layout.result_banner.x);
        assert_eq!(layout.groups.height, 25);
    }

    #[test]
    fn grid_shapes() {
        assert_eq!(grid_shape(0), (0, 0));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(3), (1, 3));
        assert_eq!(grid_shape(4), (1, 4));
        assert_eq!(grid_shape(5), (2, 4));
        assert_eq!(grid_shape(9), (3, 4));
    }

    #[test]
    fn group_cards_count_matches() {
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(group_cards(area, 0).len(), 0);
        assert_eq!(group_cards(area, 3).len(), 3);
        let cards = group_cards(area, 6);
        assert_eq!(cards.len(), 6);
        // second row starts below the first
        assert!(cards[4].y > cards[0].y);
    }
}
