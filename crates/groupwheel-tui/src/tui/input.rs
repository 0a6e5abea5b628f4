// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState edits (setup form typing, focus).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{FormField, ViewState};
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Release events on some platforms
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.in_setup() {
        handle_setup_key(key_event, view_state)
    } else {
        handle_game_key(key_event, view_state)
    }
}

fn handle_setup_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let form = &mut view_state.form;
    match key_event.code {
        KeyCode::Esc => Some(UserCommand::Quit),
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            None
        }
        KeyCode::Enter => match form.to_command() {
            Ok(cmd) => Some(cmd),
            Err(message) => {
                view_state.setup_error = Some(message);
                None
            }
        },
        KeyCode::Backspace => {
            form.focused_mut().pop();
            None
        }
        KeyCode::Char(c) => {
            let accepts = form.focus != FormField::GroupCount || c.is_ascii_digit() || c == '-';
            if accepts {
                form.focused_mut().push(c);
            }
            None
        }
        _ => None,
    }
}

fn handle_game_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            // A spin already animating swallows the key; the session would
            // ignore it anyway.
            view_state.can_spin().then_some(UserCommand::Spin)
        }
        KeyCode::Char('r') => {
            view_state.spin = None;
            Some(UserCommand::Reset)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),
        _ => None,
    }
}
