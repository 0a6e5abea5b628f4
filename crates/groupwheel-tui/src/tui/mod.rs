// Terminal UI: setup form, wheel, and group cards.
//
// The TUI owns a `ViewState` that mirrors the session snapshot pushed by the
// app orchestrator. It plays the spin animation locally and reports back with
// `SpinFinished` once the animation lands, which is when the session
// actually assigns the pick.

pub mod input;
pub mod layout;
pub mod widgets;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use groupwheel_core::draw::session::{SelectionToken, SessionPhase, SessionSnapshot};

use crate::config::Config;
use crate::protocol::{UiUpdate, UserCommand};

use layout::{build_game_layout, build_setup_layout, build_shell_layout};

// ---------------------------------------------------------------------------
// Setup form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Members,
    Sequence,
    GroupCount,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Members => FormField::Sequence,
            FormField::Sequence => FormField::GroupCount,
            FormField::GroupCount => FormField::Members,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Members => FormField::GroupCount,
            FormField::Sequence => FormField::Members,
            FormField::GroupCount => FormField::Sequence,
        }
    }
}

/// Editable setup inputs, pre-filled from config.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub members: String,
    pub sequence: String,
    pub group_count: String,
    pub focus: FormField,
}

impl SetupForm {
    pub fn from_config(config: &Config) -> Self {
        SetupForm {
            members: config.roster.members.clone(),
            sequence: config.roster.sequence.clone(),
            group_count: config.roster.group_count.to_string(),
            focus: FormField::Members,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Members => &mut self.members,
            FormField::Sequence => &mut self.sequence,
            FormField::GroupCount => &mut self.group_count,
        }
    }

    /// Build the `Prepare` command, or a message if the group count is not
    /// a whole number.
    pub fn to_command(&self) -> Result<UserCommand, String> {
        let group_count = self
            .group_count
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("group count must be a whole number, got \"{}\"", self.group_count))?;
        Ok(UserCommand::Prepare {
            members: self.members.clone(),
            sequence: self.sequence.clone(),
            group_count,
        })
    }
}

// ---------------------------------------------------------------------------
// Spin animation
// ---------------------------------------------------------------------------

/// A highlight that steps through the pool and lands on the drawn index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinAnimation {
    pub token: SelectionToken,
    pub frame: u32,
    pub total_frames: u32,
}

impl SpinAnimation {
    pub fn new(token: SelectionToken, total_frames: u32) -> Self {
        SpinAnimation {
            token,
            frame: 0,
            total_frames: total_frames.max(1),
        }
    }

    /// Pool position highlighted at the current frame.
    pub fn highlight(&self, pool_len: usize) -> usize {
        if pool_len == 0 {
            return 0;
        }
        let steps_left = self.total_frames.saturating_sub(self.frame) as usize % pool_len;
        (self.token.index() + pool_len - steps_left) % pool_len
    }

    /// Landed frames are held for one extra tick before finishing.
    pub fn is_finished(&self) -> bool {
        self.frame > self.total_frames
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state mirroring the session for rendering.
pub struct ViewState {
    pub snapshot: SessionSnapshot,
    pub form: SetupForm,
    /// Last rejected setup, shown under the form.
    pub setup_error: Option<String>,
    /// Internal session failure; the user must reset.
    pub fault: Option<String>,
    pub spin: Option<SpinAnimation>,
    pub spin_frames: u32,
}

impl ViewState {
    pub fn new(config: &Config) -> Self {
        ViewState {
            snapshot: SessionSnapshot::default(),
            form: SetupForm::from_config(config),
            setup_error: None,
            fault: None,
            spin: None,
            spin_frames: config.wheel.spin_frames(),
        }
    }

    pub fn in_setup(&self) -> bool {
        self.snapshot.phase == SessionPhase::Setup
    }

    /// Whether a spin key should be forwarded right now.
    pub fn can_spin(&self) -> bool {
        self.spin.is_none()
            && matches!(
                self.snapshot.phase,
                SessionPhase::Ready | SessionPhase::AwaitingReveal
            )
    }

    /// Advance the spin animation by one frame. Returns the token once the
    /// animation has landed and the pick should be applied.
    pub fn tick(&mut self) -> Option<SelectionToken> {
        let spin = self.spin.as_mut()?;
        spin.frame += 1;
        if spin.is_finished() {
            let token = spin.token;
            self.spin = None;
            Some(token)
        } else {
            None
        }
    }

    pub fn apply_update(&mut self, update: UiUpdate) {
        match update {
            UiUpdate::Snapshot(snapshot) => {
                if snapshot.phase != SessionPhase::Setup {
                    self.setup_error = None;
                } else {
                    self.spin = None;
                }
                if snapshot.phase != SessionPhase::Faulted {
                    self.fault = None;
                }
                self.snapshot = *snapshot;
            }
            UiUpdate::SetupFailed(message) => {
                self.setup_error = Some(message);
            }
            UiUpdate::SpinStarted(token) => {
                self.spin = Some(SpinAnimation::new(token, self.spin_frames));
            }
            UiUpdate::Revealed(reveal) => {
                debug!("Revealed {} into group {}", reveal.name, reveal.group_index + 1);
                self.spin = None;
            }
            UiUpdate::Fault(message) => {
                self.fault = Some(message);
                self.spin = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let shell = build_shell_layout(frame.area());
    widgets::status_bar::render(frame, shell.status_bar, state);

    if state.in_setup() {
        let layout = build_setup_layout(shell.body);
        widgets::setup_form::render(frame, &layout, state);
    } else {
        let layout = build_game_layout(shell.body);
        widgets::wheel::render(frame, layout.wheel, state);
        widgets::result_banner::render(frame, layout.result_banner, state);
        widgets::groups::render(frame, layout.groups, state);
    }

    render_help_bar(frame, shell.help_bar, state);
}

fn render_help_bar(frame: &mut Frame, area: ratatui::layout::Rect, state: &ViewState) {
    let text = if state.in_setup() {
        " Tab:Next field | Enter:Start | Esc:Quit"
    } else {
        " Space:Spin | r:Reset | q:Quit"
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal and a panic hook that restores it.
/// 2. Selects over UI updates, keyboard input, and the animation tick.
/// 3. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    config: &Config,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(config);
    let mut event_stream = EventStream::new();

    let mut frame_tick = tokio::time::interval(config.wheel.frame_interval());
    frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(update) => view_state.apply_update(update),
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e)),
                    None => break Ok(()),
                }
            }

            _ = frame_tick.tick() => {
                if let Some(token) = view_state.tick() {
                    let _ = cmd_tx.send(UserCommand::SpinFinished(token)).await;
                }
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e));
                }
            }
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupwheel_core::draw::session::{GameSession, ModeKind};
    use groupwheel_core::draw::selector::RandSource;

    fn view() -> ViewState {
        ViewState::new(&Config::default())
    }

    fn token_for(pool: &str, groups: i64) -> (GameSession, SelectionToken) {
        let mut session = GameSession::new(RandSource::seeded(3));
        session.prepare(pool, "", groups).unwrap();
        let token = session.draw().unwrap().unwrap();
        (session, token)
    }

    #[test]
    fn form_prefilled_from_config() {
        let state = view();
        assert!(state.form.members.starts_with("Budi"));
        assert_eq!(state.form.group_count, "3");
        assert_eq!(state.form.focus, FormField::Members);
        assert!(state.in_setup());
    }

    #[test]
    fn form_field_cycle() {
        assert_eq!(FormField::Members.next(), FormField::Sequence);
        assert_eq!(FormField::GroupCount.next(), FormField::Members);
        assert_eq!(FormField::Members.prev(), FormField::GroupCount);
    }

    #[test]
    fn form_command_parses_group_count() {
        let mut form = view().form;
        form.group_count = " 4 ".into();
        match form.to_command().unwrap() {
            UserCommand::Prepare { group_count, .. } => assert_eq!(group_count, 4),
            other => panic!("expected Prepare, got {other:?}"),
        }
        form.group_count = "four".into();
        assert!(form.to_command().unwrap_err().contains("whole number"));
    }

    #[test]
    fn spin_lands_on_target() {
        let (session, token) = token_for("A, B, C, D, E", 2);
        let pool_len = session.pool().len();
        let mut spin = SpinAnimation::new(token, 7);
        let mut last = spin.highlight(pool_len);
        for _ in 0..7 {
            spin.frame += 1;
            let next = spin.highlight(pool_len);
            assert_eq!(next, (last + 1) % pool_len);
            last = next;
        }
        assert_eq!(last, token.index());
    }

    #[test]
    fn tick_finishes_after_landing() {
        let (_session, token) = token_for("A, B, C", 1);
        let mut state = view();
        state.spin_frames = 2;
        state.apply_update(UiUpdate::SpinStarted(token));
        assert!(!state.can_spin());
        assert_eq!(state.tick(), None);
        assert_eq!(state.tick(), None);
        assert_eq!(state.tick(), Some(token));
        assert!(state.spin.is_none());
        assert_eq!(state.tick(), None);
    }

    #[test]
    fn snapshot_clears_setup_error_once_prepared() {
        let mut state = view();
        state.apply_update(UiUpdate::SetupFailed("bad".into()));
        assert_eq!(state.setup_error.as_deref(), Some("bad"));

        let (session, _) = token_for("A, B", 1);
        state.apply_update(UiUpdate::Snapshot(Box::new(session.snapshot())));
        assert!(state.setup_error.is_none());
        assert_eq!(state.snapshot.mode, Some(ModeKind::Random));
    }

    #[test]
    fn fault_stops_spin_until_reset() {
        let (_session, token) = token_for("A, B", 1);
        let mut state = view();
        state.apply_update(UiUpdate::SpinStarted(token));
        state.apply_update(UiUpdate::Fault("broken".into()));
        assert!(state.spin.is_none());
        assert_eq!(state.fault.as_deref(), Some("broken"));

        state.apply_update(UiUpdate::Snapshot(Box::new(SessionSnapshot::default())));
        assert!(state.fault.is_none());
        assert!(state.in_setup());
    }

    #[test]
    fn render_frame_setup_and_game() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = view();
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();

        let (session, token) = token_for("A, B, C, D", 2);
        state.apply_update(UiUpdate::Snapshot(Box::new(session.snapshot())));
        state.apply_update(UiUpdate::SpinStarted(token));
        terminal
            .draw(|frame| render_frame(frame, &state))
            .unwrap();
    }
}
