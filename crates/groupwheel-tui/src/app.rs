// Application orchestration: the event loop that owns the game session.
//
// Commands from the TUI are applied to the session one at a time and the
// resulting state is pushed back as `UiUpdate`s. The session is never
// shared; this task is its only owner.

use tokio::sync::mpsc;
use tracing::{info, warn};

use groupwheel_core::draw::session::{GameSession, SessionSnapshot};
use groupwheel_core::draw::SessionError;

use crate::protocol::{UiUpdate, UserCommand};

/// Run the app event loop until `Quit` arrives or the command channel closes.
///
/// An initial snapshot is sent so the UI can render the setup screen.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut session: GameSession,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_snapshot(session.snapshot(), &ui_tx).await;

    while let Some(cmd) = cmd_rx.recv().await {
        if !handle_user_command(&mut session, cmd, &ui_tx).await {
            break;
        }
    }

    info!("Application event loop stopped");
    Ok(())
}

/// Apply one command. Returns `false` when the loop should stop.
async fn handle_user_command(
    session: &mut GameSession,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) -> bool {
    match cmd {
        UserCommand::Prepare {
            members,
            sequence,
            group_count,
        } => match session.prepare(&members, &sequence, group_count) {
            Ok(()) => send_snapshot(session.snapshot(), ui_tx).await,
            Err(e) => report_error(session, e, ui_tx).await,
        },
        UserCommand::Spin => match session.draw() {
            Ok(Some(token)) => {
                let _ = ui_tx.send(UiUpdate::SpinStarted(token)).await;
            }
            Ok(None) => {}
            Err(e) => report_error(session, e, ui_tx).await,
        },
        UserCommand::SpinFinished(token) => match session.commit_selection(token) {
            Ok(reveal) => {
                let _ = ui_tx.send(UiUpdate::Revealed(reveal)).await;
                send_snapshot(session.snapshot(), ui_tx).await;
            }
            Err(e) => report_error(session, e, ui_tx).await,
        },
        UserCommand::Reset => {
            session.reset();
            send_snapshot(session.snapshot(), ui_tx).await;
        }
        UserCommand::Quit => {
            info!("Quit requested");
            return false;
        }
    }
    true
}

/// Route a session error to the UI by kind. Setup errors go back to the
/// form, internal faults need a reset, and anything else (a stale or
/// duplicate spin completion) is only logged.
async fn report_error(
    session: &GameSession,
    err: SessionError,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    if err.is_setup_error() {
        info!("Setup rejected: {}", err);
        let _ = ui_tx.send(UiUpdate::SetupFailed(err.to_string())).await;
    } else if err.is_internal() {
        let _ = ui_tx.send(UiUpdate::Fault(err.to_string())).await;
        send_snapshot(session.snapshot(), ui_tx).await;
    } else {
        warn!("Ignoring spin completion: {}", err);
    }
}

async fn send_snapshot(snapshot: SessionSnapshot, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(snapshot))).await;
}
