// Group wheel entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config and apply CLI overrides
// 4. Build the game session with its entropy source
// 5. Headless: run every draw and print the groups, then exit
// 6. Otherwise spawn the app task and run the TUI until the user quits

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};

use groupwheel::cli::Cli;
use groupwheel::{app, config, headless, tui};
use groupwheel_core::draw::selector::RandSource;
use groupwheel_core::draw::session::GameSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;
    info!("groupwheel starting up");

    let mut config =
        config::load_config_from(&cli.config).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    info!(
        "Config loaded: {} groups, spin {}ms",
        config.roster.group_count, config.wheel.spin_duration_ms
    );

    let mut session = match config.wheel.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            GameSession::new(RandSource::seeded(seed))
        }
        None => GameSession::default(),
    };

    if cli.headless {
        let mut stdout = std::io::stdout().lock();
        headless::run(&mut session, &config, &mut stdout)?;
        return Ok(());
    }

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, ui_tx, session).await {
            error!("Application loop error: {}", e);
        }
    });

    // Blocks until the user quits. Dropping cmd_tx afterwards stops the app task.
    let tui_result = tui::run(ui_rx, cmd_tx, &config).await;
    if let Err(e) = &tui_result {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), app_handle).await;

    info!("groupwheel shut down cleanly");
    tui_result
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("groupwheel.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("groupwheel=info,groupwheel_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
