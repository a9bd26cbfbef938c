//! FeedLens terminal dashboard.
//!
//! Feedback typed or imported on the left is sent to the analysis service on
//! a worker thread; the charts on the right redraw when the result arrives.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use feedlens_core::{logging, FeedlensConfig, HttpAnalysisService};
use feedlens_tui::worker;
use feedlens_tui::{input, ui, AppState};

const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser, Debug)]
#[command(name = "feedlens", about = "Feedback sentiment dashboard")]
struct Args {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analysis endpoint URL, overrides config and environment
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = FeedlensConfig::load(args.config.as_deref())?.with_env_overrides();
    if let Some(endpoint) = args.endpoint {
        config.service.endpoint = endpoint;
    }

    // stderr belongs to the terminal while the UI runs, so log to a file.
    let log_path = config.logging.resolved_file();
    if let Err(e) = logging::init_file(&config.logging.level, &log_path) {
        eprintln!("warning: logging disabled ({}): {e}", log_path.display());
    }

    let service = HttpAnalysisService::new(config.service.endpoint.clone())
        .context("failed to build HTTP client")?;
    tracing::info!(endpoint = %service.endpoint(), "starting feedlens");

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(service, cmd_rx, resp_tx).context("failed to spawn worker")?;

    let mut app = AppState::new(
        cmd_tx.clone(),
        resp_rx,
        config.service.endpoint.clone(),
        config.ui.animation_frames,
    );

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore the terminal before waiting on the worker; a request in
    // flight may never return.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    worker::shutdown_worker(&cmd_tx, worker_handle, SHUTDOWN_GRACE);

    tracing::info!("feedlens exited");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_responses();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Advance spinner and chart animation
        app.tick();

        if !app.running {
            break;
        }
    }
    Ok(())
}
