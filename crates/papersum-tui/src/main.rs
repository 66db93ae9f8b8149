use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use papersum_core::config_file;
use papersum_core::{ApiConfig, HttpApi, PaperApi};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod theme;
mod tui_event;
mod view;

use app::App;

const DEFAULT_FPS: u32 = 10;

/// papersum TUI: search arXiv papers and analyze text from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides PAPERSUM_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Start with this search already submitted
    #[arg(long)]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = logging::init()?;

    let file_config = config_file::load_config();
    let api_config = ApiConfig::resolve(args.api_url, &file_config);
    tracing::info!(base_url = %api_config.base_url, "starting papersum-tui");
    let api: Arc<dyn PaperApi> = Arc::new(HttpApi::new(api_config)?);

    let theme_name = args
        .theme
        .or_else(|| file_config.theme().map(str::to_string))
        .unwrap_or_else(|| "hacker".to_string());
    let theme = theme::Theme::by_name(&theme_name);

    let fps = file_config.fps().unwrap_or(DEFAULT_FPS).clamp(1, 60);
    let tick_rate = Duration::from_millis(1000 / u64::from(fps));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let backend_terminal = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_terminal)?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(theme);
    if let Ok(size) = terminal.size() {
        app.visible_rows = App::body_rows(size.height);
    }

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();
    app.backend_cmd_tx = Some(cmd_tx);

    tokio::spawn(backend::run(api, cmd_rx, event_tx, cancel.clone()));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    if let Some(query) = args.query {
        app.search.query = query;
        app.update(action::Action::Submit);
    }

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    // Drain any additional queued backend events
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
            _ = cancel.cancelled() => {
                app.should_quit = true;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update(action::Action::Tick);
            last_tick = Instant::now();
        }

        if app.should_quit {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    tracing::info!("papersum-tui exited");

    Ok(())
}
