// ABOUTME: Main entry point for the muxdeck TUI and its one-shot subcommands

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use tracing::{error, info};

use muxdeck::app::{App, SessionLoader};
use muxdeck::components::LayoutComponent;
use muxdeck::config::AppConfig;
use muxdeck::tmux::{materialize_session, Multiplexer, TmuxClient};

#[derive(Parser)]
#[command(name = "muxdeck", version, about = "Browse, start and manage tmux sessions")]
struct Cli {
    /// Config file to read instead of ~/.config/muxdeck/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reconciled session list and exit
    List,
    /// Start a session declared in the config file and attach to it
    Start { name: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug)?;
    setup_panic_handler();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("could not load config")?;

    let client = Arc::new(TmuxClient::new(config.tmux_program.clone()));
    client
        .check_tmux_installed()
        .context("tmux must be installed")?;

    match cli.command {
        Some(Commands::List) => list_sessions(&config, client),
        Some(Commands::Start { name }) => start_session(&config, &client, &name),
        None => run_interactive(&config, client).await,
    }
}

fn list_sessions(config: &AppConfig, client: Arc<TmuxClient>) -> Result<()> {
    let loader = SessionLoader::new(client, Arc::new(config.sessions.clone()));
    let snapshot = loader.load().context("could not list sessions")?;

    for session in &snapshot.sessions {
        let marker = if session.is_active { "*" } else { " " };
        let origin = if session.is_from_config { "config" } else { "live" };
        let running = if session.is_running { "running" } else { "stopped" };
        println!(
            "{} {:>3}w  {:<7} {:<8} {}",
            marker, session.window_count, origin, running, session.name
        );
        if session.spacing_after {
            println!();
        }
    }
    Ok(())
}

fn start_session(config: &AppConfig, client: &TmuxClient, name: &str) -> Result<()> {
    let session = config
        .find_session(name)
        .ok_or_else(|| anyhow!("{name} is not declared in the config file"))?;

    materialize_session(client, session).with_context(|| format!("could not start {name}"))?;
    client.switch_to(name)?;
    if !client.inside_tmux() {
        client.attach(name)?;
    }
    Ok(())
}

async fn run_interactive(config: &AppConfig, client: Arc<TmuxClient>) -> Result<()> {
    let backend: Arc<dyn Multiplexer> = client.clone();
    let mut app = App::new(config, backend);
    app.init().await;
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout)?;

    if let Some(target) = app.state.handoff_session.take() {
        info!("Handing off to session {}", target);
        if !client.inside_tmux() {
            client.attach(&target)?;
        }
    }
    Ok(())
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, layout);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    layout: &mut LayoutComponent,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                app.handle_key_event(key_event);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

fn setup_logging(debug: bool) -> Result<()> {
    use std::fs::OpenOptions;
    use std::sync::Mutex;
    use tracing_subscriber::prelude::*;

    let log_dir = AppConfig::config_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from(".muxdeck/logs"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("could not create {}", log_dir.display()))?;

    let log_file = log_dir.join(format!(
        "muxdeck-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("could not open {}", log_file.display()))?;

    let default_filter = if debug { "muxdeck=debug" } else { "muxdeck=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_ansi(false), // No ANSI colors in log file
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
