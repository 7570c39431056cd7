use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use dopers::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, MIN_TICK_RATE_MS},
    loader::{spawn_fetch, FileSource, HttpSource},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, PlotEventSource, Runner, Ticker},
    App,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::info;

/// terminal scatterplot of the fastest climbs up Alpe d'Huez
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Plots the 35 fastest times up Alpe d'Huez against the year they were ridden. Hover a marker with the mouse to see the rider and any doping allegation."
)]
pub struct Cli {
    /// URL of the JSON dataset to plot
    #[clap(short = 'u', long)]
    url: Option<String>,

    /// read the dataset from a local JSON file instead of the network
    #[clap(short = 'f', long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// milliseconds between event loop ticks
    #[clap(short = 't', long)]
    tick_rate: Option<u64>,

    /// write the effective settings to the config file and continue
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Command line flags win over the stored config
    fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.source_url = url.clone();
        }
        if let Some(ms) = self.tick_rate {
            config.tick_rate_ms = ms.max(MIN_TICK_RATE_MS);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let events = CrosstermEventSource::new();
    match &cli.file {
        Some(path) => spawn_fetch(FileSource::new(path), events.sender()),
        None => spawn_fetch(HttpSource::new(config.source_url.clone()), events.sender()),
    };
    let runner = Runner::new(events, FixedTicker::new(config.tick_rate()));

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.geometry());
    let result = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: PlotEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    while !app.should_quit {
        let event = runner.step();
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);

        if app.on_event(event, area) {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
