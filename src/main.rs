pub mod app_dirs;
pub mod bands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod runtime;
pub mod series;
pub mod ui;
pub mod util;

use crate::{
    config::{ConfigStore, FileConfigStore, PlotConfig},
    record::BenchmarkRecord,
    runtime::{AppEvent, CrosstermEventSource, EventSource, Runner},
    series::{build_series, PlotKind, ScatterSeries, Shade},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 250;

/// terminal scatter plots for sudoku generator benchmark results
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Reads the CSV result files written by the sudoku puzzle generator benchmark and renders difficulty-score scatter plots in the terminal, with difficulty band overlays and per-band summaries."
)]
pub struct Cli {
    /// benchmark results CSV produced by the puzzle generator
    results: PathBuf,

    /// plot to show at startup
    #[clap(short = 'p', long, value_enum, default_value_t = PlotKind::Scatter)]
    plot: PlotKind,

    /// keep only records with a difficulty score strictly below this
    #[clap(long)]
    max_score: Option<u32>,

    /// keep only records with a generation time (ms) strictly below this
    #[clap(long)]
    max_time: Option<f64>,

    /// JSON file overriding the difficulty band list
    #[clap(long)]
    bands: Option<PathBuf>,

    /// hide the difficulty band overlay
    #[clap(long)]
    no_bands: bool,

    /// print the plot-ready series as CSV on stdout and exit
    #[clap(long)]
    dump: bool,
}

impl Cli {
    /// Fold CLI overrides into the persisted plot config
    fn apply_to(&self, config: &mut PlotConfig) {
        if self.max_score.is_some() {
            config.max_score = self.max_score;
        }
        if self.max_time.is_some() {
            config.max_time_ms = self.max_time;
        }
        if self.no_bands {
            config.show_bands = false;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Chart,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SummarySort {
    Band,
    Count,
    MeanTime,
}

#[derive(Debug)]
pub struct SummaryState {
    pub sort_by: SummarySort,
    pub ascending: bool,
}

impl Default for SummaryState {
    fn default() -> Self {
        Self {
            sort_by: SummarySort::Band,
            ascending: true,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub records: Vec<BenchmarkRecord>,
    pub config: PlotConfig,
    pub state: AppState,
    pub summary_state: SummaryState,
    source: PathBuf,
    kind: PlotKind,
    series: ScatterSeries,
}

impl App {
    pub fn new(records: Vec<BenchmarkRecord>, config: PlotConfig, kind: PlotKind, source: PathBuf) -> Self {
        let series = build_series(&records, kind, &config);
        Self {
            records,
            config,
            state: AppState::Chart,
            summary_state: SummaryState::default(),
            source,
            kind,
            series,
        }
    }

    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: PlotKind) {
        if self.kind != kind {
            self.kind = kind;
            self.series = build_series(&self.records, kind, &self.config);
        }
    }

    pub fn toggle_bands(&mut self) {
        // overlay only; the series itself is unaffected
        self.config.show_bands = !self.config.show_bands;
    }

    pub fn series(&self) -> &ScatterSeries {
        &self.series
    }

    pub fn source_label(&self) -> String {
        self.source.display().to_string()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = FileConfigStore::new().load();
    if let Some(path) = &cli.bands {
        match config::load_bands(path) {
            Ok(bands) => config.bands = bands,
            Err(e) => {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::Io, e.to_string()).exit();
            }
        }
    }
    cli.apply_to(&mut config);

    let records = match record::load_records(&cli.results) {
        Ok(records) => records,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::Io, e.to_string()).exit();
        }
    };

    if cli.dump {
        let series = build_series(&records, cli.plot, &config);
        dump_series(&series, &mut io::stdout())?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::Io,
            "stdin must be a tty (use --dump for non-interactive output)",
        )
        .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(records, config, cli.plot, cli.results.clone());
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );
    let result = run_loop(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Write the plot-ready series as CSV. Shade is the normalized value used
/// for coloring (blank for a uniform series); samples is the group size for
/// aggregated kinds (blank otherwise).
pub fn dump_series<W: Write>(series: &ScatterSeries, out: &mut W) -> io::Result<()> {
    writeln!(out, "difficulty_score,value,shade,samples")?;

    for (i, &(x, y)) in series.points.iter().enumerate() {
        let shade = match &series.shade {
            Shade::Ramp(values) => format!("{:.4}", values[i]),
            Shade::Uniform => String::new(),
        };
        let samples = match &series.counts {
            Some(counts) => counts[i].to_string(),
            None => String::new(),
        };

        writeln!(out, "{x},{y},{shade},{samples}")?;
    }

    Ok(())
}

/// Drive the app until the user quits. Generic over backend and event
/// source so integration tests can run it headlessly.
pub fn run_loop<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if handle_key(app, key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key event; returns true when the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Esc {
        return true;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.state {
        AppState::Chart => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => app.set_kind(PlotKind::Scatter),
            KeyCode::Char('2') => app.set_kind(PlotKind::Average),
            KeyCode::Char('3') => app.set_kind(PlotKind::SolverShare),
            KeyCode::Char('4') => app.set_kind(PlotKind::SolverShareAverage),
            KeyCode::Char('b') => app.toggle_bands(),
            KeyCode::Char('s') => app.state = AppState::Summary,
            _ => {}
        },
        AppState::Summary => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => app.summary_state.sort_by = SummarySort::Band,
            KeyCode::Char('2') => app.summary_state.sort_by = SummarySort::Count,
            KeyCode::Char('3') => app.summary_state.sort_by = SummarySort::MeanTime,
            KeyCode::Char(' ') => app.summary_state.ascending = !app.summary_state.ascending,
            KeyCode::Char('b') | KeyCode::Backspace => app.state = AppState::Chart,
            _ => {}
        },
    }

    false
}

fn ui(app: &mut App, f: &mut Frame) {
    match app.state {
        AppState::Chart => {
            f.render_widget(&*app, f.area());
        }
        AppState::Summary => {
            ui::summary::render(app, f);
        }
    }
}
