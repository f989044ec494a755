use std::io::Write;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::NamedTempFile;

use sudoviz::config::PlotConfig;
use sudoviz::record::load_records;
use sudoviz::runtime::{AppEvent, Runner, TestEventSource};
use sudoviz::series::{build_series, PlotKind};

// Headless analysis flow using the internal runtime without a TTY:
// load a results file, then drive plot-kind selection through the same
// event plumbing the binary uses.
#[test]
fn headless_plot_selection_flow() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        b"Difficulty Score,Time (ms),Recursive Solver Time (ms)\n\
          4000,1.0,0.5\n\
          4000,3.0,1.5\n\
          5000,2.0,0.5\n",
    )
    .unwrap();
    file.flush().unwrap();

    let records = load_records(file.path()).unwrap();
    let config = PlotConfig::default();
    let mut kind = PlotKind::Scatter;

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(5));

    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('4'),
        KeyModifiers::NONE,
    )))
    .unwrap();
    tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
        .unwrap();

    // minimal event loop mirroring the binary's key handling contract
    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('1') => kind = PlotKind::Scatter,
                KeyCode::Char('4') => kind = PlotKind::SolverShareAverage,
                _ => {}
            },
        }
    }

    assert_eq!(kind, PlotKind::SolverShareAverage);

    let series = build_series(&records, kind, &config);
    assert_eq!(series.points, vec![(4000.0, 50.0), (5000.0, 25.0)]);
    assert_eq!(series.counts, Some(vec![2, 1]));
}

#[test]
fn runner_synthesizes_ticks_when_idle() {
    let (_tx, rx) = mpsc::channel();
    let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));

    for _ in 0..3 {
        match runner.step() {
            AppEvent::Tick => {}
            other => panic!("expected Tick while idle, got {other:?}"),
        }
    }
}
