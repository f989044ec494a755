use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::bands::{summarize, BandSummary};
use crate::{App, SummarySort};

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

pub fn render(app: &App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let sort_direction = if app.summary_state.ascending {
        "↑"
    } else {
        "↓"
    };
    let sort_by_text = match app.summary_state.sort_by {
        SummarySort::Band => "Band",
        SummarySort::Count => "Count",
        SummarySort::MeanTime => "Mean Time",
    };

    let title = Paragraph::new(format!(
        "Difficulty Bands (Sort: {} {})",
        sort_by_text, sort_direction
    ))
    .block(Block::default().borders(Borders::ALL).title("Summary"))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let mut summaries = summarize(&app.records, &app.config.bands);
    sort_summaries(&mut summaries, app.summary_state.sort_by, app.summary_state.ascending);

    if summaries.is_empty() {
        let no_data = Paragraph::new("No bands configured.\nPass a band file or restore the defaults.")
            .block(Block::default().borders(Borders::ALL).title("No Data"))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(no_data, chunks[1]);
    } else {
        let header = Row::new(vec![
            Cell::from("Band"),
            Cell::from("Range"),
            Cell::from("Records"),
            Cell::from("Mean Time (ms)"),
            Cell::from("Std Dev (ms)"),
            Cell::from("Mean Solver (%)"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = summaries
            .iter()
            .map(|s| {
                let style = if s.count == 0 {
                    Style::default().add_modifier(Modifier::DIM)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    Cell::from(s.band.name.clone()),
                    Cell::from(format!("{}-{}", s.band.lo, s.band.hi)),
                    Cell::from(s.count.to_string()),
                    Cell::from(fmt_opt(s.mean_time_ms)),
                    Cell::from(fmt_opt(s.std_dev_ms)),
                    Cell::from(fmt_opt(s.mean_solver_pct)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            &[
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(14),
                Constraint::Length(16),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Per-band roll-up (overlapping bands share records)"),
        );

        f.render_widget(table, chunks[1]);
    }

    let instructions = Paragraph::new(
        "Sort: (1)Band (2)Count (3)Mean Time | (Space)Toggle | (b)ack (esc)ape",
    )
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
    .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}

fn sort_summaries(summaries: &mut [BandSummary], sort_by: SummarySort, ascending: bool) {
    match sort_by {
        // band order is the configured list order; descending just reverses it
        SummarySort::Band => {
            if !ascending {
                summaries.reverse();
            }
        }
        SummarySort::Count => {
            summaries.sort_by(|a, b| {
                let cmp = a.count.cmp(&b.count);
                if ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }
        SummarySort::MeanTime => {
            summaries.sort_by(|a, b| {
                let cmp = a
                    .mean_time_ms
                    .partial_cmp(&b.mean_time_ms)
                    .unwrap_or(std::cmp::Ordering::Equal);
                if ascending {
                    cmp
                } else {
                    cmp.reverse()
                }
            });
        }
    }
}
