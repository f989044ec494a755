use std::path::Path;

use crate::error::AnalysisError;

pub const COL_SCORE: &str = "Difficulty Score";
pub const COL_TIME: &str = "Time (ms)";
pub const COL_SOLVER_TIME: &str = "Recursive Solver Time (ms)";

/// One row of generator benchmark output. Records are immutable after load
/// and keep the order they had in the input file.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    pub difficulty_score: u32,
    pub generation_time_ms: f64,
    pub recursive_solver_time_ms: Option<f64>,
}

impl BenchmarkRecord {
    pub fn new(
        difficulty_score: u32,
        generation_time_ms: f64,
        recursive_solver_time_ms: Option<f64>,
    ) -> Self {
        Self {
            difficulty_score,
            generation_time_ms,
            recursive_solver_time_ms,
        }
    }
}

/// Load benchmark records from a CSV file with a header row.
///
/// `Difficulty Score` and `Time (ms)` are required; `Recursive Solver Time (ms)`
/// is optional and empty cells in it yield `None`. A missing required column
/// aborts with `Schema`; an unparsable cell aborts the whole load with
/// `MalformedRow` rather than dropping the row, so aggregate views never
/// silently change meaning.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<BenchmarkRecord>, AnalysisError> {
    let mut reader = csv::Reader::from_path(path)?;
    load_from_reader(&mut reader)
}

/// Load from any CSV source; the seam used by tests reading in-memory data.
pub fn load_from_reader<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<Vec<BenchmarkRecord>, AnalysisError> {
    let headers = reader.headers()?.clone();

    let score_idx = column_index(&headers, COL_SCORE)?;
    let time_idx = column_index(&headers, COL_TIME)?;
    let solver_idx = headers.iter().position(|h| h.trim() == COL_SOLVER_TIME);

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        let line = i + 1;

        let difficulty_score = parse_cell::<u32>(&row, score_idx, COL_SCORE, line)?;
        let generation_time_ms = parse_cell::<f64>(&row, time_idx, COL_TIME, line)?;

        let recursive_solver_time_ms = match solver_idx {
            Some(idx) if !cell(&row, idx).is_empty() => {
                Some(parse_cell::<f64>(&row, idx, COL_SOLVER_TIME, line)?)
            }
            _ => None,
        };

        records.push(BenchmarkRecord {
            difficulty_score,
            generation_time_ms,
            recursive_solver_time_ms,
        });
    }

    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, AnalysisError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(AnalysisError::Schema { column: name })
}

fn cell<'a>(row: &'a csv::StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("").trim()
}

fn parse_cell<T: std::str::FromStr>(
    row: &csv::StringRecord,
    idx: usize,
    column: &'static str,
    line: usize,
) -> Result<T, AnalysisError> {
    let raw = cell(row, idx);
    raw.parse::<T>().map_err(|_| AnalysisError::MalformedRow {
        row: line,
        column,
        value: raw.to_string(),
    })
}
