use thiserror::Error;

/// Errors surfaced by the benchmark record pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required column is missing from the CSV header.
    #[error("missing required column '{column}'")]
    Schema { column: &'static str },

    /// A cell could not be parsed as the expected numeric type.
    /// Row numbers are 1-based over data rows (the header is row 0).
    #[error("row {row}: cannot parse '{value}' in column '{column}'")]
    MalformedRow {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// Min-max normalization over a constant (or empty) series.
    #[error("cannot normalize a constant or empty series")]
    DegenerateRange,

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("band file: {0}")]
    BandFile(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
