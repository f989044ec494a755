use clap::ValueEnum;

use crate::config::PlotConfig;
use crate::pipeline;
use crate::record::BenchmarkRecord;

/// The four plot variants the tool renders. One parameterized build path
/// replaces what used to be near-identical per-plot scripts upstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum PlotKind {
    /// Generation time per record
    Scatter,
    /// Mean generation time per difficulty score
    Average,
    /// Recursive solver share of generation time, per record
    SolverShare,
    /// Mean recursive solver share per difficulty score
    SolverShareAverage,
}

impl PlotKind {
    pub fn x_label(&self) -> &'static str {
        "difficulty score"
    }

    pub fn y_label(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "time (ms)",
            PlotKind::Average => "avg time (ms)",
            PlotKind::SolverShare => "solver %",
            PlotKind::SolverShareAverage => "avg solver %",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "Difficulty Score vs. Generation Time",
            PlotKind::Average => "Average Generation Time by Difficulty Score",
            PlotKind::SolverShare => "Recursive Solver Share of Generation Time",
            PlotKind::SolverShareAverage => "Average Recursive Solver Share by Difficulty Score",
        }
    }

    fn is_aggregated(&self) -> bool {
        matches!(self, PlotKind::Average | PlotKind::SolverShareAverage)
    }
}

/// How marks are shaded. `Ramp` carries one normalized value per point;
/// `Uniform` is the explicit fallback when the series has no spread.
#[derive(Debug, Clone, PartialEq)]
pub enum Shade {
    Uniform,
    Ramp(Vec<f64>),
}

/// Plot-ready output: points in draw order plus shading, with per-point
/// sample counts when the kind aggregates. The chart renders this as-is
/// and computes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub kind: PlotKind,
    pub points: Vec<(f64, f64)>,
    pub shade: Shade,
    pub counts: Option<Vec<usize>>,
}

impl ScatterSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Build the plot-ready series for `kind` from already-loaded records.
///
/// Threshold filters from the config apply to the generation-time kinds;
/// the solver-share kinds consume every record that has a solver phase,
/// matching the upstream analysis. Shading is min-max normalized over the
/// y values; a degenerate range downgrades to `Shade::Uniform` here, on a
/// typed branch, so the renderer never sees NaN.
pub fn build_series(records: &[BenchmarkRecord], kind: PlotKind, config: &PlotConfig) -> ScatterSeries {
    let (pairs, counts) = match kind {
        PlotKind::Scatter | PlotKind::Average => {
            let kept = pipeline::filter(records, |r| config.keeps(r));
            let pairs: Vec<(u32, f64)> = kept
                .iter()
                .map(|r| (r.difficulty_score, r.generation_time_ms))
                .collect();

            if kind.is_aggregated() {
                split_aggregated(&pairs)
            } else {
                (pairs, None)
            }
        }
        PlotKind::SolverShare | PlotKind::SolverShareAverage => {
            let pairs = pipeline::solver_share(records);

            if kind.is_aggregated() {
                split_aggregated(&pairs)
            } else {
                (pairs, None)
            }
        }
    };

    let ys: Vec<f64> = pairs.iter().map(|&(_, y)| y).collect();
    let shade = match pipeline::normalize(&ys) {
        Ok(values) => Shade::Ramp(values),
        // degenerate range: no spread to shade over
        Err(_) => Shade::Uniform,
    };

    ScatterSeries {
        kind,
        points: pairs.iter().map(|&(x, y)| (x as f64, y)).collect(),
        shade,
        counts,
    }
}

fn split_aggregated(pairs: &[(u32, f64)]) -> (Vec<(u32, f64)>, Option<Vec<usize>>) {
    let aggregated = pipeline::aggregate_by_key(pairs);
    let counts = aggregated.iter().map(|p| p.sample_count).collect();
    let pairs = aggregated.iter().map(|p| (p.key, p.mean_value)).collect();
    (pairs, Some(counts))
}
