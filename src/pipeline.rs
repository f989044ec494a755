//! Pure transforms that turn loaded benchmark records into plot-ready data.
//! Everything here is total over well-formed records except `normalize`,
//! which rejects constant series instead of emitting NaN.

use itertools::Itertools;

use crate::error::AnalysisError;
use crate::record::BenchmarkRecord;

/// Mean of one grouped value, plus how many records backed it.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedPoint {
    pub key: u32,
    pub mean_value: f64,
    pub sample_count: usize,
}

/// Keep the records satisfying `pred`, preserving input order.
/// Chaining two calls is equivalent to one call with the conjunction.
pub fn filter<P>(records: &[BenchmarkRecord], pred: P) -> Vec<BenchmarkRecord>
where
    P: Fn(&BenchmarkRecord) -> bool,
{
    records.iter().filter(|r| pred(r)).cloned().collect()
}

/// Per-record share of generation time spent in the recursive solver,
/// as `(difficulty_score, percentage)` in input order.
///
/// Records without a solver time are skipped, and so are records with a
/// zero generation time: the division is guarded here so no NaN or infinity
/// ever reaches a caller.
pub fn solver_share(records: &[BenchmarkRecord]) -> Vec<(u32, f64)> {
    records
        .iter()
        .filter_map(|r| {
            let solver = r.recursive_solver_time_ms?;
            if r.generation_time_ms == 0.0 {
                return None;
            }
            Some((r.difficulty_score, solver / r.generation_time_ms * 100.0))
        })
        .collect()
}

/// Group `(key, value)` pairs by key and average the values per group.
/// Output is sorted ascending by key, independent of input order.
pub fn aggregate_by_key(pairs: &[(u32, f64)]) -> Vec<AggregatedPoint> {
    pairs
        .iter()
        .copied()
        .into_group_map()
        .into_iter()
        .map(|(key, values)| AggregatedPoint {
            key,
            mean_value: values.iter().sum::<f64>() / values.len() as f64,
            sample_count: values.len(),
        })
        .sorted_by_key(|p| p.key)
        .collect()
}

/// Min-max normalize into [0, 1].
///
/// A constant series (and the empty one) has no range to normalize against
/// and fails with `DegenerateRange` so callers choose the fallback
/// explicitly instead of receiving NaN.
pub fn normalize(values: &[f64]) -> Result<Vec<f64>, AnalysisError> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.is_empty() || max == min {
        return Err(AnalysisError::DegenerateRange);
    }

    Ok(values.iter().map(|v| (v - min) / (max - min)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn rec(score: u32, time: f64) -> BenchmarkRecord {
        BenchmarkRecord::new(score, time, None)
    }

    fn rec_solver(score: u32, time: f64, solver: f64) -> BenchmarkRecord {
        BenchmarkRecord::new(score, time, Some(solver))
    }

    #[test]
    fn filter_preserves_order() {
        let records = vec![rec(5000, 3.0), rec(4000, 1.0), rec(6000, 2.0)];
        let kept = filter(&records, |r| r.generation_time_ms >= 2.0);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].difficulty_score, 5000);
        assert_eq!(kept[1].difficulty_score, 6000);
    }

    #[test]
    fn chained_filters_match_conjunction() {
        let records = vec![rec(5000, 3.0), rec(4000, 1.0), rec(6000, 2.0)];

        let chained = filter(
            &filter(&records, |r| r.difficulty_score < 5500),
            |r| r.generation_time_ms < 2.0,
        );
        let combined = filter(&records, |r| {
            r.difficulty_score < 5500 && r.generation_time_ms < 2.0
        });

        assert_eq!(chained, combined);
    }

    #[test]
    fn solver_share_computes_percentage_in_order() {
        let records = vec![rec_solver(4000, 2.0, 0.5), rec_solver(5000, 4.0, 3.0)];
        let shares = solver_share(&records);

        assert_eq!(shares, vec![(4000, 25.0), (5000, 75.0)]);
    }

    #[test]
    fn solver_share_skips_records_without_solver_time() {
        let records = vec![rec(4000, 2.0), rec_solver(5000, 4.0, 1.0)];
        let shares = solver_share(&records);

        assert_eq!(shares, vec![(5000, 25.0)]);
    }

    #[test]
    fn solver_share_excludes_zero_generation_time() {
        let records = vec![
            rec_solver(4000, 0.0, 1.0),
            rec_solver(5000, 2.0, 1.0),
            rec_solver(6000, 0.0, 0.0),
        ];
        let shares = solver_share(&records);

        assert_eq!(shares, vec![(5000, 50.0)]);
        assert!(shares.iter().all(|(_, pct)| pct.is_finite()));
    }

    #[test]
    fn aggregate_means_and_counts_per_key() {
        let pairs = vec![(1, 10.0), (1, 20.0), (2, 5.0)];
        let points = aggregate_by_key(&pairs);

        assert_eq!(
            points,
            vec![
                AggregatedPoint {
                    key: 1,
                    mean_value: 15.0,
                    sample_count: 2
                },
                AggregatedPoint {
                    key: 2,
                    mean_value: 5.0,
                    sample_count: 1
                },
            ]
        );
    }

    #[test]
    fn aggregate_sorts_keys_regardless_of_input_order() {
        let pairs = vec![(9, 1.0), (3, 2.0), (7, 3.0), (3, 4.0)];
        let keys: Vec<u32> = aggregate_by_key(&pairs).iter().map(|p| p.key).collect();

        assert_eq!(keys, vec![3, 7, 9]);
    }

    #[test]
    fn aggregate_single_record_group() {
        let points = aggregate_by_key(&[(42, 7.5)]);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].mean_value, 7.5);
        assert_eq!(points[0].sample_count, 1);
    }

    #[test]
    fn aggregate_empty_input_yields_no_groups() {
        assert!(aggregate_by_key(&[]).is_empty());
    }

    #[test]
    fn normalize_spreads_to_unit_range() {
        let normalized = normalize(&[0.0, 5.0, 10.0]).unwrap();
        assert_eq!(normalized, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn normalize_constant_series_is_degenerate() {
        let err = normalize(&[5.0, 5.0, 5.0]).unwrap_err();
        assert_matches!(err, AnalysisError::DegenerateRange);
    }

    #[test]
    fn normalize_empty_series_is_degenerate() {
        let err = normalize(&[]).unwrap_err();
        assert_matches!(err, AnalysisError::DegenerateRange);
    }

    #[test]
    fn normalize_single_value_is_degenerate() {
        let err = normalize(&[3.0]).unwrap_err();
        assert_matches!(err, AnalysisError::DegenerateRange);
    }
}
