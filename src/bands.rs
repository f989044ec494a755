use serde::{Deserialize, Serialize};

/// A named, inclusive difficulty-score interval used for visual grouping.
/// Bands may overlap; adjacent bands deliberately share boundary puzzles,
/// so membership is a classification, not a partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyBand {
    pub name: String,
    pub lo: u32,
    pub hi: u32,
}

impl DifficultyBand {
    pub fn new(name: &str, lo: u32, hi: u32) -> Self {
        Self {
            name: name.to_string(),
            lo,
            hi,
        }
    }

    pub fn contains(&self, score: u32) -> bool {
        (self.lo..=self.hi).contains(&score)
    }
}

/// The band list observed for generator v2.0 output. Configuration data,
/// overridable via a band file or the persisted plot config.
pub fn default_bands() -> Vec<DifficultyBand> {
    vec![
        DifficultyBand::new("Beginner", 3600, 4500),
        DifficultyBand::new("Easy", 4300, 5500),
        DifficultyBand::new("Medium", 5300, 6900),
        DifficultyBand::new("Hard", 6500, 9300),
    ]
}

/// Every band containing `score`, in band-list order. An empty result is a
/// valid outcome (scores outside all bands stay unlabelled).
pub fn classify(score: u32, bands: &[DifficultyBand]) -> Vec<&DifficultyBand> {
    bands.iter().filter(|b| b.contains(score)).collect()
}

/// Per-band roll-up for the summary table. Because bands overlap, a record
/// can contribute to more than one row.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSummary {
    pub band: DifficultyBand,
    pub count: usize,
    pub mean_time_ms: Option<f64>,
    pub std_dev_ms: Option<f64>,
    pub mean_solver_pct: Option<f64>,
}

pub fn summarize(
    records: &[crate::record::BenchmarkRecord],
    bands: &[DifficultyBand],
) -> Vec<BandSummary> {
    bands
        .iter()
        .map(|band| {
            let members = crate::pipeline::filter(records, |r| band.contains(r.difficulty_score));
            let times: Vec<f64> = members.iter().map(|r| r.generation_time_ms).collect();
            let shares: Vec<f64> = crate::pipeline::solver_share(&members)
                .iter()
                .map(|&(_, pct)| pct)
                .collect();

            BandSummary {
                band: band.clone(),
                count: members.len(),
                mean_time_ms: crate::util::mean(&times),
                std_dev_ms: crate::util::std_dev(&times),
                mean_solver_pct: crate::util::mean(&shares),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let band = DifficultyBand::new("Easy", 4300, 5500);

        assert!(band.contains(4300));
        assert!(band.contains(5500));
        assert!(!band.contains(4299));
        assert!(!band.contains(5501));
    }

    #[test]
    fn overlapping_bands_both_match() {
        let bands = default_bands();
        let names: Vec<&str> = classify(4400, &bands).iter().map(|b| b.name.as_str()).collect();

        assert_eq!(names, vec!["Beginner", "Easy"]);
    }

    #[test]
    fn score_outside_all_bands_is_unlabelled() {
        let bands = default_bands();
        assert!(classify(9999, &bands).is_empty());
        assert!(classify(0, &bands).is_empty());
    }

    #[test]
    fn single_band_match() {
        let bands = default_bands();
        let names: Vec<&str> = classify(4000, &bands).iter().map(|b| b.name.as_str()).collect();

        assert_eq!(names, vec!["Beginner"]);
    }

    #[test]
    fn summarize_counts_overlapping_records_in_both_bands() {
        use crate::record::BenchmarkRecord;

        let records = vec![
            BenchmarkRecord::new(4400, 1.0, Some(0.5)),
            BenchmarkRecord::new(4000, 3.0, None),
        ];
        let summaries = summarize(&records, &default_bands());

        let beginner = &summaries[0];
        assert_eq!(beginner.band.name, "Beginner");
        assert_eq!(beginner.count, 2);
        assert_eq!(beginner.mean_time_ms, Some(2.0));

        let easy = &summaries[1];
        assert_eq!(easy.count, 1);
        assert_eq!(easy.mean_time_ms, Some(1.0));
        assert_eq!(easy.mean_solver_pct, Some(50.0));
    }

    #[test]
    fn summarize_empty_band_has_no_means() {
        let summaries = summarize(&[], &default_bands());

        assert!(summaries.iter().all(|s| s.count == 0));
        assert!(summaries.iter().all(|s| s.mean_time_ms.is_none()));
        assert!(summaries.iter().all(|s| s.mean_solver_pct.is_none()));
    }

    #[test]
    fn band_list_roundtrips_through_json() {
        let bands = default_bands();
        let json = serde_json::to_string(&bands).unwrap();
        let loaded: Vec<DifficultyBand> = serde_json::from_str(&json).unwrap();

        assert_eq!(bands, loaded);
    }
}
