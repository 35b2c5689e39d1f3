use rand::Rng;
use ssq_db::models::{DrawRecord, Pool};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::frequency::{number_frequency, NumberFrequency};
use crate::gaps::{analyze_gaps, GapAnalysis};
use crate::hot_cold::{cold_numbers, hot_numbers, HotCold};
use crate::issue::{next_issue, IssueId};
use crate::predictor::{predict_next, score_confidence, PredictionResult};

/// Read-only snapshot of a draw history, newest draw first.
///
/// Built once per load; every query is computed on demand from the records.
#[derive(Debug, Clone)]
pub struct Analyzer {
    draws: Vec<DrawRecord>,
    config: AnalysisConfig,
}

/// Adjacent issues that both parse must be strictly decreasing.
fn check_newest_first(draws: &[DrawRecord]) -> Result<(), AnalysisError> {
    for (position, pair) in draws.windows(2).enumerate() {
        let (Ok(newer), Ok(older)) = (pair[0].issue.parse::<IssueId>(), pair[1].issue.parse::<IssueId>()) else {
            continue;
        };
        if newer <= older {
            return Err(AnalysisError::OutOfOrder {
                position,
                newer: pair[0].issue.clone(),
                older: pair[1].issue.clone(),
            });
        }
    }
    Ok(())
}

impl Analyzer {
    pub fn new(draws: Vec<DrawRecord>) -> Result<Self, AnalysisError> {
        Self::with_config(draws, AnalysisConfig::default())
    }

    pub fn with_config(draws: Vec<DrawRecord>, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        check_newest_first(&draws)?;
        debug!(records = draws.len(), "analyzer ready");
        Ok(Self { draws, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn latest(&self) -> Option<&DrawRecord> {
        self.draws.first()
    }

    pub fn front_frequency(&self) -> Result<Vec<NumberFrequency>, AnalysisError> {
        number_frequency(&self.draws, Pool::Front)
    }

    pub fn back_frequency(&self) -> Result<Vec<NumberFrequency>, AnalysisError> {
        number_frequency(&self.draws, Pool::Back)
    }

    pub fn hot_numbers(&self, periods: usize) -> Result<HotCold, AnalysisError> {
        hot_numbers(
            &self.draws,
            periods,
            self.config.hot_front_limit,
            self.config.hot_back_limit,
        )
    }

    pub fn cold_numbers(&self) -> Result<HotCold, AnalysisError> {
        cold_numbers(
            &self.draws,
            self.config.cold_front_limit,
            self.config.cold_back_limit,
        )
    }

    pub fn analyze_gaps(&self) -> Result<GapAnalysis, AnalysisError> {
        analyze_gaps(&self.draws, self.config.common_gap_limit)
    }

    pub fn score_confidence(&self, front: &[u8], back: u8) -> Result<f64, AnalysisError> {
        score_confidence(&self.draws, front, back, &self.config)
    }

    pub fn predict_next(&self) -> Result<PredictionResult, AnalysisError> {
        self.predict_next_with(&mut rand::rng())
    }

    pub fn predict_next_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PredictionResult, AnalysisError> {
        predict_next(&self.draws, &self.config, rng)
    }

    pub fn next_issue(&self) -> Result<String, AnalysisError> {
        next_issue(
            self.latest().map(|d| d.issue.as_str()),
            &self.config.fallback_issue,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_test_draws, scenario_draws};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scenario_queries() {
        let analyzer = Analyzer::new(scenario_draws()).unwrap();
        assert_eq!(analyzer.len(), 3);
        assert_eq!(analyzer.front_frequency().unwrap().len(), 33);
        assert_eq!(analyzer.back_frequency().unwrap().len(), 16);
        assert_eq!(analyzer.hot_numbers(20).unwrap().back, [1, 6, 14]);
        assert_eq!(analyzer.cold_numbers().unwrap().back, [2, 3, 4, 5, 7]);
        assert!((analyzer.analyze_gaps().unwrap().avg_gap - 4.2667).abs() < 1e-3);
        assert_eq!(analyzer.next_issue().unwrap(), "2025060");
    }

    #[test]
    fn test_rejects_oldest_first() {
        let mut draws = scenario_draws();
        draws.reverse();
        let err = Analyzer::new(draws).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::OutOfOrder {
                position: 0,
                newer: "2025057".to_string(),
                older: "2025058".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_repeated_issue() {
        let mut draws = scenario_draws();
        let latest = draws[0].clone();
        draws.insert(1, latest);
        assert!(matches!(Analyzer::new(draws), Err(AnalysisError::OutOfOrder { position: 0, .. })));
    }

    #[test]
    fn test_unparsable_issues_not_compared() {
        let draws = vec![
            DrawRecord::new("special", [1, 2, 3, 4, 5, 6], 1),
            DrawRecord::new("2025001", [1, 2, 3, 4, 5, 6], 1),
        ];
        let analyzer = Analyzer::new(draws).unwrap();
        assert!(matches!(analyzer.next_issue(), Err(AnalysisError::MalformedIssue(_))));
    }

    #[test]
    fn test_empty_history() {
        let analyzer = Analyzer::new(Vec::new()).unwrap();
        assert!(analyzer.is_empty());
        assert_eq!(analyzer.next_issue().unwrap(), "2025060");
        assert_eq!(analyzer.front_frequency(), Err(AnalysisError::EmptyDataset));
        assert_eq!(analyzer.hot_numbers(20), Err(AnalysisError::EmptyDataset));
        assert_eq!(analyzer.cold_numbers(), Err(AnalysisError::EmptyDataset));
        assert_eq!(analyzer.analyze_gaps(), Err(AnalysisError::EmptyDataset));
        assert_eq!(analyzer.predict_next(), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_config_flows_through() {
        let config = AnalysisConfig {
            hot_front_limit: 3,
            cold_back_limit: 2,
            fallback_issue: "2026001".to_string(),
            ..AnalysisConfig::default()
        };
        let analyzer = Analyzer::with_config(scenario_draws(), config.clone()).unwrap();
        assert_eq!(analyzer.hot_numbers(20).unwrap().front, [4, 9, 10]);
        assert_eq!(analyzer.cold_numbers().unwrap().back, [2, 3]);
        let empty = Analyzer::with_config(Vec::new(), config).unwrap();
        assert_eq!(empty.next_issue().unwrap(), "2026001");
    }

    #[test]
    fn test_next_issue_idempotent() {
        let analyzer = Analyzer::new(make_test_draws(20)).unwrap();
        assert_eq!(analyzer.next_issue().unwrap(), analyzer.next_issue().unwrap());
    }

    #[test]
    fn test_predict_next_with_seed() {
        let analyzer = Analyzer::new(make_test_draws(40)).unwrap();
        let a = analyzer.predict_next_with(&mut StdRng::seed_from_u64(77)).unwrap();
        let b = analyzer.predict_next_with(&mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
        let unseeded = analyzer.predict_next().unwrap();
        assert!(unseeded.confidence >= 0.3 && unseeded.confidence <= 0.85);
    }

    #[test]
    fn test_analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Analyzer>();
    }
}
