use serde::{Deserialize, Serialize};

/// Tunables of the hot/cold heuristic. Every field has a default so partial JSON files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Window used when hot numbers are queried directly.
    pub hot_window: usize,
    /// Window the predictor draws its hot candidates from.
    pub prediction_window: usize,
    /// Window the confidence score compares against.
    pub confidence_window: usize,
    pub hot_front_limit: usize,
    pub hot_back_limit: usize,
    pub cold_front_limit: usize,
    pub cold_back_limit: usize,
    pub common_gap_limit: usize,
    pub hot_candidates: usize,
    pub cold_candidates: usize,
    pub base_confidence: f64,
    pub front_weight: f64,
    pub back_bonus: f64,
    pub max_confidence: f64,
    /// Issue reported when there is no history at all.
    pub fallback_issue: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hot_window: 20,
            prediction_window: 30,
            confidence_window: 20,
            hot_front_limit: 10,
            hot_back_limit: 5,
            cold_front_limit: 10,
            cold_back_limit: 5,
            common_gap_limit: 5,
            hot_candidates: 4,
            cold_candidates: 2,
            base_confidence: 0.3,
            front_weight: 0.4,
            back_bonus: 0.3,
            max_confidence: 0.85,
            fallback_issue: "2025060".to_string(),
        }
    }
}
