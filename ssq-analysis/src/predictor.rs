use rand::Rng;
use serde::Serialize;
use ssq_db::models::{DrawRecord, Pool};
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::gaps::analyze_gaps;
use crate::hot_cold::{cold_numbers, hot_numbers, HotCold};
use crate::selector::select_constrained;

pub const METHOD: &str = "hot/cold blend + gap filter";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Ascending, distinct.
    pub front: [u8; 6],
    pub back: u8,
    pub confidence: f64,
    pub method: String,
    pub analysis: String,
}

/// How closely a pick follows the hot numbers of the confidence window.
pub fn score_confidence(
    draws: &[DrawRecord],
    front: &[u8],
    back: u8,
    config: &AnalysisConfig,
) -> Result<f64, AnalysisError> {
    let hot = hot_numbers(
        draws,
        config.confidence_window,
        config.hot_front_limit,
        config.hot_back_limit,
    )?;

    let hot_hits = front.iter().filter(|&n| hot.front.contains(n)).count();
    let mut confidence = config.base_confidence
        + hot_hits as f64 / Pool::Front.pick_count() as f64 * config.front_weight;
    if hot.back.contains(&back) {
        confidence += config.back_bonus;
    }

    Ok(confidence.min(config.max_confidence))
}

/// Leading hot front numbers followed by leading cold ones. The two lists may share
/// numbers; the selector absorbs repeats.
pub(crate) fn candidate_pool(hot: &HotCold, cold: &HotCold, config: &AnalysisConfig) -> Vec<u8> {
    hot.front
        .iter()
        .take(config.hot_candidates)
        .chain(cold.front.iter().take(config.cold_candidates))
        .copied()
        .collect()
}

pub fn predict_next<R: Rng + ?Sized>(
    draws: &[DrawRecord],
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<PredictionResult, AnalysisError> {
    let hot = hot_numbers(
        draws,
        config.prediction_window,
        config.hot_front_limit,
        config.hot_back_limit,
    )?;
    let cold = cold_numbers(draws, config.cold_front_limit, config.cold_back_limit)?;
    let gaps = analyze_gaps(draws, config.common_gap_limit)?;

    let candidates = candidate_pool(&hot, &cold, config);

    let picked = select_constrained(
        &candidates,
        Pool::Front.pick_count(),
        gaps.avg_gap,
        Pool::Front,
        rng,
    );
    debug!(?candidates, ?picked, avg_gap = gaps.avg_gap, "front numbers selected");

    let mut front = [0u8; 6];
    for (slot, &n) in front.iter_mut().zip(&picked) {
        *slot = n;
    }
    front.sort_unstable();

    let back = hot.back.first().copied().unwrap_or(1);
    let confidence = score_confidence(draws, &front, back, config)?;

    Ok(PredictionResult {
        front,
        back,
        confidence,
        method: METHOD.to_string(),
        analysis: format!(
            "Hot numbers of the last {} draws blended with all-time cold numbers, average gap {:.1}",
            config.prediction_window, gaps.avg_gap
        ),
    })
}
