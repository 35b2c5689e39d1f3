use serde::Serialize;
use ssq_db::models::{DrawRecord, Pool};

use crate::error::AnalysisError;
use crate::frequency::most_frequent_first;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapAnalysis {
    /// Consecutive differences of every draw's sorted front numbers, draw after draw.
    pub gaps: Vec<u8>,
    pub avg_gap: f64,
    pub common_gaps: Vec<u8>,
}

pub fn draw_gaps(draw: &DrawRecord) -> impl Iterator<Item = u8> {
    let sorted = draw.sorted_front();
    (1..sorted.len()).map(move |i| sorted[i].saturating_sub(sorted[i - 1]))
}

pub fn analyze_gaps(draws: &[DrawRecord], common_limit: usize) -> Result<GapAnalysis, AnalysisError> {
    if draws.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let gaps: Vec<u8> = draws.iter().flat_map(draw_gaps).collect();
    let avg_gap = gaps.iter().map(|&g| g as f64).sum::<f64>() / gaps.len() as f64;

    // Largest possible gap is 32; one slot per value 0..=32.
    let mut counts = vec![0u32; Pool::Front.size()];
    for &g in &gaps {
        if (g as usize) < counts.len() {
            counts[g as usize] += 1;
        }
    }

    let mut ranked: Vec<(u8, u32)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(gap, &count)| (gap as u8, count))
        .collect();
    ranked.sort_by(|&a, &b| most_frequent_first(a, b));
    let common_gaps = ranked.into_iter().take(common_limit).map(|(g, _)| g).collect();

    Ok(GapAnalysis {
        gaps,
        avg_gap,
        common_gaps,
    })
}
