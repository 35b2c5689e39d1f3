//! Frequency, hot/cold, gap and next-draw heuristics over a Shuangseqiu draw history.
//!
//! Every history handed to this crate is ordered newest first: index 0 is the latest draw.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod frequency;
pub mod gaps;
pub mod hot_cold;
pub mod issue;
pub mod predictor;
pub mod selector;

pub use analyzer::Analyzer;
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use frequency::NumberFrequency;
pub use gaps::GapAnalysis;
pub use hot_cold::HotCold;
pub use predictor::PredictionResult;

#[cfg(test)]
pub(crate) mod tests {
    use ssq_db::models::DrawRecord;

    /// Three published draws, newest first.
    pub fn scenario_draws() -> Vec<DrawRecord> {
        vec![
            DrawRecord::new("2025059", [4, 10, 11, 12, 13, 24], 1),
            DrawRecord::new("2025058", [2, 6, 7, 9, 10, 20], 6),
            DrawRecord::new("2025057", [4, 9, 15, 16, 25, 30], 14),
        ]
    }

    /// `n` valid draws with strictly decreasing issues.
    pub fn make_test_draws(n: usize) -> Vec<DrawRecord> {
        (0..n)
            .map(|i| {
                let base = (i % 12) as u8;
                DrawRecord::new(
                    format!("2024{:03}", n - i),
                    [base + 1, base + 3, base + 6, base + 10, base + 15, base + 21],
                    (i % 16) as u8 + 1,
                )
            })
            .collect()
    }
}
