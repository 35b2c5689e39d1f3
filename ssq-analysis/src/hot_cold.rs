use serde::Serialize;
use ssq_db::models::{DrawRecord, Pool};

use crate::error::AnalysisError;
use crate::frequency::{count_numbers, least_frequent_first, most_frequent_first, number_frequency};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HotCold {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
}

/// Numbers seen at least once in `counts`, most frequent first.
fn top_occurring(counts: &[u32], limit: usize) -> Vec<u8> {
    let mut seen: Vec<(u8, u32)> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| ((i + 1) as u8, count))
        .collect();
    seen.sort_by(|&a, &b| most_frequent_first(a, b));
    seen.into_iter().take(limit).map(|(n, _)| n).collect()
}

/// Most frequent numbers among the latest `periods` draws (`draws[0]` = latest).
pub fn hot_numbers(
    draws: &[DrawRecord],
    periods: usize,
    front_limit: usize,
    back_limit: usize,
) -> Result<HotCold, AnalysisError> {
    if draws.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let window = &draws[..periods.min(draws.len())];

    Ok(HotCold {
        front: top_occurring(&count_numbers(window, Pool::Front), front_limit),
        back: top_occurring(&count_numbers(window, Pool::Back), back_limit),
    })
}

fn least_frequent(draws: &[DrawRecord], pool: Pool, limit: usize) -> Result<Vec<u8>, AnalysisError> {
    let mut ranked: Vec<(u8, u32)> = number_frequency(draws, pool)?
        .into_iter()
        .map(|f| (f.number, f.count))
        .collect();
    ranked.sort_by(|&a, &b| least_frequent_first(a, b));
    Ok(ranked.into_iter().take(limit).map(|(n, _)| n).collect())
}

/// Least frequent numbers over the whole history, never-drawn numbers first.
pub fn cold_numbers(
    draws: &[DrawRecord],
    front_limit: usize,
    back_limit: usize,
) -> Result<HotCold, AnalysisError> {
    Ok(HotCold {
        front: least_frequent(draws, Pool::Front, front_limit)?,
        back: least_frequent(draws, Pool::Back, back_limit)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_test_draws, scenario_draws};

    #[test]
    fn test_hot_numbers_scenario() {
        let hot = hot_numbers(&scenario_draws(), 20, 10, 5).unwrap();
        assert_eq!(hot.front, [4, 9, 10, 2, 6, 7, 11, 12, 13, 15]);
        assert_eq!(hot.back, [1, 6, 14]);
    }

    #[test]
    fn test_hot_numbers_window() {
        let hot = hot_numbers(&scenario_draws(), 1, 10, 5).unwrap();
        assert_eq!(hot.front, [4, 10, 11, 12, 13, 24]);
        assert_eq!(hot.back, [1]);

        let hot = hot_numbers(&scenario_draws(), 0, 10, 5).unwrap();
        assert!(hot.front.is_empty());
        assert!(hot.back.is_empty());
    }

    #[test]
    fn test_hot_numbers_recent_favored() {
        let mut draws = scenario_draws();
        draws.insert(0, DrawRecord::new("2025060", [4, 9, 10, 20, 21, 22], 6));
        let hot = hot_numbers(&draws, 20, 3, 1).unwrap();
        assert_eq!(hot.front, [4, 9, 10]);
        assert_eq!(hot.back, [6]);
    }

    #[test]
    fn test_hot_numbers_bounded() {
        let hot = hot_numbers(&make_test_draws(50), 20, 10, 5).unwrap();
        assert!(hot.front.len() <= 10);
        assert!(hot.back.len() <= 5);
        assert!(hot.front.iter().all(|&n| Pool::Front.contains(n)));
        assert!(hot.back.iter().all(|&n| Pool::Back.contains(n)));
    }

    #[test]
    fn test_cold_numbers_scenario() {
        let cold = cold_numbers(&scenario_draws(), 10, 5).unwrap();
        assert_eq!(cold.front, [1, 3, 5, 8, 14, 17, 18, 19, 21, 22]);
        assert_eq!(cold.back, [2, 3, 4, 5, 7]);
    }

    #[test]
    fn test_hot_and_cold_may_overlap() {
        // With a full-length cold list every hot number also ranks as cold.
        let draws = vec![DrawRecord::new("2025001", [1, 2, 3, 4, 5, 6], 1)];
        let hot = hot_numbers(&draws, 20, 10, 5).unwrap();
        let cold = cold_numbers(&draws, 33, 16).unwrap();
        assert!(hot.front.iter().all(|n| cold.front.contains(n)));
        assert_eq!(cold.back.last(), Some(&1));
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(hot_numbers(&[], 20, 10, 5), Err(AnalysisError::EmptyDataset));
        assert_eq!(cold_numbers(&[], 10, 5), Err(AnalysisError::EmptyDataset));
    }
}
