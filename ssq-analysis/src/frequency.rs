use std::cmp::Ordering;

use serde::Serialize;
use ssq_db::models::{DrawRecord, Pool};

use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFrequency {
    pub number: u8,
    pub count: u32,
    pub percentage: f64,
}

/// Occurrences per number over `draws`; index `n - 1` holds the count of `n`.
pub fn count_numbers<'a, I>(draws: I, pool: Pool) -> Vec<u32>
where
    I: IntoIterator<Item = &'a DrawRecord>,
{
    let mut counts = vec![0u32; pool.size()];
    for draw in draws {
        for &n in pool.numbers_from(draw) {
            let idx = (n as usize).wrapping_sub(1);
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
    }
    counts
}

/// Higher count first, then the smaller number.
pub(crate) fn most_frequent_first(a: (u8, u32), b: (u8, u32)) -> Ordering {
    b.1.cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Lower count first, then the smaller number.
pub(crate) fn least_frequent_first(a: (u8, u32), b: (u8, u32)) -> Ordering {
    a.1.cmp(&b.1).then(a.0.cmp(&b.0))
}

/// Full-domain frequency table, most frequent first.
pub fn number_frequency(draws: &[DrawRecord], pool: Pool) -> Result<Vec<NumberFrequency>, AnalysisError> {
    if draws.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let total = draws.len() as f64;
    let counts = count_numbers(draws, pool);

    let mut ranked: Vec<(u8, u32)> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| ((i + 1) as u8, count))
        .collect();
    ranked.sort_by(|&a, &b| most_frequent_first(a, b));

    Ok(ranked
        .into_iter()
        .map(|(number, count)| NumberFrequency {
            number,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{make_test_draws, scenario_draws};

    fn find(freqs: &[NumberFrequency], number: u8) -> &NumberFrequency {
        freqs.iter().find(|f| f.number == number).unwrap()
    }

    #[test]
    fn test_front_frequency_scenario() {
        let freqs = number_frequency(&scenario_draws(), Pool::Front).unwrap();
        assert_eq!(freqs.len(), 33);

        for n in [4, 9, 10] {
            let f = find(&freqs, n);
            assert_eq!(f.count, 2);
            assert!((f.percentage - 66.666_666).abs() < 1e-3);
        }
        let f = find(&freqs, 24);
        assert_eq!(f.count, 1);
        assert!((f.percentage - 33.333_333).abs() < 1e-3);
        let f = find(&freqs, 1);
        assert_eq!(f.count, 0);
        assert_eq!(f.percentage, 0.0);
    }

    #[test]
    fn test_front_frequency_order() {
        let freqs = number_frequency(&scenario_draws(), Pool::Front).unwrap();
        let head: Vec<u8> = freqs.iter().take(5).map(|f| f.number).collect();
        assert_eq!(head, [4, 9, 10, 2, 6]);
        let tail: Vec<u8> = freqs.iter().rev().take(3).map(|f| f.number).collect();
        assert_eq!(tail, [33, 32, 31]);
    }

    #[test]
    fn test_back_frequency_scenario() {
        let freqs = number_frequency(&scenario_draws(), Pool::Back).unwrap();
        assert_eq!(freqs.len(), 16);
        let head: Vec<u8> = freqs.iter().take(4).map(|f| f.number).collect();
        assert_eq!(head, [1, 6, 14, 2]);
        assert_eq!(find(&freqs, 14).count, 1);
        assert_eq!(find(&freqs, 2).count, 0);
    }

    #[test]
    fn test_counts_sum_to_draws() {
        let draws = make_test_draws(40);
        let front: u32 = number_frequency(&draws, Pool::Front).unwrap().iter().map(|f| f.count).sum();
        let back: u32 = number_frequency(&draws, Pool::Back).unwrap().iter().map(|f| f.count).sum();
        assert_eq!(front, 40 * 6);
        assert_eq!(back, 40);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(number_frequency(&[], Pool::Front), Err(AnalysisError::EmptyDataset));
        assert_eq!(number_frequency(&[], Pool::Back), Err(AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_count_numbers_ignores_out_of_domain() {
        let draws = vec![DrawRecord::new("2025001", [0, 2, 3, 4, 5, 40], 1)];
        let counts = count_numbers(&draws, Pool::Front);
        assert_eq!(counts.iter().sum::<u32>(), 4);
    }
}
