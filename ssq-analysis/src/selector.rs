use rand::seq::SliceRandom;
use rand::Rng;
use ssq_db::models::Pool;

/// Randomized greedy pick of `count` numbers from `candidates`.
///
/// Shuffles the candidates, then runs [`pick_spaced`] over them.
pub fn select_constrained<R: Rng + ?Sized>(
    candidates: &[u8],
    count: usize,
    avg_gap: f64,
    pool: Pool,
    rng: &mut R,
) -> Vec<u8> {
    let mut shuffled = candidates.to_vec();
    shuffled.shuffle(rng);
    pick_spaced(&shuffled, count, avg_gap, pool)
}

/// Greedy pass over `ordered`, in that order.
///
/// A candidate is kept when its distance to every number already kept lies in
/// `[floor(avg_gap / 2), avg_gap * 2]`. The first pick and the last open slot skip that
/// check. Repeated candidates count once. Missing slots are then filled with the smallest
/// unused numbers of `pool`, so the result holds distinct numbers in selection order.
pub fn pick_spaced(ordered: &[u8], count: usize, avg_gap: f64, pool: Pool) -> Vec<u8> {
    let min_gap = (avg_gap / 2.0).floor();
    let max_gap = avg_gap * 2.0;
    let mut selected: Vec<u8> = Vec::with_capacity(count);

    for &candidate in ordered {
        if selected.len() >= count {
            break;
        }
        if selected.contains(&candidate) {
            continue;
        }
        let spaced = selected.iter().all(|&s| {
            let gap = (candidate as f64 - s as f64).abs();
            gap >= min_gap && gap <= max_gap
        });
        let last_slot = selected.len() + 1 >= count;
        if spaced || last_slot {
            selected.push(candidate);
        }
    }

    for n in 1..=pool.size() as u8 {
        if selected.len() >= count {
            break;
        }
        if !selected.contains(&n) {
            selected.push(n);
        }
    }

    selected
}
