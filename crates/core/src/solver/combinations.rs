use crate::domain::Share;

/// Number of non-empty subsets of `n` items, saturating at `u64::MAX`.
pub fn candidate_count(n: usize) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Every non-empty subset of `0..n` as ascending index lists.
///
/// Subsets come out by size (`1..=n`), then in lexicographic order within a
/// size: for `n = 3` that is `[0] [1] [2] [0,1] [0,2] [1,2] [0,1,2]`. Indices
/// inside a subset always keep their original relative order.
pub fn subsets(n: usize) -> Subsets {
    Subsets {
        n,
        indices: if n == 0 { Vec::new() } else { vec![0] },
        done: n == 0,
    }
}

#[derive(Debug, Clone)]
pub struct Subsets {
    n: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Subsets {
    fn advance(&mut self) {
        let k = self.indices.len();

        // Rightmost position that can still move right.
        let pivot = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i);
        match pivot {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None if k < self.n => {
                self.indices = (0..=k).collect();
            }
            None => self.done = true,
        }
    }
}

impl Iterator for Subsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = self.indices.clone();
        self.advance();
        Some(out)
    }
}

/// Shares sorted by descending profit rate; equal rates keep input order.
pub fn greedy_order(shares: &[Share]) -> Vec<&Share> {
    let mut ordered: Vec<&Share> = shares.iter().collect();
    ordered.sort_by(|a, b| b.profit_rate.total_cmp(&a.profit_rate));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_by_size_then_lexicographically() {
        let all: Vec<Vec<usize>> = subsets(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0],
                vec![1],
                vec![2],
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![0, 1, 2],
            ]
        );
    }

    #[test]
    fn yields_two_to_the_n_minus_one_subsets() {
        for n in 0..=10 {
            assert_eq!(subsets(n).count() as u64, candidate_count(n), "n={n}");
        }
        assert_eq!(candidate_count(20), 1_048_575);
        assert_eq!(candidate_count(64), u64::MAX);
    }

    #[test]
    fn subsets_are_distinct_and_ascending() {
        let all: Vec<Vec<usize>> = subsets(6).collect();
        let unique: std::collections::BTreeSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), all.len());
        for s in &all {
            assert!(!s.is_empty());
            assert!(s.windows(2).all(|w| w[0] < w[1]), "{s:?}");
        }
    }

    #[test]
    fn empty_input_has_no_subsets() {
        assert_eq!(subsets(0).next(), None);
    }

    #[test]
    fn greedy_order_sorts_by_rate_and_keeps_ties_stable() {
        let shares = vec![
            Share::try_new("A", 100.0, 10.0, 500.0).unwrap(),
            Share::try_new("B", 200.0, 5.0, 500.0).unwrap(),
            Share::try_new("C", 50.0, 20.0, 500.0).unwrap(),
            Share::try_new("D", 10.0, 10.0, 500.0).unwrap(),
        ];
        let names: Vec<&str> = greedy_order(&shares)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A", "D", "B"]);
    }
}
