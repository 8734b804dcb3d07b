//! Lexicographic permutations of `0..n`.

/// Yields every ordering of `0..n` in lexicographic order, starting with the
/// identity. Produces exactly `n!` items; `n == 0` yields a single empty
/// ordering.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            done: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self.current.clone();
        self.done = !advance(&mut self.current);
        Some(item)
    }
}

/// Number of orderings of `n` items, saturating at `usize::MAX`.
pub fn factorial(n: usize) -> usize {
    (1..=n)
        .try_fold(1usize, |acc, k| acc.checked_mul(k))
        .unwrap_or(usize::MAX)
}

/// Steps `order` to its lexicographic successor. Returns false when `order`
/// was already the last permutation.
fn advance(order: &mut [usize]) -> bool {
    let n = order.len();
    if n < 2 {
        return false;
    }

    // Rightmost position whose value can still grow
    let Some(pivot) = (0..n - 1).rev().find(|&i| order[i] < order[i + 1]) else {
        return false;
    };

    let successor = (pivot + 1..n)
        .rev()
        .find(|&j| order[j] > order[pivot])
        .unwrap_or(pivot + 1);

    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_three_in_lexicographic_order() {
        let all: Vec<Vec<usize>> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1, 2],
                vec![0, 2, 1],
                vec![1, 0, 2],
                vec![1, 2, 0],
                vec![2, 0, 1],
                vec![2, 1, 0],
            ]
        );
    }

    #[test]
    fn test_counts_match_factorial() {
        for n in 0..=7 {
            let all: Vec<Vec<usize>> = Permutations::new(n).collect();
            assert_eq!(all.len(), factorial(n), "n = {}", n);

            let distinct: HashSet<Vec<usize>> = all.into_iter().collect();
            assert_eq!(distinct.len(), factorial(n), "n = {}", n);
        }
    }

    #[test]
    fn test_single_item() {
        let all: Vec<Vec<usize>> = Permutations::new(1).collect();
        assert_eq!(all, vec![vec![0]]);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(9), 362_880);
        assert_eq!(factorial(100), usize::MAX);
    }
}
