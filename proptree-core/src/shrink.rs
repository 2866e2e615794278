//! Shrink schedules (C3): pure functions describing how to simplify a value
//! toward a declared origin, independent of how the value was generated.

use crate::tree::Tree;

/// `n, n/2, n/4, …` stopping once it would reach zero (`0` itself is never
/// produced). `halves(15) == [15, 7, 3, 1]`.
pub fn halves(n: i128) -> Vec<i128> {
    let mut result = Vec::new();
    let mut cur = n;
    while cur != 0 {
        result.push(cur);
        cur /= 2;
    }
    result
}

/// Shrink candidates for an integer `x` toward `origin`. Empty if `x ==
/// origin`; otherwise built from `halves(x - origin)`, each subtracted from
/// `x` — the first candidate this produces is always `origin` itself.
///
/// Computed in `i128` so the subtraction never overflows near a narrower
/// type's limits.
pub fn towards(origin: i128, x: i128) -> Vec<i128> {
    if origin == x {
        return Vec::new();
    }
    let diff = x - origin;
    halves(diff).into_iter().map(|h| x - h).collect()
}

/// Build the full shrink tree for an integer toward `origin`, by recursively
/// shrinking each candidate `towards` produces. This duplicates some
/// candidates across branches, but every shrink reachable from `towards`
/// survives `apply`/`bind` composition, which a deduplicated binary-search
/// alternative does not.
pub fn towards_tree(origin: i128, x: i128) -> Tree<i128> {
    Tree::unfold(|v: &i128| *v, move |v: &i128| towards(origin, *v), x)
}

/// Floating-point analogue of [`towards`]: repeatedly halve the distance to
/// `origin` until it becomes negligible. The first candidate is always
/// `origin` itself.
pub fn towards_double(origin: f64, x: f64) -> Vec<f64> {
    if origin == x {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut diff = x - origin;
    while diff.abs() > 1e-6 {
        result.push(x - diff);
        diff /= 2.0;
    }
    result
}

/// Remove non-overlapping chunks of length `k`, at offsets `0, k, 2k, …`.
/// Empty (or `k == 0`/`k > xs.len()`) yields no candidates.
pub fn removes<T: Clone>(k: usize, xs: &[T]) -> Vec<Vec<T>> {
    let n = xs.len();
    if k == 0 || k > n {
        return Vec::new();
    }
    let mut result = Vec::new();
    let mut offset = 0;
    while offset < n {
        let end = (offset + k).min(n);
        let mut v = Vec::with_capacity(n - (end - offset));
        v.extend_from_slice(&xs[..offset]);
        v.extend_from_slice(&xs[end..]);
        result.push(v);
        offset += k;
    }
    result
}

/// Shrink a list's *length*: for each `k` in `halves(n)`, every way of
/// dropping `k` consecutive elements (smallest-first via `halves`'s own
/// ordering, which starts from the largest chunk — i.e. the fewest
/// remaining elements — first).
pub fn list<T: Clone>(xs: &[T]) -> Vec<Vec<T>> {
    let n = xs.len();
    if n == 0 {
        return Vec::new();
    }
    let mut result = Vec::new();
    for k in halves(n as i128) {
        result.extend(removes(k as usize, xs));
    }
    result
}

/// Shrink each position of `xs` in turn using `shrinker`, without changing
/// length: for index `i`, try each candidate `shrinker(xs[i])` produces with
/// everything else held fixed.
pub fn elems<T, F>(shrinker: F, xs: &[T]) -> Vec<Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> Vec<T>,
{
    let mut result = Vec::new();
    for i in 0..xs.len() {
        for candidate in shrinker(&xs[i]) {
            let mut v = xs.to_vec();
            v[i] = candidate;
            result.push(v);
        }
    }
    result
}

/// Combine a list of per-element trees into a single `Tree<Vec<T>>` whose
/// shrinks try both removing elements (structural shrink, via [`list`]) and
/// shrinking individual element values in place, preserving the rest.
pub fn sequence_list<T: Clone + 'static>(xs: Vec<Tree<T>>) -> Tree<Vec<T>> {
    let outcome: Vec<T> = xs.iter().map(|t| t.outcome().clone()).collect();
    Tree::from_fn(outcome, move || {
        let mut shrinks = Vec::new();
        for dropped in list(&xs) {
            shrinks.push(sequence_list(dropped));
        }
        for i in 0..xs.len() {
            for child in xs[i].shrinks() {
                let mut next = xs.clone();
                next[i] = child;
                shrinks.push(sequence_list(next));
            }
        }
        shrinks
    })
}

/// Like [`sequence_list`] but never drops elements — the resulting tree's
/// outcomes all have the same length as the input.
pub fn sequence_elems<T: Clone + 'static>(xs: Vec<Tree<T>>) -> Tree<Vec<T>> {
    let outcome: Vec<T> = xs.iter().map(|t| t.outcome().clone()).collect();
    Tree::from_fn(outcome, move || {
        let mut shrinks = Vec::new();
        for i in 0..xs.len() {
            for child in xs[i].shrinks() {
                let mut next = xs.clone();
                next[i] = child;
                shrinks.push(sequence_elems(next));
            }
        }
        shrinks
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_matches_spec_example() {
        assert_eq!(halves(15), vec![15, 7, 3, 1]);
    }

    #[test]
    fn towards_zero_from_hundred() {
        assert_eq!(towards(0, 100), vec![0, 50, 75, 88, 94, 97, 99]);
    }

    #[test]
    fn towards_five_hundred_from_thousand() {
        assert_eq!(
            towards(500, 1000),
            vec![500, 750, 875, 938, 969, 985, 993, 997, 999]
        );
    }

    #[test]
    fn towards_empty_at_origin() {
        assert!(towards(5, 5).is_empty());
    }

    #[test]
    fn towards_double_starts_at_origin() {
        let shrunk = towards_double(0.0, 8.0);
        assert_eq!(shrunk[0], 0.0);
        assert!(shrunk.iter().all(|&v| (0.0..=8.0).contains(&v)));
    }

    #[test]
    fn removes_non_overlapping_chunks() {
        assert_eq!(
            removes(2, &[1, 2, 3, 4, 5, 6]),
            vec![vec![3, 4, 5, 6], vec![1, 2, 5, 6], vec![1, 2, 3, 4]]
        );
    }

    #[test]
    fn list_matches_spec_example() {
        let shrunk = list(&[1, 2, 3]);
        assert_eq!(
            shrunk,
            vec![vec![], vec![2, 3], vec![1, 3], vec![1, 2]]
        );
    }

    #[test]
    fn list_of_empty_is_empty() {
        assert!(list::<i32>(&[]).is_empty());
    }

    #[test]
    fn elems_holds_other_positions_fixed() {
        let shrunk = elems(|&x: &i64| towards(0, x).into_iter().collect(), &[10, 20]);
        assert!(shrunk.contains(&vec![0, 20]));
        assert!(shrunk.contains(&vec![10, 0]));
    }

    #[test]
    fn sequence_list_tries_removal_then_element_shrinks() {
        let trees = vec![towards_tree(0, 4), towards_tree(0, 2)];
        let combined = sequence_list(trees);
        assert_eq!(*combined.outcome(), vec![4, 2]);
        let first_shrinks: Vec<Vec<i128>> =
            combined.shrinks().iter().map(|t| t.outcome().clone()).collect();
        // list([4,2]) first candidate is the empty list (dropping both elements).
        assert_eq!(first_shrinks[0], Vec::<i128>::new());
    }

    #[test]
    fn sequence_elems_preserves_length() {
        let trees = vec![towards_tree(0, 4), towards_tree(0, 2)];
        let combined = sequence_elems(trees);
        for child in combined.shrinks() {
            assert_eq!(child.outcome().len(), 2);
        }
    }
}
