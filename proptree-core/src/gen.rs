//! Generators (C6): `Gen<T> = Random<Tree<T>>`. Sampling and shrinking are
//! the same pass — every combinator here builds a tree whose root is the
//! sampled value and whose shrinks are already-valid `T`s, so a caller never
//! needs to re-validate a shrink candidate.

use crate::error::ProptreeError;
use crate::random::Random;
use crate::range::{FloatRange, Integral, Range};
use crate::seed::Seed;
use crate::shrink;
use crate::size::Size;
use crate::tree::Tree;

/// A generator for test data of type `T`: `Random<Tree<T>>`, wrapped so the
/// combinator surface below reads in terms of generators rather than raw
/// samplers of trees.
#[derive(Clone)]
pub struct Gen<T> {
    random: Random<Tree<T>>,
}

impl<T: Clone + 'static> Gen<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Seed, Size) -> Tree<T> + 'static,
    {
        Gen {
            random: Random::new(f),
        }
    }

    pub fn from_random(random: Random<Tree<T>>) -> Self {
        Gen { random }
    }

    pub fn into_random(self) -> Random<Tree<T>> {
        self.random
    }

    /// Sample a tree at the given seed and size.
    pub fn run(&self, seed: Seed, size: Size) -> Tree<T> {
        self.random.run(seed, size)
    }

    /// A generator that always produces `value`, with no shrinks.
    pub fn constant(value: T) -> Self {
        Gen::new(move |_, _| Tree::singleton(value.clone()))
    }

    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        Gen::from_random(self.random.map(move |tree| tree.map(f.clone())))
    }

    /// Dependent generation: `k`'s generator is chosen from `self`'s sampled
    /// value, but its tree is still driven by an independent split of the
    /// seed, so `self`'s shrinks (tried first) and `k`'s shrinks (tried
    /// after) compose via [`Tree::bind`]'s upstream-first ordering.
    pub fn bind<U, F>(self, k: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Gen<U> + Clone + 'static,
    {
        Gen::new(move |seed, size| {
            let (s1, s2) = seed.split();
            let tree = self.random.run(s1, size);
            let k = k.clone();
            tree.bind(move |value| k(value).run(s2, size))
        })
    }

    /// Apply a generated function to a generated argument; `self`'s shrinks
    /// are tried before `arg`'s, matching `bind`'s ordering.
    pub fn apply<A, U, F>(self, arg: Gen<A>) -> Gen<U>
    where
        T: Fn(A) -> U + Clone + 'static,
        A: Clone + 'static,
        U: Clone + 'static,
    {
        self.bind(move |f| arg.clone().map(move |a| f(a)))
    }

    /// Retry with a growing size until `predicate` holds, per the `2k + n`
    /// schedule: `k` ranges over `0..=100` at a fixed outer size `n`; if
    /// every retry in that batch fails, `n` increments and the batch
    /// restarts. Terminates only if `predicate` is satisfiable somewhere in
    /// the generator's range — an infeasible filter loops forever, which
    /// matches this combinator's contract: it never reports failure itself.
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + Clone + 'static,
    {
        let gen = self;
        Gen::new(move |seed, size| {
            let mut seed = seed;
            let mut n = size.clamped().get();
            loop {
                if let Some(tree) = try_batch(&gen, &predicate, &mut seed, size, n) {
                    return tree;
                }
                n += 1;
            }
        })
    }

    /// Like [`Gen::filter`] but bounded: gives up after 10 batches (1100
    /// attempts) and produces `None` rather than looping forever.
    pub fn try_filter<F>(self, predicate: F) -> Gen<Option<T>>
    where
        F: Fn(&T) -> bool + Clone + 'static,
    {
        let gen = self;
        Gen::new(move |seed, size| {
            let mut seed = seed;
            let mut n = size.clamped().get();
            for _ in 0..10 {
                if let Some(tree) = try_batch(&gen, &predicate, &mut seed, size, n) {
                    return tree.map(Some);
                }
                n += 1;
            }
            Tree::singleton(None)
        })
    }

    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Gen<T> + 'static,
    {
        Gen::new(move |seed, size| f(size).run(seed, size))
    }

    pub fn resize(self, size: Size) -> Self {
        Gen::new(move |seed, _| self.run(seed, size))
    }

    pub fn scale<F>(self, f: F) -> Self
    where
        F: Fn(Size) -> Size + 'static,
    {
        Gen::new(move |seed, size| self.run(seed, f(size)))
    }

    /// Layer an extra, ad hoc shrink function on top of whatever shrinks the
    /// generator already produces.
    pub fn shrink<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Vec<T> + Clone + 'static,
    {
        Gen::new(move |seed, size| self.run(seed, size).expand(f.clone()))
    }

    /// Identical to [`Gen::shrink`]: [`Tree::expand`] already defers calling
    /// `f` until shrinks are forced, so there is no separate "lazy" code
    /// path to offer here. Kept as a distinct name for callers translating
    /// from APIs that draw the distinction explicitly.
    pub fn shrink_lazy<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Vec<T> + Clone + 'static,
    {
        self.shrink(f)
    }

    /// Discard all shrinks: every sample is a leaf.
    pub fn no_shrink(self) -> Self {
        Gen::new(move |seed, size| Tree::singleton(self.run(seed, size).into_outcome()))
    }

    /// Choose uniformly among `gens`; shrinks towards `gens[0]`.
    pub fn choice(gens: Vec<Gen<T>>) -> Result<Gen<T>, ProptreeError> {
        if gens.is_empty() {
            return Err(ProptreeError::EmptyCombinatorInput { combinator: "choice" });
        }
        Gen::frequency(gens.into_iter().map(|g| (1u64, g)).collect())
    }

    /// Choose uniformly among `values`; shrinks towards `values[0]`.
    pub fn item(values: Vec<T>) -> Result<Gen<T>, ProptreeError> {
        if values.is_empty() {
            return Err(ProptreeError::EmptyCombinatorInput { combinator: "item" });
        }
        Gen::frequency(values.into_iter().map(|v| (1u64, Gen::constant(v))).collect())
    }

    /// Choose among `weighted` generators proportionally to their weight.
    /// The selection index itself shrinks towards `0` (the first entry), so
    /// a failing property discovered via a rare alternative shrinks towards
    /// whichever alternative sorts first, before shrinking further within
    /// that alternative's own generator.
    pub fn frequency(weighted: Vec<(u64, Gen<T>)>) -> Result<Gen<T>, ProptreeError> {
        if weighted.is_empty() {
            return Err(ProptreeError::EmptyCombinatorInput { combinator: "frequency" });
        }
        let total: u64 = weighted.iter().map(|(w, _)| *w).sum();
        if total == 0 {
            return Err(ProptreeError::ZeroTotalWeight);
        }
        let weights: Vec<u64> = weighted.iter().map(|(w, _)| *w).collect();
        let gens: Vec<Gen<T>> = weighted.into_iter().map(|(_, g)| g).collect();
        let n = gens.len();
        let idx_gen: Gen<usize> = Gen::new(move |seed, _size| {
            let (pick, _) = seed.next_in_range(0, total as i128 - 1);
            let pick = pick as u64;
            let mut acc = 0u64;
            let mut chosen = n - 1;
            for (i, w) in weights.iter().enumerate() {
                acc += *w;
                if pick < acc {
                    chosen = i;
                    break;
                }
            }
            shrink::towards_tree(0, chosen as i128).map(|v| v as usize)
        });
        Ok(idx_gen.bind(move |idx| gens[idx].clone()))
    }

    /// Choose among `nonrecs` unconditionally, or among `nonrecs` plus
    /// `recs` (each halved in size) once `size > 1`, ensuring a call that
    /// recurses into itself still terminates.
    pub fn choice_rec(nonrecs: Vec<Gen<T>>, recs: Vec<Gen<T>>) -> Result<Gen<T>, ProptreeError> {
        if nonrecs.is_empty() {
            return Err(ProptreeError::EmptyCombinatorInput { combinator: "choice_rec" });
        }
        Ok(Gen::sized(move |size| {
            if size.clamped().get() <= 1 {
                Gen::choice(nonrecs.clone()).expect("validated non-empty at construction")
            } else {
                let mut all = nonrecs.clone();
                all.extend(
                    recs.clone()
                        .into_iter()
                        .map(|r| r.scale(|s: Size| Size(s.get() / 2))),
                );
                Gen::choice(all).expect("nonrecs alone already makes this non-empty")
            }
        }))
    }

    /// A list whose length is drawn from `length_range` (clamped to
    /// non-negative), each element from `elem`. Shrinks both structurally
    /// (dropping elements) and in place (shrinking an element's value),
    /// never below `length_range`'s lower bound.
    pub fn list(length_range: Range<i64>, elem: Gen<T>) -> Gen<Vec<T>> {
        Gen::new(move |seed, size| {
            let (lo, hi) = length_range.bounds(size);
            let lo = lo.max(0);
            let hi = hi.max(lo);
            let (len_seed, elems_seed) = seed.split();
            let (k, _) = len_seed.next_in_range(lo as i128, hi as i128);
            let k = k as usize;
            let mut trees = Vec::with_capacity(k);
            let mut seed = elems_seed;
            for _ in 0..k {
                let (s1, s2) = seed.split();
                trees.push(elem.run(s1, size));
                seed = s2;
            }
            let min_len = lo as usize;
            shrink::sequence_list(trees).filter(move |xs: &Vec<T>| xs.len() >= min_len)
        })
    }

    /// `None` with weight 2, `Some(elem)` with weight `1 + size`, so larger
    /// sizes favour producing a value.
    pub fn option(elem: Gen<T>) -> Gen<Option<T>> {
        Gen::sized(move |size| {
            let present_weight = 1 + size.clamped().get().max(0) as u64;
            Gen::frequency(vec![
                (2, Gen::constant(None)),
                (present_weight, elem.clone().map(Some)),
            ])
            .expect("two non-empty branches")
        })
    }
}

/// One batch of up to 101 retries (`k` in `0..=100`) at outer size `n`,
/// following `Random`/`Gen`'s `2k + n` resize schedule. Returns `None` if
/// every attempt in the batch fails `predicate`, having advanced `seed`
/// past every attempt it made.
fn try_batch<T, F>(
    gen: &Gen<T>,
    predicate: &F,
    seed: &mut Seed,
    size: Size,
    n: i64,
) -> Option<Tree<T>>
where
    T: Clone + 'static,
    F: Fn(&T) -> bool + Clone + 'static,
{
    for k in 0..=100i64 {
        let (s1, s2) = seed.split();
        *seed = s2;
        let tree = gen.clone().resize(Size(2 * k + n)).run(s1, size);
        if predicate(tree.outcome()) {
            return Some(tree.filter(predicate.clone()));
        }
    }
    None
}

/// Primitive generators over integer ranges.
impl<T: Integral + Clone + 'static> Gen<T> {
    pub fn integral(range: Range<T>) -> Gen<T> {
        Gen::new(move |seed, size| {
            let (lo, hi) = range.bounds(size);
            shrink::towards_tree(range.origin().to_i128(), {
                let (v, _) = seed.next_in_range(lo.to_i128(), hi.to_i128());
                v
            })
            .map(T::from_i128)
        })
    }
}

impl Gen<f64> {
    pub fn double(range: FloatRange) -> Gen<f64> {
        Gen::new(move |seed, size| {
            let (lo, hi) = range.bounds(size);
            let (v, _) = seed.next_double(lo, hi);
            let origin = range.origin();
            Tree::from_fn(v, move || {
                shrink::towards_double(origin, v)
                    .into_iter()
                    .map(Tree::singleton)
                    .collect()
            })
        })
    }
}

impl Gen<bool> {
    pub fn bool() -> Gen<bool> {
        Gen::new(|seed, _| {
            let (v, _) = seed.next_bool();
            if v {
                Tree::with_children(true, vec![Tree::singleton(false)])
            } else {
                Tree::singleton(false)
            }
        })
    }
}

impl Gen<char> {
    /// A character drawn from `[lo, hi]` (inclusive, by codepoint), shrinking
    /// towards `lo`.
    pub fn char_range(lo: char, hi: char) -> Gen<char> {
        let range = Range::constant_from(lo as i64, lo as i64, hi as i64);
        Gen::<i64>::integral(range).map(|v| char::from_u32(v as u32).unwrap_or(lo))
    }

    pub fn ascii_alpha() -> Gen<char> {
        Gen::choice(vec![
            Gen::char_range('a', 'z'),
            Gen::char_range('A', 'Z'),
        ])
        .expect("two non-empty branches")
    }

    pub fn ascii_alphanumeric() -> Gen<char> {
        Gen::frequency(vec![
            (26, Gen::char_range('a', 'z')),
            (26, Gen::char_range('A', 'Z')),
            (10, Gen::char_range('0', '9')),
        ])
        .expect("three non-empty branches")
    }
}

impl Gen<String> {
    /// A string whose length is drawn from `length_range` and whose
    /// characters come from `char_gen`.
    pub fn string(length_range: Range<i64>, char_gen: Gen<char>) -> Gen<String> {
        Gen::list(length_range, char_gen).map(|cs| cs.into_iter().collect())
    }
}
