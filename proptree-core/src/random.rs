//! Seeded, size-indexed sampling (C5): `Random<T> = (Seed, Size) -> T`.

use crate::range::{FloatRange, Integral, Range};
use crate::seed::Seed;
use crate::size::Size;
use std::rc::Rc;

/// A deterministic sampler: the same `(seed, size)` always yields the same
/// `T`. `run` clamps `size` to `max(1, size)` before invoking the
/// underlying function.
#[derive(Clone)]
pub struct Random<T> {
    run: Rc<dyn Fn(Seed, Size) -> T>,
}

impl<T: 'static> Random<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Seed, Size) -> T + 'static,
    {
        Random { run: Rc::new(f) }
    }

    pub fn run(&self, seed: Seed, size: Size) -> T {
        (self.run)(seed, size.clamped())
    }

    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Random::new(move |_, _| value.clone())
    }

    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(Size) -> Random<T> + 'static,
    {
        Random::new(move |seed, size| f(size).run(seed, size))
    }

    pub fn resize(self, size: Size) -> Self {
        Random::new(move |seed, _| self.run(seed, size))
    }

    /// Run `self`, cleaning up with `finally` whether or not `self` panics.
    pub fn try_finally<F>(self, finally: F) -> Self
    where
        F: Fn() + 'static,
    {
        Random::new(move |seed, size| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.run(seed, size)));
            finally();
            match result {
                Ok(v) => v,
                Err(e) => std::panic::resume_unwind(e),
            }
        })
    }

    /// Run `self`; on panic, run `handler` instead of propagating.
    pub fn try_with<F>(self, handler: F) -> Self
    where
        F: Fn(Box<dyn std::any::Any + Send>) -> T + 'static,
    {
        Random::new(move |seed, size| {
            match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| self.run(seed, size))) {
                Ok(v) => v,
                Err(e) => handler(e),
            }
        })
    }
}

impl<T: Clone + 'static> Random<T> {
    pub fn map<U, F>(self, f: F) -> Random<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        Random::new(move |seed, size| f(self.run(seed, size)))
    }

    /// `k`'s result is computed from a seed split off from `self`'s, so it
    /// is independent of whatever `self` drew.
    pub fn bind<U, F>(self, k: F) -> Random<U>
    where
        U: 'static,
        F: Fn(T) -> Random<U> + 'static,
    {
        Random::new(move |seed, size| {
            let (s1, s2) = seed.split();
            let value = self.run(s1, size);
            k(value).run(s2, size)
        })
    }

    pub fn replicate(self, n: usize) -> Random<Vec<T>> {
        Random::new(move |seed, size| {
            let mut result = Vec::with_capacity(n);
            let mut seed = seed;
            for _ in 0..n {
                let (s1, s2) = seed.split();
                result.push(self.run(s1, size));
                seed = s2;
            }
            result
        })
    }
}

impl<T: Integral + 'static> Random<T> {
    /// Draw an integer from `range`.
    pub fn integral(range: Range<T>) -> Random<T> {
        Random::new(move |seed, size| {
            let (lo, hi) = range.bounds(size);
            let (v, _) = seed.next_in_range(lo.to_i128(), hi.to_i128());
            T::from_i128(v)
        })
    }
}

impl Random<f64> {
    pub fn double(range: FloatRange) -> Random<f64> {
        Random::new(move |seed, size| {
            let (lo, hi) = range.bounds(size);
            let (v, _) = seed.next_double(lo, hi);
            v
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_clamps_size_to_at_least_one() {
        let r = Random::new(|_, size: Size| size.get());
        assert_eq!(r.run(Seed::from(1), Size(0)), 1);
        assert_eq!(r.run(Seed::from(1), Size(-100)), 1);
    }

    #[test]
    fn deterministic_given_same_seed_and_size() {
        let r = Random::new(|seed: Seed, _| seed.next_u64().0);
        let seed = Seed::from(99);
        assert_eq!(r.run(seed, Size(10)), r.run(seed, Size(10)));
    }

    #[test]
    fn bind_uses_independent_seed_for_continuation() {
        let r = Random::new(|seed: Seed, _| seed.next_u64().0)
            .bind(|a| Random::new(move |seed: Seed, _| (a, seed.next_u64().0)));
        let (a, b) = r.run(Seed::from(5), Size(1));
        assert_ne!(a, b);
    }

    #[test]
    fn integral_range_i32() {
        let r = Random::<i32>::integral(Range::constant(-10i32, 10));
        let mut seed = Seed::from(1);
        for _ in 0..200 {
            let (_, next) = seed.split();
            seed = next;
            let sample = r.run(seed, Size(10));
            assert!((-10..=10).contains(&sample));
        }
    }
}
