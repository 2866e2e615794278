//! Property-based testing with integrated shrinking.
//!
//! Re-exports the core generator/shrinking/runner algebra and layers two
//! thin dialects on top of it, both lowering to the same combinators:
//! a fluent/LINQ-style extension trait (`Select`/`SelectMany`/`Where`/
//! `ForAll`) and a `let`-binding expression-builder macro pair
//! (`gen!`/`property!`).

pub use proptree_core::*;

/// LINQ-flavoured names for [`Gen`]'s functor/monad/filter combinators, for
/// callers who'd rather chain `.select(...).where_(...)` than `.map(...).filter(...)`.
pub trait GenLinq<T: Clone + 'static> {
    fn select<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static;

    fn select_many<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Gen<U> + Clone + 'static;

    fn where_<P>(self, predicate: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + Clone + 'static;
}

impl<T: Clone + 'static> GenLinq<T> for Gen<T> {
    fn select<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        self.map(f)
    }

    fn select_many<U, F>(self, f: F) -> Gen<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Gen<U> + Clone + 'static,
    {
        self.bind(f)
    }

    fn where_<P>(self, predicate: P) -> Gen<T>
    where
        P: Fn(&T) -> bool + Clone + 'static,
    {
        self.filter(predicate)
    }
}

/// Turns a generator directly into a universally-quantified property,
/// mirroring [`Property::for_all`] as a method on the generator itself.
pub trait ForAll<T: Clone + std::fmt::Debug + 'static> {
    fn for_all<F>(self, k: F) -> Property<()>
    where
        F: Fn(T) -> Property<()> + Clone + 'static;
}

impl<T: Clone + std::fmt::Debug + 'static> ForAll<T> for Gen<T> {
    fn for_all<F>(self, k: F) -> Property<()>
    where
        F: Fn(T) -> Property<()> + Clone + 'static,
    {
        Property::for_all(self, k)
    }
}

/// `let`-binding do-notation over [`Gen::bind`]: `gen! { let x = gen_a; let
/// y = gen_b(x); Gen::constant((x, y)) }` desugars to nested `bind` calls.
#[macro_export]
macro_rules! gen {
    (let $p:pat = $e:expr; $($rest:tt)+) => {
        $crate::Gen::bind($e, move |$p| $crate::gen!($($rest)+))
    };
    ($e:expr) => {
        $e
    };
}

/// `let`-binding do-notation over [`Property::bind`], for sequencing
/// multiple `forAll`s (or any property) into one.
#[macro_export]
macro_rules! property {
    (let $p:pat = $e:expr; $($rest:tt)+) => {
        $crate::Property::bind($e, move |$p| $crate::property!($($rest)+))
    };
    ($e:expr) => {
        $e
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linq_names_match_combinator_behaviour() {
        let a = Gen::constant(3).select(|x| x + 1);
        let b = Gen::constant(3).map(|x| x + 1);
        assert_eq!(
            a.run(Seed::from(1), Size(1)).into_outcome(),
            b.run(Seed::from(1), Size(1)).into_outcome()
        );
    }

    #[test]
    fn for_all_trait_matches_free_function() {
        let via_trait = Gen::constant(1i32).for_all(|x| Property::of_bool(x == 1));
        let via_fn = Property::for_all(Gen::constant(1i32), |x| Property::of_bool(x == 1));
        let (_, o1) = via_trait.into_gen().run(Seed::from(1), Size(1)).into_outcome();
        let (_, o2) = via_fn.into_gen().run(Seed::from(1), Size(1)).into_outcome();
        assert_eq!(o1, o2);
    }

    #[test]
    fn gen_macro_sequences_bind_calls() {
        let g: Gen<(i32, i32)> = gen! {
            let x = Gen::constant(1);
            let y = Gen::constant(x + 1);
            Gen::constant((x, y))
        };
        let (x, y) = g.run(Seed::from(1), Size(1)).into_outcome();
        assert_eq!((x, y), (1, 2));
    }

    #[test]
    fn property_macro_sequences_bind_calls() {
        let p: Property<()> = property! {
            let _a = Property::counterexample(|| "a".to_string());
            let _b = Property::counterexample(|| "b".to_string());
            Property::of_bool(true)
        };
        let (journal, outcome) = p.into_gen().run(Seed::from(1), Size(1)).into_outcome();
        assert_eq!(outcome, Outcome::Success(()));
        assert_eq!(journal.eval(), vec!["a", "b"]);
    }
}
