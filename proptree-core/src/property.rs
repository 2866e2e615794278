//! Property (C8b): `Property<T> = Gen<(Journal, Outcome<T>)>`. A property is
//! itself a generator — running it draws both a journal of diagnostic lines
//! and an outcome, and (because it is built from `Gen`) a full shrink tree
//! alongside both.

use crate::gen::Gen;
use crate::journal::Journal;
use crate::outcome::Outcome;
use crate::tree::Tree;
use std::any::Any;

#[derive(Clone)]
pub struct Property<T> {
    gen: Gen<(Journal, Outcome<T>)>,
}

impl<T: Clone + 'static> Property<T> {
    pub fn of_outcome(outcome: Outcome<T>) -> Self {
        Property {
            gen: Gen::constant((Journal::empty(), outcome)),
        }
    }

    pub fn success(value: T) -> Self {
        Property::of_outcome(Outcome::Success(value))
    }

    pub fn failure() -> Self {
        Property::of_outcome(Outcome::Failure)
    }

    pub fn discard() -> Self {
        Property::of_outcome(Outcome::Discard)
    }

    /// Append a diagnostic line, without affecting the outcome. Typically
    /// sequenced before the real check via `bind` so the line only shows up
    /// in a failing run's journal.
    pub fn counterexample<F>(message: F) -> Property<()>
    where
        F: Fn() -> String + 'static,
    {
        Property {
            gen: Gen::constant((Journal::singleton(message), Outcome::Success(()))),
        }
    }

    pub fn map<U, F>(self, f: F) -> Property<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        Property {
            gen: self.gen.map(move |(j, o)| (j, o.map(f.clone()))),
        }
    }

    pub fn filter<P>(self, predicate: P) -> Property<T>
    where
        P: Fn(&T) -> bool + Clone + 'static,
    {
        Property {
            gen: self.gen.map(move |(j, o)| (j, o.filter(|x| predicate(x)))),
        }
    }

    /// Sequencing. `Failure`/`Discard` short-circuit, carrying `self`'s
    /// journal untouched; on `Success(x)`, `k(x)`'s journal is appended
    /// *after* `self`'s, so diagnostic lines read in the order they were
    /// produced.
    pub fn bind<U, F>(self, k: F) -> Property<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Property<U> + Clone + 'static,
    {
        Property {
            gen: self.gen.bind(move |(j, outcome)| match outcome {
                Outcome::Failure => Gen::constant((j, Outcome::Failure)),
                Outcome::Discard => Gen::constant((j, Outcome::Discard)),
                Outcome::Success(x) => {
                    let j = j.clone();
                    k(x).gen.map(move |(j2, o2)| (Journal::append(j.clone(), j2), o2))
                }
            }),
        }
    }

    /// Clean up with `finally` whether or not generating/checking panics.
    pub fn try_finally<Fin>(self, finally: Fin) -> Property<T>
    where
        Fin: Fn() + 'static,
    {
        Property {
            gen: Gen::from_random(self.gen.into_random().try_finally(finally)),
        }
    }

    /// Recover from a panic raised while generating or checking, converting
    /// it into whatever `(Journal, Outcome<T>)` `handler` decides.
    pub fn try_with<H>(self, handler: H) -> Property<T>
    where
        H: Fn(Box<dyn Any + Send>) -> (Journal, Outcome<T>) + 'static,
    {
        Property {
            gen: Gen::from_random(self.gen.into_random().try_with(handler)),
        }
    }

    /// Acquire a resource, run `body` with it, and release it afterward —
    /// even if generating or checking panics.
    pub fn using<R, A, Rel, F>(acquire: A, release: Rel, body: F) -> Property<T>
    where
        R: 'static,
        A: Fn() -> R + 'static,
        Rel: Fn(&R) + 'static,
        F: Fn(&R) -> Property<T> + 'static,
    {
        Property {
            gen: Gen::new(move |seed, size| {
                let resource = acquire();
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    body(&resource).gen.run(seed, size)
                }));
                release(&resource);
                match result {
                    Ok(tree) => tree,
                    Err(payload) => {
                        Tree::singleton((Journal::of_message(panic_message(&payload)), Outcome::Failure))
                    }
                }
            }),
        }
    }

    /// Escape hatch onto the underlying generator, for callers composing
    /// properties with combinators this module doesn't expose directly.
    pub fn into_gen(self) -> Gen<(Journal, Outcome<T>)> {
        self.gen
    }

    pub fn from_gen(gen: Gen<(Journal, Outcome<T>)>) -> Self {
        Property { gen }
    }
}

impl Property<()> {
    pub fn of_bool(condition: bool) -> Self {
        if condition {
            Property::success(())
        } else {
            Property::failure()
        }
    }

    /// Sample `gen`, append a rendered counterexample line for the drawn
    /// value, then check it with `k`. A panic inside generation or `k` is
    /// caught and reported as a failure rather than aborting the run.
    pub fn for_all<A, F>(gen: Gen<A>, k: F) -> Property<()>
    where
        A: Clone + std::fmt::Debug + 'static,
        F: Fn(A) -> Property<()> + Clone + 'static,
    {
        Property {
            gen: gen.bind(move |x| {
                let line = format!("{x:?}");
                match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| k(x))) {
                    Ok(prop) => {
                        let line = line.clone();
                        prop.gen
                            .map(move |(j, o)| (Journal::append(Journal::of_message(line.clone()), j), o))
                    }
                    Err(payload) => {
                        let msg = panic_message(&payload);
                        Gen::constant((
                            Journal::append(Journal::of_message(line.clone()), Journal::of_message(msg)),
                            Outcome::Failure,
                        ))
                    }
                }
            }),
        }
    }
}

fn panic_message(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked with a non-string payload".to_string()
    }
}
