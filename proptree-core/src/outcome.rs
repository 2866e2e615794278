//! Outcome (C8a): the three-way result a single property evaluation can
//! produce, before the runner has decided what to do about it.

/// `Failure` always beats `Discard`, which always beats `Success` — whoever
/// combines outcomes (see [`crate::property::Property::bind`]) must preserve
/// that precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Failure,
    Discard,
    Success(T),
}

impl<T> Outcome<T> {
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(x) => Outcome::Success(f(x)),
            Outcome::Discard => Outcome::Discard,
            Outcome::Failure => Outcome::Failure,
        }
    }

    /// `Success(x)` becomes `Discard` when `predicate(&x)` is false;
    /// `Failure`/`Discard` pass through unchanged.
    pub fn filter<P>(self, predicate: P) -> Outcome<T>
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Outcome::Success(x) => {
                if predicate(&x) {
                    Outcome::Success(x)
                } else {
                    Outcome::Discard
                }
            }
            other => other,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure)
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Outcome::Discard)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(x) => Some(x),
            _ => None,
        }
    }
}
