//! Journal (C7): an ordered, lazy log of diagnostic lines. Building one never
//! formats anything — `eval` is the only thing that calls the thunks, and
//! the runner only calls `eval` once a test has actually failed.

use std::rc::Rc;

#[derive(Clone)]
enum Entry {
    Leaf(Rc<dyn Fn() -> String>),
    Append(Rc<Journal>, Rc<Journal>),
}

/// A sequence of `() -> String` thunks, concatenated in order. Cheap to
/// build and to append (`O(1)`), expensive only once [`Journal::eval`]
/// forces every thunk.
#[derive(Clone)]
pub struct Journal {
    entry: Option<Entry>,
}

impl Journal {
    pub fn empty() -> Self {
        Journal { entry: None }
    }

    pub fn singleton<F>(f: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        Journal {
            entry: Some(Entry::Leaf(Rc::new(f))),
        }
    }

    pub fn of_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Journal::singleton(move || message.clone())
    }

    pub fn append(a: Journal, b: Journal) -> Self {
        match (&a.entry, &b.entry) {
            (None, _) => b,
            (_, None) => a,
            _ => Journal {
                entry: Some(Entry::Append(Rc::new(a), Rc::new(b))),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Force every thunk, in order, collecting the rendered lines.
    pub fn eval(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.eval_into(&mut out);
        out
    }

    fn eval_into(&self, out: &mut Vec<String>) {
        match &self.entry {
            None => {}
            Some(Entry::Leaf(f)) => out.push(f()),
            Some(Entry::Append(a, b)) => {
                a.eval_into(out);
                b.eval_into(out);
            }
        }
    }
}

impl Default for Journal {
    fn default() -> Self {
        Journal::empty()
    }
}
