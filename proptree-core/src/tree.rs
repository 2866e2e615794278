//! Lazy rose tree (C2): a value and a lazy, ordered sequence of smaller
//! candidates.
//!
//! Children are wrapped in an `Rc<dyn Fn() -> Vec<Tree<A>>>` thunk so that
//! forcing a node never forces its descendants. Children here are a thunk
//! rather than an iterator because every shrink schedule in this crate
//! (`shrink::towards`, list removal, …) is already a finite,
//! eagerly-buildable `Vec` once you decide to look — the expensive part is
//! deciding, not iterating.

pub mod render;

use std::rc::Rc;

type Children<T> = Rc<dyn Fn() -> Vec<Tree<T>>>;

/// `Node(outcome, shrinks)`: the root outcome is always present; `shrinks`
/// is forced only when something asks for it.
#[derive(Clone)]
pub struct Tree<T> {
    outcome: T,
    children: Children<T>,
}

impl<T: 'static> Tree<T> {
    /// A leaf: no shrinks.
    pub fn singleton(outcome: T) -> Self {
        Tree {
            outcome,
            children: Rc::new(Vec::new),
        }
    }

    /// Build a tree from an outcome and an already-computed child list.
    pub fn with_children(outcome: T, children: Vec<Tree<T>>) -> Self {
        Tree::from_fn(outcome, move || children.clone())
    }

    /// Build a tree from an outcome and a thunk producing its children.
    pub fn from_fn<F>(outcome: T, children: F) -> Self
    where
        F: Fn() -> Vec<Tree<T>> + 'static,
    {
        Tree {
            outcome,
            children: Rc::new(children),
        }
    }

    /// The root outcome. Forcing this never forces `shrinks()`.
    pub fn outcome(&self) -> &T {
        &self.outcome
    }

    pub fn into_outcome(self) -> T {
        self.outcome
    }

    /// The immediate shrink children, smallest-candidate-first. Forcing one
    /// child's subtree never forces a sibling's.
    pub fn shrinks(&self) -> Vec<Tree<T>> {
        (self.children)()
    }

    pub fn has_shrinks(&self) -> bool {
        !self.shrinks().is_empty()
    }

    /// Build a tree anamorphically from a seed value: `root_fn(&seed)` gives
    /// the outcome, `children_fn(&seed)` gives the seeds for the shrink
    /// children, each recursively unfolded the same way.
    pub fn unfold<S, R, C>(root_fn: R, children_fn: C, seed: S) -> Tree<T>
    where
        S: Clone + 'static,
        R: Fn(&S) -> T + Clone + 'static,
        C: Fn(&S) -> Vec<S> + Clone + 'static,
    {
        let outcome = root_fn(&seed);
        let rf = root_fn.clone();
        let cf = children_fn.clone();
        Tree::from_fn(outcome, move || {
            children_fn(&seed)
                .into_iter()
                .map(|s| Tree::unfold(rf.clone(), cf.clone(), s))
                .collect()
        })
    }
}

impl<T: Clone + 'static> Tree<T> {
    /// Functor map: applies `f` to every node's outcome, preserving shape.
    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + Clone + 'static,
    {
        let Tree { outcome, children } = self;
        let new_outcome = f(outcome);
        let f2 = f.clone();
        Tree::from_fn(new_outcome, move || {
            children().into_iter().map(|t| t.map(f2.clone())).collect()
        })
    }

    /// Monadic bind. `f(root)` replaces the root, and the upstream shrinks
    /// (`self`'s shrinks, mapped through `bind(f)`) are tried *before*
    /// `f(root)`'s own shrinks. This ordering is what makes
    /// `bind` preserve minimality: every simplification already available in
    /// `self` is exhausted before falling back to whatever the downstream
    /// generator offers on its own.
    pub fn bind<U, F>(self, f: F) -> Tree<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Tree<U> + Clone + 'static,
    {
        let Tree { outcome, children } = self;
        let root = f(outcome);
        let Tree {
            outcome: new_outcome,
            children: downstream_children,
        } = root;
        let f_upstream = f.clone();
        let combined = Rc::new(move || {
            let mut result: Vec<Tree<U>> = children()
                .into_iter()
                .map(|child| child.bind(f_upstream.clone()))
                .collect();
            result.extend(downstream_children());
            result
        });
        Tree {
            outcome: new_outcome,
            children: combined,
        }
    }

    /// Layer extra shrink candidates onto every node's shrink sequence: for
    /// each node, `f(outcome)` produces further candidate values, each
    /// unfolded recursively with the same `f`, on top of whatever shrinks
    /// the tree already had. `f` is not called until `shrinks()` is forced,
    /// preserving the laziness contract.
    pub fn expand<F>(self, f: F) -> Tree<T>
    where
        F: Fn(&T) -> Vec<T> + Clone + 'static,
    {
        let Tree { outcome, children } = self;
        let outcome_for_expand = outcome.clone();
        let f2 = f.clone();
        let f3 = f.clone();
        Tree::from_fn(outcome, move || {
            let mut result: Vec<Tree<T>> =
                children().into_iter().map(|t| t.expand(f2.clone())).collect();
            let extra = f(&outcome_for_expand);
            result.extend(extra.into_iter().map(|v| unfold_shrinks(f3.clone(), v)));
            result
        })
    }

    /// Prune any shrink whose root fails `predicate`, recursively. The root
    /// itself is never discarded — callers must ensure it already satisfies
    /// `predicate`.
    pub fn filter<F>(self, predicate: F) -> Tree<T>
    where
        F: Fn(&T) -> bool + Clone + 'static,
    {
        let Tree { outcome, children } = self;
        let p = predicate.clone();
        Tree::from_fn(outcome, move || {
            children()
                .into_iter()
                .filter(|t| p(t.outcome()))
                .map(|t| t.filter(p.clone()))
                .collect()
        })
    }
}

/// Build a tree whose shrink candidates at every level come from repeatedly
/// applying `f` to the current value. Used by [`Tree::expand`] to layer an
/// additional shrink schedule on top of a value without needing a separate
/// seed type.
fn unfold_shrinks<T, F>(f: F, value: T) -> Tree<T>
where
    T: Clone + 'static,
    F: Fn(&T) -> Vec<T> + Clone + 'static,
{
    let children = f(&value);
    let f2 = f.clone();
    Tree::from_fn(value, move || {
        children
            .iter()
            .cloned()
            .map(|c| unfold_shrinks(f2.clone(), c))
            .collect()
    })
}
