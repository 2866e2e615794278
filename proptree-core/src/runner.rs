//! Test runner (C9): drives a [`Property`] through `Config::test_limit`
//! samples, honouring the discard budget, and performs the greedy shrink
//! walk on the first failure.

use crate::config::Config;
use crate::outcome::Outcome;
use crate::property::Property;
use crate::report::{FailureData, Report, ReportStatus};
use crate::seed::Seed;
use crate::size::Size;

/// Run `property` to completion under `config`, starting from `seed`.
pub fn check<T: Clone + 'static>(property: Property<T>, config: Config, seed: Seed) -> Report {
    let mut seed = seed;
    let mut size = Size(1);
    let mut tests = 0usize;
    let mut discards = 0usize;

    while tests < config.test_limit {
        if discards >= config.discard_limit {
            tracing::debug!(tests, discards, "giving up: discard budget exhausted");
            return Report {
                tests,
                discards,
                status: ReportStatus::GaveUp,
            };
        }

        let (this_seed, next_seed) = seed.split();
        seed = next_seed;
        let run_size = size;
        size = size.cycle_next(config.size_limit);

        tracing::trace!(test = tests, size = run_size.get(), "running test");
        let tree = property.clone().into_gen().run(this_seed, run_size);
        let (journal, outcome) = tree.clone().into_outcome();

        match outcome {
            Outcome::Success(_) => {
                tests += 1;
            }
            Outcome::Discard => {
                tracing::trace!(test = tests, size = run_size.get(), "discarded");
                discards += 1;
            }
            Outcome::Failure => {
                tracing::debug!(test = tests, size = run_size.get(), "falsified, shrinking");
                let (shrunk_journal, shrinks_performed) = shrink_walk(tree, config.shrink_limit);
                let _ = journal;
                return Report {
                    tests: tests + 1,
                    discards,
                    status: ReportStatus::Failed(FailureData {
                        shrinks_performed,
                        journal: shrunk_journal,
                        recheck: crate::report::RecheckData {
                            size: run_size,
                            seed: this_seed,
                        },
                    }),
                };
            }
        }
    }

    Report {
        tests,
        discards,
        status: ReportStatus::Ok,
    }
}

/// Descend into the first child whose outcome is a `Failure`, never
/// backtracking and never considering a second candidate once one is
/// chosen, until no failing child remains or `shrink_limit` is reached.
/// Returns the evaluated journal at the minimal node found, and how many
/// shrink steps were taken to get there.
fn shrink_walk<T: Clone + 'static>(
    mut current: crate::tree::Tree<(crate::journal::Journal, Outcome<T>)>,
    shrink_limit: Option<usize>,
) -> (Vec<String>, usize) {
    let mut steps = 0usize;
    loop {
        if let Some(limit) = shrink_limit {
            if steps >= limit {
                break;
            }
        }
        let mut next = None;
        for child in current.shrinks() {
            if child.outcome().1.is_failure() {
                next = Some(child);
                break;
            }
        }
        match next {
            Some(child) => {
                current = child;
                steps += 1;
                tracing::trace!(shrink = steps, "shrank to smaller failing case");
            }
            None => break,
        }
    }
    let (journal, _) = current.into_outcome();
    (journal.eval(), steps)
}

/// Re-run a single, previously-recorded failing case: parses `payload`,
/// replays the exact same generation and greedy shrink walk, and reports
/// whether the property still fails the same way.
pub fn recheck<T: Clone + 'static>(
    payload: &str,
    property: Property<T>,
) -> Result<Report, crate::error::ProptreeError> {
    let data = crate::report::RecheckData::parse(payload)?;
    let tree = property.into_gen().run(data.seed, data.size);
    let (_, outcome) = tree.clone().into_outcome();
    let report = match outcome {
        Outcome::Success(_) => Report {
            tests: 1,
            discards: 0,
            status: ReportStatus::Ok,
        },
        Outcome::Discard => Report {
            tests: 0,
            discards: 1,
            status: ReportStatus::GaveUp,
        },
        Outcome::Failure => {
            let (journal, shrinks_performed) = shrink_walk(tree, None);
            Report {
                tests: 1,
                discards: 0,
                status: ReportStatus::Failed(FailureData {
                    shrinks_performed,
                    journal,
                    recheck: data,
                }),
            }
        }
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen::Gen;
    use crate::range::Range;
    use crate::tree::Tree;

    #[test]
    fn passes_when_predicate_always_holds() {
        let property = Property::for_all(Gen::<i32>::integral(Range::constant(0, 10)), |x| {
            Property::of_bool(x >= 0)
        });
        let report = check(property, Config::default().with_tests(50), Seed::from(1));
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(report.tests, 50);
    }

    #[test]
    fn shrinks_to_a_minimal_failing_case() {
        // buggy "adder": claims x + y is always >= x, which fails whenever y < 0.
        let property = Property::for_all(Gen::<i32>::integral(Range::constant_from(0, -100, 100)), |y| {
            Property::of_bool(10 + y >= 10)
        });
        let report = check(property, Config::default(), Seed::from(7));
        match report.status {
            ReportStatus::Failed(data) => {
                assert!(data.journal.iter().any(|l| l == "-1"));
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[test]
    fn gives_up_once_discard_budget_is_exhausted() {
        let property = Property::for_all(Gen::<i32>::integral(Range::constant(0, 10)), |x| {
            Property::of_bool(x >= 0).filter(|_| false)
        });
        let report = check(
            property,
            Config::default().with_discards(5),
            Seed::from(3),
        );
        assert_eq!(report.status, ReportStatus::GaveUp);
        assert_eq!(report.discards, 5);
        assert_eq!(report.tests, 0);
    }

    #[test]
    fn reverse_reverse_law_passes_every_test() {
        let property = Property::for_all(
            Gen::list(Range::constant(0, 20), Gen::<i32>::integral(Range::constant(-50, 50))),
            |xs: Vec<i32>| {
                let mut once = xs.clone();
                once.reverse();
                let mut twice = once;
                twice.reverse();
                Property::of_bool(twice == xs)
            },
        );
        let report = check(property, Config::default(), Seed::from(11));
        assert_eq!(report.status, ReportStatus::Ok);
        assert_eq!(report.tests, 100);
    }

    #[test]
    fn shrink_count_never_exceeds_the_configured_limit() {
        // Fails for every x except 0, so the walk keeps finding a smaller
        // failing child well past 5 steps; only `shrink_limit` stops it.
        let property = Property::for_all(Gen::<i32>::integral(Range::constant(-1000, 1000)), |x| {
            Property::of_bool(x == 0)
        });
        let report = check(property, Config::default().with_shrinks(5), Seed::from(13));
        match report.status {
            ReportStatus::Failed(data) => assert!(data.shrinks_performed <= 5),
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Expr {
        Lit(i32),
        App(Box<Expr>, Box<Expr>),
    }

    impl Expr {
        /// Does `self` contain an `App` node whose right operand is `Lit(10)`,
        /// anywhere in the tree?
        fn violates(&self) -> bool {
            match self {
                Expr::Lit(_) => false,
                Expr::App(l, r) => matches!(**r, Expr::Lit(10)) || l.violates() || r.violates(),
            }
        }
    }

    impl std::fmt::Display for Expr {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Expr::Lit(n) => write!(f, "Lit {n}"),
                Expr::App(l, r) => write!(f, "App({l}, {r})"),
            }
        }
    }

    /// Drop one subexpression entirely, or shrink a subexpression in place.
    fn expr_shrinks(e: &Expr) -> Vec<Expr> {
        match e {
            Expr::Lit(n) => crate::shrink::towards(0, *n as i128)
                .into_iter()
                .map(|v| Expr::Lit(v as i32))
                .collect(),
            Expr::App(l, r) => {
                let mut out = vec![(**l).clone(), (**r).clone()];
                out.extend(
                    expr_shrinks(l)
                        .into_iter()
                        .map(|l2| Expr::App(Box::new(l2), r.clone())),
                );
                out.extend(
                    expr_shrinks(r)
                        .into_iter()
                        .map(|r2| Expr::App(l.clone(), Box::new(r2))),
                );
                out
            }
        }
    }

    #[test]
    fn greedy_shrink_reduces_the_expression_to_the_minimal_counterexample() {
        let start = Expr::App(
            Box::new(Expr::App(Box::new(Expr::Lit(5)), Box::new(Expr::Lit(3)))),
            Box::new(Expr::App(Box::new(Expr::Lit(7)), Box::new(Expr::Lit(10)))),
        );
        let tree = Tree::unfold(
            |e: &Expr| e.clone(),
            |e: &Expr| expr_shrinks(e),
            start,
        )
        .map(|e| {
            let outcome = if e.violates() {
                Outcome::Failure
            } else {
                Outcome::Success(())
            };
            (crate::journal::Journal::of_message(format!("{e}")), outcome)
        });
        let (journal, shrinks) = shrink_walk(tree, None);
        assert!(shrinks > 0);
        assert_eq!(journal, vec!["App(Lit 0, Lit 10)".to_string()]);
    }

    #[test]
    fn recheck_reproduces_the_same_failure() {
        let make_property = || {
            Property::for_all(Gen::<i32>::integral(Range::constant_from(0, -100, 100)), |y| {
                Property::of_bool(10 + y >= 10)
            })
        };
        let report = check(make_property(), Config::default(), Seed::from(7));
        let payload = match &report.status {
            ReportStatus::Failed(data) => data.recheck.to_string(),
            other => panic!("expected a failure, got {other:?}"),
        };
        let replayed = recheck(&payload, make_property()).unwrap();
        match replayed.status {
            ReportStatus::Failed(data) => assert!(data.journal.iter().any(|l| l == "-1")),
            other => panic!("expected a failure on replay, got {other:?}"),
        }
    }
}
