//! Report (C9): the outcome of a completed run, and its stable textual
//! rendering.

use crate::error::ProptreeError;
use crate::seed::Seed;
use crate::size::Size;

/// Everything needed to replay the exact failing test that produced a
/// [`FailureData`]: the original size and seed of the top-level sample.
/// Shrinking itself is deterministic given the tree, so replaying from here
/// reaches the same minimal counterexample without needing to record every
/// intermediate shrink step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecheckData {
    pub size: Size,
    pub seed: Seed,
}

impl RecheckData {
    /// Parse the `"<size>_<value>_<gamma>"` wire format.
    pub fn parse(payload: &str) -> Result<Self, ProptreeError> {
        let fail = || ProptreeError::MalformedRecheckPayload {
            payload: payload.to_string(),
        };
        let mut parts = payload.split('_');
        let size: i64 = parts.next().ok_or_else(fail)?.parse().map_err(|_| fail())?;
        let value: u64 = parts.next().ok_or_else(fail)?.parse().map_err(|_| fail())?;
        let gamma: u64 = parts.next().ok_or_else(fail)?.parse().map_err(|_| fail())?;
        if parts.next().is_some() {
            return Err(fail());
        }
        Ok(RecheckData {
            size: Size(size),
            seed: Seed::from_parts(value, gamma),
        })
    }
}

impl std::fmt::Display for RecheckData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.size.get(), self.seed.value(), self.seed.gamma())
    }
}

/// A minimal failing case, plus the replay payload and the evaluated
/// journal at that case — every diagnostic line, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureData {
    pub shrinks_performed: usize,
    pub journal: Vec<String>,
    pub recheck: RecheckData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Ok,
    GaveUp,
    Failed(FailureData),
}

/// The result of running a property to completion (or to early failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub tests: usize,
    pub discards: usize,
    pub status: ReportStatus,
}

impl Report {
    /// A stable rendering, its first line parseable by tooling: `+++ OK,
    /// passed N tests.`, `*** Gave up after D discards, passed N tests.`,
    /// or `*** Failed! Falsifiable (after N tests[ and K shrinks][ and D
    /// discards]):` followed by each evaluated journal entry on its own
    /// line, followed by a reproducer line naming the recheck payload.
    pub fn render(&self) -> String {
        match &self.status {
            ReportStatus::Ok => format!("+++ OK, passed {} tests.", self.tests),
            ReportStatus::GaveUp => format!(
                "*** Gave up after {} discards, passed {} tests.",
                self.discards, self.tests
            ),
            ReportStatus::Failed(data) => {
                let mut clauses = vec![format!("{} tests", self.tests)];
                if data.shrinks_performed > 0 {
                    clauses.push(format!("{} shrinks", data.shrinks_performed));
                }
                if self.discards > 0 {
                    clauses.push(format!("{} discards", self.discards));
                }
                let mut lines = vec![format!(
                    "*** Failed! Falsifiable (after {}):",
                    clauses.join(" and ")
                )];
                lines.extend(data.journal.iter().cloned());
                lines.push("This failure can be reproduced by running:".to_string());
                lines.push(format!("recheck(\"{}\", property)", data.recheck));
                lines.join("\n")
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ReportStatus::Ok)
    }

    /// `Err` with a message built from `render()` unless the run passed.
    pub fn try_raise(&self) -> Result<(), ReportFailure> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ReportFailure(self.render()))
        }
    }
}

/// The error [`Report::try_raise`] returns for a non-passing run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ReportFailure(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_snapshot_failed() {
        let report = Report {
            tests: 5,
            discards: 1,
            status: ReportStatus::Failed(FailureData {
                shrinks_performed: 4,
                journal: vec!["-1".to_string()],
                recheck: RecheckData {
                    size: Size(10),
                    seed: Seed::from_parts(1, 3),
                },
            }),
        };
        archetype::snap("report_render_failed", report.render());
    }

    #[test]
    fn render_snapshot_ok() {
        let report = Report {
            tests: 100,
            discards: 0,
            status: ReportStatus::Ok,
        };
        archetype::snap("report_render_ok", report.render());
    }

    #[test]
    fn recheck_payload_round_trips() {
        let data = RecheckData {
            size: Size(42),
            seed: Seed::from(7),
        };
        let payload = data.to_string();
        let parsed = RecheckData::parse(&payload).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn malformed_payload_is_rejected() {
        assert!(RecheckData::parse("not_a_payload").is_err());
        assert!(RecheckData::parse("1_2").is_err());
        assert!(RecheckData::parse("1_2_3_4").is_err());
    }

    #[test]
    fn ok_render_matches_the_stable_form() {
        let ok = Report {
            tests: 100,
            discards: 0,
            status: ReportStatus::Ok,
        };
        assert_eq!(ok.render(), "+++ OK, passed 100 tests.");
    }

    #[test]
    fn gave_up_render_matches_the_stable_form() {
        let gave_up = Report {
            tests: 3,
            discards: 100,
            status: ReportStatus::GaveUp,
        };
        assert_eq!(
            gave_up.render(),
            "*** Gave up after 100 discards, passed 3 tests."
        );
    }

    #[test]
    fn failed_render_has_one_journal_entry_per_line_and_a_reproducer() {
        let failed = Report {
            tests: 5,
            discards: 0,
            status: ReportStatus::Failed(FailureData {
                shrinks_performed: 3,
                journal: vec!["-1".to_string(), "App(Lit 0, Lit 10)".to_string()],
                recheck: RecheckData {
                    size: Size(10),
                    seed: Seed::from(1),
                },
            }),
        };
        let rendered = failed.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "*** Failed! Falsifiable (after 5 tests and 3 shrinks):");
        assert_eq!(lines[1], "-1");
        assert_eq!(lines[2], "App(Lit 0, Lit 10)");
        assert_eq!(lines[3], "This failure can be reproduced by running:");
        assert!(lines[4].contains(&failed_recheck_payload(&failed)));
    }

    #[test]
    fn failed_render_omits_optional_clauses_when_zero() {
        let failed = Report {
            tests: 1,
            discards: 0,
            status: ReportStatus::Failed(FailureData {
                shrinks_performed: 0,
                journal: vec!["0".to_string()],
                recheck: RecheckData {
                    size: Size(1),
                    seed: Seed::from(1),
                },
            }),
        };
        assert_eq!(
            failed.render().lines().next().unwrap(),
            "*** Failed! Falsifiable (after 1 tests):"
        );
    }

    #[test]
    fn failed_render_includes_discard_clause_when_nonzero() {
        let failed = Report {
            tests: 2,
            discards: 4,
            status: ReportStatus::Failed(FailureData {
                shrinks_performed: 0,
                journal: vec!["0".to_string()],
                recheck: RecheckData {
                    size: Size(1),
                    seed: Seed::from(1),
                },
            }),
        };
        assert_eq!(
            failed.render().lines().next().unwrap(),
            "*** Failed! Falsifiable (after 2 tests and 4 discards):"
        );
    }

    fn failed_recheck_payload(report: &Report) -> String {
        match &report.status {
            ReportStatus::Failed(data) => data.recheck.to_string(),
            _ => panic!("expected a failure"),
        }
    }

    #[test]
    fn try_raise_only_errors_on_non_ok() {
        let ok = Report {
            tests: 1,
            discards: 0,
            status: ReportStatus::Ok,
        };
        assert!(ok.try_raise().is_ok());

        let gave_up = Report {
            tests: 0,
            discards: 100,
            status: ReportStatus::GaveUp,
        };
        assert!(gave_up.try_raise().is_err());
    }
}
