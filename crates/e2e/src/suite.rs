//! Suite planning and execution
//!
//! Cases run one at a time in an order derived from their declared
//! prerequisites. Declaration order breaks ties, so a plan is deterministic.
//! When a prerequisite fails, its dependents are skipped rather than left to
//! fail in ways that hide the real cause.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::browser::Launcher;
use crate::cases::TestCase;
use crate::error::{E2eError, E2eResult};
use crate::session::{CaseOutcome, CaseStatus, ScopeConfig, SessionScope};

/// Cases in the order they will run
pub struct SuitePlan {
    cases: Vec<Box<dyn TestCase>>,
}

impl std::fmt::Debug for SuitePlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl SuitePlan {
    /// Order `cases` by prerequisite. A non-empty `only` keeps the named cases
    /// and everything they transitively require.
    pub fn new(cases: Vec<Box<dyn TestCase>>, only: &[String]) -> E2eResult<Self> {
        let index: HashMap<&str, usize> = cases
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name(), i))
            .collect();
        if index.len() != cases.len() {
            return Err(E2eError::SuitePlan("duplicate test case names".to_string()));
        }

        for case in &cases {
            for dep in case.requires() {
                if !index.contains_key(dep) {
                    return Err(E2eError::SuitePlan(format!(
                        "{} requires unknown case {}",
                        case.name(),
                        dep
                    )));
                }
            }
        }

        let selected = select(&cases, &index, only)?;
        let order = order(&cases, &index, &selected)?;

        let mut slots: Vec<Option<Box<dyn TestCase>>> = cases.into_iter().map(Some).collect();
        let cases = order
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();
        Ok(Self { cases })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

fn select(
    cases: &[Box<dyn TestCase>],
    index: &HashMap<&str, usize>,
    only: &[String],
) -> E2eResult<Vec<bool>> {
    if only.is_empty() {
        return Ok(vec![true; cases.len()]);
    }

    let mut selected = vec![false; cases.len()];
    let mut stack = Vec::new();
    for name in only {
        let i = *index
            .get(name.as_str())
            .ok_or_else(|| E2eError::SuitePlan(format!("Test not found: {}", name)))?;
        stack.push(i);
    }
    while let Some(i) = stack.pop() {
        if selected[i] {
            continue;
        }
        selected[i] = true;
        stack.extend(cases[i].requires().iter().map(|dep| index[dep]));
    }
    Ok(selected)
}

/// Kahn's algorithm, always taking the earliest-declared ready case.
fn order(
    cases: &[Box<dyn TestCase>],
    index: &HashMap<&str, usize>,
    selected: &[bool],
) -> E2eResult<Vec<usize>> {
    let mut pending: Vec<usize> = (0..cases.len()).filter(|&i| selected[i]).collect();
    let mut done: HashSet<usize> = HashSet::new();
    let mut order = Vec::with_capacity(pending.len());

    while !pending.is_empty() {
        let ready = pending
            .iter()
            .position(|&i| cases[i].requires().iter().all(|dep| done.contains(&index[dep])));
        match ready {
            Some(pos) => {
                let i = pending.remove(pos);
                done.insert(i);
                order.push(i);
            }
            None => {
                let stuck: Vec<&str> = pending.iter().map(|&i| cases[i].name()).collect();
                return Err(E2eError::SuitePlan(format!(
                    "dependency cycle among: {}",
                    stuck.join(", ")
                )));
            }
        }
    }
    Ok(order)
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<CaseOutcome>,
}

impl SuiteResult {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

/// Configuration for the suite runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub scope: ScopeConfig,

    /// Skip cases whose prerequisites did not pass
    pub skip_dependents: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            scope: ScopeConfig::default(),
            skip_dependents: true,
        }
    }
}

/// Main E2E test runner
pub struct SuiteRunner<L: Launcher> {
    launcher: L,
    config: RunnerConfig,
}

impl<L: Launcher> SuiteRunner<L> {
    pub fn new(launcher: L, config: RunnerConfig) -> Self {
        Self { launcher, config }
    }

    /// Run every case in the plan, in order
    pub async fn run(&self, plan: &SuitePlan) -> SuiteResult {
        let start = Instant::now();
        let scope = SessionScope::new(&self.launcher, &self.config.scope);
        let mut results: Vec<CaseOutcome> = Vec::with_capacity(plan.len());
        let mut passed: HashSet<&str> = HashSet::new();

        info!("Running {} test(s)...", plan.len());

        for case in &plan.cases {
            let blocked: Vec<&str> = case
                .requires()
                .iter()
                .copied()
                .filter(|dep| !passed.contains(dep))
                .collect();

            let outcome = if self.config.skip_dependents && !blocked.is_empty() {
                let reason = format!("prerequisite did not pass: {}", blocked.join(", "));
                warn!("- {} skipped ({})", case.name(), reason);
                CaseOutcome::skipped(case.name(), reason)
            } else {
                if !blocked.is_empty() {
                    warn!("{} runs without passing prerequisites: {}", case.name(), blocked.join(", "));
                }
                scope.run(case.as_ref()).await
            };

            match outcome.status {
                CaseStatus::Passed => {
                    passed.insert(case.name());
                    info!("✓ {} ({} ms)", outcome.name, outcome.duration_ms);
                }
                CaseStatus::Failed | CaseStatus::Errored => {
                    error!("✗ {} - {}", outcome.name, outcome.messages().join("; "));
                }
                CaseStatus::Skipped => {}
            }
            results.push(outcome);
        }

        let count = |status: CaseStatus| results.iter().filter(|r| r.status == status).count();
        let result = SuiteResult {
            total: results.len(),
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            errored: count(CaseStatus::Errored),
            skipped: count(CaseStatus::Skipped),
            duration_ms: start.elapsed().as_millis() as u64,
            results,
        };

        info!(
            "Test Results: {} passed, {} failed, {} errored, {} skipped ({} ms)",
            result.passed, result.failed, result.errored, result.skipped, result.duration_ms
        );
        result
    }
}
