//! Per-test session lifecycle
//!
//! ```text
//! Uninitialized ──setup──▶ Active ──body──▶ Finalizing ──stop──▶ Closed
//!       │                                                        ▲
//!       └──────────── setup error (nothing to release) ──────────┘
//! ```
//!
//! Setup loads the config file, generates fixture values and opens the
//! browser session. The body then runs with the session, its environment and
//! a fresh [`Verifications`]. Whatever way the body ends (success, error,
//! panic) the session is stopped exactly once before a verdict is reached.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::browser::{Browser, Launcher};
use crate::cases::{CaseEnv, TestCase};
use crate::config::ConfigFile;
use crate::error::E2eError;
use crate::fixture::FixtureValues;
use crate::verify::Verifications;

/// Page-load wait used when none is configured
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    /// An assertion or a remote command failed
    Failed,
    /// Setup failed, the body panicked, or the session could not be released
    Errored,
    /// Not run because a prerequisite did not pass
    Skipped,
}

/// Result of running a single test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub name: String,
    pub status: CaseStatus,
    pub duration_ms: u64,

    /// Deferred check failures, in the order they were recorded
    pub failures: Vec<String>,

    /// Error that ended setup or the body early
    pub error: Option<String>,

    /// Error raised while releasing the session
    pub teardown_error: Option<String>,
}

impl CaseOutcome {
    pub fn skipped(name: &str, reason: String) -> Self {
        Self {
            name: name.to_string(),
            status: CaseStatus::Skipped,
            duration_ms: 0,
            failures: Vec::new(),
            error: Some(reason),
            teardown_error: None,
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CaseStatus::Passed
    }

    /// Every message explaining a non-pass, hard error first.
    pub fn messages(&self) -> Vec<String> {
        self.error
            .iter()
            .chain(self.failures.iter())
            .chain(self.teardown_error.iter())
            .cloned()
            .collect()
    }
}

/// Inputs shared by every scope in a run
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    /// Credentials/site config file, read again for every case
    pub config_path: PathBuf,

    pub page_load_timeout: Duration,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("myCredentials.txt"),
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
        }
    }
}

/// Runs one test case inside its own browser session
pub struct SessionScope<'a, L: Launcher> {
    launcher: &'a L,
    config: &'a ScopeConfig,
}

enum BodyEnd {
    Completed,
    Aborted(E2eError),
    Panicked(String),
}

impl<'a, L: Launcher> SessionScope<'a, L> {
    pub fn new(launcher: &'a L, config: &'a ScopeConfig) -> Self {
        Self { launcher, config }
    }

    pub async fn run(&self, case: &dyn TestCase) -> CaseOutcome {
        let start = Instant::now();
        let name = case.name();
        debug!("Setting up {}", name);

        let (env, session) = match self.setup().await {
            Ok(active) => active,
            Err(e) => {
                error!("Setup for {} failed: {}", name, e);
                return CaseOutcome {
                    name: name.to_string(),
                    status: CaseStatus::Errored,
                    duration_ms: start.elapsed().as_millis() as u64,
                    failures: Vec::new(),
                    error: Some(format!("setup: {e}")),
                    teardown_error: None,
                };
            }
        };

        let mut checks = Verifications::new();
        let body = AssertUnwindSafe(case.run(&session, &env, &mut checks))
            .catch_unwind()
            .await;
        let end = match body {
            Ok(Ok(())) => BodyEnd::Completed,
            Ok(Err(e)) => BodyEnd::Aborted(e),
            Err(panic) => BodyEnd::Panicked(panic_message(panic.as_ref())),
        };

        let teardown_error = match session.stop().await {
            Ok(()) => None,
            Err(e) => {
                warn!("Releasing session for {} failed: {}", name, e);
                Some(format!("teardown: {e}"))
            }
        };

        let failures = checks.into_failures();
        let (status, error) = match end {
            BodyEnd::Panicked(message) => (CaseStatus::Errored, Some(format!("panicked: {message}"))),
            BodyEnd::Aborted(e) => (CaseStatus::Failed, Some(e.to_string())),
            BodyEnd::Completed if !failures.is_empty() => (CaseStatus::Failed, None),
            BodyEnd::Completed if teardown_error.is_some() => (CaseStatus::Errored, None),
            BodyEnd::Completed => (CaseStatus::Passed, None),
        };

        CaseOutcome {
            name: name.to_string(),
            status,
            duration_ms: start.elapsed().as_millis() as u64,
            failures,
            error,
            teardown_error,
        }
    }

    async fn setup(&self) -> Result<(CaseEnv, L::Session), E2eError> {
        let config = ConfigFile::load(&self.config.config_path)?;
        let fixtures = FixtureValues::generate();
        let session = self.launcher.launch(&config.credentials).await?;

        let env = CaseEnv {
            credentials: config.credentials,
            site: config.site,
            fixtures,
            page_load_timeout: self.config.page_load_timeout,
        };
        Ok((env, session))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
