//! Deferred and immediate checks
//!
//! Checks on what a page shows are deferred: a mismatch is recorded and the
//! test body keeps going, so one run reports every broken field at once. A
//! check whose failure makes the remaining steps pointless goes through
//! [`require`] instead and ends the body right away.

use std::fmt::Debug;

use crate::browser::Browser;
use crate::error::{E2eError, E2eResult};

/// Failure messages collected during one test body, in the order recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Verifications {
    failures: Vec<String>,
}

impl Verifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` unless `condition` holds. Returns `condition`.
    pub fn verify(&mut self, condition: bool, message: impl Into<String>) -> bool {
        if !condition {
            self.failures.push(message.into());
        }
        condition
    }

    pub fn verify_eq<T: PartialEq + Debug>(&mut self, what: &str, expected: T, actual: T) -> bool {
        let ok = expected == actual;
        if !ok {
            self.failures
                .push(format!("{what}: expected {expected:?}, got {actual:?}"));
        }
        ok
    }

    pub async fn verify_text_present(&mut self, browser: &dyn Browser, text: &str) -> E2eResult<bool> {
        let present = browser.is_text_present(text).await?;
        Ok(self.verify(present, format!("expected text {text:?} to be present")))
    }

    pub async fn verify_text_absent(&mut self, browser: &dyn Browser, text: &str) -> E2eResult<bool> {
        let present = browser.is_text_present(text).await?;
        Ok(self.verify(!present, format!("expected text {text:?} to be absent")))
    }

    /// Append another accumulator's failures after this one's.
    pub fn merge(&mut self, other: Verifications) {
        self.failures.extend(other.failures);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<String> {
        self.failures
    }
}

/// Immediate check: fails the test body on the spot.
pub fn require(condition: bool, message: impl Into<String>) -> E2eResult<()> {
    if condition {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed(message.into()))
    }
}
