//! JiraTestResultReporter configuration-page E2E suite
//!
//! Drives a browser through a Selenium RC server to check the plugin's
//! settings form on a live Jenkins:
//! - logs in (and checks a bogus account is refused)
//! - checks the form's client-side validation messages
//! - saves randomized settings and reads them back after a reload
//! - follows the plugin's documentation link from the plugin manager
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 SuiteRunner (one case at a time)            │
//! │    ├── SuitePlan::new(cases, only)   prerequisite order     │
//! │    └── SessionScope::run(case) -> CaseOutcome               │
//! │          ├── setup: ConfigFile::load, FixtureValues,        │
//! │          │          Launcher::launch -> Browser             │
//! │          ├── body:  TestCase::run(browser, env, checks)     │
//! │          └── teardown: Browser::stop (always, once)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Browser (Selenium RC over HTTP)                            │
//! │    open, click, type, check, uncheck, focus,                │
//! │    waitForPageToLoad, getValue, getTitle, isTextPresent     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  write_report(SuiteResult) -> JUnit XML | JSON              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod browser;
pub mod cases;
pub mod config;
pub mod error;
pub mod fixture;
pub mod locator;
pub mod report;
pub mod selenium;
pub mod session;
pub mod suite;
pub mod verify;

pub use browser::{Browser, Launcher};
pub use config::{ConfigFile, Credentials, SiteConfig};
pub use error::{E2eError, E2eResult};
pub use locator::Locator;
pub use session::{CaseOutcome, CaseStatus, SessionScope};
pub use suite::{RunnerConfig, SuitePlan, SuiteResult, SuiteRunner};
pub use verify::Verifications;
