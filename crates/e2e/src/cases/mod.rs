//! The suite's test cases
//!
//! Each case declares the cases it depends on through [`TestCase::requires`];
//! the suite plan orders them so prerequisites run first and skips a case
//! whose prerequisite did not pass.

use std::time::Duration;

use async_trait::async_trait;

use crate::browser::Browser;
use crate::config::{Credentials, SiteConfig};
use crate::error::E2eResult;
use crate::fixture::FixtureValues;
use crate::verify::Verifications;

pub mod config_persistence;
pub mod config_validation;
pub mod login;
pub mod pages;
pub mod plugin_links;

pub use config_persistence::ConfigPersistence;
pub use config_validation::ConfigValidation;
pub use login::{Login, LoginRejected};
pub use plugin_links::PluginLinks;

/// Everything setup hands to a test body besides the session
#[derive(Debug, Clone)]
pub struct CaseEnv {
    pub credentials: Credentials,
    pub site: SiteConfig,
    pub fixtures: FixtureValues,
    pub page_load_timeout: Duration,
}

impl CaseEnv {
    /// Text Jenkins shows in the page header once `username` is logged in
    pub fn logged_in_marker(&self) -> String {
        format!("{} | log out", self.credentials.username)
    }
}

#[async_trait]
pub trait TestCase: Send + Sync {
    fn name(&self) -> &'static str;

    /// Names of cases that must pass before this one can run
    fn requires(&self) -> &'static [&'static str] {
        &[]
    }

    async fn run(
        &self,
        browser: &dyn Browser,
        env: &CaseEnv,
        checks: &mut Verifications,
    ) -> E2eResult<()>;
}

/// All cases in declaration order
pub fn all() -> Vec<Box<dyn TestCase>> {
    vec![
        Box::new(LoginRejected),
        Box::new(Login),
        Box::new(ConfigValidation),
        Box::new(ConfigPersistence),
        Box::new(PluginLinks),
    ]
}
