//! Login against the Jenkins security realm

use async_trait::async_trait;

use crate::browser::Browser;
use crate::cases::{pages, CaseEnv, TestCase};
use crate::error::E2eResult;
use crate::verify::{require, Verifications};

/// A valid account ends up logged in.
pub struct Login;

#[async_trait]
impl TestCase for Login {
    fn name(&self) -> &'static str {
        "login"
    }

    async fn run(&self, browser: &dyn Browser, env: &CaseEnv, _checks: &mut Verifications) -> E2eResult<()> {
        let creds = &env.credentials;
        pages::log_in(browser, env, &creds.username, &creds.password).await?;

        // Every later case needs this session, so no point carrying on.
        let marker = env.logged_in_marker();
        let present = browser.is_text_present(&marker).await?;
        require(present, format!("{marker:?} not shown after logging in"))
    }
}

/// A made-up account is turned away.
pub struct LoginRejected;

#[async_trait]
impl TestCase for LoginRejected {
    fn name(&self) -> &'static str {
        "login_rejected"
    }

    async fn run(&self, browser: &dyn Browser, env: &CaseEnv, checks: &mut Verifications) -> E2eResult<()> {
        let fixtures = &env.fixtures;
        pages::log_in(browser, env, &fixtures.username, &fixtures.password).await?;

        checks.verify_text_absent(browser, &env.logged_in_marker()).await?;
        checks
            .verify_text_absent(browser, &format!("{} | log out", fixtures.username))
            .await?;
        Ok(())
    }
}
