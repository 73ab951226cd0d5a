//! Client-side validation messages on the plugin settings form

use async_trait::async_trait;

use crate::browser::Browser;
use crate::cases::pages::{self, field, PROJECT_KEY, SERVER_ADDRESS, USERNAME};
use crate::cases::{CaseEnv, TestCase};
use crate::error::E2eResult;
use crate::verify::Verifications;

pub const MISSING_PROJECT_KEY: &str = "You must provide a project key.";
pub const MISSING_URL: &str = "You must provide an URL.";
pub const INVALID_URL: &str = "This is not a valid URL.";

pub struct ConfigValidation;

#[async_trait]
impl TestCase for ConfigValidation {
    fn name(&self) -> &'static str {
        "config_validation"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["login"]
    }

    async fn run(&self, browser: &dyn Browser, env: &CaseEnv, checks: &mut Verifications) -> E2eResult<()> {
        pages::open_job(browser, env).await?;
        pages::open_config(browser, env).await?;

        let project_key = field(PROJECT_KEY);
        let server_address = field(SERVER_ADDRESS);
        let elsewhere = field(USERNAME);

        pages::set_and_blur(browser, &project_key, "", &elsewhere).await?;
        checks.verify_text_present(browser, MISSING_PROJECT_KEY).await?;
        pages::set_and_blur(browser, &project_key, "aaaa", &elsewhere).await?;
        checks.verify_text_absent(browser, MISSING_PROJECT_KEY).await?;

        pages::set_and_blur(browser, &server_address, "", &elsewhere).await?;
        checks.verify_text_present(browser, MISSING_URL).await?;
        pages::set_and_blur(browser, &server_address, "bbbb", &elsewhere).await?;
        checks.verify_text_present(browser, INVALID_URL).await?;

        pages::set_and_blur(browser, &server_address, "http://www.google.com", &elsewhere).await?;
        checks.verify_text_absent(browser, INVALID_URL).await?;
        checks.verify_text_absent(browser, MISSING_URL).await?;
        Ok(())
    }
}
