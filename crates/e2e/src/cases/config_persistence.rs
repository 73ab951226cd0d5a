//! Saved plugin settings survive a reload

use async_trait::async_trait;
use tracing::debug;

use crate::browser::Browser;
use crate::cases::pages::{
    self, field, CREATE_ALL_FLAG, DEBUG_FLAG, PASSWORD, PROJECT_KEY, SERVER_ADDRESS, USERNAME,
    VERBOSE_DEBUG_FLAG,
};
use crate::cases::{CaseEnv, TestCase};
use crate::error::E2eResult;
use crate::verify::Verifications;

/// Value Selenium reports for a ticked checkbox
const CHECKED: &str = "on";

pub struct ConfigPersistence;

#[async_trait]
impl TestCase for ConfigPersistence {
    fn name(&self) -> &'static str {
        "config_persistence"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["login"]
    }

    async fn run(&self, browser: &dyn Browser, env: &CaseEnv, checks: &mut Verifications) -> E2eResult<()> {
        pages::open_job(browser, env).await?;
        pages::open_config(browser, env).await?;

        let values = &env.fixtures;
        browser.type_text(&field(PROJECT_KEY), &values.project_key).await?;
        browser.type_text(&field(SERVER_ADDRESS), &values.server_address).await?;
        browser.type_text(&field(USERNAME), &values.username).await?;
        browser.type_text(&field(PASSWORD), &values.password).await?;
        browser.check(&field(CREATE_ALL_FLAG)).await?;
        browser.uncheck(&field(DEBUG_FLAG)).await?;
        browser.check(&field(VERBOSE_DEBUG_FLAG)).await?;

        pages::save_config(browser, env).await?;
        debug!("Saved settings, reloading configure page");
        pages::open_config(browser, env).await?;

        let project_key = value_of(browser, PROJECT_KEY).await?;
        checks.verify_eq("projectKey", values.project_key.clone(), project_key);

        // The plugin normalizes the server address to end with a slash.
        let server_address = value_of(browser, SERVER_ADDRESS).await?;
        checks.verify_eq("serverAddress", format!("{}/", values.server_address), server_address);

        let username = value_of(browser, USERNAME).await?;
        checks.verify_eq("username", values.username.clone(), username);

        let password = value_of(browser, PASSWORD).await?;
        checks.verify_eq("password", values.password.clone(), password);

        for flag in [CREATE_ALL_FLAG, DEBUG_FLAG, VERBOSE_DEBUG_FLAG] {
            // debugFlag reads back ticked: verbose debugging switches it on again.
            let value = value_of(browser, flag).await?;
            checks.verify_eq(flag.trim_start_matches("_."), CHECKED, value.as_str());
        }
        Ok(())
    }
}

async fn value_of(browser: &dyn Browser, name: &str) -> E2eResult<String> {
    browser.get_value(&field(name)).await
}
