//! Navigation steps shared between cases

use crate::browser::Browser;
use crate::cases::CaseEnv;
use crate::error::E2eResult;
use crate::locator::Locator;

pub const PROJECT_KEY: &str = "_.projectKey";
pub const SERVER_ADDRESS: &str = "_.serverAddress";
pub const USERNAME: &str = "_.username";
pub const PASSWORD: &str = "_.password";
pub const CREATE_ALL_FLAG: &str = "_.createAllFlag";
pub const DEBUG_FLAG: &str = "_.debugFlag";
pub const VERBOSE_DEBUG_FLAG: &str = "_.verboseDebugFlag";

/// Plugin settings form field by its `name` attribute
pub fn field(name: &str) -> Locator {
    Locator::name(name)
}

/// Log out, then submit the login form with the given account.
pub async fn log_in(browser: &dyn Browser, env: &CaseEnv, username: &str, password: &str) -> E2eResult<()> {
    browser.open("/logout").await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await?;

    browser.click(&Locator::css("b")).await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await?;

    browser.type_text(&Locator::id("j_username"), username).await?;
    browser.type_text(&Locator::name("j_password"), password).await?;
    browser.click(&Locator::id("yui-gen1-button")).await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await
}

/// Dashboard, then the configured job's page
pub async fn open_job(browser: &dyn Browser, env: &CaseEnv) -> E2eResult<()> {
    browser.open("/").await?;
    browser.click(&Locator::link(env.site.job_name.as_str())).await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await
}

/// From a job page, its configure page
pub async fn open_config(browser: &dyn Browser, env: &CaseEnv) -> E2eResult<()> {
    browser.click(&Locator::link("Configure")).await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await
}

pub async fn save_config(browser: &dyn Browser, env: &CaseEnv) -> E2eResult<()> {
    browser.click(&Locator::id("yui-gen35-button")).await?;
    browser.wait_for_page_to_load(env.page_load_timeout).await
}

/// Type into a field, then move focus to `blur_to` so its validation runs.
pub async fn set_and_blur(browser: &dyn Browser, field: &Locator, value: &str, blur_to: &Locator) -> E2eResult<()> {
    browser.focus(field).await?;
    browser.type_text(field, value).await?;
    browser.focus(blur_to).await
}
