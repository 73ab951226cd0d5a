//! The plugin's entry on the installed-plugins page links to its wiki page

use async_trait::async_trait;

use crate::browser::Browser;
use crate::cases::{CaseEnv, TestCase};
use crate::error::E2eResult;
use crate::locator::Locator;
use crate::verify::Verifications;

pub struct PluginLinks;

#[async_trait]
impl TestCase for PluginLinks {
    fn name(&self) -> &'static str {
        "plugin_links"
    }

    fn requires(&self) -> &'static [&'static str] {
        &["login"]
    }

    async fn run(&self, browser: &dyn Browser, env: &CaseEnv, checks: &mut Verifications) -> E2eResult<()> {
        browser.open("/pluginManager/installed").await?;
        browser.click(&Locator::link(env.site.plugin_link.as_str())).await?;
        browser.wait_for_page_to_load(env.page_load_timeout).await?;

        let title = browser.get_title().await?;
        checks.verify_eq("page title", env.site.plugin_page_title.as_str(), title.as_str());
        Ok(())
    }
}
