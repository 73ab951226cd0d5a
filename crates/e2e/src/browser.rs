//! Remote browser command surface

use std::time::Duration;

use async_trait::async_trait;

use crate::config::Credentials;
use crate::error::E2eResult;
use crate::locator::Locator;

/// Commands a test case may send to its browser session.
///
/// Every call is a round-trip to the automation endpoint and any failure it
/// reports is returned as an error. Test cases never call [`Browser::stop`];
/// the session scope does that once the body is finished.
#[async_trait]
pub trait Browser: Send + Sync {
    /// Navigate to a URL, relative to the session's base URL
    async fn open(&self, url: &str) -> E2eResult<()>;

    async fn click(&self, locator: &Locator) -> E2eResult<()>;

    /// Replace the value of an input field
    async fn type_text(&self, locator: &Locator, text: &str) -> E2eResult<()>;

    async fn check(&self, locator: &Locator) -> E2eResult<()>;

    async fn uncheck(&self, locator: &Locator) -> E2eResult<()>;

    async fn focus(&self, locator: &Locator) -> E2eResult<()>;

    /// Block until the current page load finishes or `timeout` passes
    async fn wait_for_page_to_load(&self, timeout: Duration) -> E2eResult<()>;

    async fn get_value(&self, locator: &Locator) -> E2eResult<String>;

    async fn get_title(&self) -> E2eResult<String>;

    async fn is_text_present(&self, text: &str) -> E2eResult<bool>;

    /// End the session and release the remote browser
    async fn stop(&self) -> E2eResult<()>;
}

/// Opens browser sessions against an automation endpoint.
#[async_trait]
pub trait Launcher: Send + Sync {
    type Session: Browser + 'static;

    async fn launch(&self, credentials: &Credentials) -> E2eResult<Self::Session>;
}
