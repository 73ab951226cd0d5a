//! Selenium RC client
//!
//! Commands are form-encoded POSTs to the driver URL:
//!
//! ```text
//! cmd=<verb>&1=<arg>&2=<arg>&sessionId=<id>
//! ```
//!
//! and the server answers with plain text, `OK`, `OK,<value>` or an error
//! message (usually `ERROR: ...`).

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::browser::{Browser, Launcher};
use crate::config::Credentials;
use crate::error::{E2eError, E2eResult};
use crate::locator::Locator;

/// Browser identifier used when none is configured
pub const DEFAULT_BROWSER: &str = "*firefox";

/// Configuration for the Selenium RC client
#[derive(Debug, Clone)]
pub struct SeleniumConfig {
    /// Browser launcher string, e.g. `*firefox` or `*googlechrome`
    pub browser: String,

    /// Upper bound for a single HTTP round-trip; must outlast page-load waits
    pub request_timeout: Duration,
}

impl Default for SeleniumConfig {
    fn default() -> Self {
        Self {
            browser: DEFAULT_BROWSER.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// Starts sessions on a Selenium RC server
pub struct SeleniumLauncher {
    http: reqwest::Client,
    config: SeleniumConfig,
}

impl SeleniumLauncher {
    pub fn new(config: SeleniumConfig) -> E2eResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl Launcher for SeleniumLauncher {
    type Session = RemoteSession;

    async fn launch(&self, credentials: &Credentials) -> E2eResult<RemoteSession> {
        let endpoint = credentials.endpoint();
        info!("Starting {} session via {}", self.config.browser, endpoint);

        let reply = send(
            &self.http,
            &endpoint,
            "getNewBrowserSession",
            &[self.config.browser.as_str(), credentials.base_url.as_str()],
            None,
        )
        .await
        .map_err(|e| match e {
            E2eError::Http(err) if err.is_connect() || err.is_timeout() => {
                E2eError::EndpointUnreachable {
                    endpoint: endpoint.clone(),
                    reason: err.to_string(),
                }
            }
            E2eError::RemoteCommand { message, .. } => E2eError::SessionStart(message),
            other => other,
        })?;

        if reply.is_empty() {
            return Err(E2eError::SessionStart("server returned no session id".to_string()));
        }

        debug!("Session {} started", reply);
        Ok(RemoteSession {
            http: self.http.clone(),
            endpoint,
            session_id: reply,
        })
    }
}

/// One live browser session on a Selenium RC server
pub struct RemoteSession {
    http: reqwest::Client,
    endpoint: String,
    session_id: String,
}

impl RemoteSession {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn command(&self, verb: &str, args: &[&str]) -> E2eResult<String> {
        // Only the first argument is logged; `type` carries passwords in the second.
        debug!("{} {}", verb, args.first().copied().unwrap_or_default());
        send(&self.http, &self.endpoint, verb, args, Some(&self.session_id)).await
    }

    async fn locator_command(&self, verb: &str, locator: &Locator) -> E2eResult<String> {
        let locator = locator.to_string();
        self.command(verb, &[locator.as_str()]).await
    }
}

#[async_trait]
impl Browser for RemoteSession {
    async fn open(&self, url: &str) -> E2eResult<()> {
        self.command("open", &[url]).await.map(drop)
    }

    async fn click(&self, locator: &Locator) -> E2eResult<()> {
        self.locator_command("click", locator).await.map(drop)
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> E2eResult<()> {
        let locator = locator.to_string();
        self.command("type", &[locator.as_str(), text]).await.map(drop)
    }

    async fn check(&self, locator: &Locator) -> E2eResult<()> {
        self.locator_command("check", locator).await.map(drop)
    }

    async fn uncheck(&self, locator: &Locator) -> E2eResult<()> {
        self.locator_command("uncheck", locator).await.map(drop)
    }

    async fn focus(&self, locator: &Locator) -> E2eResult<()> {
        self.locator_command("focus", locator).await.map(drop)
    }

    async fn wait_for_page_to_load(&self, timeout: Duration) -> E2eResult<()> {
        let millis = timeout.as_millis().to_string();
        self.command("waitForPageToLoad", &[millis.as_str()]).await.map(drop)
    }

    async fn get_value(&self, locator: &Locator) -> E2eResult<String> {
        self.locator_command("getValue", locator).await
    }

    async fn get_title(&self) -> E2eResult<String> {
        self.command("getTitle", &[]).await
    }

    async fn is_text_present(&self, text: &str) -> E2eResult<bool> {
        let reply = self.command("isTextPresent", &[text]).await?;
        parse_bool("isTextPresent", &reply)
    }

    async fn stop(&self) -> E2eResult<()> {
        debug!("Stopping session {}", self.session_id);
        self.command("testComplete", &[]).await.map(drop)
    }
}

async fn send(
    http: &reqwest::Client,
    endpoint: &str,
    verb: &str,
    args: &[&str],
    session_id: Option<&str>,
) -> E2eResult<String> {
    let mut form: Vec<(String, String)> = Vec::with_capacity(args.len() + 2);
    form.push(("cmd".to_string(), verb.to_string()));
    for (i, arg) in args.iter().enumerate() {
        form.push(((i + 1).to_string(), (*arg).to_string()));
    }
    if let Some(id) = session_id {
        form.push(("sessionId".to_string(), id.to_string()));
    }

    let body = http
        .post(endpoint)
        .form(&form)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_reply(verb, &body)
}

/// Strip the `OK` status from a reply, or turn anything else into an error.
pub fn parse_reply(verb: &str, body: &str) -> E2eResult<String> {
    if let Some(rest) = body.strip_prefix("OK") {
        return match rest.strip_prefix(',') {
            Some(value) => Ok(value.to_string()),
            None if rest.is_empty() => Ok(String::new()),
            None => Err(E2eError::Protocol {
                command: verb.to_string(),
                response: body.to_string(),
            }),
        };
    }

    let message = body
        .strip_prefix("ERROR")
        .map(|m| m.trim_start_matches(':').trim())
        .unwrap_or(body)
        .to_string();
    warn!("{} failed: {}", verb, message);
    Err(E2eError::RemoteCommand {
        command: verb.to_string(),
        message,
    })
}

fn parse_bool(verb: &str, value: &str) -> E2eResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(E2eError::Protocol {
            command: verb.to_string(),
            response: value.to_string(),
        }),
    }
}
