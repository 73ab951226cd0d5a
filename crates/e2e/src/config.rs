//! Credentials and site configuration
//!
//! The harness reads a single TOML file. Key names follow either the plain
//! form (`host`, `port`, `base_url`) or the legacy `myCredentials.txt` form
//! (`seleniumHost`, `seleniumPort`, `seleniumBaseURL`), so an old credentials
//! file of simple `key = 'value'` assignments loads as-is without running it.
//!
//! ```toml
//! seleniumHost = 'localhost'
//! seleniumPort = 4444
//! seleniumBaseURL = 'http://jenkins.local:8080/'
//! username = 'sae'
//! password = 'secret'
//!
//! [site]
//! job_name = 'reporterTest'
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 4444;
const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Login and automation-endpoint settings for one test case.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Load credentials from a config file
    pub fn load(path: &Path) -> E2eResult<Self> {
        ConfigFile::load(path).map(|config| config.credentials)
    }

    /// Selenium RC driver URL for this host and port.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/selenium-server/driver/", self.host, self.port)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Names of the Jenkins objects the test cases navigate by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Job whose configure page hosts the plugin settings
    pub job_name: String,

    /// Link text of the plugin on the installed-plugins page
    pub plugin_link: String,

    /// Title of the page the plugin link leads to
    pub plugin_page_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            job_name: "reporterTest".to_string(),
            plugin_link: "Jenkins JiraTestResultReporter plugin".to_string(),
            plugin_page_title: "JiraTestResultReporter-plugin - Jenkins - Jenkins Wiki".to_string(),
        }
    }
}

/// Everything read from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub credentials: Credentials,
    pub site: SiteConfig,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(default, alias = "seleniumHost")]
    host: Option<String>,

    #[serde(default, alias = "seleniumPort")]
    port: Option<PortValue>,

    #[serde(default, alias = "seleniumBaseURL")]
    base_url: Option<String>,

    #[serde(default)]
    username: Option<String>,

    #[serde(default)]
    password: Option<String>,

    #[serde(default)]
    site: SiteConfig,
}

impl ConfigFile {
    /// Read and validate a config file
    pub fn load(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => E2eError::ConfigNotFound {
                path: path.to_path_buf(),
            },
            _ => E2eError::Io(e),
        })?;
        Self::from_toml(&content, path)
    }

    /// Parse config text; `path` is only used in error messages.
    pub fn from_toml(content: &str, path: &Path) -> E2eResult<Self> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| E2eError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        let port = match raw.port {
            None => DEFAULT_PORT,
            Some(PortValue::Number(port)) => port,
            Some(PortValue::Text(text)) => text.trim().parse().map_err(|_| E2eError::ConfigParse {
                path: path.to_path_buf(),
                reason: format!("port `{}` is not a valid port number", text),
            })?,
        };

        let credentials = Credentials {
            host: raw.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            base_url: raw.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            username: required(raw.username, "username", path)?,
            password: required(raw.password, "password", path)?,
        };

        Ok(Self {
            credentials,
            site: raw.site,
        })
    }
}

fn required(value: Option<String>, field: &'static str, path: &Path) -> E2eResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(E2eError::ConfigMissingField {
            path: PathBuf::from(path),
            field,
        }),
    }
}
