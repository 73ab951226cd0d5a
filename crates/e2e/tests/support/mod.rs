//! In-process stand-in for a Selenium RC server driving a Jenkins instance.
//!
//! The fake keeps just enough page state for the suite's cases: the login
//! flow, one job with the plugin settings form, and the plugin manager. Login
//! state is shared by all sessions, as with a reused browser profile.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Form, State};
use axum::routing::post;
use axum::Router;
use parking_lot::Mutex;

pub const USERNAME: &str = "sae";
pub const PASSWORD: &str = "correct-horse";
pub const JOB: &str = "reporterTest";
pub const PLUGIN_LINK: &str = "Jenkins JiraTestResultReporter plugin";
pub const PLUGIN_TITLE: &str = "JiraTestResultReporter-plugin - Jenkins - Jenkins Wiki";

#[derive(Debug, Clone)]
pub struct Behaviour {
    /// Append a trailing slash to the saved server address
    pub normalize_server_address: bool,
    /// Title of the page behind the plugin link
    pub plugin_title: String,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            normalize_server_address: true,
            plugin_title: PLUGIN_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Blank,
    LoggedOut,
    Login,
    LoginError,
    Dashboard,
    Job,
    Configure,
    PluginManager,
    PluginWiki,
}

struct Jenkins {
    behaviour: Behaviour,
    next_session: u64,
    active: HashSet<String>,
    started: usize,
    stopped: usize,
    logged_in: bool,
    page: Page,
    form: HashMap<String, String>,
    saved: HashMap<String, String>,
}

impl Jenkins {
    fn new(behaviour: Behaviour) -> Self {
        let saved = [
            ("name=_.projectKey", "OLD"),
            ("name=_.serverAddress", "http://jira.example.com/"),
            ("name=_.username", ""),
            ("name=_.password", ""),
            ("name=_.createAllFlag", "off"),
            ("name=_.debugFlag", "on"),
            ("name=_.verboseDebugFlag", "off"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            behaviour,
            next_session: 0,
            active: HashSet::new(),
            started: 0,
            stopped: 0,
            logged_in: false,
            page: Page::Blank,
            form: HashMap::new(),
            saved,
        }
    }

    fn handle(&mut self, params: &HashMap<String, String>) -> String {
        let arg = |n: &str| params.get(n).map(String::as_str).unwrap_or("");
        let cmd = arg("cmd");

        if cmd == "getNewBrowserSession" {
            self.next_session += 1;
            let id = format!("fake-{}", self.next_session);
            self.active.insert(id.clone());
            self.started += 1;
            self.page = Page::Blank;
            return format!("OK,{id}");
        }

        if !self.active.contains(arg("sessionId")) {
            return "ERROR: Session not found".to_string();
        }

        match cmd {
            "testComplete" => {
                self.active.remove(arg("sessionId"));
                self.stopped += 1;
                ok()
            }
            "open" => self.open(arg("1")),
            "waitForPageToLoad" => ok(),
            "click" => self.click(arg("1")),
            "type" => self.set(arg("1"), arg("2")),
            "check" => self.set(arg("1"), "on"),
            "uncheck" => self.set(arg("1"), "off"),
            "focus" => self.require_element(arg("1")).map(|_| ok()).unwrap_or_else(|e| e),
            "getValue" => match self.require_element(arg("1")) {
                Ok(()) => format!("OK,{}", self.form.get(arg("1")).cloned().unwrap_or_default()),
                Err(e) => e,
            },
            "getTitle" => format!("OK,{}", self.title()),
            "isTextPresent" => format!("OK,{}", self.text_present(arg("1"))),
            other => format!("ERROR: Unknown command: '{other}'"),
        }
    }

    fn open(&mut self, url: &str) -> String {
        self.page = match url {
            "/logout" => {
                self.logged_in = false;
                Page::LoggedOut
            }
            "/" => Page::Dashboard,
            "/pluginManager/installed" => Page::PluginManager,
            _ => Page::Blank,
        };
        ok()
    }

    fn click(&mut self, locator: &str) -> String {
        let job_link = format!("link={JOB}");
        let plugin_link = format!("link={PLUGIN_LINK}");
        let next = match (self.page, locator) {
            (Page::LoggedOut, "css=b") => {
                self.form.clear();
                Page::Login
            }
            (Page::Login, "id=yui-gen1-button") => {
                self.logged_in = self.form.get("id=j_username").map(String::as_str) == Some(USERNAME)
                    && self.form.get("name=j_password").map(String::as_str) == Some(PASSWORD);
                if self.logged_in {
                    Page::Dashboard
                } else {
                    Page::LoginError
                }
            }
            (Page::Dashboard, l) if self.logged_in && l == job_link => Page::Job,
            (Page::Job, "link=Configure") => {
                self.form = self.saved.clone();
                Page::Configure
            }
            (Page::Configure, "id=yui-gen35-button") => {
                self.save();
                Page::Job
            }
            (Page::PluginManager, l) if self.logged_in && l == plugin_link => Page::PluginWiki,
            _ => return not_found(locator),
        };
        self.page = next;
        ok()
    }

    fn save(&mut self) {
        let mut saved = self.form.clone();
        if self.behaviour.normalize_server_address {
            if let Some(address) = saved.get_mut("name=_.serverAddress") {
                if !address.ends_with('/') {
                    address.push('/');
                }
            }
        }
        if saved.get("name=_.verboseDebugFlag").map(String::as_str) == Some("on") {
            saved.insert("name=_.debugFlag".to_string(), "on".to_string());
        }
        self.saved = saved;
    }

    fn require_element(&self, locator: &str) -> Result<(), String> {
        let exists = match self.page {
            Page::Login => locator == "id=j_username" || locator == "name=j_password",
            Page::Configure => self.form.contains_key(locator),
            _ => false,
        };
        if exists {
            Ok(())
        } else {
            Err(not_found(locator))
        }
    }

    fn set(&mut self, locator: &str, value: &str) -> String {
        match self.require_element(locator) {
            Ok(()) => {
                self.form.insert(locator.to_string(), value.to_string());
                ok()
            }
            Err(e) => e,
        }
    }

    fn title(&self) -> String {
        match self.page {
            Page::PluginWiki => self.behaviour.plugin_title.clone(),
            Page::Dashboard => "Dashboard [Jenkins]".to_string(),
            _ => "Jenkins".to_string(),
        }
    }

    fn text_present(&self, text: &str) -> bool {
        if self.logged_in && text == format!("{USERNAME} | log out") {
            return true;
        }
        if self.page != Page::Configure {
            return false;
        }

        let value = |name: &str| self.form.get(name).map(String::as_str).unwrap_or("");
        let address = value("name=_.serverAddress");
        match text {
            "You must provide a project key." => value("name=_.projectKey").is_empty(),
            "You must provide an URL." => address.is_empty(),
            "This is not a valid URL." => {
                !address.is_empty()
                    && !(address.starts_with("http://") || address.starts_with("https://"))
            }
            _ => false,
        }
    }
}

fn ok() -> String {
    "OK".to_string()
}

fn not_found(locator: &str) -> String {
    format!("ERROR: Element {locator} not found")
}

type Shared = Arc<Mutex<Jenkins>>;

async fn driver(State(jenkins): State<Shared>, Form(params): Form<HashMap<String, String>>) -> String {
    jenkins.lock().handle(&params)
}

/// Running fake server
pub struct FakeSelenium {
    pub addr: SocketAddr,
    jenkins: Shared,
}

impl FakeSelenium {
    pub async fn start(behaviour: Behaviour) -> Self {
        let jenkins: Shared = Arc::new(Mutex::new(Jenkins::new(behaviour)));
        let app = Router::new()
            .route("/selenium-server/driver/", post(driver))
            .with_state(jenkins.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, jenkins }
    }

    pub fn sessions_started(&self) -> usize {
        self.jenkins.lock().started
    }

    pub fn sessions_stopped(&self) -> usize {
        self.jenkins.lock().stopped
    }

    pub fn sessions_open(&self) -> usize {
        self.jenkins.lock().active.len()
    }

    /// Write a credentials file pointing at this server
    pub fn credentials_file(&self, password: &str) -> tempfile::NamedTempFile {
        write_credentials(self.addr.port(), password)
    }
}

pub fn write_credentials(port: u16, password: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "seleniumHost = '127.0.0.1'\nseleniumPort = {port}\nseleniumBaseURL = 'http://jenkins.test:8080/'\nusername = '{USERNAME}'\npassword = '{password}'\n"
    )
    .unwrap();
    file
}
