//! Randomized configuration values
//!
//! Each test case gets values no earlier run could have saved, so a read-back
//! that matches proves the save actually happened.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of the random token shared by all four values.
pub const TOKEN_LEN: usize = 8;

pub const PROJECT_KEY_SUFFIX: &str = "-projectKey";
pub const SERVER_ADDRESS_SUFFIX: &str = "-serverAddress";
pub const USERNAME_SUFFIX: &str = "-username";
pub const PASSWORD_SUFFIX: &str = "-password";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureValues {
    pub project_key: String,
    pub server_address: String,
    pub username: String,
    pub password: String,
}

impl FixtureValues {
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let token: String = rng
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        Self {
            project_key: format!("{token}{PROJECT_KEY_SUFFIX}"),
            server_address: format!("{token}{SERVER_ADDRESS_SUFFIX}"),
            username: format!("{token}{USERNAME_SUFFIX}"),
            password: format!("{token}{PASSWORD_SUFFIX}"),
        }
    }
}
