use std::io::Write;

use reporter_e2e::config::{ConfigFile, Credentials};
use reporter_e2e::E2eError;

/// Loading the same file twice gives the same values.
#[test]
fn loading_is_idempotent() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "seleniumHost = 'grid.local'\nseleniumPort = 4444\nseleniumBaseURL = 'http://ci:8080/'\nusername = 'sae'\npassword = 'pw'\n\n[site]\njob_name = 'nightly'\n"
    )
    .unwrap();

    let first = ConfigFile::load(file.path()).unwrap();
    let second = ConfigFile::load(file.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.site.job_name, "nightly");

    let creds = Credentials::load(file.path()).unwrap();
    assert_eq!(creds, first.credentials);
    assert_eq!(creds.endpoint(), "http://grid.local:4444/selenium-server/driver/");
}

#[test]
fn malformed_file_is_reported_with_its_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "username = \n").unwrap();

    let err = Credentials::load(file.path()).unwrap_err();
    assert!(matches!(err, E2eError::ConfigParse { .. }));
    assert!(err.is_setup());
    assert!(err.to_string().contains(&file.path().display().to_string()));
}
