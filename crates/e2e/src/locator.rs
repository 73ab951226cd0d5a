//! Element locators in Selenium's tagged `prefix=value` form

use std::fmt;
use std::str::FromStr;

use crate::error::E2eError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// `name` attribute
    Name(String),
    /// `id` attribute
    Id(String),
    /// Link text
    Link(String),
    /// CSS selector
    Css(String),
}

impl Locator {
    pub fn name(value: impl Into<String>) -> Self {
        Locator::Name(value.into())
    }

    pub fn id(value: impl Into<String>) -> Self {
        Locator::Id(value.into())
    }

    pub fn link(value: impl Into<String>) -> Self {
        Locator::Link(value.into())
    }

    pub fn css(value: impl Into<String>) -> Self {
        Locator::Css(value.into())
    }

    fn prefix(&self) -> &'static str {
        match self {
            Locator::Name(_) => "name",
            Locator::Id(_) => "id",
            Locator::Link(_) => "link",
            Locator::Css(_) => "css",
        }
    }

    fn value(&self) -> &str {
        match self {
            Locator::Name(v) | Locator::Id(v) | Locator::Link(v) | Locator::Css(v) => v,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix(), self.value())
    }
}

impl FromStr for Locator {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, value) = s
            .split_once('=')
            .ok_or_else(|| E2eError::InvalidLocator(s.to_string()))?;
        if value.is_empty() {
            return Err(E2eError::InvalidLocator(s.to_string()));
        }
        match prefix {
            "name" => Ok(Locator::name(value)),
            "id" => Ok(Locator::id(value)),
            "link" => Ok(Locator::link(value)),
            "css" => Ok(Locator::css(value)),
            _ => Err(E2eError::InvalidLocator(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("name=_.projectKey", Locator::name("_.projectKey"))]
    #[test_case("id=yui-gen1-button", Locator::id("yui-gen1-button"))]
    #[test_case("link=Jenkins JiraTestResultReporter plugin", Locator::link("Jenkins JiraTestResultReporter plugin"))]
    #[test_case("css=b", Locator::css("b"))]
    #[test_case("css=input[name=x]", Locator::css("input[name=x]"))]
    fn test_parse_and_render(text: &str, expected: Locator) {
        let parsed: Locator = text.parse().unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.to_string(), text);
    }

    #[test_case("xpath=//b" ; "unknown prefix")]
    #[test_case("projectKey" ; "missing prefix")]
    #[test_case("name=" ; "empty value")]
    fn test_rejects_malformed(text: &str) {
        assert!(matches!(
            text.parse::<Locator>(),
            Err(E2eError::InvalidLocator(_))
        ));
    }
}
