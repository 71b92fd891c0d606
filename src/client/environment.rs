//! Gateway environments and environment-variable configuration.

use std::fmt;
use std::str::FromStr;

use super::{Credentials, EgoSmsClientBuilder};
use crate::domain::{CountryCode, SenderId, ValidationError};

const LIVE_ENDPOINT: &str = "https://comms.egosms.co/api/v1/json/";
const SANDBOX_ENDPOINT: &str = "https://comms-test.pahappa.net/api/v1/json/";

pub const ENV_USERNAME: &str = "EGOSMS_USERNAME";
pub const ENV_API_KEY: &str = "EGOSMS_API_KEY";
pub const ENV_SENDER_ID: &str = "EGOSMS_SENDER_ID";
pub const ENV_ENVIRONMENT: &str = "EGOSMS_ENVIRONMENT";
pub const ENV_ENDPOINT: &str = "EGOSMS_ENDPOINT";
pub const ENV_COUNTRY_CODE: &str = "EGOSMS_COUNTRY_CODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Which gateway deployment a client talks to.
pub enum Environment {
    /// Production gateway.
    #[default]
    Live,
    /// Test gateway; requires a separate sandbox account.
    Sandbox,
}

impl Environment {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Live => LIVE_ENDPOINT,
            Self::Sandbox => SANDBOX_ENDPOINT,
        }
    }
}

impl FromStr for Environment {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" | "prod" => Ok(Self::Live),
            "sandbox" | "test" => Ok(Self::Sandbox),
            _ => Err(ValidationError::UnknownEnvironment {
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Live => "live",
            Self::Sandbox => "sandbox",
        })
    }
}

impl EgoSmsClientBuilder {
    /// Configure a builder from process environment variables.
    ///
    /// Required: `EGOSMS_USERNAME`, `EGOSMS_API_KEY`.
    /// Optional: `EGOSMS_ENVIRONMENT` (`live` | `sandbox`), `EGOSMS_ENDPOINT`
    /// (overrides the environment), `EGOSMS_SENDER_ID`, `EGOSMS_COUNTRY_CODE`.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let username = setting(ENV_USERNAME).ok_or(ValidationError::MissingSetting {
            name: ENV_USERNAME,
        })?;
        let api_key = setting(ENV_API_KEY).ok_or(ValidationError::MissingSetting {
            name: ENV_API_KEY,
        })?;

        let mut builder = Self::new(Credentials::api_key(username, api_key)?);
        if let Some(environment) = setting(ENV_ENVIRONMENT) {
            builder = builder.environment(environment.parse()?);
        }
        if let Some(endpoint) = setting(ENV_ENDPOINT) {
            builder = builder.endpoint(endpoint);
        }
        if let Some(sender_id) = setting(ENV_SENDER_ID) {
            builder = builder.sender_id(SenderId::new(sender_id)?);
        }
        if let Some(country_code) = setting(ENV_COUNTRY_CODE) {
            builder = builder.country_code(CountryCode::new(country_code)?);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn environment_parses_names() {
        assert_eq!("live".parse::<Environment>().unwrap(), Environment::Live);
        assert_eq!(" Sandbox ".parse::<Environment>().unwrap(), Environment::Sandbox);
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!(Environment::default().endpoint(), LIVE_ENDPOINT);
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
    }

    #[test]
    fn from_lookup_requires_credentials() {
        let err = EgoSmsClientBuilder::from_lookup(lookup(&[(ENV_API_KEY, "key")])).unwrap_err();
        assert_eq!(err, ValidationError::MissingSetting { name: ENV_USERNAME });

        let err = EgoSmsClientBuilder::from_lookup(lookup(&[
            (ENV_USERNAME, "user"),
            (ENV_API_KEY, "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ValidationError::MissingSetting { name: ENV_API_KEY });
    }

    #[test]
    fn from_lookup_applies_optional_settings() {
        let builder = EgoSmsClientBuilder::from_lookup(lookup(&[
            (ENV_USERNAME, "user"),
            (ENV_API_KEY, "key"),
            (ENV_ENVIRONMENT, "sandbox"),
            (ENV_SENDER_ID, "Shop"),
            (ENV_COUNTRY_CODE, "254"),
        ]))
        .unwrap();

        assert_eq!(builder.endpoint, SANDBOX_ENDPOINT);
        assert_eq!(builder.sender_id.as_str(), "Shop");
        assert_eq!(builder.country_code.as_str(), "254");
        assert_eq!(builder.credentials.username().as_str(), "user");
    }

    #[test]
    fn explicit_endpoint_wins_over_environment() {
        let builder = EgoSmsClientBuilder::from_lookup(lookup(&[
            (ENV_USERNAME, "user"),
            (ENV_API_KEY, "key"),
            (ENV_ENVIRONMENT, "sandbox"),
            (ENV_ENDPOINT, "http://localhost:8080/api/"),
        ]))
        .unwrap();
        assert_eq!(builder.endpoint, "http://localhost:8080/api/");
    }

    #[test]
    fn from_lookup_rejects_bad_values() {
        let err = EgoSmsClientBuilder::from_lookup(lookup(&[
            (ENV_USERNAME, "user"),
            (ENV_API_KEY, "key"),
            (ENV_ENVIRONMENT, "staging"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownEnvironment { .. }));
    }
}
