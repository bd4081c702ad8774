// src/config.rs
//! Connection settings for the Notion client.
//!
//! Values given on the command line take precedence; anything left unset
//! (or blank) is read from `API_TOKEN`, `NOTION_VERSION` and
//! `NOTION_BASE_URL`.

use crate::constants::{ENV_API_TOKEN, ENV_NOTION_BASE_URL, ENV_NOTION_VERSION};
use crate::error::AppError;
use crate::types::{ApiKey, NotionVersion, ValidatedUrl};

/// Explicitly supplied connection settings; any left as `None` are looked
/// up in the environment by [`ClientConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_token: Option<String>,
    pub notion_version: Option<String>,
    pub base_url: Option<String>,
}

/// Resolved client configuration, validated and ready to build a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub notion_version: NotionVersion,
    pub base_url: ValidatedUrl,
}

impl ClientConfig {
    /// Validates explicit settings without consulting the environment.
    pub fn new(
        api_token: impl Into<String>,
        notion_version: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, AppError> {
        Ok(Self {
            api_key: ApiKey::new(api_token)?,
            notion_version: NotionVersion::new(notion_version)?,
            base_url: ValidatedUrl::parse(base_url)?,
        })
    }

    /// Resolves a complete configuration from overrides and the process
    /// environment.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, AppError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves using `lookup` in place of the process environment.
    pub fn resolve_with<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |value: &String| !value.trim().is_empty();
        let setting = |explicit: Option<String>, var: &str| {
            explicit
                .filter(present)
                .or_else(|| lookup(var).filter(present))
        };

        let api_token = setting(overrides.api_token, ENV_API_TOKEN);
        let notion_version = setting(overrides.notion_version, ENV_NOTION_VERSION);
        let base_url = setting(overrides.base_url, ENV_NOTION_BASE_URL);

        let missing: Vec<&str> = [
            (api_token.is_none(), ENV_API_TOKEN),
            (notion_version.is_none(), ENV_NOTION_VERSION),
            (base_url.is_none(), ENV_NOTION_BASE_URL),
        ]
        .into_iter()
        .filter_map(|(absent, var)| absent.then_some(var))
        .collect();

        match (api_token, notion_version, base_url) {
            (Some(token), Some(version), Some(url)) => Self::new(token, version, &url),
            _ => Err(AppError::MissingConfiguration(format!(
                "Can not get apiToken, notionVersion, apiBaseUrl from arguments or env variables (missing {})",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TOKEN: &str = "secret_abcdefghijklmnopqrs";

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let overrides = ConfigOverrides {
            api_token: Some(TOKEN.to_string()),
            notion_version: Some("2022-06-28".to_string()),
            base_url: Some("https://api.notion.com/v1".to_string()),
        };
        let config = ClientConfig::resolve_with(
            overrides,
            env(&[(ENV_NOTION_VERSION, "2021-05-13")]),
        )
        .unwrap();

        assert_eq!(config.notion_version.as_str(), "2022-06-28");
        assert_eq!(config.api_key.as_str(), TOKEN);
    }

    #[test]
    fn environment_fills_gaps() {
        let config = ClientConfig::resolve_with(
            ConfigOverrides::default(),
            env(&[
                (ENV_API_TOKEN, TOKEN),
                (ENV_NOTION_VERSION, "2022-06-28"),
                (ENV_NOTION_BASE_URL, "https://api.notion.com/v1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.base_url.as_str(), "https://api.notion.com/v1");
    }

    #[test]
    fn blank_explicit_value_falls_back_to_environment() {
        let config = ClientConfig::resolve_with(
            ConfigOverrides {
                api_token: Some("  ".to_string()),
                ..Default::default()
            },
            env(&[
                (ENV_API_TOKEN, TOKEN),
                (ENV_NOTION_VERSION, "2022-06-28"),
                (ENV_NOTION_BASE_URL, "https://api.notion.com/v1"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api_key.as_str(), TOKEN);
    }

    #[test]
    fn missing_values_are_named() {
        let err = ClientConfig::resolve_with(
            ConfigOverrides {
                api_token: Some(TOKEN.to_string()),
                ..Default::default()
            },
            env(&[(ENV_NOTION_BASE_URL, "  ")]),
        )
        .unwrap_err();

        match err {
            AppError::MissingConfiguration(message) => {
                assert!(message.contains(ENV_NOTION_VERSION));
                assert!(message.contains(ENV_NOTION_BASE_URL));
                assert!(!message.contains(ENV_API_TOKEN));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_values_are_validation_errors() {
        let err = ClientConfig::new(TOKEN, "latest", "https://api.notion.com/v1").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
