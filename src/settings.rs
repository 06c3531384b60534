//! Connection settings for the Confluence instance
//!
//! Read once at startup and injected into the API client. Sourced from
//! environment variables or a JSON settings file under the XDG config dir.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which instance to query, and who as.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Instance hostname, no scheme or path (e.g. "example.atlassian.net")
    pub instance: String,
    /// Account identifier, usually an email address
    pub user: String,
    /// API token used for Basic auth
    pub token: String,
}

impl Settings {
    /// Load settings from the environment or the settings file.
    ///
    /// `CONFLY_INSTANCE`, `CONFLY_USER` and `CONFLY_TOKEN` take precedence
    /// when all three are set.
    pub fn load() -> Result<Self, String> {
        if let (Ok(instance), Ok(user), Ok(token)) = (
            std::env::var("CONFLY_INSTANCE"),
            std::env::var("CONFLY_USER"),
            std::env::var("CONFLY_TOKEN"),
        ) {
            return Ok(Self {
                instance,
                user,
                token,
            });
        }

        let path = Self::settings_path();
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            format!(
                "Could not read settings file {} ({}). Create it or set \
                 CONFLY_INSTANCE, CONFLY_USER and CONFLY_TOKEN.",
                path.display(),
                e
            )
        })?;
        Self::from_json(&contents)
    }

    /// Settings file location: `{config dir}/confly/settings.json`.
    pub fn settings_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("confly")
            .join("settings.json")
    }

    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid settings: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(
            r#"{"instance": "example.atlassian.net", "user": "me@example.com", "token": "s3cret"}"#,
        )
        .unwrap();
        assert_eq!(settings.instance, "example.atlassian.net");
        assert_eq!(settings.user, "me@example.com");
        assert_eq!(settings.token, "s3cret");
    }

    #[test]
    fn test_from_json_missing_field() {
        let result = Settings::from_json(r#"{"instance": "example.atlassian.net"}"#);
        assert!(result.is_err());
        assert!(result.unwrap_err().starts_with("Invalid settings"));
    }

    #[test]
    fn test_from_json_not_json() {
        assert!(Settings::from_json("instance = example").is_err());
    }
}
