//! HTTP client for the Confluence content REST API

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use crate::confluence::types::{DisplayRecord, SearchResponse};
use crate::settings::Settings;

/// Client for one Confluence instance.
///
/// Holds the injected credentials; cloneable so the UI can move it into
/// async tasks.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    client: Client,
    settings: Settings,
}

impl ConfluenceClient {
    pub fn new(settings: Settings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Base URL of the instance, e.g. "https://example.atlassian.net".
    pub fn base_url(&self) -> String {
        format!("https://{}", self.settings.instance)
    }

    /// Content endpoint queried by [`search`](Self::search).
    pub fn content_url(&self) -> String {
        format!("{}/wiki/rest/api/content?expand=version", self.base_url())
    }

    /// Absolute page URL for a record's relative web UI link.
    ///
    /// Used by both the open-in-browser and copy-URL actions.
    pub fn page_url(&self, webui: &str) -> String {
        format!("{}/wiki{}", self.base_url(), webui)
    }

    /// Absolute avatar URL for a record's profile picture path.
    ///
    /// Plain concatenation: avatar paths carry their own `/wiki` prefix.
    pub fn avatar_url(&self, icon: &str) -> String {
        format!("{}{}", self.base_url(), icon)
    }

    /// Fetch the first page of workspace content and project it into
    /// display records, in response order.
    ///
    /// No text query is sent; filtering happens client-side over the
    /// returned list. Non-2xx responses fail with the status reason phrase.
    pub async fn search(&self) -> Result<Vec<DisplayRecord>, String> {
        let response = self
            .client
            .get(self.content_url())
            .header(ACCEPT, "application/json")
            .basic_auth(&self.settings.user, Some(&self.settings.token))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(status_reason(response.status()));
        }

        let body: SearchResponse = response.json().await.map_err(|e| e.to_string())?;
        tracing::debug!(
            "Content page: start={} limit={} size={}",
            body.start,
            body.limit,
            body.size
        );

        Ok(body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(DisplayRecord::from)
            .collect())
    }

    /// Fetch the avatar image behind a record's profile picture path.
    pub async fn fetch_avatar(&self, icon: &str) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .get(self.avatar_url(icon))
            .basic_auth(&self.settings.user, Some(&self.settings.token))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(status_reason(response.status()));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| e.to_string())
    }
}

/// Reason phrase for an HTTP status, e.g. "Unauthorized" for 401.
///
/// Falls back to the numeric code for statuses without a canonical phrase.
pub fn status_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> ConfluenceClient {
        ConfluenceClient::new(Settings {
            instance: "example.atlassian.net".to_string(),
            user: "me@example.com".to_string(),
            token: "s3cret".to_string(),
        })
    }

    #[test]
    fn test_content_url() {
        assert_eq!(
            test_client().content_url(),
            "https://example.atlassian.net/wiki/rest/api/content?expand=version"
        );
    }

    #[test]
    fn test_page_url() {
        assert_eq!(
            test_client().page_url("/spaces/ABC/pages/1"),
            "https://example.atlassian.net/wiki/spaces/ABC/pages/1"
        );
    }

    #[test]
    fn test_avatar_url_no_normalization() {
        // Avatar paths already start with /wiki; the duplicate segment is
        // preserved as-is.
        assert_eq!(
            test_client().avatar_url("/wiki/aa-avatar/123"),
            "https://example.atlassian.net/wiki/aa-avatar/123"
        );
    }

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(StatusCode::UNAUTHORIZED), "Unauthorized");
        assert_eq!(status_reason(StatusCode::NOT_FOUND), "Not Found");
    }

    #[test]
    fn test_status_reason_unknown_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(status_reason(status), "599");
    }
}
