//! Wire shapes for the Confluence content endpoint
//!
//! Decoded as untrusted external data: every field is defaulted, so an item
//! missing expected fields keeps its slot in the list with empty leaf values
//! instead of failing the decode or being dropped.

use serde::Deserialize;

/// One page of content plus pagination metadata.
///
/// Only the first page is ever fetched; `start`/`limit`/`size` are logged,
/// never traversed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Option<Vec<ContentItem>>,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub size: u32,
}

/// One remote content record (page, blogpost, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default, rename = "_links")]
    pub links: Option<Links>,
}

/// Version metadata; only the author is consumed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub by: Option<VersionBy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionBy {
    #[serde(default, rename = "displayName")]
    pub display_name: String,
    #[serde(default, rename = "profilePicture")]
    pub profile_picture: Option<ProfilePicture>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePicture {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub webui: String,
}

/// Flattened, UI-ready projection of one content item.
///
/// `url` and `icon` stay relative; the client turns them into absolute URLs
/// at action/render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub url: String,
    pub author: String,
    pub icon: String,
}

impl From<ContentItem> for DisplayRecord {
    fn from(item: ContentItem) -> Self {
        let by = item.version.and_then(|v| v.by).unwrap_or_default();
        Self {
            id: item.id,
            name: item.title,
            kind: item.kind,
            url: item.links.map(|l| l.webui).unwrap_or_default(),
            author: by.display_name,
            icon: by.profile_picture.map(|p| p.path).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = r#"{
        "id": "12345",
        "type": "page",
        "status": "current",
        "title": "Team Handbook",
        "version": {
            "by": {
                "displayName": "Ada Lovelace",
                "profilePicture": { "path": "/wiki/aa-avatar/123", "width": 48 }
            },
            "when": "2024-01-01T00:00:00.000Z",
            "number": 7
        },
        "_links": { "webui": "/spaces/ABC/pages/12345", "self": "https://x/rest/api/content/12345" }
    }"#;

    #[test]
    fn test_projection_fields() {
        let item: ContentItem = serde_json::from_str(ITEM).unwrap();
        let record = DisplayRecord::from(item);
        assert_eq!(record.id, "12345");
        assert_eq!(record.name, "Team Handbook");
        assert_eq!(record.kind, "page");
        assert_eq!(record.url, "/spaces/ABC/pages/12345");
        assert_eq!(record.author, "Ada Lovelace");
        assert_eq!(record.icon, "/wiki/aa-avatar/123");
    }

    #[test]
    fn test_malformed_item_keeps_slot() {
        // Missing version and _links entirely: leaves go empty, the record
        // is still produced.
        let item: ContentItem = serde_json::from_str(r#"{"id": "9", "title": "Orphan"}"#).unwrap();
        let record = DisplayRecord::from(item);
        assert_eq!(record.id, "9");
        assert_eq!(record.name, "Orphan");
        assert_eq!(record.kind, "");
        assert_eq!(record.url, "");
        assert_eq!(record.author, "");
        assert_eq!(record.icon, "");
    }

    #[test]
    fn test_response_order_preserved() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"results": [{"id": "1"}, {"id": "2"}, {"id": "3"}], "start": 0, "limit": 25, "size": 3}"#,
        )
        .unwrap();
        let ids: Vec<String> = response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(DisplayRecord::from)
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_results_absent_or_null() {
        let absent: SearchResponse = serde_json::from_str(r#"{"start": 0}"#).unwrap();
        assert!(absent.results.unwrap_or_default().is_empty());

        let null: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(null.results.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_empty_results() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(response.results.unwrap_or_default().len(), 0);
    }
}
