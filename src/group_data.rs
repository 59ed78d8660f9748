/// Data structures for Tab Curator: tab and group snapshots plus the
/// validated boundary shape for inbound group payloads.
use serde::{Deserialize, Serialize};

/// Snapshot of a browser tab as reported by the data source.
///
/// Tabs are owned by the browser; the panel only reads these snapshots
/// and issues commands by id. Every field is defaulted so a sparse
/// payload never fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "favIconUrl")]
    pub fav_icon_url: Option<String>,
}

/// Raw group record as it arrives over the messaging bridge.
///
/// Timestamps are optional epoch milliseconds; [`RawGroupRecord::into_group`]
/// fills the gaps instead of trusting the payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGroupRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tabs: Vec<TabSnapshot>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<f64>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<f64>,
}

impl RawGroupRecord {
    /// Normalize into the canonical [`TabGroup`] shape, defaulting missing
    /// timestamps to `now` (epoch milliseconds).
    pub fn into_group(self, now: f64) -> TabGroup {
        let created_at = self.created_at.unwrap_or(now);
        let last_updated = self.updated_at.or(self.created_at).unwrap_or(now);
        TabGroup {
            id: self.id,
            name: self.name,
            category: self.category,
            tabs: self.tabs,
            favorite: self.favorite,
            created_at,
            last_updated,
        }
    }
}

/// Response payload for a `GET_GROUPS` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<RawGroupRecord>,
}

/// Canonical group shape rendered by the panel.
///
/// Groups are derived, not authoritative: each successful sync replaces the
/// whole set, and the panel never mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabGroup {
    pub id: String,
    pub name: String,
    pub category: String,
    pub tabs: Vec<TabSnapshot>,
    pub favorite: bool,
    pub created_at: f64,
    pub last_updated: f64,
}

/// Current time as f64 epoch milliseconds, the wire convention for
/// group timestamps.
pub fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, name: &str) -> RawGroupRecord {
        RawGroupRecord {
            id: id.to_string(),
            name: name.to_string(),
            tabs: Vec::new(),
            category: String::new(),
            favorite: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_into_group_passthrough() {
        let mut record = raw("g-1", "Research");
        record.category = "research".to_string();
        record.created_at = Some(1_000.0);
        record.updated_at = Some(2_000.0);
        record.tabs = vec![TabSnapshot {
            id: 7,
            title: "Docs".to_string(),
            url: "https://docs.rs".to_string(),
            fav_icon_url: None,
        }];

        let group = record.into_group(9_999.0);

        assert_eq!(group.id, "g-1");
        assert_eq!(group.name, "Research");
        assert_eq!(group.category, "research");
        assert_eq!(group.tabs.len(), 1);
        assert_eq!(group.created_at, 1_000.0);
        assert_eq!(group.last_updated, 2_000.0);
    }

    #[test]
    fn test_into_group_defaults_missing_timestamps_to_now() {
        let group = raw("g-1", "Fresh").into_group(5_000.0);

        assert_eq!(group.created_at, 5_000.0);
        assert_eq!(group.last_updated, 5_000.0);
    }

    #[test]
    fn test_into_group_falls_back_to_created_at() {
        let mut record = raw("g-1", "Partial");
        record.created_at = Some(1_500.0);

        let group = record.into_group(9_000.0);

        assert_eq!(group.created_at, 1_500.0);
        assert_eq!(group.last_updated, 1_500.0);
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        let json = r#"{"groups":[{"id":"1","name":"Shopping","tabs":[{"id":3},{"id":4,"url":"https://a.example"}],"category":"shopping"}]}"#;

        let response: GroupsResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.groups.len(), 1);
        let record = &response.groups[0];
        assert_eq!(record.tabs.len(), 2);
        assert_eq!(record.tabs[0].url, "");
        assert!(record.created_at.is_none());
        assert!(!record.favorite);
    }

    #[test]
    fn test_deserialize_empty_response() {
        let response: GroupsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.groups.is_empty());
    }

    #[test]
    fn test_now_ms_is_positive() {
        assert!(now_ms() > 0.0);
    }
}
