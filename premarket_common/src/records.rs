//! Row shapes of the tables the surrounding application persists.
//!
//! The data layer neither reads nor writes these; they are shared so that
//! consumers storing alerts, news, messages and checklist items agree on one
//! serialized form. Identifiers are opaque strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What fires an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    /// Price crosses `trigger_value`.
    Price,
    /// New all-time high.
    Ath,
}

/// Price or all-time-high alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Opaque row identifier.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Ticker string as entered by the user.
    pub symbol: String,
    /// Kind of trigger.
    pub trigger_type: TriggerType,
    /// Threshold for `Price` triggers.
    pub trigger_value: f64,
    /// Set once the alert has fired.
    #[serde(default)]
    pub is_fired: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Headline attached to a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// Opaque row identifier.
    pub id: String,
    /// Ticker string.
    pub symbol: String,
    /// Headline.
    pub title: String,
    /// Article link.
    pub url: String,
    /// Publisher name.
    pub source: String,
    /// Publication time.
    pub published_at: DateTime<Utc>,
    /// Ingestion time.
    pub created_at: DateTime<Utc>,
}

/// Chat-style note on a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque row identifier.
    pub id: String,
    /// Author.
    pub user_id: String,
    /// Ticker string.
    pub symbol: String,
    /// Message body.
    pub text: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Pre-session checklist entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Opaque row identifier.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Item text.
    pub text: String,
    /// Ticked off.
    #[serde(default)]
    pub is_completed: bool,
    /// Position in the list, ascending.
    pub sort_order: i32,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Sort checklist items by `sort_order`, ties broken by creation time.
pub fn sort_checklist(items: &mut [ChecklistItem]) {
    items.sort_by(|a, b| {
        a.sort_order
            .cmp(&b.sort_order)
            .then(a.created_at.cmp(&b.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_alert_row_deserializes() {
        let row = r#"{
            "id": "a1",
            "user_id": "u1",
            "symbol": "NVDA",
            "trigger_type": "ath",
            "trigger_value": 0,
            "created_at": "2024-06-03T08:00:00Z",
            "updated_at": "2024-06-03T08:00:00Z"
        }"#;
        let alert: Alert = serde_json::from_str(row).unwrap();
        assert_eq!(alert.trigger_type, TriggerType::Ath);
        assert!(!alert.is_fired);
    }

    #[test]
    fn test_news_item_serializes_snake_case() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 7, 30, 0).unwrap();
        let item = NewsItem {
            id: "n1".into(),
            symbol: "TSLA".into(),
            title: "Deliveries beat".into(),
            url: "https://example.com/a".into(),
            source: "Wire".into(),
            published_at: ts,
            created_at: ts,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["published_at"], "2024-06-03T07:30:00Z");
    }

    #[test]
    fn test_sort_checklist() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 7, 0, 0).unwrap();
        let item = |id: &str, order: i32| ChecklistItem {
            id: id.into(),
            user_id: "u1".into(),
            text: id.into(),
            is_completed: false,
            sort_order: order,
            created_at: ts,
        };
        let mut items = vec![item("c", 3), item("a", 1), item("b", 2)];
        sort_checklist(&mut items);
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }
}
