use serde::{Deserialize, Serialize};

/// One council meeting topic record, produced by the agenda service.
/// Immutable from the dashboard's perspective; lives for one render pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgendaItem {
    pub category: String,
    pub date: String,
    pub title: String,
    pub ai_summary: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Headline {
    pub title: String,
    pub url: String,
}

/// Pairwise alignment score between two council members, in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationCell {
    pub member_a: String,
    pub member_b: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agenda_item_round_trip() {
        let raw = r#"[{"category":"Transit","date":"2024-01-01","title":"Light Rail Review","ai_summary":"...","status":"Pending"}]"#;
        let items: Vec<AgendaItem> = serde_json::from_str(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Transit");
        assert_eq!(items[0].status, "Pending");
    }

    #[test]
    fn test_headline_deserializes() {
        let raw = r#"{"title":"Nicollet Avenue bridge to close","url":"https://example.org/a"}"#;
        let h: Headline = serde_json::from_str(raw).unwrap();
        assert_eq!(h.title, "Nicollet Avenue bridge to close");
    }
}
