use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::selection::domain::selection::Selection;

/// One labeled time range.
///
/// Serialized in the export schema's camelCase shape. The timestamp is kept
/// as the ISO-8601 text it was written or imported with.
///
/// Imported entries are not checked for completeness: absent fields take
/// their defaults, an absent timestamp stays absent, and unknown fields are
/// carried in `extra` so they are written back out unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Segment {
    pub fn new(query: &str, range: Selection, created_at: DateTime<Utc>) -> Self {
        Self {
            query: query.to_string(),
            start_time: range.start,
            end_time: range.end,
            timestamp: Some(created_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            extra: Map::new(),
        }
    }

    pub fn range(&self) -> Selection {
        Selection::new(self.start_time, self.end_time)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Parsed creation time, if a stored timestamp is valid ISO-8601.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.timestamp.as_deref()?)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_new_copies_range_and_formats_timestamp() {
        let seg = Segment::new("chorus", Selection::new(43.0, 61.5), created());
        assert_eq!(seg.query, "chorus");
        assert_eq!(seg.start_time, 43.0);
        assert_eq!(seg.end_time, 61.5);
        assert_eq!(seg.timestamp.as_deref(), Some("2024-05-01T12:30:00.000Z"));
        assert!(seg.extra.is_empty());
    }

    #[test]
    fn test_created_at_round_trips() {
        let seg = Segment::new("chorus", Selection::new(0.0, 1.0), created());
        assert_eq!(seg.created_at(), Some(created()));
    }

    #[test]
    fn test_created_at_invalid_timestamp() {
        let mut seg = Segment::new("chorus", Selection::new(0.0, 1.0), created());
        seg.timestamp = Some("yesterday".to_string());
        assert!(seg.created_at().is_none());
    }

    #[test]
    fn test_duration_and_range() {
        let seg = Segment::new("x", Selection::new(10.0, 12.5), created());
        assert_relative_eq!(seg.duration(), 2.5);
        assert_eq!(seg.range(), Selection::new(10.0, 12.5));
    }

    #[test]
    fn test_serializes_camel_case() {
        let seg = Segment::new("intro", Selection::new(0.0, 5.0), created());
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["query"], "intro");
        assert_eq!(json["startTime"], 0.0);
        assert_eq!(json["endTime"], 5.0);
        assert_eq!(json["timestamp"], "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let seg: Segment =
            serde_json::from_str(r#"{"query":"a","startTime":1,"endTime":2}"#).unwrap();
        assert_eq!(seg.query, "a");
        assert_eq!(seg.start_time, 1.0);
        assert_eq!(seg.end_time, 2.0);
        assert!(seg.timestamp.is_none());
        assert!(seg.created_at().is_none());

        let json = serde_json::to_value(&seg).unwrap();
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let doc = r#"{"query":"a","startTime":1.5,"endTime":2.5,"timestamp":"t","color":"red","tags":[1,2]}"#;
        let seg: Segment = serde_json::from_str(doc).unwrap();
        assert_eq!(seg.extra["color"], "red");

        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json, serde_json::from_str::<Value>(doc).unwrap());
    }
}
