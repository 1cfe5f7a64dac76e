use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timeline::domain::segment::Segment;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("invalid timeline document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timeline document is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The export/import document: one video and its labeled segments.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSnapshot {
    pub video_url: String,
    pub title: String,
    pub duration: f64,
    pub timeline_data: Vec<Segment>,
}

/// Wire shape before required-field checks. Absent and `null` look the same.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    video_url: Option<String>,
    title: Option<String>,
    duration: Option<f64>,
    timeline_data: Option<Vec<Segment>>,
}

impl TimelineSnapshot {
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document, failing closed.
    ///
    /// `videoUrl` must be present and non-empty and `timelineData` must be
    /// present. `title` defaults to empty and `duration` to zero. Segments
    /// are taken as written: ranges are not checked, missing fields default
    /// and unknown fields are kept.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;

        let video_url = raw
            .video_url
            .filter(|url| !url.is_empty())
            .ok_or(SnapshotError::MissingField("videoUrl"))?;
        let timeline_data = raw
            .timeline_data
            .ok_or(SnapshotError::MissingField("timelineData"))?;

        Ok(Self {
            video_url,
            title: raw.title.unwrap_or_default(),
            duration: raw.duration.unwrap_or(0.0),
            timeline_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn segment(query: &str, start: f64, end: f64) -> Segment {
        Segment {
            query: query.to_string(),
            start_time: start,
            end_time: end,
            timestamp: Some("2024-05-01T12:00:00.000Z".to_string()),
            ..Segment::default()
        }
    }

    fn snapshot() -> TimelineSnapshot {
        TimelineSnapshot {
            video_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            title: "Never Gonna Give You Up".to_string(),
            duration: 212.0,
            timeline_data: vec![segment("intro", 0.0, 18.0), segment("chorus", 43.0, 61.0)],
        }
    }

    #[test]
    fn test_export_uses_schema_field_names() {
        let json = snapshot().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["videoUrl"], "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(value["title"], "Never Gonna Give You Up");
        assert_eq!(value["duration"], 212.0);
        assert_eq!(value["timelineData"][1]["query"], "chorus");
        assert_eq!(value["timelineData"][1]["startTime"], 43.0);
        assert_eq!(value["timelineData"][1]["endTime"], 61.0);
    }

    #[test]
    fn test_export_is_pretty_printed() {
        let json = snapshot().to_json_pretty().unwrap();
        assert!(json.contains("\n  \"videoUrl\""));
    }

    #[test]
    fn test_export_then_import_reproduces_document() {
        let original = snapshot();
        let json = original.to_json_pretty().unwrap();
        assert_eq!(TimelineSnapshot::from_json(&json).unwrap(), original);
    }

    #[test]
    fn test_import_defaults_title_and_duration() {
        let doc = r#"{"videoUrl":"https://youtu.be/abc","timelineData":[]}"#;
        let snap = TimelineSnapshot::from_json(doc).unwrap();
        assert_eq!(snap.video_url, "https://youtu.be/abc");
        assert_eq!(snap.title, "");
        assert_eq!(snap.duration, 0.0);
        assert!(snap.timeline_data.is_empty());
    }

    #[test]
    fn test_import_null_optionals_default() {
        let doc = r#"{"videoUrl":"https://youtu.be/abc","title":null,"duration":null,"timelineData":[]}"#;
        let snap = TimelineSnapshot::from_json(doc).unwrap();
        assert_eq!(snap.title, "");
        assert_eq!(snap.duration, 0.0);
    }

    #[rstest]
    #[case::no_url(r#"{"timelineData":[]}"#, "videoUrl")]
    #[case::null_url(r#"{"videoUrl":null,"timelineData":[]}"#, "videoUrl")]
    #[case::empty_url(r#"{"videoUrl":"","timelineData":[]}"#, "videoUrl")]
    #[case::no_data(r#"{"videoUrl":"https://youtu.be/abc"}"#, "timelineData")]
    #[case::null_data(r#"{"videoUrl":"https://youtu.be/abc","timelineData":null}"#, "timelineData")]
    fn test_import_rejects_missing_required_fields(#[case] doc: &str, #[case] field: &str) {
        match TimelineSnapshot::from_json(doc) {
            Err(SnapshotError::MissingField(missing)) => assert_eq!(missing, field),
            other => panic!("expected missing {field}, got {other:?}"),
        }
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::truncated(r#"{"videoUrl":"https://youtu.be/abc","timelineData":["#)]
    #[case::wrong_type(r#"{"videoUrl":42,"timelineData":[]}"#)]
    #[case::malformed_segment(r#"{"videoUrl":"u","timelineData":[{"query":1}]}"#)]
    fn test_import_rejects_malformed_documents(#[case] doc: &str) {
        assert!(matches!(
            TimelineSnapshot::from_json(doc),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_import_keeps_unordered_segments() {
        let doc = r#"{"videoUrl":"u","timelineData":[
            {"query":"odd","startTime":50,"endTime":10,"timestamp":"whenever"}
        ]}"#;
        let snap = TimelineSnapshot::from_json(doc).unwrap();
        assert_eq!(snap.timeline_data[0].start_time, 50.0);
        assert_eq!(snap.timeline_data[0].end_time, 10.0);
        assert_eq!(snap.timeline_data[0].timestamp.as_deref(), Some("whenever"));
    }

    #[test]
    fn test_import_accepts_segment_without_timestamp() {
        let doc = r#"{"videoUrl":"https://youtu.be/dQw4w9WgXcQ","timelineData":[
            {"query":"a","startTime":1,"endTime":2}
        ]}"#;
        let snap = TimelineSnapshot::from_json(doc).unwrap();
        assert_eq!(snap.timeline_data.len(), 1);
        assert_eq!(snap.timeline_data[0].query, "a");
        assert!(snap.timeline_data[0].timestamp.is_none());
    }

    #[test]
    fn test_reexport_keeps_unknown_segment_fields() {
        let doc = r#"{"videoUrl":"u","timelineData":[
            {"query":"a","startTime":1.5,"endTime":2.5,"timestamp":"t","color":"red"}
        ]}"#;
        let json = TimelineSnapshot::from_json(doc).unwrap().to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["timelineData"][0]["color"], "red");
        assert_eq!(value["timelineData"][0]["timestamp"], "t");
    }
}
