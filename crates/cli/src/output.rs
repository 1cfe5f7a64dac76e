use timeline_marker_core::shared::time_format::format_time;
use timeline_marker_core::timeline::domain::segment::Segment;
use timeline_marker_core::timeline::snapshot::TimelineSnapshot;

pub fn segment_line(index: usize, segment: &Segment) -> String {
    format!(
        "[{index}] {} - {}  {}",
        format_time(segment.start_time),
        format_time(segment.end_time),
        segment.query
    )
}

pub fn print_segments(segments: &[Segment]) {
    if segments.is_empty() {
        println!("No segments");
        return;
    }
    for (i, segment) in segments.iter().enumerate() {
        println!("{}", segment_line(i, segment));
    }
}

pub fn print_snapshot(snapshot: &TimelineSnapshot) {
    let title = if snapshot.title.is_empty() {
        "(untitled)"
    } else {
        snapshot.title.as_str()
    };
    println!("{title} ({})", format_time(snapshot.duration));
    println!("{}", snapshot.video_url);
    print_segments(&snapshot.timeline_data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_line() {
        let segment = Segment {
            query: "chorus".to_string(),
            start_time: 43.0,
            end_time: 61.9,
            timestamp: Some("2024-05-01T12:00:00.000Z".to_string()),
            ..Segment::default()
        };
        assert_eq!(segment_line(1, &segment), "[1] 0:43 - 1:01  chorus");
    }
}
