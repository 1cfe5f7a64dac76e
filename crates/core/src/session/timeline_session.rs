use chrono::Utc;

use crate::dictation::dictation_adapter::DictationAdapter;
use crate::playback::playback_adapter::{PlaybackAdapter, PlaybackPhase};
use crate::selection::domain::pointer_capture::PointerCapture;
use crate::selection::domain::selection::Selection;
use crate::selection::domain::timeline_geometry::TrackGeometry;
use crate::selection::range_selector::RangeSelector;
use crate::session::session_error::SessionError;
use crate::session::session_event::SessionEvent;
use crate::timeline::domain::segment::Segment;
use crate::timeline::segment_ledger::SegmentLedger;
use crate::timeline::snapshot::TimelineSnapshot;
use crate::video::domain::video_identifier::VideoId;

/// All in-memory state for one loaded video and its segments.
///
/// Mutated only through its methods and [`dispatch`](Self::dispatch), one
/// call at a time. Operations that fail return a [`SessionError`] whose text
/// is the notice to show, and leave the session unchanged.
pub struct TimelineSession {
    video_link: String,
    title: String,
    query: String,
    playback: PlaybackAdapter,
    selector: RangeSelector,
    ledger: SegmentLedger,
    dictation: DictationAdapter,
}

impl TimelineSession {
    pub fn new(playback: PlaybackAdapter, dictation: DictationAdapter) -> Self {
        Self {
            video_link: String::new(),
            title: String::new(),
            query: String::new(),
            playback,
            selector: RangeSelector::new(),
            ledger: SegmentLedger::new(),
            dictation,
        }
    }

    // --- Accessors ---

    pub fn video_link(&self) -> &str {
        &self.video_link
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        self.playback.video_id()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> f64 {
        self.playback.state().duration
    }

    pub fn position(&self) -> f64 {
        self.playback.state().position
    }

    pub fn is_playing(&self) -> bool {
        self.playback.state().is_playing
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.playback.phase()
    }

    pub fn selection(&self) -> Selection {
        self.selector.selection()
    }

    pub fn segments(&self) -> &[Segment] {
        self.ledger.segments()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_recording(&self) -> bool {
        self.dictation.is_recording()
    }

    pub fn is_polling(&self) -> bool {
        self.playback.is_polling()
    }

    pub fn is_marker_dragging(&self) -> bool {
        self.selector.is_marker_dragging()
    }

    /// Position marker location as a percentage of the track; 0 while no
    /// video duration is known.
    pub fn marker_percent(&self) -> f64 {
        self.selector.marker_percent(self.position())
    }

    // --- Video ---

    /// Updates the link text field without loading anything.
    pub fn set_video_link(&mut self, link: &str) {
        self.video_link = link.to_string();
    }

    /// Loads the video the link text points to.
    ///
    /// Resubmitting the identifier that is already loaded changes nothing.
    /// A different identifier replaces the widget; the title and selection
    /// wait for its ready notification while segments are kept. If the new
    /// widget cannot be built the session keeps the current video.
    pub fn submit_video_link(&mut self) -> Result<VideoId, SessionError> {
        let Some(video_id) = VideoId::parse(&self.video_link) else {
            log::warn!("Rejected video link: {}", self.video_link);
            return Err(SessionError::InvalidVideoLink);
        };
        if self.playback.video_id() == Some(&video_id) {
            log::debug!("Video {video_id} already loaded");
            return Ok(video_id);
        }

        self.playback.load(video_id.clone())?;
        self.title.clear();
        self.selector.end_marker_drag();
        self.selector.reset(0.0);
        log::info!("Loading video {video_id}");
        Ok(video_id)
    }

    /// Seeks playback and reports the new position immediately.
    pub fn seek(&mut self, seconds: f64) {
        self.playback.seek(seconds);
    }

    // --- Selection ---

    /// Range-handle drag. Does not seek.
    pub fn drag_range(&mut self, start: f64, end: f64) -> Selection {
        self.selector.drag_range(start, end)
    }

    /// Pointer-down on the position marker.
    pub fn begin_marker_drag(&mut self, geometry: TrackGeometry, capture: Box<dyn PointerCapture>) {
        self.selector.begin_marker_drag(geometry, capture);
    }

    pub fn end_marker_drag(&mut self) {
        self.selector.end_marker_drag();
    }

    // --- Labels and segments ---

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Starts or stops voice dictation. Returns whether it is now recording.
    pub fn toggle_dictation(&mut self) -> bool {
        self.dictation.toggle();
        self.dictation.is_recording()
    }

    /// Appends a segment for the current selection labeled with the query,
    /// then clears the query.
    pub fn add_segment(&mut self) -> Result<Segment, SessionError> {
        let range = self.selector.selection();
        let segment = self
            .ledger
            .append(&self.query, range, Utc::now())
            .map_err(|e| {
                log::warn!("Rejected segment: {e}");
                SessionError::from(e)
            })?
            .clone();
        self.query.clear();
        log::info!(
            "Added segment \"{}\" ({:.1}s - {:.1}s)",
            segment.query,
            segment.start_time,
            segment.end_time
        );
        Ok(segment)
    }

    pub fn delete_segment(&mut self, index: usize) -> Result<Segment, SessionError> {
        let removed = self.ledger.delete(index)?;
        log::info!("Deleted segment {index} (\"{}\")", removed.query);
        Ok(removed)
    }

    // --- Export / import ---

    pub fn export_snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            video_url: self.video_link.clone(),
            title: self.title.clone(),
            duration: self.duration(),
            timeline_data: self.ledger.segments().to_vec(),
        }
    }

    /// Parses and applies an import document. A document that fails to
    /// parse changes nothing.
    pub fn import_json(&mut self, json: &str) -> Result<(), SessionError> {
        let snapshot = TimelineSnapshot::from_json(json).map_err(|e| {
            log::warn!("Rejected import: {e}");
            SessionError::InvalidImport(e)
        })?;
        self.import_snapshot(snapshot)
    }

    /// Replaces the session with `snapshot`.
    ///
    /// The identifier is re-derived from the link. The current widget is
    /// kept when it already shows that identifier; a link that does not
    /// resolve, or a widget that cannot be built, leaves no player loaded. Selection covers the whole imported
    /// duration and position rewinds to 0.
    pub fn import_snapshot(&mut self, snapshot: TimelineSnapshot) -> Result<(), SessionError> {
        let TimelineSnapshot {
            video_url,
            title,
            duration,
            timeline_data,
        } = snapshot;
        let video_id = VideoId::parse(&video_url);
        let segment_count = timeline_data.len();

        self.video_link = video_url;
        self.title = title;
        self.ledger.replace_all(timeline_data);
        self.selector.end_marker_drag();

        let loaded = match video_id {
            Some(id) if self.playback.video_id() == Some(&id) => Ok(()),
            Some(id) => {
                let result = self.playback.load(id);
                if result.is_err() {
                    self.playback.unload();
                }
                result
            }
            None => {
                self.playback.unload();
                Ok(())
            }
        };
        self.playback.restore(duration);
        self.selector.reset(duration);
        log::info!("Imported {segment_count} segments for \"{}\"", self.title);

        loaded.map_err(SessionError::from)
    }

    // --- Events ---

    /// Handles one callback to completion.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::PlayerApiReady => self.playback.on_api_ready()?,
            SessionEvent::PlayerReady => {
                if let Some(loaded) = self.playback.on_ready() {
                    self.title = loaded.title;
                    self.selector.reset(loaded.duration);
                }
            }
            SessionEvent::PlayerStateChanged(change) => self.playback.on_state_change(change),
            SessionEvent::PollTick(generation) => {
                self.playback.on_poll_tick(generation);
            }
            SessionEvent::PointerMoved { client_x } => {
                if let Some(seconds) = self.selector.marker_move(client_x) {
                    self.playback.seek(seconds);
                }
            }
            SessionEvent::PointerReleased => self.selector.end_marker_drag(),
            SessionEvent::Speech(speech) => {
                if let Some(transcript) = self.dictation.handle_event(speech) {
                    self.query = transcript;
                }
            }
            SessionEvent::FileRead(json) => self.import_json(&json)?,
        }
        Ok(())
    }

    /// Releases timers, listeners and capture sessions.
    pub fn teardown(&mut self) {
        self.playback.teardown();
        self.selector.end_marker_drag();
        self.dictation.teardown();
    }
}
