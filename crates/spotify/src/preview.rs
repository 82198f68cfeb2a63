//! Single-flight preview playback.
//!
//! One clip plays at a time. The "now playing" slot is owned by the
//! controller rather than floating as module state, so acquiring it for a
//! new clip always releases the previous holder first.

use parking_lot::Mutex;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
#[error("playback failed: {0}")]
pub struct PlaybackError(pub String);

/// Starts and stops actual audio output.
pub trait ClipSink: Send + Sync {
    /// Begin playback of `url`. May fail (e.g. an autoplay policy); the
    /// controller resets instead of wedging.
    fn start(&self, url: &str) -> Result<(), PlaybackError>;

    fn stop(&self, url: &str);
}

/// Label a preview control shows: `Play` when idle, `Pause` while its clip
/// is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Play,
    Pause,
}

/// Playback session enforcing single-flight semantics over a [`ClipSink`].
pub struct PreviewPlayer<S: ClipSink> {
    sink: S,
    current: Mutex<Option<String>>,
}

impl<S: ClipSink> PreviewPlayer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current: Mutex::new(None),
        }
    }

    /// Toggle the clip at `url` and report the control state for that clip.
    ///
    /// Whatever is currently playing is stopped and reset first. Toggling
    /// the clip that is already playing stops it rather than restarting it.
    pub fn toggle(&self, url: &str) -> ControlState {
        let mut current = self.current.lock();

        if let Some(playing) = current.take() {
            self.sink.stop(&playing);
            if playing == url {
                return ControlState::Play;
            }
        }

        match self.sink.start(url) {
            Ok(()) => {
                *current = Some(url.to_string());
                ControlState::Pause
            }
            Err(error) => {
                warn!(%error, "preview playback failed to start");
                ControlState::Play
            }
        }
    }

    /// The clip finished on its own; its control returns to the play state.
    pub fn on_ended(&self, url: &str) {
        self.release_if_current(url);
    }

    /// The clip was paused outside the controller.
    pub fn on_external_pause(&self, url: &str) {
        self.release_if_current(url);
    }

    pub fn control_state(&self, url: &str) -> ControlState {
        if self.current.lock().as_deref() == Some(url) {
            ControlState::Pause
        } else {
            ControlState::Play
        }
    }

    pub fn now_playing(&self) -> Option<String> {
        self.current.lock().clone()
    }

    fn release_if_current(&self, url: &str) {
        let mut current = self.current.lock();
        if current.as_deref() == Some(url) {
            *current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum SinkEvent {
        Started(String),
        Stopped(String),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<SinkEvent>>,
        failing: Mutex<HashSet<String>>,
    }

    impl RecordingSink {
        fn fail_on(&self, url: &str) {
            self.failing.lock().insert(url.to_string());
        }

        fn events(&self) -> Vec<SinkEvent> {
            self.events.lock().clone()
        }
    }

    impl ClipSink for &RecordingSink {
        fn start(&self, url: &str) -> Result<(), PlaybackError> {
            if self.failing.lock().contains(url) {
                return Err(PlaybackError("blocked".to_string()));
            }
            self.events.lock().push(SinkEvent::Started(url.to_string()));
            Ok(())
        }

        fn stop(&self, url: &str) {
            self.events.lock().push(SinkEvent::Stopped(url.to_string()));
        }
    }

    #[test]
    fn test_toggle_starts_idle_clip() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        assert_eq!(player.toggle("a"), ControlState::Pause);
        assert_eq!(player.control_state("a"), ControlState::Pause);
        assert_eq!(player.now_playing().as_deref(), Some("a"));
        assert_eq!(sink.events(), vec![SinkEvent::Started("a".to_string())]);
    }

    #[test]
    fn test_starting_b_stops_a_first() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        player.toggle("a");
        assert_eq!(player.toggle("b"), ControlState::Pause);

        assert_eq!(player.control_state("a"), ControlState::Play);
        assert_eq!(player.control_state("b"), ControlState::Pause);
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Started("a".to_string()),
                SinkEvent::Stopped("a".to_string()),
                SinkEvent::Started("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_toggling_playing_clip_stops_it() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        player.toggle("b");
        assert_eq!(player.toggle("b"), ControlState::Play);
        assert_eq!(player.control_state("b"), ControlState::Play);
        assert_eq!(player.now_playing(), None);
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::Started("b".to_string()),
                SinkEvent::Stopped("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_completion_resets_control() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        player.toggle("a");
        player.on_ended("a");
        assert_eq!(player.control_state("a"), ControlState::Play);
        assert_eq!(player.now_playing(), None);
    }

    #[test]
    fn test_stale_completion_does_not_reset_newer_clip() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        player.toggle("a");
        player.toggle("b");
        player.on_ended("a");
        assert_eq!(player.control_state("b"), ControlState::Pause);
    }

    #[test]
    fn test_external_pause_resets_control() {
        let sink = RecordingSink::default();
        let player = PreviewPlayer::new(&sink);

        player.toggle("a");
        player.on_external_pause("a");
        assert_eq!(player.control_state("a"), ControlState::Play);
    }

    #[test]
    fn test_start_failure_resets_without_panicking() {
        let sink = RecordingSink::default();
        sink.fail_on("blocked");
        let player = PreviewPlayer::new(&sink);

        assert_eq!(player.toggle("blocked"), ControlState::Play);
        assert_eq!(player.now_playing(), None);
        assert_eq!(sink.events(), vec![]);
    }

    #[test]
    fn test_start_failure_after_playing_clip_still_stops_it() {
        let sink = RecordingSink::default();
        sink.fail_on("blocked");
        let player = PreviewPlayer::new(&sink);

        player.toggle("a");
        assert_eq!(player.toggle("blocked"), ControlState::Play);
        assert_eq!(player.control_state("a"), ControlState::Play);
        assert_eq!(player.now_playing(), None);
    }
}
