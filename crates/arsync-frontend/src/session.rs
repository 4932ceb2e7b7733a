//! Scripted tracking provider
//!
//! Replays a recorded or hand-written tracking session so the controller can
//! run without a camera. Scripts are RON, or JSON when the file ends in
//! `.json`:
//!
//! ```ron
//! (
//!     canvas: (width: 1280, height: 720),
//!     intrinsics: (fov_degrees: 55.0, aspect: 1.777),
//!     steps: [
//!         Detected("frame"),
//!         Pose([1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -2.0, 1.0]),
//!         Frames(3),
//!         Resize(width: 720, height: 1280, fov_degrees: 70.0, aspect: 0.5625),
//!         Lost("frame"),
//!     ],
//! )
//! ```

use std::collections::VecDeque;
use std::path::Path;

use arsync_core::{
    Canvas, CameraIntrinsics, EventKind, Pose, PoseError, SharedCanvas, Subscriptions, TargetId,
    TrackingConfig, TrackingError, TrackingEvent, TrackingProvider, VideoSource,
    create_shared_canvas,
};
use serde::{Deserialize, Serialize};

/// Errors that can occur while loading a session script
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to parse session script: {0}")]
    Parse(String),

    #[error("Invalid pose in step {step}: {source}")]
    InvalidPose { step: usize, source: PoseError },
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScriptStep {
    Detected(String),
    Lost(String),
    /// Sixteen column-major values
    Pose(Vec<f32>),
    /// Change canvas size and intrinsics, then emit a resize
    Resize {
        width: u32,
        height: u32,
        fov_degrees: f32,
        aspect: f32,
    },
    Frame,
    /// Several frames in a row
    Frames(u32),
}

fn default_canvas() -> Canvas {
    Canvas::new(1280, 720)
}

fn default_feed() -> String {
    "camera".to_string()
}

/// A complete session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    #[serde(default)]
    pub intrinsics: CameraIntrinsics,
    /// Provider error name returned from `init` instead of a canvas
    #[serde(default)]
    pub fail_with: Option<String>,
    /// Label of the camera feed
    #[serde(default = "default_feed")]
    pub feed: String,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl SessionScript {
    /// Load a script, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SessionError::Io(e.to_string()))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let script = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_ron(&content)?
        };
        tracing::info!("Loaded session {:?} with {} steps", path, script.steps.len());
        Ok(script)
    }

    pub fn from_ron(content: &str) -> Result<Self, SessionError> {
        let script: Self = ron::from_str(content).map_err(|e| SessionError::Parse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_json(content: &str) -> Result<Self, SessionError> {
        let script: Self =
            serde_json::from_str(content).map_err(|e| SessionError::Parse(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), SessionError> {
        for (step, action) in self.steps.iter().enumerate() {
            if let ScriptStep::Pose(values) = action {
                Pose::from_slice(values).map_err(|source| SessionError::InvalidPose { step, source })?;
            }
        }
        Ok(())
    }
}

/// Tracking provider that replays a [`SessionScript`].
pub struct ScriptedTracker {
    script: SessionScript,
    steps: VecDeque<ScriptStep>,
    pending_frames: u32,
    subscriptions: Subscriptions,
    canvas: Option<SharedCanvas>,
    intrinsics: CameraIntrinsics,
    started: bool,
}

impl ScriptedTracker {
    pub fn new(script: SessionScript) -> Self {
        Self {
            steps: script.steps.iter().cloned().collect(),
            intrinsics: script.intrinsics,
            script,
            pending_frames: 0,
            subscriptions: Subscriptions::none(),
            canvas: None,
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Produce the next event regardless of subscriptions.
    fn advance(&mut self) -> Option<TrackingEvent> {
        if self.pending_frames > 0 {
            self.pending_frames -= 1;
            return Some(TrackingEvent::Frame);
        }

        loop {
            let event = match self.steps.pop_front()? {
                ScriptStep::Detected(id) => TrackingEvent::Detected(TargetId::new(id)),
                ScriptStep::Lost(id) => TrackingEvent::Lost(TargetId::new(id)),
                ScriptStep::Pose(values) => match Pose::from_slice(&values) {
                    Ok(pose) => TrackingEvent::Pose(pose),
                    Err(e) => {
                        tracing::warn!("Skipping pose: {}", e);
                        continue;
                    }
                },
                ScriptStep::Resize {
                    width,
                    height,
                    fov_degrees,
                    aspect,
                } => {
                    if let Some(canvas) = &self.canvas {
                        *canvas.write() = Canvas::new(width, height);
                    }
                    self.intrinsics = CameraIntrinsics::new(fov_degrees, aspect);
                    TrackingEvent::Resize
                }
                ScriptStep::Frame => TrackingEvent::Frame,
                ScriptStep::Frames(0) => continue,
                ScriptStep::Frames(count) => {
                    self.pending_frames = count - 1;
                    TrackingEvent::Frame
                }
            };
            return Some(event);
        }
    }
}

impl TrackingProvider for ScriptedTracker {
    fn init(&mut self, config: &TrackingConfig) -> Result<SharedCanvas, TrackingError> {
        tracing::info!("Initializing scripted tracking in {:?} mode", config.mode);

        if let Some(name) = &self.script.fail_with {
            return Err(TrackingError::new(name.clone(), "scripted failure"));
        }

        let canvas = create_shared_canvas(self.script.canvas.width, self.script.canvas.height);
        self.canvas = Some(canvas.clone());
        Ok(canvas)
    }

    fn camera_parameters(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    fn camera_feed(&self) -> VideoSource {
        VideoSource::new(self.script.feed.clone())
    }

    fn subscribe(&mut self, kind: EventKind) {
        tracing::debug!("Subscribed to {}", kind);
        self.subscriptions.insert(kind);
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn next_event(&mut self) -> Option<TrackingEvent> {
        if !self.started {
            return None;
        }
        loop {
            let event = self.advance()?;
            if self.subscriptions.contains(event.kind()) {
                return Some(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"(
        canvas: (width: 800, height: 600),
        intrinsics: (fov_degrees: 50.0, aspect: 1.25),
        steps: [
            Detected("frame"),
            Pose([1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -2.0, 1.0]),
            Frames(3),
            Resize(width: 600, height: 800, fov_degrees: 65.0, aspect: 0.75),
            Lost("frame"),
            Frame,
        ],
    )"#;

    fn started(script: SessionScript, kinds: &[EventKind]) -> ScriptedTracker {
        let mut tracker = ScriptedTracker::new(script);
        tracker.init(&TrackingConfig::default()).unwrap();
        for kind in kinds {
            tracker.subscribe(*kind);
        }
        tracker.start();
        tracker
    }

    fn drain(tracker: &mut ScriptedTracker) -> Vec<TrackingEvent> {
        std::iter::from_fn(|| tracker.next_event()).collect()
    }

    #[test]
    fn test_replays_all_steps() {
        let script = SessionScript::from_ron(SCRIPT).unwrap();
        let mut tracker = started(script, &EventKind::ALL);
        let events = drain(&mut tracker);

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Detected,
                EventKind::Pose,
                EventKind::Frame,
                EventKind::Frame,
                EventKind::Frame,
                EventKind::Resize,
                EventKind::Lost,
                EventKind::Frame,
            ]
        );
        assert_eq!(tracker.camera_parameters(), CameraIntrinsics::new(65.0, 0.75));
    }

    #[test]
    fn test_unsubscribed_events_are_dropped() {
        let script = SessionScript::from_ron(SCRIPT).unwrap();
        let mut tracker = started(script, &[EventKind::Frame]);
        let events = drain(&mut tracker);
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| *e == TrackingEvent::Frame));
    }

    #[test]
    fn test_resize_updates_shared_canvas() {
        let script = SessionScript::from_ron(SCRIPT).unwrap();
        let mut tracker = ScriptedTracker::new(script);
        let canvas = tracker.init(&TrackingConfig::default()).unwrap();
        assert_eq!(*canvas.read(), Canvas::new(800, 600));

        tracker.subscribe(EventKind::Resize);
        tracker.start();
        assert_eq!(tracker.next_event(), Some(TrackingEvent::Resize));
        assert_eq!(*canvas.read(), Canvas::new(600, 800));
    }

    #[test]
    fn test_no_events_before_start() {
        let script = SessionScript::from_ron(SCRIPT).unwrap();
        let mut tracker = ScriptedTracker::new(script);
        tracker.subscribe(EventKind::Frame);
        assert!(tracker.next_event().is_none());
        assert!(!tracker.is_started());
    }

    #[test]
    fn test_scripted_failure() {
        let script = SessionScript::from_ron(r#"(fail_with: Some("CAMERA_ERROR"))"#).unwrap();
        let mut tracker = ScriptedTracker::new(script);
        let err = tracker.init(&TrackingConfig::default()).unwrap_err();
        assert_eq!(err.name, "CAMERA_ERROR");
    }

    #[test]
    fn test_invalid_pose_rejected() {
        let result = SessionScript::from_ron("(steps: [Frame, Pose([1.0, 2.0])])");
        assert!(matches!(
            result,
            Err(SessionError::InvalidPose {
                step: 1,
                source: PoseError::Length(2)
            })
        ));
    }

    #[test]
    fn test_long_run_of_empty_frame_steps() {
        let mut steps = vec![ScriptStep::Frames(0); 200_000];
        steps.push(ScriptStep::Frame);
        let script = SessionScript {
            steps,
            ..SessionScript::from_ron("()").unwrap()
        };

        let mut tracker = started(script, &EventKind::ALL);
        assert_eq!(tracker.next_event(), Some(TrackingEvent::Frame));
        assert_eq!(tracker.next_event(), None);
    }

    #[test]
    fn test_demo_session_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/session.ron");
        let script = SessionScript::load(path).unwrap();
        assert_eq!(script.feed, "rear-camera");
        assert_eq!(script.steps.first(), Some(&ScriptStep::Frames(2)));
    }

    #[test]
    fn test_json_script() {
        let script = SessionScript::from_json(
            r#"{ "steps": [ { "Detected": "frame" }, "Frame", { "Frames": 2 } ] }"#,
        )
        .unwrap();
        assert_eq!(script.canvas, Canvas::new(1280, 720));
        assert_eq!(script.feed, "camera");
        assert_eq!(
            script.steps,
            vec![
                ScriptStep::Detected("frame".to_string()),
                ScriptStep::Frame,
                ScriptStep::Frames(2),
            ]
        );
    }
}
