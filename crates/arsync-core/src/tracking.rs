//! Tracking provider interface
//!
//! A provider is initialized once, reports camera intrinsics and a camera
//! feed, and then delivers [`TrackingEvent`]s for the kinds that were
//! subscribed. Events are pulled one at a time so the caller can query the
//! provider while handling them.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::event::{EventKind, TrackingEvent};
use crate::status::InitErrorKind;
use crate::types::CameraIntrinsics;

/// What the provider tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackingMode {
    /// Reference images
    #[default]
    Image,
    /// Horizontal surfaces
    Surface,
    /// Previously scanned spaces
    Spatial,
}

/// Provider initialization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackingConfig {
    #[serde(default)]
    pub mode: TrackingMode,
    /// License token for the experience
    #[serde(default)]
    pub token: String,
}

/// Initialization failure reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {detail}")]
pub struct TrackingError {
    /// Provider error name, e.g. `CAMERA_ERROR`
    pub name: String,
    pub detail: String,
}

impl TrackingError {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> Option<InitErrorKind> {
        InitErrorKind::from_name(&self.name)
    }
}

/// Drawing surface handed out by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height, or `None` for a degenerate surface.
    pub fn aspect(&self) -> Option<f32> {
        (self.height > 0).then(|| self.width as f32 / self.height as f32)
    }
}

/// Canvas shared between the provider and the renderer.
pub type SharedCanvas = Arc<RwLock<Canvas>>;

pub fn create_shared_canvas(width: u32, height: u32) -> SharedCanvas {
    Arc::new(RwLock::new(Canvas::new(width, height)))
}

/// Handle to the provider's live camera feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoSource {
    pub label: String,
}

impl VideoSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// AR tracking provider.
pub trait TrackingProvider {
    /// Initialize tracking and return the drawing surface.
    fn init(&mut self, config: &TrackingConfig) -> Result<SharedCanvas, TrackingError>;

    /// Current camera intrinsics.
    fn camera_parameters(&self) -> CameraIntrinsics;

    /// Live camera feed used as scene background.
    fn camera_feed(&self) -> VideoSource;

    /// Deliver events of this kind from now on.
    fn subscribe(&mut self, kind: EventKind);

    /// Begin producing events.
    fn start(&mut self);

    /// Next subscribed event, or `None` once the session has ended.
    fn next_event(&mut self) -> Option<TrackingEvent>;
}
