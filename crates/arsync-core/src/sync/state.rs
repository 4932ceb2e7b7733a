//! Sync state and the inputs / effects of the state machine

use crate::event::TrackingEvent;
use crate::types::{Pose, TargetId};

/// Tracking phase of the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Tracking has not started
    #[default]
    Idle,
    /// Tracking, no target in view
    TrackingAbsent,
    /// Tracking, the given target is in view
    TrackingPresent(TargetId),
}

/// Loading status of the model asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelStatus {
    #[default]
    Loading,
    Ready,
}

/// Complete controller state.
///
/// The model node is in the scene exactly when the phase is
/// `TrackingPresent` and the model is `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyncState {
    pub phase: Phase,
    pub model: ModelStatus,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Target currently in view, if any.
    pub fn detected_target(&self) -> Option<&TargetId> {
        match &self.phase {
            Phase::TrackingPresent(id) => Some(id),
            _ => None,
        }
    }

    pub fn model_visible(&self) -> bool {
        self.model == ModelStatus::Ready && self.detected_target().is_some()
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncInput {
    /// The provider has started tracking
    Started,
    /// The model asset finished loading
    ModelLoaded,
    /// A provider event
    Tracking(TrackingEvent),
}

impl From<TrackingEvent> for SyncInput {
    fn from(event: TrackingEvent) -> Self {
        SyncInput::Tracking(event)
    }
}

/// Scene mutation requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add the model node to the scene graph
    AttachModel,
    /// Remove the model node from the scene graph
    DetachModel,
    /// Use the provider's camera feed as scene background
    BindCameraFeed,
    /// Remove the scene background
    ClearBackground,
    /// Overwrite the camera matrix
    SetCameraPose(Pose),
    /// Re-query intrinsics and resize the drawing surface
    RefreshProjection,
    /// Draw one frame
    Draw,
}
