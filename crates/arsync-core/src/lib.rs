//! arsync core
//!
//! Tracking-side data types and the synchronization logic shared by the
//! renderer and the frontend:
//! - Pose / CameraIntrinsics / TargetId: values delivered by the tracking provider
//! - TrackingEvent: the five lifecycle events a provider emits
//! - sync: pure state machine mapping events to scene effects
//! - status: initialization error taxonomy and status screens
//! - tracking: the provider seam

pub mod event;
pub mod status;
pub mod sync;
pub mod tracking;
pub mod types;

pub use event::*;
pub use status::*;
pub use sync::{Effect, ModelStatus, Phase, SyncInput, SyncState, handle};
pub use tracking::*;
pub use types::*;
