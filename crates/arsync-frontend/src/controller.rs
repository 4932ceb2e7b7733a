//! Sync controller
//!
//! Runs the state machine from `arsync_core::sync` and applies its effects
//! to the [`SyncContext`].

use arsync_core::{
    Effect, Pose, SyncInput, SyncState, TargetId, TrackingEvent, TrackingProvider, handle,
};
use arsync_renderer::{Background, FrameStats, ModelAsset, SceneRenderer};

use crate::context::SyncContext;

/// Failure while applying an effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("Model is not loaded")]
    ModelNotLoaded,
}

/// Event handlers bridging tracking events to the scene.
pub struct SyncController<R: SceneRenderer> {
    state: SyncState,
    ctx: SyncContext<R>,
    frames: u64,
    last_frame: Option<FrameStats>,
}

impl<R: SceneRenderer> SyncController<R> {
    pub fn new(ctx: SyncContext<R>) -> Self {
        Self {
            state: SyncState::new(),
            ctx,
            frames: 0,
            last_frame: None,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn context(&self) -> &SyncContext<R> {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut SyncContext<R> {
        &mut self.ctx
    }

    /// Number of frames drawn.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }

    /// Feed one input through the state machine and apply the effects.
    pub fn apply<T>(&mut self, input: SyncInput, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        let (next, effects) = handle(&self.state, &input);
        self.state = next;

        for effect in effects {
            self.execute(effect, tracker)?;
        }
        Ok(())
    }

    /// Handle a provider event.
    pub fn dispatch<T>(&mut self, event: TrackingEvent, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.apply(SyncInput::Tracking(event), tracker)
    }

    pub fn on_started<T>(&mut self, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.apply(SyncInput::Started, tracker)
    }

    /// Take ownership of the loaded model; shows it right away if a target
    /// is already detected.
    pub fn on_model_loaded<T>(&mut self, asset: ModelAsset, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.ctx.set_model(asset);
        self.apply(SyncInput::ModelLoaded, tracker)
    }

    pub fn on_detected<T>(&mut self, id: TargetId, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        tracing::info!("Detected image: {}", id);
        self.dispatch(TrackingEvent::Detected(id), tracker)
    }

    pub fn on_lost<T>(&mut self, id: TargetId, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        tracing::info!("Lost image: {}", id);
        self.dispatch(TrackingEvent::Lost(id), tracker)
    }

    pub fn on_pose<T>(&mut self, pose: Pose, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.dispatch(TrackingEvent::Pose(pose), tracker)
    }

    pub fn on_resize<T>(&mut self, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.dispatch(TrackingEvent::Resize, tracker)
    }

    pub fn on_frame<T>(&mut self, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        self.dispatch(TrackingEvent::Frame, tracker)
    }

    /// Route a provider event to its handler.
    pub fn handle_event<T>(&mut self, event: TrackingEvent, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        match event {
            TrackingEvent::Detected(id) => self.on_detected(id, tracker),
            TrackingEvent::Lost(id) => self.on_lost(id, tracker),
            TrackingEvent::Pose(pose) => self.on_pose(pose, tracker),
            TrackingEvent::Resize => self.on_resize(tracker),
            TrackingEvent::Frame => self.on_frame(tracker),
        }
    }

    fn execute<T>(&mut self, effect: Effect, tracker: &T) -> Result<(), SyncError>
    where
        T: TrackingProvider + ?Sized,
    {
        tracing::trace!("Applying {:?}", effect);
        let ctx = &mut self.ctx;

        match effect {
            Effect::AttachModel => {
                let node = ctx.model_node().ok_or(SyncError::ModelNotLoaded)?.clone();
                ctx.scene.add(node);
            }
            Effect::DetachModel => {
                let id = ctx.model_id().ok_or(SyncError::ModelNotLoaded)?;
                ctx.scene.remove(id);
            }
            Effect::BindCameraFeed => {
                ctx.scene.set_background(Background::Video(tracker.camera_feed()));
            }
            Effect::ClearBackground => ctx.scene.set_background(Background::None),
            Effect::SetCameraPose(pose) => ctx.camera.set_matrix(pose.to_mat4()),
            Effect::RefreshProjection => {
                let intrinsics = tracker.camera_parameters();
                let canvas = *ctx.canvas.read();

                ctx.camera.fov = intrinsics.fov_degrees;
                ctx.camera.aspect = canvas.aspect().unwrap_or(intrinsics.aspect);
                ctx.camera.update_projection_matrix();
                ctx.renderer.set_size(canvas.width, canvas.height);

                tracing::debug!(
                    "Projection refreshed: fov {:.1}, aspect {:.3}",
                    ctx.camera.fov,
                    ctx.camera.aspect
                );
            }
            Effect::Draw => {
                let stats = ctx.renderer.render(&ctx.scene, &mut ctx.camera);
                ctx.scene.mark_clean();
                self.frames += 1;
                self.last_frame = Some(stats);
            }
        }
        Ok(())
    }
}
