//! Application startup and the event loop

use arsync_core::{
    Canvas, EventKind, StatusScreens, SyncState, TrackingError, TrackingProvider,
};
use arsync_renderer::{HeadlessRenderer, SceneRenderer};

use crate::config::{AppConfig, ConfigError};
use crate::context::SyncContext;
use crate::controller::{SyncController, SyncError};
use crate::loader::{LoadError, ModelLoader};
use crate::session::SessionError;

/// Errors that end a run
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Tracking initialization failed: {0}")]
    TrackingInit(#[from] TrackingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("Failed to start model loader: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a completed session.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Events delivered by the provider
    pub events: u64,
    pub frames: u64,
    pub model_loaded: bool,
    pub final_state: SyncState,
}

/// Drives one tracking session.
pub struct App<T: TrackingProvider> {
    tracker: T,
    config: AppConfig,
    screens: StatusScreens,
}

impl<T: TrackingProvider> App<T> {
    pub fn new(tracker: T, config: AppConfig) -> Self {
        Self {
            tracker,
            config,
            screens: StatusScreens::new(),
        }
    }

    pub fn screens(&self) -> &StatusScreens {
        &self.screens
    }

    /// Initialize tracking and build the controller around a renderer made
    /// for the provider's canvas.
    ///
    /// On failure the loading screen is replaced by the error screen.
    pub fn initialize_with<R, F>(&mut self, make_renderer: F) -> Result<SyncController<R>, AppError>
    where
        R: SceneRenderer,
        F: FnOnce(Canvas) -> R,
    {
        let canvas = match self.tracker.init(&self.config.tracking) {
            Ok(canvas) => canvas,
            Err(e) => {
                match e.kind() {
                    Some(kind) => tracing::error!("Tracking initialization failed with {}", kind),
                    None => tracing::error!("Tracking initialization failed: {}", e),
                }
                self.screens.show_init_failure(&e.name);
                return Err(e.into());
            }
        };

        let renderer = make_renderer(*canvas.read());
        let intrinsics = self.tracker.camera_parameters();
        let ctx = SyncContext::new(renderer, canvas, intrinsics, &self.config.renderer);
        Ok(SyncController::new(ctx))
    }

    /// Initialize with a headless renderer.
    pub fn initialize(&mut self) -> Result<SyncController<HeadlessRenderer>, AppError> {
        self.initialize_with(|canvas| HeadlessRenderer::new(canvas.width, canvas.height))
    }

    /// Subscribe, start tracking and handle events until the provider ends
    /// the session. The model is handed to the controller as soon as the
    /// loader has it.
    pub fn run<R: SceneRenderer>(
        &mut self,
        controller: &mut SyncController<R>,
        mut loader: ModelLoader,
    ) -> Result<RunSummary, AppError> {
        if self.config.preload_model
            && let Some(result) = loader.wait()
        {
            self.deliver_model(controller, result)?;
        }

        self.screens.show_ready();

        for kind in EventKind::ALL {
            self.tracker.subscribe(kind);
        }
        self.tracker.start();
        controller.on_started(&self.tracker)?;
        tracing::info!("Tracking started");

        let mut events = 0;
        loop {
            if let Some(result) = loader.poll() {
                self.deliver_model(controller, result)?;
            }

            let Some(event) = self.tracker.next_event() else {
                break;
            };
            events += 1;
            controller.handle_event(event, &self.tracker)?;
        }

        if loader.is_pending() {
            tracing::debug!("Session ended before the model finished loading");
        }

        let summary = RunSummary {
            events,
            frames: controller.frames(),
            model_loaded: controller.context().has_model(),
            final_state: controller.state().clone(),
        };
        tracing::info!(
            "Session ended: {} events, {} frames",
            summary.events,
            summary.frames
        );
        Ok(summary)
    }

    /// Initialize, start loading the configured model and run to the end.
    pub fn run_headless(&mut self) -> Result<RunSummary, AppError> {
        let mut controller = self.initialize()?;
        let loader = ModelLoader::spawn(self.config.model_path.clone())?;
        self.run(&mut controller, loader)
    }

    fn deliver_model<R: SceneRenderer>(
        &self,
        controller: &mut SyncController<R>,
        result: Result<arsync_renderer::ModelAsset, LoadError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(asset) => controller.on_model_loaded(asset, &self.tracker)?,
            Err(e) => tracing::error!("Model unavailable: {}", e),
        }
        Ok(())
    }
}
