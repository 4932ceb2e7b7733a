//! Scene state owned by the sync controller

use std::sync::Arc;

use arsync_core::{CameraIntrinsics, SharedCanvas};
use arsync_renderer::{
    ModelAsset, NodeKind, PerspectiveCamera, RendererConfig, Scene, SceneNode, SceneRenderer,
};
use uuid::Uuid;

/// Renderer, scene, camera and model, built once after tracking
/// initialization and mutated only by the controller's handlers.
pub struct SyncContext<R: SceneRenderer> {
    pub renderer: R,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub canvas: SharedCanvas,
    model: Option<SceneNode>,
}

impl<R: SceneRenderer> SyncContext<R> {
    /// Set up the renderer on the provider's canvas, a camera matching the
    /// provider's intrinsics and a lit, empty scene.
    pub fn new(
        mut renderer: R,
        canvas: SharedCanvas,
        intrinsics: CameraIntrinsics,
        config: &RendererConfig,
    ) -> Self {
        let size = *canvas.read();
        renderer.set_clear_color(config.clear_color, config.clear_alpha);
        renderer.set_size(size.width, size.height);

        let mut camera =
            PerspectiveCamera::new(intrinsics.fov_degrees, intrinsics.aspect, config.near, config.far);
        // Pose updates own the camera matrix
        camera.matrix_auto_update = false;

        let mut scene = Scene::new();
        scene.add(SceneNode::new("ambient", NodeKind::AmbientLight(config.ambient)));
        scene.add(SceneNode::new(
            "hemisphere",
            NodeKind::HemisphereLight(config.hemisphere),
        ));
        if config.show_axes {
            scene.add(SceneNode::new("axes", NodeKind::Axes { size: config.axes_size }));
        }

        tracing::info!(
            "Renderer ready: {}x{}, fov {:.1}, aspect {:.3}",
            size.width,
            size.height,
            intrinsics.fov_degrees,
            intrinsics.aspect
        );

        Self {
            renderer,
            scene,
            camera,
            canvas,
            model: None,
        }
    }

    /// Store the loaded model. A replacement keeps the node id of the
    /// previous model and takes its place in the scene if it was shown.
    pub fn set_model(&mut self, asset: ModelAsset) {
        let mut node = SceneNode::model(Arc::new(asset));
        if let Some(previous) = &self.model {
            node.id = previous.id;
            if self.scene.contains(node.id) {
                self.scene.add(node.clone());
            }
        }
        self.model = Some(node);
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Scene node id of the model, once loaded.
    pub fn model_id(&self) -> Option<Uuid> {
        self.model.as_ref().map(|node| node.id)
    }

    /// Node to add when the target is detected.
    pub(crate) fn model_node(&self) -> Option<&SceneNode> {
        self.model.as_ref()
    }

    /// Whether the model is currently part of the scene.
    pub fn model_in_scene(&self) -> bool {
        self.model_id().is_some_and(|id| self.scene.contains(id))
    }
}
