//! Scene renderer abstraction

use glam::Mat4;

use crate::camera::PerspectiveCamera;
use crate::light::Color;
use crate::scene::{Background, BoundingBox, NodeKind, Scene};

/// Summary of one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameStats {
    /// 1-based index of this frame
    pub frame: u64,
    /// Model and helper nodes drawn
    pub nodes_drawn: usize,
    pub triangles: usize,
    pub lights: usize,
    pub has_background: bool,
    /// Scene changed since the previous frame
    pub scene_changed: bool,
    /// Camera view-projection used for the frame
    pub view_projection: Mat4,
    /// World bounds of the drawn geometry
    pub bounds: Option<BoundingBox>,
}

/// Draws a scene through a camera onto the drawing surface.
pub trait SceneRenderer {
    fn set_clear_color(&mut self, color: Color, alpha: f32);

    /// Resize the drawing surface.
    fn set_size(&mut self, width: u32, height: u32);

    fn size(&self) -> (u32, u32);

    /// Draw one frame. Refreshes a stale camera world matrix first.
    fn render(&mut self, scene: &Scene, camera: &mut PerspectiveCamera) -> FrameStats;
}

/// Renderer that evaluates frames without a GPU.
///
/// Keeps every bit of per-frame state a real backend would consume, which
/// makes it usable for replaying sessions and for tests.
#[derive(Debug)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    clear_color: Color,
    clear_alpha: f32,
    frames: u64,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            clear_color: Color::BLACK,
            clear_alpha: 1.0,
            frames: 0,
        }
    }

    /// Number of draw calls issued so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn clear_color(&self) -> (Color, f32) {
        (self.clear_color, self.clear_alpha)
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn set_clear_color(&mut self, color: Color, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha.clamp(0.0, 1.0);
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            tracing::debug!("Drawing surface resized to {}x{}", width, height);
        }
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &Scene, camera: &mut PerspectiveCamera) -> FrameStats {
        camera.update_matrix_world();
        self.frames += 1;

        let mut nodes_drawn = 0;
        let mut triangles = 0;
        let mut lights = 0;
        for node in scene.nodes().filter(|n| n.visible) {
            match &node.kind {
                NodeKind::Model(asset) => {
                    nodes_drawn += 1;
                    triangles += asset.triangle_count();
                }
                NodeKind::Axes { .. } => nodes_drawn += 1,
                NodeKind::AmbientLight(_) | NodeKind::HemisphereLight(_) => lights += 1,
            }
        }

        let stats = FrameStats {
            frame: self.frames,
            nodes_drawn,
            triangles,
            lights,
            has_background: !matches!(scene.background(), Background::None),
            scene_changed: scene.is_dirty(),
            view_projection: camera.view_projection(),
            bounds: scene.compute_bounds(),
        };
        stats
    }
}
