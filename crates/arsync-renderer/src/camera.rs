//! Perspective camera

use glam::{Mat4, Quat, Vec3};

/// Default near clip plane
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far clip plane
pub const DEFAULT_FAR: f32 = 1000.0;

/// Perspective camera with an explicitly managed world matrix.
///
/// With `matrix_auto_update` off, `matrix` is only changed by
/// [`set_matrix`](Self::set_matrix); the world matrix follows on the next
/// [`update_matrix_world`](Self::update_matrix_world).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Used to compose `matrix` when auto update is on
    pub position: Vec3,
    pub rotation: Quat,
    pub matrix_auto_update: bool,
    matrix: Mat4,
    matrix_world: Mat4,
    matrix_world_inverse: Mat4,
    matrix_world_needs_update: bool,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            matrix_auto_update: true,
            matrix: Mat4::IDENTITY,
            matrix_world: Mat4::IDENTITY,
            matrix_world_inverse: Mat4::IDENTITY,
            matrix_world_needs_update: false,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Local transform.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Replace the local transform and flag the world matrix as stale.
    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.matrix_world_needs_update = true;
    }

    pub fn matrix_world(&self) -> Mat4 {
        self.matrix_world
    }

    pub fn matrix_world_needs_update(&self) -> bool {
        self.matrix_world_needs_update
    }

    /// Recompute the world matrix if it is stale.
    ///
    /// The camera has no parent, so world equals local.
    pub fn update_matrix_world(&mut self) {
        if self.matrix_auto_update {
            self.matrix = Mat4::from_rotation_translation(self.rotation, self.position);
            self.matrix_world_needs_update = true;
        }

        if self.matrix_world_needs_update {
            self.matrix_world = self.matrix;
            self.matrix_world_inverse = self.matrix_world.inverse();
            self.matrix_world_needs_update = false;
        }
    }

    /// View matrix (inverse of the world matrix).
    pub fn view_matrix(&self) -> Mat4 {
        self.matrix_world_inverse
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Recompute the projection after changing fov, aspect or clip planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.matrix_world_inverse
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}
