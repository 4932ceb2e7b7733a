//! Camera intrinsics reported by the tracking provider

use serde::{Deserialize, Serialize};

/// Projection parameters the renderer camera must match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Width / height
    pub aspect: f32,
}

impl CameraIntrinsics {
    pub fn new(fov_degrees: f32, aspect: f32) -> Self {
        Self { fov_degrees, aspect }
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            aspect: 1.0,
        }
    }
}
