//! Pose type definition

use glam::Mat4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of elements in a pose matrix.
pub const POSE_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoseError {
    #[error("Pose must have {POSE_LEN} elements, got {0}")]
    Length(usize),
}

/// Camera pose relative to a detected target.
///
/// Sixteen column-major values, the same layout `glam::Mat4` uses. The
/// matrix is taken as delivered; it is not checked for orthonormality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub elements: [f32; POSE_LEN],
}

impl Pose {
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn from_array(elements: [f32; POSE_LEN]) -> Self {
        Self { elements }
    }

    /// Build a pose from a flat slice as delivered by the provider.
    pub fn from_slice(values: &[f32]) -> Result<Self, PoseError> {
        let elements: [f32; POSE_LEN] = values
            .try_into()
            .map_err(|_| PoseError::Length(values.len()))?;
        Ok(Self { elements })
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array(&self.elements)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Mat4> for Pose {
    fn from(matrix: Mat4) -> Self {
        Self {
            elements: matrix.to_cols_array(),
        }
    }
}

impl From<Pose> for Mat4 {
    fn from(pose: Pose) -> Self {
        pose.to_mat4()
    }
}

impl TryFrom<&[f32]> for Pose {
    type Error = PoseError;

    fn try_from(values: &[f32]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let values = [0.0f32; 12];
        assert_eq!(Pose::from_slice(&values), Err(PoseError::Length(12)));
    }

    #[test]
    fn test_column_major_layout() {
        let mut elements = Pose::IDENTITY.elements;
        elements[12] = 1.0;
        elements[13] = 2.0;
        elements[14] = 3.0;
        let pose = Pose::from_array(elements);

        let matrix = pose.to_mat4();
        assert_eq!(matrix.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mat4_conversion_keeps_every_element() {
        let elements: [f32; POSE_LEN] = std::array::from_fn(|i| i as f32 * 0.5 - 3.0);
        let pose = Pose::from_array(elements);
        let back = Pose::from(Mat4::from(pose));
        assert_eq!(back.elements, elements);
    }
}
