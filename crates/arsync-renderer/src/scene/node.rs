//! Scene graph nodes.

use std::sync::Arc;

use glam::Mat4;
use uuid::Uuid;

use super::BoundingBox;
use crate::asset::ModelAsset;
use crate::light::{AmbientLight, HemisphereLight};

/// What a node contributes to the frame.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A loaded model
    Model(Arc<ModelAsset>),
    AmbientLight(AmbientLight),
    HemisphereLight(HemisphereLight),
    /// Debug axes of the given length
    Axes { size: f32 },
}

/// A node in the scene.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Unique identifier for this node.
    pub id: Uuid,
    pub name: String,
    pub kind: NodeKind,
    /// World transform matrix.
    pub transform: Mat4,
    /// Whether this node is drawn.
    pub visible: bool,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            transform: Mat4::IDENTITY,
            visible: true,
        }
    }

    pub fn model(asset: Arc<ModelAsset>) -> Self {
        let name = asset.name.clone();
        Self::new(name, NodeKind::Model(asset))
    }

    /// Returns the world-space bounding box of drawable geometry.
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        match &self.kind {
            NodeKind::Model(asset) => asset.bounds.map(|b| b.transform(&self.transform)),
            NodeKind::Axes { size } => Some(
                BoundingBox::new(glam::Vec3::ZERO, glam::Vec3::splat(*size))
                    .transform(&self.transform),
            ),
            _ => None,
        }
    }
}
