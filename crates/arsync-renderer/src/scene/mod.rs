//! Scene graph.
//!
//! Holds the nodes drawn every frame and the background behind them.

mod bounds;
mod node;

pub use bounds::*;
pub use node::*;

use std::collections::HashMap;

use arsync_core::VideoSource;
use uuid::Uuid;

/// What fills the frame behind the scene nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Background {
    /// Transparent; the clear color shows through
    #[default]
    None,
    /// Live video texture
    Video(VideoSource),
}

/// Scene containing all drawable nodes.
pub struct Scene {
    nodes: HashMap<Uuid, SceneNode>,
    background: Background,
    dirty: bool,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            background: Background::None,
            dirty: false,
        }
    }

    /// Returns true if the scene has been modified since last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the scene as clean (called after rendering).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Adds a node to the scene. Adding a node that is already present
    /// replaces it.
    pub fn add(&mut self, node: SceneNode) -> Uuid {
        let id = node.id;
        self.nodes.insert(id, node);
        self.dirty = true;
        id
    }

    /// Removes a node from the scene.
    pub fn remove(&mut self, id: Uuid) -> Option<SceneNode> {
        let removed = self.nodes.remove(&id);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// Returns true if the scene contains a node with the given ID.
    pub fn contains(&self, id: Uuid) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns the number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
        self.dirty = true;
    }

    /// Computes the bounding box of all visible geometry.
    pub fn compute_bounds(&self) -> Option<BoundingBox> {
        self.nodes
            .values()
            .filter(|node| node.visible)
            .filter_map(|node| node.world_bounds())
            .reduce(|a, b| a.union(&b))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::AmbientLight;

    #[test]
    fn test_add_remove() {
        let mut scene = Scene::new();
        let id = scene.add(SceneNode::new("ambient", NodeKind::AmbientLight(AmbientLight::default())));
        assert!(scene.contains(id));
        assert!(scene.is_dirty());

        scene.mark_clean();
        assert!(scene.remove(id).is_some());
        assert!(scene.is_empty());
        assert!(scene.is_dirty());

        scene.mark_clean();
        assert!(scene.remove(id).is_none());
        assert!(!scene.is_dirty());
    }

    #[test]
    fn test_background() {
        let mut scene = Scene::new();
        assert_eq!(scene.background(), &Background::None);

        scene.set_background(Background::Video(VideoSource::new("camera")));
        assert!(matches!(scene.background(), Background::Video(_)));
    }

    #[test]
    fn test_bounds_skip_lights_and_hidden_nodes() {
        let mut scene = Scene::new();
        scene.add(SceneNode::new("ambient", NodeKind::AmbientLight(AmbientLight::default())));
        assert!(scene.compute_bounds().is_none());

        let mut hidden = SceneNode::new("axes", NodeKind::Axes { size: 5.0 });
        hidden.visible = false;
        scene.add(hidden);
        assert!(scene.compute_bounds().is_none());

        scene.add(SceneNode::new("axes", NodeKind::Axes { size: 2.0 }));
        let bounds = scene.compute_bounds().unwrap();
        assert_eq!(bounds.max, glam::Vec3::splat(2.0));
    }
}
