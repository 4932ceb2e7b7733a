//! arsync Renderer
//!
//! Scene-side half of the tracking synchronization.
//!
//! - [`camera::PerspectiveCamera`] - projection and pose-driven world matrix
//! - [`scene::Scene`] - scene graph with lights, the model and a background
//! - [`asset`] - glTF model loading
//! - [`renderer::SceneRenderer`] - drawing abstraction, with a headless implementation

pub mod asset;
pub mod camera;
pub mod config;
pub mod light;
pub mod renderer;
pub mod scene;

pub use asset::{AssetError, MeshPrimitive, ModelAsset, load_gltf, load_gltf_from_bytes};
pub use camera::PerspectiveCamera;
pub use config::RendererConfig;
pub use light::{AmbientLight, Color, HemisphereLight};
pub use renderer::{FrameStats, HeadlessRenderer, SceneRenderer};
pub use scene::{Background, BoundingBox, NodeKind, Scene, SceneNode};
