//! glTF model loading.
//!
//! Loads .glb/.gltf files into a [`ModelAsset`]: every mesh primitive in the
//! default scene, baked with its node's world transform.

use std::path::Path;

use glam::{Mat4, Vec3};

use crate::scene::BoundingBox;

/// Error type for model loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Failed to load glTF file: {0}")]
    Load(#[from] gltf::Error),

    #[error("Missing position data for mesh: {0}")]
    MissingPositions(String),

    #[error("Model contains no meshes: {0}")]
    Empty(String),
}

/// One drawable primitive of a model.
#[derive(Debug, Clone)]
pub struct MeshPrimitive {
    pub mesh_name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Node transform relative to the model root
    pub transform: Mat4,
    /// Base color factor (RGBA)
    pub color: [f32; 4],
}

impl MeshPrimitive {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A loaded model.
#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub name: String,
    pub primitives: Vec<MeshPrimitive>,
    /// Bounds in model space
    pub bounds: Option<BoundingBox>,
}

impl ModelAsset {
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.triangle_count()).sum()
    }
}

/// Load a glTF/GLB file.
pub fn load_gltf(path: impl AsRef<Path>) -> Result<ModelAsset, AssetError> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    build_asset(name, &document, &buffers)
}

/// Load glTF data already in memory (GLB or JSON with embedded buffers).
pub fn load_gltf_from_bytes(name: &str, data: &[u8]) -> Result<ModelAsset, AssetError> {
    let (document, buffers, _images) = gltf::import_slice(data)?;
    build_asset(name.to_string(), &document, &buffers)
}

fn build_asset(
    name: String,
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<ModelAsset, AssetError> {
    let mut primitives = Vec::new();

    let scene = document.default_scene().or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            process_node(&node, Mat4::IDENTITY, buffers, &mut primitives)?;
        }
    }

    if primitives.is_empty() {
        return Err(AssetError::Empty(name));
    }

    let bounds = BoundingBox::from_points(
        primitives
            .iter()
            .flat_map(|p| p.positions.iter().map(|v| p.transform.transform_point3(*v))),
    );

    let asset = ModelAsset {
        name,
        primitives,
        bounds,
    };

    tracing::info!(
        "Loaded model '{}': {} primitives, {} triangles",
        asset.name,
        asset.primitives.len(),
        asset.triangle_count()
    );

    Ok(asset)
}

fn process_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    primitives: &mut Vec<MeshPrimitive>,
) -> Result<(), AssetError> {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let mesh_name = mesh.name().unwrap_or("unnamed").to_string();

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<Vec3> = reader
                .read_positions()
                .ok_or_else(|| AssetError::MissingPositions(mesh_name.clone()))?
                .map(Vec3::from)
                .collect();

            let normals: Vec<Vec3> = reader
                .read_normals()
                .map(|iter| iter.map(Vec3::from).collect())
                .unwrap_or_else(|| vec![Vec3::Y; positions.len()]);

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_else(|| (0..positions.len() as u32).collect());

            let color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();

            primitives.push(MeshPrimitive {
                mesh_name: mesh_name.clone(),
                positions,
                normals,
                indices,
                transform,
                color,
            });
        }
    }

    for child in node.children() {
        process_node(&child, transform, buffers, primitives)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // One triangle: (0,0,0) (1,0,0) (0,1,0), node translated by (0,0,2)
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "mesh": 0, "name": "frame", "translation": [0.0, 0.0, 2.0] } ],
        "meshes": [ { "name": "frame", "primitives": [ { "attributes": { "POSITION": 0 } } ] } ],
        "buffers": [ {
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        } ],
        "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
        "accessors": [ {
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        } ]
    }"#;

    #[test]
    fn test_load_triangle() {
        let asset = load_gltf_from_bytes("frame", TRIANGLE_GLTF.as_bytes()).unwrap();
        assert_eq!(asset.name, "frame");
        assert_eq!(asset.primitives.len(), 1);
        assert_eq!(asset.triangle_count(), 1);

        let primitive = &asset.primitives[0];
        assert_eq!(primitive.indices, vec![0, 1, 2]);
        assert_eq!(primitive.normals, vec![Vec3::Y; 3]);
        assert_eq!(primitive.color, [1.0, 1.0, 1.0, 1.0]);

        let bounds = asset.bounds.unwrap();
        assert_eq!(bounds.min, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_load_without_meshes() {
        let data = r#"{ "asset": { "version": "2.0" }, "scenes": [ { "nodes": [] } ] }"#;
        let result = load_gltf_from_bytes("empty", data.as_bytes());
        assert!(matches!(result, Err(AssetError::Empty(_))));
    }

    #[test]
    fn test_load_invalid_data() {
        let result = load_gltf_from_bytes("broken", b"not a model");
        assert!(matches!(result, Err(AssetError::Load(_))));
    }

    #[test]
    fn test_load_demo_glb() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/frame.glb");
        let asset = load_gltf(path).unwrap();
        assert_eq!(asset.name, "frame");
        assert_eq!(asset.triangle_count(), 8);
        assert_eq!(asset.primitives[0].color, [0.8, 0.6, 0.3, 1.0]);

        let bounds = asset.bounds.unwrap();
        assert_eq!(bounds.min, Vec3::new(-0.5, -0.5, 0.0));
        assert_eq!(bounds.max, Vec3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_gltf("does/not/exist.glb");
        assert!(matches!(result, Err(AssetError::Load(_))));
    }
}
