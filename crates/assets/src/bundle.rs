use std::collections::BTreeMap;
use tabletop_common::TextureId;

use crate::manifest::AssetManifest;
use crate::mesh::{MeshData, load_obj_or_none};
use crate::texture::{ImageData, load_cubemap, load_texture_or_placeholder};

/// Everything the renderer uploads at startup, decoded on the CPU.
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub textures: BTreeMap<TextureId, ImageData>,
    pub cubemap: [ImageData; 6],
    /// `None` when the OBJ could not be loaded; the renderer substitutes a cube.
    pub cup_mesh: Option<MeshData>,
}

/// Colour substituted when a texture file cannot be read. Specular maps
/// fall back to black so a missing map adds no highlights.
pub fn placeholder_color(id: TextureId) -> [u8; 4] {
    match id {
        TextureId::CrateSpecular => ImageData::BLACK,
        _ => ImageData::WHITE,
    }
}

impl SceneAssets {
    /// Load every manifest entry. Failures are logged and replaced, never
    /// returned.
    pub fn load(manifest: &AssetManifest) -> Self {
        let textures = manifest
            .textures
            .iter()
            .map(|source| {
                (
                    source.id,
                    load_texture_or_placeholder(source, placeholder_color(source.id)),
                )
            })
            .collect();
        let cubemap = load_cubemap(&manifest.cubemap_faces);
        let cup_mesh = load_obj_or_none(&manifest.cup_mesh);
        tracing::info!(
            textures = TextureId::ALL.len(),
            cup_loaded = cup_mesh.is_some(),
            "scene assets loaded"
        );
        Self {
            textures,
            cubemap,
            cup_mesh,
        }
    }

    /// Texture for `id`, or its placeholder when absent.
    pub fn texture(&self, id: TextureId) -> ImageData {
        self.textures
            .get(&id)
            .cloned()
            .unwrap_or_else(|| ImageData::solid(placeholder_color(id)))
    }
}
