//! Scene assets: where they live on disk and how they become CPU-side data.
//!
//! Textures are decoded to RGBA8 and, unless the manifest says otherwise,
//! flipped vertically so row 0 is the bottom of the image. The renderer
//! only ever sees [`ImageData`] and [`MeshData`], never file handles.

mod bundle;
mod manifest;
mod mesh;
mod texture;

pub use bundle::{SceneAssets, placeholder_color};
pub use manifest::{AssetManifest, CUBEMAP_FACES, CUP_MESH, TextureSource};
pub use mesh::{MeshData, load_obj, load_obj_or_none};
pub use texture::{ImageData, load_cubemap, load_image, load_texture_or_placeholder};

use std::path::PathBuf;

/// Errors from asset loading.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}
