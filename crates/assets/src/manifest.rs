use std::path::PathBuf;
use tabletop_common::{ResourceRoot, TextureId};

/// Cube-map faces in upload order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBEMAP_FACES: [&str; 6] = [
    "textures/hotelroom/posx.jpg",
    "textures/hotelroom/negx.jpg",
    "textures/hotelroom/posy.jpg",
    "textures/hotelroom/negy.jpg",
    "textures/hotelroom/posz.jpg",
    "textures/hotelroom/negz.jpg",
];

pub const CUP_MESH: &str = "objects/cup/coffee_cup.obj";

/// One 2D texture file and how to orient it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSource {
    pub id: TextureId,
    pub path: PathBuf,
    /// Flip rows on load so the first row is the bottom of the image.
    pub flip_vertically: bool,
}

/// Every file the scene reads, resolved against a resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    pub textures: Vec<TextureSource>,
    pub cubemap_faces: [PathBuf; 6],
    pub cup_mesh: PathBuf,
}

impl AssetManifest {
    pub fn standard(root: &ResourceRoot) -> Self {
        let textures = TextureId::ALL
            .into_iter()
            .map(|id| {
                let (relative, flip_vertically) = standard_texture(id);
                TextureSource {
                    id,
                    path: root.resolve(relative),
                    flip_vertically,
                }
            })
            .collect();
        Self {
            textures,
            cubemap_faces: CUBEMAP_FACES.map(|face| root.resolve(face)),
            cup_mesh: root.resolve(CUP_MESH),
        }
    }

    pub fn texture(&self, id: TextureId) -> Option<&TextureSource> {
        self.textures.iter().find(|t| t.id == id)
    }

    /// All paths in the manifest, textures first.
    pub fn all_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.textures
            .iter()
            .map(|t| &t.path)
            .chain(self.cubemap_faces.iter())
            .chain(std::iter::once(&self.cup_mesh))
    }
}

fn standard_texture(id: TextureId) -> (&'static str, bool) {
    match id {
        TextureId::CrateDiffuse => ("textures/Stylized_Crate_002_basecolor.jpg", true),
        TextureId::CrateSpecular => ("textures/Stylized_Crate_002_metallic.jpg", true),
        TextureId::LegDiffuse => ("textures/toy_box_diffuse.png", true),
        TextureId::Soil => ("textures/pot.png", true),
        TextureId::Planter => ("textures/saksija.jpg", true),
        TextureId::CupDiffuse => ("objects/cup/coffee_cup.jpg", true),
        // Cutout texture keeps its stored orientation.
        TextureId::Grass => ("textures/grass.png", false),
    }
}
