use std::path::Path;

use crate::AssetError;

/// Indexed triangle mesh with one normal and one UV per vertex.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check attribute lengths agree and every index is in range.
    pub fn validate(&self) -> Result<(), AssetError> {
        let n = self.positions.len();
        if n == 0 {
            return Err(AssetError::InvalidMesh("no vertices".into()));
        }
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(AssetError::InvalidMesh(format!(
                "{n} positions but {} normals and {} uvs",
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::InvalidMesh(format!(
                "{} indices is not a whole number of triangles",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(AssetError::InvalidMesh(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        Ok(())
    }

    fn append(&mut self, mesh: &tobj::Mesh) {
        let base = self.positions.len() as u32;
        let count = mesh.positions.len() / 3;

        self.positions
            .extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));

        if mesh.normals.len() == mesh.positions.len() {
            self.normals
                .extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        } else {
            self.normals.extend(std::iter::repeat_n([0.0, 1.0, 0.0], count));
        }

        if mesh.texcoords.len() / 2 == count {
            self.uvs
                .extend(mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]));
        } else {
            self.uvs.extend(std::iter::repeat_n([0.0, 0.0], count));
        }

        self.indices.extend(mesh.indices.iter().map(|i| base + i));
    }
}

/// Load every model in an OBJ file and merge them into one mesh.
///
/// Missing normals default to +Y and missing UVs to zero.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, AssetError> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|source| AssetError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut merged = MeshData::default();
    for model in &models {
        tracing::debug!(
            model = %model.name,
            vertices = model.mesh.positions.len() / 3,
            indices = model.mesh.indices.len(),
            "OBJ model"
        );
        merged.append(&model.mesh);
    }
    merged.validate()?;
    Ok(merged)
}

/// [`load_obj`] that logs failures instead of returning them.
pub fn load_obj_or_none(path: impl AsRef<Path>) -> Option<MeshData> {
    match load_obj(path) {
        Ok(mesh) => Some(mesh),
        Err(e) => {
            tracing::warn!("{e}");
            None
        }
    }
}
