use bytemuck::{Pod, Zeroable};
use tabletop_assets::MeshData;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub const SKY_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub fn sky_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &SKY_ATTRIBUTES,
    }
}

/// Unit cube centred on the origin, one quad per face wound CCW seen from
/// outside, each face mapping the full texture.
pub fn textured_cube() -> (Vec<Vertex>, Vec<u16>) {
    let p = 0.5_f32;
    // (normal, four corners CCW from outside starting bottom-left)
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0],  [[-p, -p,  p], [ p, -p,  p], [ p,  p,  p], [-p,  p,  p]]),
        ([0.0, 0.0, -1.0], [[ p, -p, -p], [-p, -p, -p], [-p,  p, -p], [ p,  p, -p]]),
        ([1.0, 0.0, 0.0],  [[ p, -p,  p], [ p, -p, -p], [ p,  p, -p], [ p,  p,  p]]),
        ([-1.0, 0.0, 0.0], [[-p, -p, -p], [-p, -p,  p], [-p,  p,  p], [-p,  p, -p]]),
        ([0.0, 1.0, 0.0],  [[-p,  p,  p], [ p,  p,  p], [ p,  p, -p], [-p,  p, -p]]),
        ([0.0, -1.0, 0.0], [[-p, -p, -p], [ p, -p, -p], [ p, -p,  p], [-p, -p,  p]]),
    ];
    const UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u16;
        for (position, uv) in corners.into_iter().zip(UVS) {
            vertices.push(Vertex {
                position,
                normal,
                uv,
            });
        }
        indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    (vertices, indices)
}

/// Vertical quad in the XY plane with its left edge on the origin. The
/// texture's first row maps to the top edge.
pub fn grass_quad() -> Vec<Vertex> {
    let n = [0.0, 0.0, 1.0];
    let v = |x: f32, y: f32, u: f32, t: f32| Vertex {
        position: [x, y, 0.0],
        normal: n,
        uv: [u, t],
    };
    vec![
        v(0.0, 0.5, 0.0, 0.0),
        v(0.0, -0.5, 0.0, 1.0),
        v(1.0, -0.5, 1.0, 1.0),
        v(0.0, 0.5, 0.0, 0.0),
        v(1.0, -0.5, 1.0, 1.0),
        v(1.0, 0.5, 1.0, 0.0),
    ]
}

/// 36 positions of a cube spanning [-1, 1], for the sky.
pub fn skybox_cube() -> Vec<[f32; 3]> {
    let (vertices, indices) = textured_cube();
    indices
        .iter()
        .map(|&i| {
            let p = vertices[i as usize].position;
            [p[0] * 2.0, p[1] * 2.0, p[2] * 2.0]
        })
        .collect()
}

/// Interleave a loaded mesh into GPU vertices.
pub fn vertices_from_mesh(mesh: &MeshData) -> Vec<Vertex> {
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .zip(&mesh.uvs)
        .map(|((&position, &normal), &uv)| Vertex {
            position,
            normal,
            uv,
        })
        .collect()
}

/// Geometry resident on the GPU.
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: Option<(wgpu::Buffer, wgpu::IndexFormat)>,
    /// Index count when indexed, vertex count otherwise.
    pub count: u32,
}

impl GpuMesh {
    pub fn upload<V: Pod>(device: &wgpu::Device, label: &str, vertices: &[V]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            index_buffer: None,
            count: vertices.len() as u32,
        }
    }

    pub fn upload_indexed<V: Pod, I: Pod>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: &[I],
        format: wgpu::IndexFormat,
    ) -> Self {
        let mut mesh = Self::upload(device, label, vertices);
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        mesh.index_buffer = Some((index_buffer, format));
        mesh.count = indices.len() as u32;
        mesh
    }

    pub fn cube(device: &wgpu::Device) -> Self {
        let (vertices, indices) = textured_cube();
        Self::upload_indexed(
            device,
            "cube_mesh",
            &vertices,
            &indices,
            wgpu::IndexFormat::Uint16,
        )
    }

    pub fn from_mesh_data(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        Self::upload_indexed(
            device,
            label,
            &vertices_from_mesh(mesh),
            &mesh.indices,
            wgpu::IndexFormat::Uint32,
        )
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index_buffer {
            Some((buffer, format)) => {
                pass.set_index_buffer(buffer.slice(..), *format);
                pass.draw_indexed(0..self.count, 0, 0..1);
            }
            None => pass.draw(0..self.count, 0..1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_counts() {
        let (v, i) = textured_cube();
        assert_eq!(v.len(), 24);
        assert_eq!(i.len(), 36);
        assert!(i.iter().all(|&i| (i as usize) < v.len()));
    }

    #[test]
    fn cube_faces_wind_outward() {
        let (v, i) = textured_cube();
        for tri in i.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(v[tri[k] as usize].position));
            let face_normal = (b - a).cross(c - a).normalize();
            let stored = Vec3::from(v[tri[0] as usize].normal);
            assert!((face_normal - stored).length() < 1e-6);
            // Outward: normal points away from the centre.
            assert!(face_normal.dot(a) > 0.0);
        }
    }

    #[test]
    fn grass_quad_maps_top_row_to_top_edge() {
        let quad = grass_quad();
        assert_eq!(quad.len(), 6);
        for v in &quad {
            let expected_v = if v.position[1] > 0.0 { 0.0 } else { 1.0 };
            assert_eq!(v.uv[1], expected_v);
        }
    }

    #[test]
    fn skybox_spans_unit_cube() {
        let sky = skybox_cube();
        assert_eq!(sky.len(), 36);
        assert!(sky.iter().flatten().all(|c| c.abs() == 1.0));
    }

    #[test]
    fn mesh_data_interleaves() {
        let mesh = MeshData {
            positions: vec![[1.0, 2.0, 3.0]],
            normals: vec![[0.0, 1.0, 0.0]],
            uvs: vec![[0.25, 0.75]],
            indices: vec![0, 0, 0],
        };
        let v = vertices_from_mesh(&mesh);
        assert_eq!(
            v,
            vec![Vertex {
                position: [1.0, 2.0, 3.0],
                normal: [0.0, 1.0, 0.0],
                uv: [0.25, 0.75],
            }]
        );
    }
}
