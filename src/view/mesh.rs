use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::model::BlockPos;

#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-cube instance data: the cell centre in world space.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlockInstance {
    pub offset: [f32; 3],
}

impl BlockInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![2 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BlockInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<BlockPos> for BlockInstance {
    fn from(pos: BlockPos) -> Self {
        Self { offset: pos.center().to_array() }
    }
}

pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn upload(&self, device: &wgpu::Device, label: &str) -> MeshBuffer {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vertex buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} index buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        MeshBuffer {
            vertex_buffer,
            index_buffer,
            index_count: self.indices.len() as u32,
        }
    }
}

const H: f32 = 0.5;

/// Face corners counter-clockwise seen from outside: bottom-left, bottom-right,
/// top-right, top-left.
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    // +X
    [[H, -H, H], [H, -H, -H], [H, H, -H], [H, H, H]],
    // -X
    [[-H, -H, -H], [-H, -H, H], [-H, H, H], [-H, H, -H]],
    // +Y
    [[-H, H, H], [H, H, H], [H, H, -H], [-H, H, -H]],
    // -Y
    [[-H, -H, -H], [H, -H, -H], [H, -H, H], [-H, -H, H]],
    // +Z
    [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
    // -Z
    [[H, -H, -H], [-H, -H, -H], [-H, H, -H], [H, H, -H]],
];

/// Unit cube centred on the origin, the full texture on every face.
pub fn create_cube_mesh() -> Mesh {
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for face in CUBE_FACES.iter() {
        let base = vertices.len() as u32;
        for (pos, uv) in face.iter().zip(uvs) {
            vertices.push(Vertex { pos: *pos, uv });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh { vertices, indices }
}

/// Create outline mesh for block targeting (cube edges as a line list)
pub fn create_outline_mesh() -> Mesh {
    let s = H * 1.01;
    let corners = [
        [-s, -s, -s],
        [s, -s, -s],
        [s, s, -s],
        [-s, s, -s],
        [-s, -s, s],
        [s, -s, s],
        [s, s, s],
        [-s, s, s],
    ];
    let vertices = corners.iter().map(|pos| Vertex { pos: *pos, uv: [0.0, 0.0] }).collect();
    let indices = vec![
        0, 1, 1, 2, 2, 3, 3, 0, // back
        4, 5, 5, 6, 6, 7, 7, 4, // front
        0, 4, 1, 5, 2, 6, 3, 7, // sides
    ];

    Mesh { vertices, indices }
}
