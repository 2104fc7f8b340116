use glam::Mat4;

/// Mesh vertex as uploaded to the GPU
///
/// `node` indexes the node matrix storage buffer, so animated node
/// hierarchies render in a single draw call.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub node: u32,
    pub normal: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

impl Vertex {
    // Explicit offsets: `_pad` sits between normal and color
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 4] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Uint32,
            offset: 12,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 16,
            shader_location: 2,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 32,
            shader_location: 3,
        },
    ];

    pub const fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4], node: u32) -> Self {
        Self {
            position,
            node,
            normal,
            _pad: 0.0,
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Directional light for the GPU: `direction` points towards the light,
/// `color` is linear RGB premultiplied by intensity
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 4],
    pub color: [f32; 4],
}

pub const MAX_DIRECTIONAL_LIGHTS: usize = 3;

/// Per-frame scene uniform
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub ambient: [f32; 4],
    pub camera_position: [f32; 4],
    pub lights: [LightUniform; MAX_DIRECTIONAL_LIGHTS],
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            model: Mat4::IDENTITY.to_cols_array_2d(),
            ambient: [0.0; 4],
            camera_position: [0.0, 0.0, 0.0, 1.0],
            lights: [LightUniform::default(); MAX_DIRECTIONAL_LIGHTS],
        }
    }
}
