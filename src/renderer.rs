use std::sync::Arc;

use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::context::{ViewerCommand, ViewerContext};
use crate::core::{GpuContext, SurfaceTarget, WindowDimensions};
use crate::error::{Result, ViewerError};
use crate::overlay;
use crate::render_loop::FrameRenderer;
use crate::scenes::MeshData;
use crate::types::{SceneUniform, Vertex};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const MATRIX_SIZE: wgpu::BufferAddress = std::mem::size_of::<[[f32; 4]; 4]>() as wgpu::BufferAddress;

/// Vertex and index buffers of the current object
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// egui state for the page-effects overlay
struct OverlayPass {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Draws the scene object and the overlay into the window surface
pub struct Renderer {
    window: Arc<Window>,
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    scene_buffer: wgpu::Buffer,
    node_buffer: wgpu::Buffer,
    node_capacity: usize,
    mesh: Option<GpuMesh>,
    mesh_generation: Option<u64>,
    overlay: Option<OverlayPass>,
    commands: Vec<ViewerCommand>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, show_overlay: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| ViewerError::Bootstrap(format!("Failed to create surface: {}", e)))?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;

        let config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(gpu.device(), &config);
        let depth_view = Self::create_depth_view(gpu.device(), &config);

        let scene_buffer = gpu.device().create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform"),
            contents: bytemuck::cast_slice(&[SceneUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let node_capacity = 1;
        let node_buffer = Self::create_node_buffer(gpu.device(), node_capacity);

        let bind_group_layout = Self::create_bind_group_layout(gpu.device());
        let bind_group = Self::create_bind_group(gpu.device(), &bind_group_layout, &scene_buffer, &node_buffer);
        let pipeline = Self::create_pipeline(gpu.device(), &bind_group_layout, config.format);

        let overlay = show_overlay.then(|| {
            let ctx = egui::Context::default();
            let state = egui_winit::State::new(
                ctx.clone(),
                egui::ViewportId::ROOT,
                &window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            let renderer =
                egui_wgpu::Renderer::new(gpu.device(), config.format, egui_wgpu::RendererOptions::default());
            OverlayPass { ctx, state, renderer }
        });

        log::info!(
            "Renderer initialized: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        Ok(Self {
            window,
            gpu,
            surface,
            config,
            depth_view,
            pipeline,
            bind_group_layout,
            bind_group,
            scene_buffer,
            node_buffer,
            node_capacity,
            mesh: None,
            mesh_generation: None,
            overlay,
            commands: Vec::new(),
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| ViewerError::Bootstrap("Surface reports no formats".into()))?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_node_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Node Matrices"),
            size: MATRIX_SIZE * capacity.max(1) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
            label: Some("scene_bind_group_layout"),
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        scene_buffer: &wgpu::Buffer,
        node_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: node_buffer.as_entire_binding(),
                },
            ],
            label: Some("scene_bind_group"),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn upload_mesh(&self, mesh: &MeshData) -> Option<GpuMesh> {
        if mesh.is_empty() {
            return None;
        }
        let device = self.gpu.device();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    /// Follow object replacement and write this frame's matrices
    fn prepare_scene(&mut self, ctx: &ViewerContext) {
        let object = ctx.scene.object();

        if self.mesh_generation != Some(ctx.scene.generation()) {
            self.mesh = self.upload_mesh(&object.mesh);
            self.mesh_generation = Some(ctx.scene.generation());
            log::debug!(
                "Uploaded {:?} mesh: {} triangles",
                object.kind,
                object.mesh.triangle_count()
            );
        }

        let nodes: Vec<[[f32; 4]; 4]> = object
            .node_matrices()
            .iter()
            .map(Mat4::to_cols_array_2d)
            .collect();
        if nodes.len() > self.node_capacity {
            self.node_capacity = nodes.len().next_power_of_two();
            self.node_buffer = Self::create_node_buffer(self.gpu.device(), self.node_capacity);
            self.bind_group = Self::create_bind_group(
                self.gpu.device(),
                &self.bind_group_layout,
                &self.scene_buffer,
                &self.node_buffer,
            );
        }
        if !nodes.is_empty() {
            self.gpu
                .queue()
                .write_buffer(&self.node_buffer, 0, bytemuck::cast_slice(&nodes));
        }

        let eye = ctx.camera.position;
        let uniform = SceneUniform {
            view_proj: ctx.camera.view_projection().to_cols_array_2d(),
            model: object.model_matrix().to_cols_array_2d(),
            ambient: ctx.lights.ambient_uniform(),
            camera_position: [eye.x, eye.y, eye.z, 1.0],
            lights: ctx.lights.light_uniforms(),
        };
        self.gpu
            .queue()
            .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), &self.config);
    }

    fn draw_overlay(
        &mut self,
        ctx: &ViewerContext,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let Some(pass) = self.overlay.as_mut() else {
            return;
        };

        let raw_input = pass.state.take_egui_input(&self.window);
        let mut commands = Vec::new();
        let full_output = pass.ctx.run(raw_input, |egui_ctx| {
            commands = overlay::draw(egui_ctx, ctx);
        });
        self.commands.extend(commands);

        pass
            .state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = pass
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            pass
                .renderer
                .update_texture(self.gpu.device(), self.gpu.queue(), *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        pass.renderer.update_buffers(
            self.gpu.device(),
            self.gpu.queue(),
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            pass
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            pass.renderer.free_texture(id);
        }
    }

    /// Feed a window event to the overlay; true when egui consumed it
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.state.on_window_event(&self.window, event).consumed,
            None => false,
        }
    }

    /// Button presses collected while drawing the overlay
    pub fn take_commands(&mut self) -> Vec<ViewerCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl FrameRenderer for Renderer {
    fn render(&mut self, ctx: &ViewerContext) -> Result<()> {
        if ctx.viewport.dimensions().is_empty() {
            return Ok(());
        }

        self.prepare_scene(ctx);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Surface {:?}; reconfiguring", e);
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(ViewerError::Render(e.to_string())),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let [r, g, b] = ctx.background();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(mesh) = &self.mesh {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.draw_overlay(ctx, &mut encoder, &view);

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

impl SurfaceTarget for Renderer {
    fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.config.width = dimensions.width;
        self.config.height = dimensions.height;
        self.reconfigure();
        log::debug!("Surface resized to {}x{}", dimensions.width, dimensions.height);
    }

    fn surface_size(&self) -> WindowDimensions {
        WindowDimensions::new(self.config.width, self.config.height)
    }
}
