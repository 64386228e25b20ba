use tracing::debug;
use wgpu::util::DeviceExt;

use crate::model::{BlockPos, Camera, VoxelGrid};
use crate::ui::UiOutput;

use super::gpu_init::GpuContext;
use super::mesh::{create_cube_mesh, create_outline_mesh, BlockInstance, MeshBuffer, Vertex};
use super::texture::{BlockTexture, PixelBuffer};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const SKY: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.8,
    b: 1.0,
    a: 1.0,
};

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
        }
    }
}

pub fn create_depth_texture(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
    let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth_texture"),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let depth_view = depth_texture.create_view(&wgpu::TextureViewDescriptor::default());
    (depth_texture, depth_view)
}

/// Instance slots to allocate so `needed` fits; grows in powers of two.
fn instance_capacity(needed: usize, current: usize) -> usize {
    if needed <= current {
        current
    } else {
        needed.next_power_of_two().max(64)
    }
}

/// One instance per occupied cell.
pub fn collect_instances(grid: &VoxelGrid) -> Vec<BlockInstance> {
    grid.iter().map(|(pos, _)| BlockInstance::from(pos)).collect()
}

/// Instance buffer mirroring the grid, re-uploaded only when its revision moves.
struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
    revision: Option<u64>,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device) -> Self {
        let capacity = instance_capacity(1, 0);
        Self {
            buffer: Self::allocate(device, capacity),
            capacity,
            count: 0,
            revision: None,
        }
    }

    fn allocate(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("block_instances"),
            size: (capacity * std::mem::size_of::<BlockInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, grid: &VoxelGrid) {
        if self.revision == Some(grid.revision()) {
            return;
        }
        let instances = collect_instances(grid);
        let capacity = instance_capacity(instances.len(), self.capacity);
        if capacity != self.capacity {
            debug!(old = self.capacity, new = capacity, "growing instance buffer");
            self.buffer = Self::allocate(device, capacity);
            self.capacity = capacity;
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&instances));
        }
        self.count = instances.len() as u32;
        self.revision = Some(grid.revision());
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    label: &str,
    shader: &wgpu::ShaderModule,
    layout: &wgpu::PipelineLayout,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    depth_compare: wgpu::CompareFunction,
) -> wgpu::RenderPipeline {
    let cull_mode = match topology {
        wgpu::PrimitiveTopology::TriangleList => Some(wgpu::Face::Back),
        _ => None,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::layout(), BlockInstance::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    })
}

/// Owns every GPU resource; dropping it releases them.
pub struct Renderer {
    pub gpu: GpuContext,
    depth_view: wgpu::TextureView,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    block_pipeline: wgpu::RenderPipeline,
    outline_pipeline: wgpu::RenderPipeline,
    cube_mesh: MeshBuffer,
    outline_mesh: MeshBuffer,
    outline_instance: wgpu::Buffer,
    show_outline: bool,
    instances: InstanceBuffer,
    egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub fn new(gpu: GpuContext, pixels: &PixelBuffer) -> Self {
        let device = gpu.device.as_ref();
        let (_, depth_view) = create_depth_texture(device, gpu.config.width, gpu.config.height);

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera_buffer"),
            size: std::mem::size_of::<CameraUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry { binding: 0, resource: camera_buffer.as_entire_binding() }],
        });

        let texture = BlockTexture::upload(device, gpu.queue.as_ref(), pixels);
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texture_bind_group"),
            layout: &texture_bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(&texture.view) },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(&texture.sampler) },
            ],
        });

        let block_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("block_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/block.wgsl").into()),
        });
        let block_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("block_pipeline_layout"),
            bind_group_layouts: &[&camera_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let block_pipeline = create_pipeline(
            device,
            "block_pipeline",
            &block_shader,
            &block_layout,
            gpu.format,
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::CompareFunction::Less,
        );

        let outline_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("outline_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/outline.wgsl").into()),
        });
        let outline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("outline_pipeline_layout"),
            bind_group_layouts: &[&camera_bgl],
            push_constant_ranges: &[],
        });
        let outline_pipeline = create_pipeline(
            device,
            "outline_pipeline",
            &outline_shader,
            &outline_layout,
            gpu.format,
            wgpu::PrimitiveTopology::LineList,
            wgpu::CompareFunction::LessEqual,
        );

        let outline_instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("outline_instance"),
            contents: bytemuck::bytes_of(&BlockInstance { offset: [0.0; 3] }),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let cube_mesh = create_cube_mesh().upload(device, "cube");
        let outline_mesh = create_outline_mesh().upload(device, "outline");
        let instances = InstanceBuffer::new(device);
        let egui_renderer = egui_wgpu::Renderer::new(device, gpu.format, egui_wgpu::RendererOptions::default());

        Self {
            gpu,
            depth_view,
            camera_buffer,
            camera_bind_group,
            texture_bind_group,
            block_pipeline,
            outline_pipeline,
            cube_mesh,
            outline_mesh,
            outline_instance,
            show_outline: false,
            instances,
            egui_renderer,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.gpu.config.width, self.gpu.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.gpu.resize(width, height) {
            let (_, depth_view) = create_depth_texture(self.gpu.device.as_ref(), width, height);
            self.depth_view = depth_view;
        }
    }

    /// Push camera, grid and target highlight for the next frame.
    pub fn prepare(&mut self, camera: &Camera, grid: &VoxelGrid, target: Option<BlockPos>) {
        let queue = self.gpu.queue.as_ref();
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&CameraUniform::from_camera(camera)));
        self.instances.sync(self.gpu.device.as_ref(), queue, grid);

        self.show_outline = target.is_some();
        if let Some(pos) = target {
            queue.write_buffer(&self.outline_instance, 0, bytemuck::bytes_of(&BlockInstance::from(pos)));
        }
    }

    pub fn draw_frame(&mut self, ui: Option<UiOutput>) -> Result<(), wgpu::SurfaceError> {
        let device = self.gpu.device.clone();
        let queue = self.gpu.queue.clone();

        let frame = self.gpu.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(SKY),
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rp.set_bind_group(0, &self.camera_bind_group, &[]);

            if self.instances.count > 0 {
                rp.set_pipeline(&self.block_pipeline);
                rp.set_bind_group(1, &self.texture_bind_group, &[]);
                rp.set_vertex_buffer(0, self.cube_mesh.vertex_buffer.slice(..));
                rp.set_vertex_buffer(1, self.instances.buffer.slice(..));
                rp.set_index_buffer(self.cube_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rp.draw_indexed(0..self.cube_mesh.index_count, 0, 0..self.instances.count);
            }

            // Render block outline
            if self.show_outline {
                rp.set_pipeline(&self.outline_pipeline);
                rp.set_vertex_buffer(0, self.outline_mesh.vertex_buffer.slice(..));
                rp.set_vertex_buffer(1, self.outline_instance.slice(..));
                rp.set_index_buffer(self.outline_mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rp.draw_indexed(0..self.outline_mesh.index_count, 0, 0..1);
            }
        }

        if let Some(ui) = ui {
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
                pixels_per_point: ui.pixels_per_point,
            };

            for (id, image_delta) in &ui.textures_delta.set {
                self.egui_renderer.update_texture(&device, &queue, *id, image_delta);
            }
            self.egui_renderer
                .update_buffers(&device, &queue, &mut encoder, &ui.primitives, &screen_descriptor);

            {
                let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_render_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

                self.egui_renderer
                    .render(&mut egui_pass.forget_lifetime(), &ui.primitives, &screen_descriptor);
            }

            for id in &ui.textures_delta.free {
                self.egui_renderer.free_texture(id);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
