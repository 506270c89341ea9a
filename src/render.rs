use crate::constants::{
    INITIAL_LINE_VERTEX_CAPACITY, INITIAL_SPRITE_CAPACITY, SPRITE_EDGE_SOFTNESS,
};
use field_core::{Rgba, SceneSurface};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;
use web_sys as web;

mod batch;
use batch::{grown_capacity, FrameBatch, LineVertex, SceneUniforms, SpriteInstance, QUAD_CORNERS};

pub static FIELD_WGSL: &str = include_str!("shaders/field.wgsl");

/// Vertex buffer that doubles when a frame outgrows it.
struct GrowableBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    stride: usize,
    label: &'static str,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str, stride: usize, capacity: usize) -> Self {
        Self {
            buffer: create_vertex_buffer(device, label, stride * capacity),
            capacity,
            stride,
            label,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let needed = bytes.len() / self.stride;
        let capacity = grown_capacity(self.capacity, needed);
        if capacity != self.capacity {
            log::info!("[gpu] grow {} {} -> {}", self.label, self.capacity, capacity);
            self.buffer = create_vertex_buffer(device, self.label, self.stride * capacity);
            self.capacity = capacity;
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// WebGPU renderer for the scene field: instanced soft sprites for nodes and
/// pulse markers, a line list for connections. Implements `SceneSurface`, so a
/// frame is `begin`, draws, then `finish` which submits and presents.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    sprite_vb: GrowableBuffer,
    line_vb: GrowableBuffer,
    batch: FrameBatch,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // Colors are already sRGB-encoded, like the 2D canvas, so write them
        // through unconverted.
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("field_shader"),
            source: wgpu::ShaderSource::Wgsl(FIELD_WGSL.into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let sprite_buffers = [
            // slot 0: quad corners
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x2],
            },
            // slot 1: per-sprite instance data
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<SpriteInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x4],
            },
        ];
        let line_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 1,
                },
            ],
        }];

        let sprite_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            ("vs_sprite", "fs_sprite"),
            &sprite_buffers,
            wgpu::PrimitiveTopology::TriangleList,
            format,
        );
        let line_pipeline = make_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            ("vs_line", "fs_line"),
            &line_buffers,
            wgpu::PrimitiveTopology::LineList,
            format,
        );

        let sprite_vb = GrowableBuffer::new(
            &device,
            "sprite_vb",
            std::mem::size_of::<SpriteInstance>(),
            INITIAL_SPRITE_CAPACITY,
        );
        let line_vb = GrowableBuffer::new(
            &device,
            "line_vb",
            std::mem::size_of::<LineVertex>(),
            INITIAL_LINE_VERTEX_CAPACITY,
        );
        log::info!("[gpu] surface {}x{} format={:?} alpha={:?}", width, height, format, alpha_mode);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            line_pipeline,
            uniform_buffer,
            bind_group,
            quad_vb,
            sprite_vb,
            line_vb,
            batch: FrameBatch::default(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::new(
                self.batch.view_proj,
                SPRITE_EDGE_SOFTNESS,
            )),
        );
        self.sprite_vb.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.batch.sprites),
        );
        self.line_vb.upload(
            &self.device,
            &self.queue,
            bytemuck::cast_slice(&self.batch.lines),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);
            // Connections underneath, then nodes and markers.
            if !self.batch.lines.is_empty() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.line_vb.buffer.slice(..));
                rpass.draw(0..self.batch.lines.len() as u32, 0..1);
            }
            if !self.batch.sprites.is_empty() {
                rpass.set_pipeline(&self.sprite_pipeline);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.sprite_vb.buffer.slice(..));
                rpass.draw(
                    0..QUAD_CORNERS.len() as u32,
                    0..self.batch.sprites.len() as u32,
                );
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl SceneSurface for GpuState {
    fn begin(&mut self, view_proj: Mat4) {
        self.batch.begin(view_proj);
    }

    fn draw_sprite(&mut self, position: Vec3, size: f32, color: Rgba) {
        self.batch.draw_sprite(position, size, color);
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Rgba) {
        self.batch.draw_line(from, to, color);
    }

    fn finish(&mut self) {
        self.batch.finish();
        match self.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

fn make_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    (vs_entry, fs_entry): (&str, &str),
    buffers: &[wgpu::VertexBufferLayout],
    topology: wgpu::PrimitiveTopology,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(vs_entry),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(vs_entry),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
