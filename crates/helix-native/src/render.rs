//! Direct-to-swapchain renderer. Same shaders and instance layouts as the
//! browser build, without the bloom chain.

use helix_core::{GlowInstance, HelixViewer, LineVertex, SphereInstance};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;
const QUAD_VERTS: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];
const QUAD_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
const BILLBOARD_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![1 => Float32x3, 2 => Float32, 3 => Float32x3, 4 => Float32];
const LINE_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent::OVER,
};

struct GrowableBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    bytes: u64,
    count: u32,
}

impl GrowableBuffer {
    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, 4096),
            bytes: 4096,
            count: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, bytes: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write<T: bytemuck::Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.len() as u64 > self.bytes {
            self.bytes = (bytes.len() as u64).next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.bytes);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.count = data.len() as u32;
    }
}

pub struct GpuState<'w> {
    pub window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,
    backdrop_pipeline: wgpu::RenderPipeline,
    sphere_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    scene_ubo: wgpu::Buffer,
    backdrop_ubo: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    backdrop_bg: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    spheres: GrowableBuffer,
    lines: GrowableBuffer,
    glows: GrowableBuffer,
}

fn depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

fn uniform_group(
    device: &wgpu::Device,
    label: &str,
    contents: &[u8],
) -> (wgpu::BindGroupLayout, wgpu::Buffer, wgpu::BindGroup) {
    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });
    (layout, buffer, group)
}

#[allow(clippy::too_many_arguments)]
fn pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    entries: (&str, &str),
    buffers: &[wgpu::VertexBufferLayout<'_>],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth: (bool, wgpu::CompareFunction),
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(entries.0),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(entries.0),
            buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth.0,
            depth_compare: depth.1,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(entries.1),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl<'w> GpuState<'w> {
    pub async fn new(window: &'w winit::window::Window, viewer: &HelixViewer) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            .await?;
        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| anyhow::anyhow!("surface not supported by adapter"))?;
        surface.configure(&device, &config);
        let format = config.format;

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene.wgsl"),
            source: wgpu::ShaderSource::Wgsl(helix_core::SCENE_WGSL.into()),
        });
        let backdrop_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop.wgsl"),
            source: wgpu::ShaderSource::Wgsl(helix_core::BACKDROP_WGSL.into()),
        });
        let (scene_bgl, scene_ubo, scene_bg) =
            uniform_group(&device, "scene_uniforms", bytemuck::bytes_of(&viewer.uniforms()));
        let (backdrop_bgl, backdrop_ubo, backdrop_bg) = uniform_group(
            &device,
            "backdrop_uniforms",
            bytemuck::bytes_of(&viewer.backdrop_uniforms()),
        );
        let scene_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let backdrop_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_backdrop"),
            bind_group_layouts: &[&backdrop_bgl],
            push_constant_ranges: &[],
        });

        let quad = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 2]>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &QUAD_ATTRS,
        };
        let billboard = |stride: usize| wgpu::VertexBufferLayout {
            array_stride: stride as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &BILLBOARD_ATTRS,
        };
        let line = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRS,
        };
        let triangles = wgpu::PrimitiveTopology::TriangleList;
        let less = wgpu::CompareFunction::Less;

        let backdrop_pipeline = pipeline(
            &device,
            &backdrop_layout,
            &backdrop_shader,
            format,
            ("vs_fullscreen", "fs_backdrop"),
            &[],
            triangles,
            wgpu::BlendState::REPLACE,
            (false, wgpu::CompareFunction::Always),
        );
        let sphere_pipeline = pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            format,
            ("vs_sphere", "fs_sphere"),
            &[quad.clone(), billboard(std::mem::size_of::<SphereInstance>())],
            triangles,
            wgpu::BlendState::REPLACE,
            (true, less),
        );
        let line_pipeline = pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            format,
            ("vs_line", "fs_line"),
            &[line],
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            (false, less),
        );
        let glow_pipeline = pipeline(
            &device,
            &scene_layout,
            &scene_shader,
            format,
            ("vs_glow", "fs_glow"),
            &[quad, billboard(std::mem::size_of::<GlowInstance>())],
            triangles,
            ADDITIVE,
            (false, less),
        );

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let depth_view = depth_view(&device, config.width, config.height);
        let spheres = GrowableBuffer::new(&device, "sphere_instances");
        let lines = GrowableBuffer::new(&device, "rung_vertices");
        let glows = GrowableBuffer::new(&device, "glow_instances");

        log::info!("[gpu] surface {}x{} format={format:?}", config.width, config.height);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            depth_view,
            backdrop_pipeline,
            sphere_pipeline,
            line_pipeline,
            glow_pipeline,
            scene_ubo,
            backdrop_ubo,
            scene_bg,
            backdrop_bg,
            quad_vb,
            spheres,
            lines,
            glows,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = depth_view(&self.device, new_size.width, new_size.height);
    }

    pub fn render(&mut self, viewer: &HelixViewer) -> Result<(), wgpu::SurfaceError> {
        let geometry = viewer.geometry();
        self.queue
            .write_buffer(&self.scene_ubo, 0, bytemuck::bytes_of(&viewer.uniforms()));
        self.queue.write_buffer(
            &self.backdrop_ubo,
            0,
            bytemuck::bytes_of(&viewer.backdrop_uniforms()),
        );
        self.spheres.write(&self.device, &self.queue, &geometry.spheres);
        self.lines.write(&self.device, &self.queue, &geometry.lines);
        self.glows.write(&self.device, &self.queue, &geometry.glows);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
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
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.backdrop_pipeline);
            rpass.set_bind_group(0, &self.backdrop_bg, &[]);
            rpass.draw(0..3, 0..1);

            let quad_count = QUAD_VERTS.len() as u32;
            if self.spheres.count > 0 {
                rpass.set_pipeline(&self.sphere_pipeline);
                rpass.set_bind_group(0, &self.scene_bg, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.spheres.buffer.slice(..));
                rpass.draw(0..quad_count, 0..self.spheres.count);
            }
            if self.lines.count > 0 {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_bind_group(0, &self.scene_bg, &[]);
                rpass.set_vertex_buffer(0, self.lines.buffer.slice(..));
                rpass.draw(0..self.lines.count, 0..1);
            }
            if self.glows.count > 0 {
                rpass.set_pipeline(&self.glow_pipeline);
                rpass.set_bind_group(0, &self.scene_bg, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.glows.buffer.slice(..));
                rpass.draw(0..quad_count, 0..self.glows.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
