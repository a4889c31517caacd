use super::helpers::{self, InstanceBuffer, DEPTH_FORMAT, QUAD_VERTS};
use helix_core::{BackdropUniforms, FrameGeometry, GlowInstance, LineVertex, SceneUniforms, SphereInstance};
use wgpu::util::DeviceExt;

const QUAD_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        shader_location: 0,
        offset: 0,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

// SphereInstance and GlowInstance share one layout: vec3, f32, vec3, f32.
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
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Backdrop, helix spheres, rung lines and additive glows, drawn into the
/// HDR target with a shared depth buffer.
pub(crate) struct ScenePass {
    backdrop_pipeline: wgpu::RenderPipeline,
    backdrop_ubo: wgpu::Buffer,
    backdrop_bg: wgpu::BindGroup,
    sphere_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    scene_ubo: wgpu::Buffer,
    scene_bg: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    spheres: InstanceBuffer,
    lines: InstanceBuffer,
    glows: InstanceBuffer,
}

struct PipelineDesc<'a> {
    label: &'a str,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    blend: Option<wgpu::BlendState>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(desc.vs),
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(desc.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}

impl ScenePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        uniforms: &SceneUniforms,
        backdrop: &BackdropUniforms,
    ) -> Self {
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene.wgsl"),
            source: wgpu::ShaderSource::Wgsl(helix_core::SCENE_WGSL.into()),
        });
        let backdrop_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop.wgsl"),
            source: wgpu::ShaderSource::Wgsl(helix_core::BACKDROP_WGSL.into()),
        });

        let visibility = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let scene_bgl = helpers::uniform_layout(device, "scene_bgl", visibility);
        let backdrop_bgl = helpers::uniform_layout(device, "backdrop_bgl", visibility);
        let scene_ubo = helpers::uniform_buffer(device, "scene_uniforms", uniforms);
        let backdrop_ubo = helpers::uniform_buffer(device, "backdrop_uniforms", backdrop);
        let scene_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_ubo.as_entire_binding(),
            }],
        });
        let backdrop_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("backdrop_bg"),
            layout: &backdrop_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: backdrop_ubo.as_entire_binding(),
            }],
        });

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

        let billboard = |stride: usize| wgpu::VertexBufferLayout {
            array_stride: stride as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &BILLBOARD_ATTRS,
        };
        let line_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_ATTRS,
        };

        let backdrop_pipeline = build_pipeline(
            device,
            &backdrop_layout,
            &backdrop_shader,
            color_format,
            PipelineDesc {
                label: "backdrop_pipeline",
                vs: "vs_fullscreen",
                fs: "fs_backdrop",
                buffers: &[],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );
        let sphere_pipeline = build_pipeline(
            device,
            &scene_layout,
            &scene_shader,
            color_format,
            PipelineDesc {
                label: "sphere_pipeline",
                vs: "vs_sphere",
                fs: "fs_sphere",
                buffers: &[QUAD_LAYOUT, billboard(std::mem::size_of::<SphereInstance>())],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: Some(wgpu::BlendState::REPLACE),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let line_pipeline = build_pipeline(
            device,
            &scene_layout,
            &scene_shader,
            color_format,
            PipelineDesc {
                label: "line_pipeline",
                vs: "vs_line",
                fs: "fs_line",
                buffers: &[line_layout],
                topology: wgpu::PrimitiveTopology::LineList,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );
        let glow_pipeline = build_pipeline(
            device,
            &scene_layout,
            &scene_shader,
            color_format,
            PipelineDesc {
                label: "glow_pipeline",
                vs: "vs_glow",
                fs: "fs_glow",
                buffers: &[QUAD_LAYOUT, billboard(std::mem::size_of::<GlowInstance>())],
                topology: wgpu::PrimitiveTopology::TriangleList,
                blend: Some(ADDITIVE),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            backdrop_pipeline,
            backdrop_ubo,
            backdrop_bg,
            sphere_pipeline,
            line_pipeline,
            glow_pipeline,
            scene_ubo,
            scene_bg,
            quad_vb,
            spheres: InstanceBuffer::new::<SphereInstance>(device, "sphere_instances"),
            lines: InstanceBuffer::new::<LineVertex>(device, "rung_vertices"),
            glows: InstanceBuffer::new::<GlowInstance>(device, "glow_instances"),
        }
    }

    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        geometry: &FrameGeometry,
        uniforms: &SceneUniforms,
        backdrop: &BackdropUniforms,
    ) {
        queue.write_buffer(&self.scene_ubo, 0, bytemuck::bytes_of(uniforms));
        queue.write_buffer(&self.backdrop_ubo, 0, bytemuck::bytes_of(backdrop));
        self.spheres.upload(device, queue, &geometry.spheres);
        self.lines.upload(device, queue, &geometry.lines);
        self.glows.upload(device, queue, &geometry.glows);
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.backdrop_pipeline);
        rpass.set_bind_group(0, &self.backdrop_bg, &[]);
        rpass.draw(0..3, 0..1);

        let quad_count = QUAD_VERTS.len() as u32;
        if self.spheres.len() > 0 {
            rpass.set_pipeline(&self.sphere_pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.spheres.slice());
            rpass.draw(0..quad_count, 0..self.spheres.len());
        }
        if self.lines.len() > 0 {
            rpass.set_pipeline(&self.line_pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.lines.slice());
            rpass.draw(0..self.lines.len(), 0..1);
        }
        if self.glows.len() > 0 {
            rpass.set_pipeline(&self.glow_pipeline);
            rpass.set_bind_group(0, &self.scene_bg, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.glows.slice());
            rpass.draw(0..quad_count, 0..self.glows.len());
        }
    }
}
