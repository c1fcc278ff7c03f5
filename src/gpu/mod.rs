//! wgpu state and the renderable point-cloud handle.
//!
//! [`GpuState`] owns the surface, device, queue and the uniform buffer the
//! animation driver writes every frame. [`PointCloud`] is one generation of
//! particles: three instance-step vertex buffers plus the render pipeline
//! built with additive, depth-non-writing blending so overlapping particles
//! brighten instead of occluding. Handles implement [`Dispose`] and must be
//! released through the particle system on every regeneration.

use std::sync::Arc;

use bytemuck::Zeroable;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::GpuError;
use crate::panel::{ControlPanel, PanelFrame};
use crate::particles::ParticleSet;
use crate::shader::SHADER_SOURCE;
use crate::system::Dispose;
use crate::uniforms::RawUniforms;

/// One generation of GPU-resident particles.
pub struct PointCloud {
    pipeline: wgpu::RenderPipeline,
    origins: wgpu::Buffer,
    targets: wgpu::Buffer,
    drifts: wgpu::Buffer,
    count: u32,
}

impl PointCloud {
    /// Number of particles in this generation.
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Dispose for PointCloud {
    fn dispose(&mut self) {
        // Free device memory eagerly instead of waiting for drop; the
        // pipeline goes away with the handle itself.
        self.origins.destroy();
        self.targets.destroy();
        self.drifts.destroy();
    }
}

/// GPU device state shared across particle generations.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    pipeline_layout: wgpu::PipelineLayout,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::bytes_of(&RawUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Cloud Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            uniform_bind_group,
            pipeline_layout,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Push the per-frame uniform block to the device.
    pub fn write_uniforms(&self, uniforms: &RawUniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Upload a particle set and build its render pipeline.
    ///
    /// The shader module and pipeline are rebuilt per generation, so
    /// disposing the returned handle releases program resources as well as
    /// geometry.
    pub fn create_point_cloud(&self, set: &ParticleSet) -> PointCloud {
        let origins = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Origin Buffer"),
            contents: bytemuck::cast_slice(set.origins()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let targets = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Target Buffer"),
            contents: bytemuck::cast_slice(set.targets()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let drifts = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Drift Buffer"),
            contents: bytemuck::cast_slice(set.drifts()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Cloud Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        // One vec3 buffer per attribute, stepped per instance; the quad
        // corners come from the vertex index.
        let attribute_layout = |location: u32, attrs: &'static [wgpu::VertexAttribute]| {
            debug_assert_eq!(attrs[0].shader_location, location);
            wgpu::VertexBufferLayout {
                array_stride: 12,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: attrs,
            }
        };
        const ORIGIN_ATTR: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }];
        const TARGET_ATTR: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            offset: 0,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        }];
        const DRIFT_ATTR: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
            offset: 0,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x3,
        }];

        let pipeline = self
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Point Cloud Pipeline"),
                layout: Some(&self.pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        attribute_layout(0, &ORIGIN_ATTR),
                        attribute_layout(1, &TARGET_ATTR),
                        attribute_layout(2, &DRIFT_ATTR),
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.config.format,
                        // Additive: overlapping particles brighten rather
                        // than occlude.
                        blend: Some(wgpu::BlendState {
                            color: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::SrcAlpha,
                                dst_factor: wgpu::BlendFactor::One,
                                operation: wgpu::BlendOperation::Add,
                            },
                            alpha: wgpu::BlendComponent {
                                src_factor: wgpu::BlendFactor::One,
                                dst_factor: wgpu::BlendFactor::One,
                                operation: wgpu::BlendOperation::Add,
                            },
                        }),
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
                // No depth buffer: blending is order-independent and depth
                // writes would defeat the density effect.
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            });

        PointCloud {
            pipeline,
            origins,
            targets,
            drifts,
            count: set.len() as u32,
        }
    }

    /// Draw one frame: the current point cloud (if any) plus the panel.
    pub fn render(
        &mut self,
        cloud: Option<&PointCloud>,
        panel: &mut ControlPanel,
        frame: &PanelFrame,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: frame.pixels_per_point,
        };
        panel.prepare(&self.device, &self.queue, &mut encoder, frame, &screen);

        {
            let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.004,
                            g: 0.004,
                            b: 0.012,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            let mut pass = pass.forget_lifetime();

            if let Some(cloud) = cloud {
                pass.set_pipeline(&cloud.pipeline);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                pass.set_vertex_buffer(0, cloud.origins.slice(..));
                pass.set_vertex_buffer(1, cloud.targets.slice(..));
                pass.set_vertex_buffer(2, cloud.drifts.slice(..));
                pass.draw(0..6, 0..cloud.count());
            }

            panel.paint(&mut pass, frame, &screen);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        panel.cleanup(frame);

        Ok(())
    }
}
