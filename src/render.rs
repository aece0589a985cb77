use crate::core::geometry::{MeshData, ShardVertex};
use crate::core::materials::{Globals, LoaderParams, MaterialKind, PostParams};
use glam::Mat4;
use web_sys as web;

mod helpers;
mod post;
mod scene;
mod targets;
use scene::{DrawItem, GpuMesh, ScenePipelines};
use targets::{RenderTargets, HDR_FORMAT};

/// Handle to a draw registered with [`GpuState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawId(usize);

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,

    post: post::PostResources,
    post_groups: post::PostBindGroups,

    scene: ScenePipelines,
    globals_buffer: wgpu::Buffer,
    globals_group: wgpu::BindGroup,
    draws: Vec<DrawItem>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
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

        let targets = RenderTargets::new(&device, width, height);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, HDR_FORMAT, format);
        let post_groups = post::rebuild_bind_groups(
            &device,
            &post,
            &linear_sampler,
            &targets.hdr_view,
            &targets.bloom_a_view,
            &targets.bloom_b_view,
        );

        let scene = ScenePipelines::new(&device, HDR_FORMAT);
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("bg_globals"),
            layout: &scene.globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        log::info!("[gpu] ready ({}x{}, {:?})", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            linear_sampler,
            post,
            post_groups,
            scene,
            globals_buffer,
            globals_group,
            draws: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.86,
                g: 0.9,
                b: 0.92,
                a: 1.0,
            },
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_clear_color(&mut self, rgb: [f32; 3]) {
        self.clear_color = wgpu::Color {
            r: rgb[0] as f64,
            g: rgb[1] as f64,
            b: rgb[2] as f64,
            a: 1.0,
        };
    }

    /// Register an indexed mesh drawn with `kind`; `params` is its material block.
    pub fn add_mesh<P: bytemuck::Pod>(
        &mut self,
        label: &str,
        kind: MaterialKind,
        mesh: &MeshData,
        model: Mat4,
        params: &P,
    ) -> DrawId {
        let gpu_mesh = GpuMesh::indexed(&self.device, label, mesh);
        self.push_draw(kind, gpu_mesh, model, bytemuck::bytes_of(params))
    }

    /// Register a shard soup for the loader material.
    pub fn add_shards(
        &mut self,
        label: &str,
        shards: &[ShardVertex],
        model: Mat4,
        params: &LoaderParams,
    ) -> DrawId {
        let gpu_mesh = GpuMesh::soup(&self.device, label, shards);
        self.push_draw(
            MaterialKind::Loader,
            gpu_mesh,
            model,
            bytemuck::bytes_of(params),
        )
    }

    fn push_draw(&mut self, kind: MaterialKind, mesh: GpuMesh, model: Mat4, params: &[u8]) -> DrawId {
        let item = DrawItem::new(&self.device, &self.scene.draw_bgl, kind, mesh, model, params);
        self.draws.push(item);
        DrawId(self.draws.len() - 1)
    }

    pub fn set_model(&self, id: DrawId, model: Mat4) {
        if let Some(d) = self.draws.get(id.0) {
            d.write_model(&self.queue, model);
        }
    }

    pub fn set_params<P: bytemuck::Pod>(&self, id: DrawId, params: &P) {
        if let Some(d) = self.draws.get(id.0) {
            d.write_params(&self.queue, bytemuck::bytes_of(params));
        }
    }

    pub fn set_visible(&mut self, id: DrawId, visible: bool) {
        if let Some(d) = self.draws.get_mut(id.0) {
            d.visible = visible;
        }
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
            self.targets.recreate(&self.device, width, height);
            self.rebuild_post_bind_groups();
        }
    }

    /// Reconfigure after the surface was lost or became outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(&mut self, globals: &Globals, post_params: &PostParams) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(globals));
        post::write_post_uniforms(&self.queue, &self.post, post_params, self.targets.bloom_size);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_group, &[]);
            // Opaque first, then blended surfaces in registration order.
            for transparent in [false, true] {
                let mut bound: Option<MaterialKind> = None;
                for d in self
                    .draws
                    .iter()
                    .filter(|d| d.visible && d.kind.is_transparent() == transparent)
                {
                    if bound != Some(d.kind) {
                        rpass.set_pipeline(self.scene.pipeline(d.kind));
                        bound = Some(d.kind);
                    }
                    d.draw(&mut rpass);
                }
            }
        }

        let groups = &self.post_groups;
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &groups.bright,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_h,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_v,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            wgpu::Color::BLACK,
            &self.post.composite_pipeline,
            &groups.composite,
            Some(&groups.bloom_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn rebuild_post_bind_groups(&mut self) {
        self.post_groups = post::rebuild_bind_groups(
            &self.device,
            &self.post,
            &self.linear_sampler,
            &self.targets.hdr_view,
            &self.targets.bloom_a_view,
            &self.targets.bloom_b_view,
        );
    }
}
