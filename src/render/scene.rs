use super::helpers;
use crate::core::geometry::{MeshData, ShardVertex, Vertex};
use crate::core::materials::{MaterialKind, ModelUniform};
use glam::Mat4;
use wgpu::util::DeviceExt;

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];
const SHARD_ATTRS: [wgpu::VertexAttribute; 4] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3, 3 => Float32];

fn mesh_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &MESH_ATTRS,
    }
}

fn shard_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<ShardVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &SHARD_ATTRS,
    }
}

/// One pipeline per material kind, sharing the globals and per-draw layouts.
pub(crate) struct ScenePipelines {
    pub(crate) globals_bgl: wgpu::BindGroupLayout,
    pub(crate) draw_bgl: wgpu::BindGroupLayout,
    lit: wgpu::RenderPipeline,
    city: wgpu::RenderPipeline,
    water: wgpu::RenderPipeline,
    cloud: wgpu::RenderPipeline,
    loader: wgpu::RenderPipeline,
}

impl ScenePipelines {
    pub(crate) fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        let stages = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_entry(0, stages)],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[
                helpers::uniform_entry(0, stages),
                helpers::uniform_entry(1, stages),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_scene"),
            bind_group_layouts: &[&globals_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let build = |kind: MaterialKind, src: &str| {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(&format!("{:?}_shader", kind)),
                source: wgpu::ShaderSource::Wgsl(src.into()),
            });
            let vertex_layout = if kind == MaterialKind::Loader {
                shard_layout()
            } else {
                mesh_layout()
            };
            helpers::make_scene_pipeline(device, &layout, &shader, kind, vertex_layout, color_format)
        };
        Self {
            lit: build(MaterialKind::Lit, crate::core::LIT_WGSL),
            city: build(MaterialKind::City, crate::core::CITY_WGSL),
            water: build(MaterialKind::Water, crate::core::WATER_WGSL),
            cloud: build(MaterialKind::Cloud, crate::core::CLOUDS_WGSL),
            loader: build(MaterialKind::Loader, crate::core::LOADER_WGSL),
            globals_bgl,
            draw_bgl,
        }
    }

    pub(crate) fn pipeline(&self, kind: MaterialKind) -> &wgpu::RenderPipeline {
        match kind {
            MaterialKind::Lit => &self.lit,
            MaterialKind::City => &self.city,
            MaterialKind::Water => &self.water,
            MaterialKind::Cloud => &self.cloud,
            MaterialKind::Loader => &self.loader,
        }
    }
}

pub(crate) struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: Option<wgpu::Buffer>,
    count: u32,
}

impl GpuMesh {
    pub(crate) fn indexed(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices: Some(indices),
            count: mesh.indices.len() as u32,
        }
    }

    pub(crate) fn soup(device: &wgpu::Device, label: &str, shards: &[ShardVertex]) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(shards),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertices,
            indices: None,
            count: shards.len() as u32,
        }
    }
}

/// A mesh with its exclusively owned model and material uniform blocks.
pub(crate) struct DrawItem {
    pub(crate) kind: MaterialKind,
    pub(crate) visible: bool,
    mesh: GpuMesh,
    model: wgpu::Buffer,
    params: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl DrawItem {
    pub(crate) fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        kind: MaterialKind,
        mesh: GpuMesh,
        model: Mat4,
        params: &[u8],
    ) -> Self {
        let model = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("draw_model"),
            contents: bytemuck::bytes_of(&ModelUniform::new(model)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("draw_params"),
            contents: params,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("draw_bg"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: model.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params.as_entire_binding(),
                },
            ],
        });
        Self {
            kind,
            visible: true,
            mesh,
            model,
            params,
            bind_group,
        }
    }

    pub(crate) fn write_model(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(&self.model, 0, bytemuck::bytes_of(&ModelUniform::new(model)));
    }

    pub(crate) fn write_params(&self, queue: &wgpu::Queue, bytes: &[u8]) {
        queue.write_buffer(&self.params, 0, bytes);
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.mesh.vertices.slice(..));
        match &self.mesh.indices {
            Some(ib) => {
                pass.set_index_buffer(ib.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..self.mesh.count, 0, 0..1);
            }
            None => pass.draw(0..self.mesh.count, 0..1),
        }
    }
}
