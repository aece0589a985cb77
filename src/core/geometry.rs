use crate::core::timeline::Transform;
use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Indexed mesh vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle-soup vertex carrying its triangle's shatter vector and drop flag.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShardVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub random: [f32; 3],
    pub drop: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Copy with positions and normals moved by `m` (rigid transforms plus scale).
    pub fn transformed(&self, m: Mat4) -> MeshData {
        let normal_m = m.inverse().transpose();
        let vertices = self
            .vertices
            .iter()
            .map(|v| Vertex {
                position: m.transform_point3(Vec3::from(v.position)).to_array(),
                normal: normal_m
                    .transform_vector3(Vec3::from(v.normal))
                    .normalize_or_zero()
                    .to_array(),
                uv: v.uv,
            })
            .collect();
        MeshData {
            vertices,
            indices: self.indices.clone(),
        }
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3, uv_scale: Vec2) {
        let base = self.vertices.len() as u32;
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(uv_scale.x, 0.0),
            Vec2::new(uv_scale.x, uv_scale.y),
            Vec2::new(0.0, uv_scale.y),
        ];
        for (p, uv) in corners.iter().zip(uvs) {
            self.vertices.push(Vertex {
                position: p.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Flat XZ grid centred on the origin, facing +Y, with `segments` cells per side.
pub fn plane_grid(width: f32, depth: f32, segments: u32) -> MeshData {
    let seg = segments.max(1);
    let row = seg + 1;
    let mut mesh = MeshData::default();
    for iz in 0..=seg {
        for ix in 0..=seg {
            let u = ix as f32 / seg as f32;
            let v = iz as f32 / seg as f32;
            mesh.vertices.push(Vertex {
                position: [(u - 0.5) * width, 0.0, (v - 0.5) * depth],
                normal: [0.0, 1.0, 0.0],
                uv: [u, v],
            });
        }
    }
    for iz in 0..seg {
        for ix in 0..seg {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }
    mesh
}

/// Upright XY quad facing +Z with UVs spanning [0, 1].
pub fn quad(width: f32, height: f32) -> MeshData {
    let (hw, hh) = (width * 0.5, height * 0.5);
    let mut mesh = MeshData::default();
    mesh.push_quad(
        [
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, hh, 0.0),
        ],
        Vec3::Z,
        Vec2::ONE,
    );
    mesh
}

/// Axis-aligned box with per-face normals, spanning `center ± size / 2`.
pub fn cuboid(size: Vec3, center: Vec3) -> MeshData {
    let h = size * 0.5;
    let c = |x: f32, y: f32, z: f32| center + Vec3::new(x * h.x, y * h.y, z * h.z);
    let mut mesh = MeshData::default();
    // +X, -X, +Y, -Y, +Z, -Z
    mesh.push_quad(
        [c(1., -1., 1.), c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.)],
        Vec3::X,
        Vec2::new(size.z, size.y),
    );
    mesh.push_quad(
        [c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.)],
        Vec3::NEG_X,
        Vec2::new(size.z, size.y),
    );
    mesh.push_quad(
        [c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.), c(-1., 1., -1.)],
        Vec3::Y,
        Vec2::new(size.x, size.z),
    );
    mesh.push_quad(
        [c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.)],
        Vec3::NEG_Y,
        Vec2::new(size.x, size.z),
    );
    mesh.push_quad(
        [c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.)],
        Vec3::Z,
        Vec2::new(size.x, size.y),
    );
    mesh.push_quad(
        [c(1., -1., -1.), c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.)],
        Vec3::NEG_Z,
        Vec2::new(size.x, size.y),
    );
    mesh
}

pub fn merge(parts: &[MeshData]) -> MeshData {
    let mut out = MeshData::default();
    for p in parts {
        let base = out.vertices.len() as u32;
        out.vertices.extend_from_slice(&p.vertices);
        out.indices.extend(p.indices.iter().map(|i| i + base));
    }
    out
}

/// Convert to non-indexed triangles, one random vector in [-1, 1]^3 per triangle.
///
/// All three vertices of a triangle share the vector so the triangle moves as a rigid
/// shard. `drop` tags every vertex of this part (1.0 lets the part fall away).
pub fn to_shards<R: Rng>(mesh: &MeshData, rng: &mut R, drop: bool) -> Vec<ShardVertex> {
    let flag = if drop { 1.0 } else { 0.0 };
    let mut out = Vec::with_capacity(mesh.indices.len());
    for tri in mesh.indices.chunks_exact(3) {
        let random = [
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ];
        let corners: Option<Vec<&Vertex>> =
            tri.iter().map(|&i| mesh.vertices.get(i as usize)).collect();
        // Triangles with an out-of-range index are dropped whole.
        let Some(corners) = corners else {
            continue;
        };
        out.extend(corners.into_iter().map(|v| ShardVertex {
            position: v.position,
            normal: v.normal,
            random,
            drop: flag,
        }));
    }
    out
}

/// Surface a model part is drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PartSurface {
    Lit { color: [f32; 3] },
    Water,
}

#[derive(Clone, Debug)]
pub struct ModelPart {
    pub name: &'static str,
    pub mesh: MeshData,
    pub transform: Transform,
    pub surface: PartSurface,
}

const CONCRETE: [f32; 3] = [0.86, 0.85, 0.82];
const GLASS_FRAME: [f32; 3] = [0.16, 0.15, 0.16];
const TERRACE: [f32; 3] = [0.72, 0.66, 0.58];

/// Procedural penthouse in model space: tower block, room shell, terrace, pool and a
/// pair of hinged doors in the front wall (opening x in [-2, 2] at z = 6).
pub fn penthouse_model() -> Vec<ModelPart> {
    let at = |x: f32, y: f32, z: f32| Transform::new(Vec3::new(x, y, z), Vec3::ZERO);
    let lit = |color| PartSurface::Lit { color };
    let shell = merge(&[
        // back and side walls
        cuboid(Vec3::new(16.0, 4.0, 0.3), Vec3::new(0.0, 2.0, -8.0)),
        cuboid(Vec3::new(0.3, 4.0, 14.0), Vec3::new(-8.0, 2.0, -1.0)),
        cuboid(Vec3::new(0.3, 4.0, 14.0), Vec3::new(8.0, 2.0, -1.0)),
        // front wall either side of the door opening, plus lintel
        cuboid(Vec3::new(6.0, 4.0, 0.3), Vec3::new(-5.0, 2.0, 6.0)),
        cuboid(Vec3::new(6.0, 4.0, 0.3), Vec3::new(5.0, 2.0, 6.0)),
        cuboid(Vec3::new(4.0, 1.0, 0.3), Vec3::new(0.0, 3.5, 6.0)),
        // roof and floor
        cuboid(Vec3::new(16.6, 0.3, 14.6), Vec3::new(0.0, 4.15, -1.0)),
        cuboid(Vec3::new(16.0, 0.1, 14.0), Vec3::new(0.0, 0.05, -1.0)),
    ]);
    vec![
        ModelPart {
            name: "building_bottom",
            mesh: cuboid(Vec3::new(16.0, 12.0, 20.0), Vec3::new(0.0, -6.0, 0.0)),
            transform: at(0.0, 0.0, 0.0),
            surface: lit(CONCRETE),
        },
        ModelPart {
            name: "building_top",
            mesh: shell,
            transform: at(0.0, 0.0, 0.0),
            surface: lit(CONCRETE),
        },
        ModelPart {
            name: "terrace",
            mesh: cuboid(Vec3::new(16.0, 0.1, 4.0), Vec3::new(0.0, 0.05, 8.0)),
            transform: at(0.0, 0.0, 0.0),
            surface: lit(TERRACE),
        },
        ModelPart {
            name: "pool",
            mesh: plane_grid(5.0, 2.5, 64),
            transform: at(4.5, 0.15, 8.2),
            surface: PartSurface::Water,
        },
        // Hinges sit at the node origin so the rotation swings the leaf outward.
        ModelPart {
            name: "penthouse_door_left",
            mesh: cuboid(Vec3::new(2.0, 3.0, 0.12), Vec3::new(1.0, 1.5, 0.0)),
            transform: at(-2.0, 0.0, 6.0),
            surface: lit(GLASS_FRAME),
        },
        ModelPart {
            name: "penthouse_door_right",
            mesh: cuboid(Vec3::new(2.0, 3.0, 0.12), Vec3::new(-1.0, 1.5, 0.0)),
            transform: at(2.0, 0.0, 6.0),
            surface: lit(GLASS_FRAME),
        },
    ]
}

/// One building of the procedural skyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Building {
    pub center: Vec3,
    pub size: Vec3,
}

/// Seeded grid of buildings around the origin, leaving a clear plaza in the middle.
pub fn city_layout<R: Rng>(rng: &mut R, grid: i32, spacing: f32, clear_radius: f32) -> Vec<Building> {
    let half = grid / 2;
    let mut out = Vec::new();
    for gz in -half..=half {
        for gx in -half..=half {
            let jitter = Vec2::new(rng.gen_range(-0.2..0.2), rng.gen_range(-0.2..0.2)) * spacing;
            let base = Vec2::new(gx as f32, gz as f32) * spacing + jitter;
            if base.length() < clear_radius {
                continue;
            }
            let height = rng.gen_range(10.0..60.0_f32);
            let footprint = Vec2::new(rng.gen_range(8.0..16.0), rng.gen_range(8.0..16.0));
            out.push(Building {
                center: Vec3::new(base.x, height * 0.5, base.y),
                size: Vec3::new(footprint.x, height, footprint.y),
            });
        }
    }
    out
}

pub fn city_mesh(buildings: &[Building]) -> MeshData {
    let parts: Vec<MeshData> = buildings.iter().map(|b| cuboid(b.size, b.center)).collect();
    merge(&parts)
}
