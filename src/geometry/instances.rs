//! GPU-ready instance buffers for hosts that draw the scene with sphere and
//! capsule impostors instead of meshes.
//!
//! Positions are world-space: each model's placement offset is folded in.

use crate::model::Rgb;
use crate::scene::ModelRoot;

/// Per-instance data for a sphere impostor.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SphereInstance {
    /// xyz = position, w = radius
    pub center: [f32; 4],
    /// xyz = RGB color, w = model index (packed as float)
    pub color: [f32; 4],
}

/// Per-instance data for a capsule impostor (one bond rod).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RodInstance {
    /// Endpoint A position (xyz), radius (w)
    pub endpoint_a: [f32; 4],
    /// Endpoint B position (xyz), model index (w) - packed as float
    pub endpoint_b: [f32; 4],
    /// Color at endpoint A (RGB), w unused
    pub color_a: [f32; 4],
    /// Color at endpoint B (RGB), w unused
    pub color_b: [f32; 4],
}

fn vec4(v: glam::DVec3, w: f64) -> [f32; 4] {
    [v.x as f32, v.y as f32, v.z as f32, w as f32]
}

fn color4(color: Rgb) -> [f32; 4] {
    let [r, g, b] = color.to_array();
    [r, g, b, 0.0]
}

/// Sphere instances for every atom in `roots`.
#[must_use]
pub fn pack_spheres<'a>(
    roots: impl IntoIterator<Item = &'a ModelRoot>,
) -> Vec<SphereInstance> {
    let mut out = Vec::new();
    for root in roots {
        let offset = root.position();
        out.extend(root.spheres.iter().map(|sphere| {
            let mut color = color4(sphere.color);
            color[3] = root.index as f32;
            SphereInstance {
                center: vec4(offset + sphere.center, sphere.radius),
                color,
            }
        }));
    }
    out
}

/// Capsule instances for every bond rod in `roots`, colored by the atoms
/// at either end.
#[must_use]
pub fn pack_rods<'a>(
    roots: impl IntoIterator<Item = &'a ModelRoot>,
) -> Vec<RodInstance> {
    let mut out = Vec::new();
    for root in roots {
        let offset = root.position();
        let atom_color = |atom: usize| {
            root.spheres
                .get(atom)
                .map_or(Rgb::WHITE, |sphere| sphere.color)
        };
        for bond in &root.bonds {
            let color_a = color4(atom_color(bond.a));
            let color_b = color4(atom_color(bond.b));
            out.extend(bond.rod_segments().into_iter().map(|segment| {
                RodInstance {
                    endpoint_a: vec4(offset + segment.start, segment.radius),
                    endpoint_b: vec4(offset + segment.end, root.index as f64),
                    color_a,
                    color_b,
                }
            }));
        }
    }
    out
}

/// View a packed instance slice as raw bytes for upload.
#[must_use]
pub fn as_bytes<T: bytemuck::Pod>(instances: &[T]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
