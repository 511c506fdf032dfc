use bytemuck::{Pod, Zeroable};
use cakestand_common::{CAKE_HEIGHT, CAKE_RADIUS, CAKE_SEGMENTS};
use glam::Vec3;
use std::f32::consts::TAU;

/// Largest radial segment count whose `6 * segments + 4` vertices still fit
/// `u16` indices.
pub const MAX_SEGMENTS: u32 = 10_000;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh, counter-clockwise front faces.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

/// The shared cake cylinder.
pub fn cake_mesh() -> Mesh {
    cylinder_mesh(CAKE_RADIUS, CAKE_RADIUS, CAKE_HEIGHT, CAKE_SEGMENTS)
}

/// Y-axis cylinder centred on the origin, with side and both caps.
///
/// The side texture wraps once around the circumference with `v` running top
/// to bottom; each cap maps the texture onto a disc. `segments` is clamped to
/// `3..=MAX_SEGMENTS`.
pub fn cylinder_mesh(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.clamp(3, MAX_SEGMENTS);
    let half = height * 0.5;
    let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);
    let mut mesh = Mesh::default();

    // Side: two rings of segments + 1 vertices (the seam is duplicated for uv)
    let mut rings = [Vec::new(), Vec::new()];
    for (row, ring) in rings.iter_mut().enumerate() {
        let v = row as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for x in 0..=segments {
            let u = x as f32 / segments as f32;
            let (sin, cos) = (u * TAU).sin_cos();
            ring.push(mesh.vertices.len() as u16);
            mesh.vertices.push(MeshVertex {
                position: [radius * sin, -v * height + half, radius * cos],
                normal: Vec3::new(sin, slope, cos).normalize().to_array(),
                uv: [u, 1.0 - v],
            });
        }
    }
    for x in 0..segments as usize {
        let a = rings[0][x];
        let b = rings[1][x];
        let c = rings[1][x + 1];
        let d = rings[0][x + 1];
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    push_cap(&mut mesh, radius_top, half, segments, true);
    push_cap(&mut mesh, radius_bottom, half, segments, false);
    mesh
}

fn push_cap(mesh: &mut Mesh, radius: f32, half: f32, segments: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let y = half * sign;

    let centers = mesh.vertices.len() as u16;
    for _ in 0..segments {
        mesh.vertices.push(MeshVertex {
            position: [0.0, y, 0.0],
            normal: [0.0, sign, 0.0],
            uv: [0.5, 0.5],
        });
    }

    let ring = mesh.vertices.len() as u16;
    for x in 0..=segments {
        let (sin, cos) = (x as f32 / segments as f32 * TAU).sin_cos();
        mesh.vertices.push(MeshVertex {
            position: [radius * sin, y, radius * cos],
            normal: [0.0, sign, 0.0],
            uv: [cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5],
        });
    }

    for x in 0..segments as u16 {
        let c = centers + x;
        let i = ring + x;
        if top {
            mesh.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            mesh.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}
