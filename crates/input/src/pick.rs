use cakestand_common::{CAKE_HEIGHT, CAKE_RADIUS, CakeId};
use glam::Vec3;

const EPSILON: f32 = 1e-6;

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Y-axis-aligned capped cylinder used as a cake's hit shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub id: CakeId,
    pub center: Vec3,
    pub radius: f32,
    pub half_height: f32,
}

impl Cylinder {
    /// Hit shape of a cake drawn at `center` with a uniform `scale`.
    pub fn cake(id: CakeId, center: Vec3, scale: f32) -> Self {
        Self {
            id,
            center,
            radius: CAKE_RADIUS * scale,
            half_height: CAKE_HEIGHT * 0.5 * scale,
        }
    }
}

/// Distance along `ray` to the first surface hit on `cyl` (side or caps).
///
/// A ray starting inside the cylinder reports its exit point.
pub fn ray_cylinder(ray: &Ray, cyl: &Cylinder) -> Option<f32> {
    let o = ray.origin - cyl.center;
    let d = ray.dir;
    let r2 = cyl.radius * cyl.radius;
    let h = cyl.half_height;

    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    // Side: solve |(o + t d).xz|^2 = r^2 within the height band
    let a = d.x * d.x + d.z * d.z;
    if a > EPSILON {
        let half_b = o.x * d.x + o.z * d.z;
        let c = o.x * o.x + o.z * o.z - r2;
        let disc = half_b * half_b - a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-half_b - sq) / a, (-half_b + sq) / a] {
                if (o.y + t * d.y).abs() <= h {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if d.y.abs() > EPSILON {
        for cap_y in [h, -h] {
            let t = (cap_y - o.y) / d.y;
            let p = o + d * t;
            if p.x * p.x + p.z * p.z <= r2 {
                consider(t);
            }
        }
    }

    best
}

/// The nearest cylinder hit by `ray`, if any.
pub fn pick<'a>(ray: &Ray, shapes: impl IntoIterator<Item = &'a Cylinder>) -> Option<CakeId> {
    let hit = shapes
        .into_iter()
        .filter_map(|cyl| ray_cylinder(ray, cyl).map(|t| (cyl.id, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((id, t)) = hit {
        tracing::trace!("ray hit cake {id} at t={t:.3}");
    }
    hit.map(|(id, _)| id)
}
