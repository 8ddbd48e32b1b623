use glam::Vec3;

use crate::math::{Ray, AABB};

/// World-space triangle with per-vertex shading normals. Meshes without
/// authored normals fall back to the face normal on all three corners.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub n0: Vec3,
    pub n1: Vec3,
    pub n2: Vec3,
    /// Index into the owning mesh's material slots.
    pub material_slot: u32,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material_slot: u32) -> Self {
        let n = face_normal(v0, v1, v2);
        Self {
            v0,
            v1,
            v2,
            n0: n,
            n1: n,
            n2: n,
            material_slot,
        }
    }

    pub fn with_normals(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        n0: Vec3,
        n1: Vec3,
        n2: Vec3,
        material_slot: u32,
    ) -> Self {
        Self {
            v0,
            v1,
            v2,
            n0,
            n1,
            n2,
            material_slot,
        }
    }

    pub fn bounds(&self) -> AABB {
        AABB::from_triangle(self.v0, self.v1, self.v2)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        moller_trumbore_intersect(ray, self.v0, self.v1, self.v2)
    }

    /// Barycentric interpolation of the vertex normals at a hit point.
    pub fn shading_normal(&self, hit: &Hit) -> Vec3 {
        let (u, v, w) = hit.barycentric();
        (self.n0 * w + self.n1 * u + self.n2 * v).normalize()
    }
}

fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    let n = (v1 - v0).cross(v2 - v0);
    if n.length_squared() > 0.0 {
        n.normalize()
    } else {
        // Degenerate triangle; any unit vector keeps shading finite
        Vec3::Z
    }
}

/// Result of a ray/triangle intersection test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl Hit {
    /// Barycentric coordinates (u, v, w) where w = 1 - u - v.
    pub fn barycentric(&self) -> (f32, f32, f32) {
        (self.u, self.v, 1.0 - self.u - self.v)
    }
}

/// Möller-Trumbore ray-triangle intersection.
pub fn moller_trumbore_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<Hit> {
    const EPSILON: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    if t < EPSILON {
        return None;
    }

    Some(Hit { t, u, v })
}
