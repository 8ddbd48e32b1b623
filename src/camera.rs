use glam::{EulerRot, Mat3, Vec3};

use crate::math::Ray;

pub const DEFAULT_ORTHO_SCALE: f32 = 2.5;

/// Orthographic render camera.
///
/// Conventions follow the content-creation world the view table was
/// authored in: Z-up, the camera looks along its local -Z with local +Y
/// as up, and `rotation` is an Euler XYZ triple in radians (X applied
/// first, then Y, then Z, all about world axes). `ortho_scale` is the
/// world-space width of the visible viewport, independent of distance.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub ortho_scale: f32,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            ortho_scale: DEFAULT_ORTHO_SCALE,
        }
    }

    pub fn set_pose(&mut self, position: Vec3, rotation: Vec3) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Camera basis vectors (right, up, forward) in world space.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        // Extrinsic XYZ order is Rz * Ry * Rx
        let m = Mat3::from_euler(
            EulerRot::ZYX,
            self.rotation.z,
            self.rotation.y,
            self.rotation.x,
        );
        let right = m * Vec3::X;
        let up = m * Vec3::Y;
        let forward = m * Vec3::NEG_Z;
        (right, up, forward)
    }

    /// Parallel ray through normalized device coordinates in [-1, 1].
    /// `aspect` is width / height; the ortho scale spans the larger axis.
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32, aspect: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let (half_w, half_h) = if aspect >= 1.0 {
            (self.ortho_scale * 0.5, self.ortho_scale * 0.5 / aspect)
        } else {
            (self.ortho_scale * 0.5 * aspect, self.ortho_scale * 0.5)
        };
        let origin = self.position + right * (ndc_x * half_w) + up * (ndc_y * half_h);
        Ray::new(origin, forward)
    }
}
