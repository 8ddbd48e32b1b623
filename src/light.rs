use glam::Vec3;

use crate::math::Pcg32;

pub const DEFAULT_LIGHT_SIZE: f32 = 1.0;

/// Square area light. The emitter lies in the local XY plane and radiates
/// towards -Z (downwards), giving soft shadows when sampled.
#[derive(Debug, Clone, Copy)]
pub struct AreaLight {
    pub position: Vec3,
    pub energy: f32,
    pub size: f32,
}

impl AreaLight {
    pub fn new(position: Vec3, energy: f32) -> Self {
        Self {
            position,
            energy,
            size: DEFAULT_LIGHT_SIZE,
        }
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::NEG_Z
    }

    pub fn area(&self) -> f32 {
        self.size * self.size
    }

    /// Jittered sample point on the emitter surface.
    pub fn sample(&self, rng: &mut Pcg32) -> Vec3 {
        let u = rng.next_f32() - 0.5;
        let v = rng.next_f32() - 0.5;
        self.position + Vec3::new(u * self.size, v * self.size, 0.0)
    }

    /// Emitted radiance, converting the watt-style energy value to a
    /// per-area quantity.
    pub fn radiance(&self) -> f32 {
        self.energy / (4.0 * std::f32::consts::PI * self.area())
    }
}
