use std::sync::Arc;

pub const WHITE_BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const WHITE_ROUGHNESS: f32 = 0.7;

/// Physically based shading parameters: base color and roughness.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub roughness: f32,
}

impl Material {
    pub fn new(name: impl Into<String>, base_color: [f32; 4], roughness: f32) -> Self {
        Self {
            name: name.into(),
            base_color,
            roughness,
        }
    }

    /// The flat white studio material applied to every imported mesh.
    pub fn white() -> Arc<Material> {
        Arc::new(Material::new(
            "WhiteMaterial",
            WHITE_BASE_COLOR,
            WHITE_ROUGHNESS,
        ))
    }

    /// Neutral gray stand-in for geometry that has no material of its own.
    pub fn neutral() -> Arc<Material> {
        Arc::new(Material::new("Default", [0.8, 0.8, 0.8, 1.0], 0.5))
    }
}
