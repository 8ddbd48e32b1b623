use std::sync::Arc;

use crate::camera::Camera;
use crate::core::triangle::Triangle;
use crate::light::AreaLight;
use crate::material::Material;
use crate::settings::RenderSettings;

/// Mesh geometry plus its material slots. Triangles reference slots by
/// index; slots hold shared material handles.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub materials: Vec<Arc<Material>>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>, materials: Vec<Arc<Material>>) -> Self {
        Self {
            triangles,
            materials,
        }
    }
}

/// Payload of a scene object. Importers can produce nodes that carry no
/// geometry (grouping nodes, cameras, lights); those come through as
/// empties and are ignored by mesh-only operations.
#[derive(Debug, Clone)]
pub enum ObjectData {
    Mesh(Mesh),
    Empty,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn is_mesh(&self) -> bool {
        matches!(self.data, ObjectData::Mesh(_))
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Empty => None,
        }
    }

    pub fn mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            ObjectData::Empty => None,
        }
    }
}

/// Owned scene context threaded through every pipeline step. Creating a
/// new one is the "reset to empty" operation; nothing is process-global.
#[derive(Debug, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    /// The render camera. At most one exists for the whole run.
    pub camera: Option<Camera>,
    /// The key light. At most one exists and it is never repositioned.
    pub light: Option<AreaLight>,
    pub settings: RenderSettings,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    pub fn set_light(&mut self, light: AreaLight) {
        self.light = Some(light);
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.objects.iter().filter_map(|o| o.mesh())
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes().map(|m| m.triangles.len()).sum()
    }

    /// Assigns `material` to every mesh object: the first slot is
    /// overwritten when the mesh already has slots, otherwise the material
    /// is appended as a new slot. Additional slots are left untouched and
    /// non-mesh objects are skipped. Returns the number of meshes touched.
    pub fn assign_material(&mut self, material: &Arc<Material>) -> usize {
        let mut touched = 0;
        for object in &mut self.objects {
            if let Some(mesh) = object.mesh_mut() {
                if mesh.materials.is_empty() {
                    mesh.materials.push(Arc::clone(material));
                } else {
                    mesh.materials[0] = Arc::clone(material);
                }
                touched += 1;
            }
        }
        touched
    }
}
