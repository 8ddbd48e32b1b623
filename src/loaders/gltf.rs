use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use glam::{Mat3, Mat4, Vec3};
use log::{debug, info, warn};

use crate::core::triangle::Triangle;
use crate::material::Material;
use crate::scene::{Mesh, ObjectData, Scene, SceneObject};

/// Imports a glTF/GLB file into the scene, one object per node.
///
/// glTF is Y-up; the scene and the view table are Z-up, so the whole
/// import is rotated +90 degrees about X at the root. Mesh geometry is
/// flattened into world space, and glTF materials become the meshes'
/// material slots.
pub fn import_gltf(path: impl AsRef<Path>, scene: &mut Scene) -> Result<()> {
    let path = path.as_ref();
    info!("importing glTF file: {:?}", path);

    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("failed to import glTF file: {:?}", path))?;

    debug!(
        "glTF contents: {} scene(s), {} node(s), {} mesh(es), {} material(s)",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.materials().count()
    );

    let materials: Vec<Arc<Material>> = document.materials().map(convert_material).collect();

    // Y-up to Z-up
    let root = Mat4::from_rotation_x(std::f32::consts::FRAC_PI_2);

    let before = scene.objects.len();
    for gltf_scene in document.scenes() {
        for node in gltf_scene.nodes() {
            process_node(&node, &buffers, &materials, &root, scene)?;
        }
    }

    let imported = scene.objects.len() - before;
    if scene.meshes().next().is_none() {
        warn!("no mesh geometry found in {:?}", path);
    }
    info!(
        "imported {} object(s), {} triangle(s)",
        imported,
        scene.triangle_count()
    );

    Ok(())
}

fn convert_material(material: gltf::Material) -> Arc<Material> {
    let pbr = material.pbr_metallic_roughness();
    Arc::new(Material::new(
        material.name().unwrap_or("imported"),
        pbr.base_color_factor(),
        pbr.roughness_factor(),
    ))
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    materials: &[Arc<Material>],
    parent_transform: &Mat4,
    scene: &mut Scene,
) -> Result<()> {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global = *parent_transform * local;

    let name = node.name().unwrap_or("Node").to_string();

    if let Some(mesh) = node.mesh() {
        let mesh = build_mesh(&mesh, buffers, materials, &global)
            .with_context(|| format!("failed to read mesh for node {:?}", name))?;
        scene.add_object(SceneObject::new(name, ObjectData::Mesh(mesh)));
    } else {
        // Grouping nodes, cameras and punctual lights import as empties
        scene.add_object(SceneObject::new(name, ObjectData::Empty));
    }

    for child in node.children() {
        process_node(&child, buffers, materials, &global, scene)?;
    }

    Ok(())
}

/// Marker for triangles of a primitive that carries no glTF material.
const BARE_PRIMITIVE: u32 = u32::MAX;

fn build_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    materials: &[Arc<Material>],
    transform: &Mat4,
) -> Result<Mesh> {
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    let mut triangles = Vec::new();
    let mut slots: Vec<Arc<Material>> = Vec::new();

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions = reader
            .read_positions()
            .context("mesh primitive has no positions")?;
        let vertices: Vec<Vec3> = positions
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();

        let normals: Option<Vec<Vec3>> = reader.read_normals().map(|iter| {
            iter.map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect()
        });

        // Slots list the primitive materials in first-use order. A
        // primitive without a material is marked and resolved below, once
        // the mesh's other slots are known.
        let slot = match primitive.material().index() {
            Some(doc_index) => {
                let material = &materials[doc_index];
                match slots.iter().position(|m| Arc::ptr_eq(m, material)) {
                    Some(existing) => existing as u32,
                    None => {
                        slots.push(Arc::clone(material));
                        (slots.len() - 1) as u32
                    }
                }
            }
            None => BARE_PRIMITIVE,
        };

        let mut emit = |i0: usize, i1: usize, i2: usize| {
            let tri = match &normals {
                Some(ns) => Triangle::with_normals(
                    vertices[i0],
                    vertices[i1],
                    vertices[i2],
                    ns[i0],
                    ns[i1],
                    ns[i2],
                    slot,
                ),
                None => Triangle::new(vertices[i0], vertices[i1], vertices[i2], slot),
            };
            triangles.push(tri);
        };

        if let Some(indices) = reader.read_indices() {
            let indices: Vec<u32> = indices.into_u32().collect();
            for tri in indices.chunks(3) {
                if tri.len() == 3 {
                    emit(tri[0] as usize, tri[1] as usize, tri[2] as usize);
                }
            }
        } else {
            for start in (0..vertices.len()).step_by(3) {
                if start + 2 < vertices.len() {
                    emit(start, start + 1, start + 2);
                }
            }
        }
    }

    // Bare primitives in a slotless mesh keep the mesh slotless (slot 0 is
    // whatever gets assigned later); next to materialled primitives they
    // get their own neutral slot rather than aliasing another primitive's
    // material.
    if triangles
        .iter()
        .any(|t| t.material_slot == BARE_PRIMITIVE)
    {
        let bare_slot = if slots.is_empty() {
            0
        } else {
            slots.push(Material::neutral());
            (slots.len() - 1) as u32
        };
        for tri in &mut triangles {
            if tri.material_slot == BARE_PRIMITIVE {
                tri.material_slot = bare_slot;
            }
        }
    }

    Ok(Mesh::new(triangles, slots))
}
