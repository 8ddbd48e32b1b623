use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glam::Vec3;
use log::info;

use crate::camera::Camera;
use crate::light::AreaLight;
use crate::loaders::import_gltf;
use crate::material::Material;
use crate::renderer;
use crate::scene::Scene;
use crate::settings::RenderSettings;
use crate::views::VIEWS;

/// Initial camera location; the per-view poses replace it before the
/// first render.
pub const CAMERA_START: [f32; 3] = [0.0, -3.0, 1.5];

pub const LIGHT_POSITION: [f32; 3] = [0.0, -2.0, 2.0];
pub const LIGHT_ENERGY: f32 = 3000.0;

/// Renders the four fixed views of a model with the default settings.
/// Returns the output paths in render order.
pub fn render_views(model_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    render_views_with_settings(model_path, output_dir, RenderSettings::default())
}

/// The whole batch, start to finish: fresh scene, import, white material,
/// camera and light placement, render settings, then one synchronous
/// render per view. The first failure aborts the run; files written for
/// earlier views are left on disk.
pub fn render_views_with_settings(
    model_path: &Path,
    output_dir: &Path,
    settings: RenderSettings,
) -> Result<Vec<PathBuf>> {
    let mut scene = Scene::new();

    import_gltf(model_path, &mut scene)?;

    let white = Material::white();
    let touched = scene.assign_material(&white);
    info!("assigned {} to {} mesh object(s)", white.name, touched);

    scene.set_camera(Camera::new(Vec3::from_array(CAMERA_START)));
    scene.set_light(AreaLight::new(
        Vec3::from_array(LIGHT_POSITION),
        LIGHT_ENERGY,
    ));
    scene.settings = settings;

    let base = model_path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("model path has no usable file name")?
        .to_string();
    let extension = scene.settings.file_format.extension();

    let mut written = Vec::with_capacity(VIEWS.len());
    for view in &VIEWS {
        let camera = scene
            .camera
            .as_mut()
            .context("scene has no active camera")?;
        camera.set_pose(view.position(), view.rotation_radians());

        let image = renderer::render(&scene)
            .with_context(|| format!("render failed for view {}", view.name))?;

        let path = output_dir.join(format!("{}_{}.{}", base, view.name, extension));
        image
            .save(&path)
            .with_context(|| format!("failed to write {:?}", path))?;

        println!("Rendered: {}", path.display());
        written.push(path);
    }

    Ok(written)
}
