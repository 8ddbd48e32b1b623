use std::sync::Arc;

use glam::Vec3;

use orthoshot::camera::Camera;
use orthoshot::core::triangle::Triangle;
use orthoshot::light::AreaLight;
use orthoshot::material::Material;
use orthoshot::renderer;
use orthoshot::scene::{Mesh, ObjectData, Scene, SceneObject};
use orthoshot::settings::RenderSettings;
use orthoshot::views::VIEWS;

fn small_settings() -> RenderSettings {
    RenderSettings {
        resolution_x: 64,
        resolution_y: 64,
        samples: 4,
        ..Default::default()
    }
}

/// A 1x1 quad at y=0 centered on (0, 0, 1.5), squarely in front of the
/// Front view camera.
fn front_facing_quad() -> Mesh {
    let v = [
        Vec3::new(-0.5, 0.0, 1.0),
        Vec3::new(0.5, 0.0, 1.0),
        Vec3::new(0.5, 0.0, 2.0),
        Vec3::new(-0.5, 0.0, 2.0),
    ];
    Mesh::new(
        vec![
            Triangle::new(v[0], v[1], v[2], 0),
            Triangle::new(v[0], v[2], v[3], 0),
        ],
        vec![Material::white()],
    )
}

fn test_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("quad", ObjectData::Mesh(front_facing_quad())));

    let mut camera = Camera::new(Vec3::new(0.0, -3.0, 1.5));
    let front = &VIEWS[0];
    camera.set_pose(front.position(), front.rotation_radians());
    scene.set_camera(camera);

    scene.set_light(AreaLight::new(Vec3::new(0.0, -2.0, 2.0), 3000.0));
    scene.settings = small_settings();
    scene
}

#[test]
fn test_render_dimensions_match_settings() {
    let scene = test_scene();
    let image = renderer::render(&scene).expect("render should succeed");
    assert_eq!(image.dimensions(), (64, 64));
}

#[test]
fn test_geometry_is_opaque_and_background_transparent() {
    let scene = test_scene();
    let image = renderer::render(&scene).expect("render should succeed");

    let center = image.get_pixel(32, 32);
    assert_eq!(center.0[3], 255, "quad covers the image center");
    assert!(
        center.0[0] > 0,
        "lit white material should not render black"
    );

    let corner = image.get_pixel(0, 0);
    assert_eq!(corner.0[3], 0, "background must be fully transparent");
}

#[test]
fn test_opaque_film_fills_background() {
    let mut scene = test_scene();
    scene.settings.film_transparent = false;
    let image = renderer::render(&scene).expect("render should succeed");

    let corner = image.get_pixel(0, 0);
    assert_eq!(corner.0[3], 255);
    assert_eq!(&corner.0[0..3], &[0, 0, 0], "opaque film is black where nothing renders");
}

#[test]
fn test_render_is_deterministic() {
    let scene = test_scene();
    let a = renderer::render(&scene).expect("render should succeed");
    let b = renderer::render(&scene).expect("render should succeed");
    assert_eq!(a.as_raw(), b.as_raw(), "identical runs must produce identical pixels");
}

#[test]
fn test_empty_scene_renders_transparent_film() {
    let mut scene = Scene::new();
    scene.set_camera(Camera::new(Vec3::new(0.0, -3.0, 1.5)));
    scene.settings = small_settings();

    let image = renderer::render(&scene).expect("empty scene still renders");
    assert_eq!(image.dimensions(), (64, 64));
    assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn test_render_without_camera_fails() {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new("quad", ObjectData::Mesh(front_facing_quad())));
    scene.settings = small_settings();

    assert!(renderer::render(&scene).is_err());
}

#[test]
fn test_darker_material_renders_darker() {
    let mut scene = test_scene();
    let dark = Arc::new(Material::new("dark", [0.1, 0.1, 0.1, 1.0], 0.7));
    scene.assign_material(&dark);

    let dark_image = renderer::render(&scene).expect("render should succeed");
    let bright_image = renderer::render(&test_scene()).expect("render should succeed");

    let d = dark_image.get_pixel(32, 32);
    let b = bright_image.get_pixel(32, 32);
    assert!(
        d.0[0] < b.0[0],
        "10% gray ({}) should render darker than white ({})",
        d.0[0],
        b.0[0]
    );
}
