use std::sync::Arc;

use anyhow::{Context, Result};
use glam::Vec3;
use image::{Rgba, RgbaImage};
use log::debug;

use crate::core::bvh::BvhNode;
use crate::core::triangle::Triangle;
use crate::light::AreaLight;
use crate::material::Material;
use crate::math::{Pcg32, Ray};
use crate::scene::Scene;

/// Offset along the surface normal before casting shadow rays.
const SHADOW_BIAS: f32 = 1e-3;

/// Shadow rays per camera sample.
const LIGHT_SAMPLES: u32 = 4;

/// Uniform fill so faces turned away from the key light stay readable.
const AMBIENT_STRENGTH: f32 = 0.05;

/// Synchronous CPU path trace of the scene through its active camera.
/// Returns an sRGB-encoded RGBA buffer at the effective resolution.
pub fn render(scene: &Scene) -> Result<RgbaImage> {
    let camera = scene
        .camera
        .as_ref()
        .context("scene has no active camera")?;
    let settings = &scene.settings;
    let (width, height) = settings.effective_resolution();
    let aspect = width as f32 / height as f32;

    let (triangles, triangle_materials) = flatten_scene(scene);
    debug!(
        "rendering {}x{} at {} spp over {} triangle(s)",
        width,
        height,
        settings.samples,
        triangles.len()
    );

    let mut image = RgbaImage::new(width, height);

    if triangles.is_empty() {
        // Nothing to trace; the film is either fully transparent or black
        let background = if settings.film_transparent {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([0, 0, 0, 255])
        };
        for pixel in image.pixels_mut() {
            *pixel = background;
        }
        return Ok(image);
    }

    let bvh = BvhNode::build(&triangles);
    let samples = settings.samples.max(1);

    for y in 0..height {
        for x in 0..width {
            let mut rng = Pcg32::for_pixel(x, y);
            let mut color_sum = Vec3::ZERO;
            let mut hits = 0u32;

            for _ in 0..samples {
                let jx = rng.next_f32();
                let jy = rng.next_f32();
                let ndc_x = ((x as f32 + jx) / width as f32) * 2.0 - 1.0;
                let ndc_y = 1.0 - ((y as f32 + jy) / height as f32) * 2.0;

                let ray = camera.ray_through(ndc_x, ndc_y, aspect);
                if let Some((idx, hit)) = bvh.closest_hit(&ray, &triangles) {
                    let radiance = shade(
                        &ray,
                        &triangles[idx],
                        &hit,
                        &triangle_materials[idx],
                        scene.light.as_ref(),
                        &bvh,
                        &triangles,
                        &mut rng,
                    );
                    color_sum += radiance;
                    hits += 1;
                }
            }

            let pixel = if hits == 0 {
                if settings.film_transparent {
                    Rgba([0, 0, 0, 0])
                } else {
                    Rgba([0, 0, 0, 255])
                }
            } else {
                let color = if settings.film_transparent {
                    // Average over covered samples; coverage goes to alpha
                    color_sum / hits as f32
                } else {
                    // Misses contribute the black background
                    color_sum / samples as f32
                };
                let alpha = if settings.film_transparent {
                    ((hits as f32 / samples as f32) * 255.0).round() as u8
                } else {
                    255
                };
                Rgba([
                    encode_srgb(color.x),
                    encode_srgb(color.y),
                    encode_srgb(color.z),
                    alpha,
                ])
            };
            image.put_pixel(x, y, pixel);
        }
    }

    Ok(image)
}

/// Flattens every mesh into one triangle soup with the slot references
/// resolved to shared material handles.
fn flatten_scene(scene: &Scene) -> (Vec<Triangle>, Vec<Arc<Material>>) {
    let fallback = Material::neutral();

    let mut triangles = Vec::with_capacity(scene.triangle_count());
    let mut materials = Vec::with_capacity(scene.triangle_count());

    for mesh in scene.meshes() {
        for tri in &mesh.triangles {
            let material = mesh
                .materials
                .get(tri.material_slot as usize)
                .unwrap_or(&fallback);
            triangles.push(*tri);
            materials.push(Arc::clone(material));
        }
    }

    (triangles, materials)
}

#[allow(clippy::too_many_arguments)]
fn shade(
    ray: &Ray,
    triangle: &Triangle,
    hit: &crate::core::triangle::Hit,
    material: &Material,
    light: Option<&AreaLight>,
    bvh: &BvhNode,
    triangles: &[Triangle],
    rng: &mut Pcg32,
) -> Vec3 {
    let point = ray.at(hit.t);
    let mut normal = triangle.shading_normal(hit);
    // Two-sided shading: face the incoming ray
    if normal.dot(ray.dir) > 0.0 {
        normal = -normal;
    }

    let albedo = Vec3::new(
        material.base_color[0],
        material.base_color[1],
        material.base_color[2],
    );

    let mut radiance = albedo * AMBIENT_STRENGTH;

    let Some(light) = light else {
        return radiance;
    };

    let shadow_origin = point + normal * SHADOW_BIAS;
    let mut direct = Vec3::ZERO;

    for _ in 0..LIGHT_SAMPLES {
        let light_point = light.sample(rng);
        let to_light = light_point - shadow_origin;
        let dist_sq = to_light.length_squared();
        if dist_sq <= f32::EPSILON {
            continue;
        }
        let dist = dist_sq.sqrt();
        let wi = to_light / dist;

        let cos_surface = normal.dot(wi);
        let cos_light = light.normal().dot(-wi);
        if cos_surface <= 0.0 || cos_light <= 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(shadow_origin, wi);
        if bvh.any_hit(&shadow_ray, triangles, dist - SHADOW_BIAS) {
            continue;
        }

        let brdf = brdf(albedo, material.roughness, normal, -ray.dir, wi);
        // Area sampling: pdf = 1 / area
        let geometry = cos_surface * cos_light * light.area() / dist_sq;
        direct += brdf * light.radiance() * geometry;
    }

    radiance += direct / LIGHT_SAMPLES as f32;
    radiance
}

/// Diffuse/specular response blended by roughness: a Lambertian base with
/// a normalized Blinn-Phong lobe that sharpens as roughness drops.
fn brdf(albedo: Vec3, roughness: f32, normal: Vec3, wo: Vec3, wi: Vec3) -> Vec3 {
    use std::f32::consts::PI;

    let diffuse = albedo / PI;

    let half = (wo + wi).normalize_or_zero();
    let n_dot_h = normal.dot(half).max(0.0);
    let gloss = (1.0 - roughness.clamp(0.0, 1.0)).powi(2);
    let shininess = gloss * 256.0 + 1.0;
    let spec_norm = (shininess + 8.0) / (8.0 * PI);
    // Dielectric F0
    let specular = 0.04 * spec_norm * n_dot_h.powf(shininess);

    diffuse + Vec3::splat(specular * gloss)
}

fn encode_srgb(linear: f32) -> u8 {
    let l = linear.clamp(0.0, 1.0);
    let s = if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0 + 0.5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_srgb_endpoints() {
        assert_eq!(encode_srgb(0.0), 0);
        assert_eq!(encode_srgb(1.0), 255);
        assert_eq!(encode_srgb(2.0), 255, "values clamp at white");
        assert_eq!(encode_srgb(-1.0), 0, "values clamp at black");
    }

    #[test]
    fn test_encode_srgb_midtone_is_brighter_than_linear() {
        // Gamma encoding lifts midtones
        assert!(encode_srgb(0.5) > 128);
    }

    #[test]
    fn test_brdf_energy_increases_with_gloss() {
        let n = Vec3::Z;
        let wo = Vec3::new(0.0, -0.5, 1.0).normalize();
        let wi = Vec3::new(0.0, 0.5, 1.0).normalize();
        let rough = brdf(Vec3::ONE, 1.0, n, wo, wi);
        let glossy = brdf(Vec3::ONE, 0.0, n, wo, wi);
        assert!(
            glossy.x >= rough.x,
            "mirror-direction response should not shrink as roughness drops"
        );
    }
}
