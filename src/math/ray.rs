use glam::Vec3;

/// Ray with origin and unit-length direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Slab-method ray/AABB test. Returns the entry distance, clamped to
/// zero when the ray starts inside the box, so callers can prune
/// against it as a lower bound on any hit inside.
pub fn intersect_aabb(ray: &Ray, box_min: Vec3, box_max: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Clamp near-zero components so the division stays finite
    let inv_dir = Vec3::new(
        if ray.dir.x.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.x) } else { 1.0 / ray.dir.x },
        if ray.dir.y.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.y) } else { 1.0 / ray.dir.y },
        if ray.dir.z.abs() < EPSILON { 1.0 / EPSILON.copysign(ray.dir.z) } else { 1.0 / ray.dir.z },
    );

    let t_min = (box_min - ray.origin) * inv_dir;
    let t_max = (box_max - ray.origin) * inv_dir;

    let t1 = t_min.min(t_max);
    let t2 = t_min.max(t_max);

    let t_near = t1.x.max(t1.y).max(t1.z);
    let t_far = t2.x.min(t2.y).min(t2.z);

    if t_near > t_far || t_far < 0.0 {
        return None;
    }

    Some(t_near.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0));
        let p = ray.at(3.0);
        assert_eq!(p, Vec3::new(1.0, 3.0, 0.0));
    }

    #[test]
    fn test_intersect_aabb_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        let t = t.expect("ray should hit AABB");
        assert!((t - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_intersect_aabb_miss() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(5.0, 2.0, 2.0), Vec3::new(10.0, 3.0, 3.0));
        assert!(t.is_none());
    }

    #[test]
    fn test_intersect_aabb_inside() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(0.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert_eq!(
            t,
            Some(0.0),
            "ray starting inside reports zero entry distance"
        );
    }

    #[test]
    fn test_intersect_aabb_pointing_away() {
        let ray = Ray::new(Vec3::ZERO, -Vec3::X);
        let t = intersect_aabb(&ray, Vec3::new(5.0, -1.0, -1.0), Vec3::new(10.0, 1.0, 1.0));
        assert!(t.is_none());
    }
}
