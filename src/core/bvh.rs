use glam::Vec3;

use crate::core::triangle::{Hit, Triangle};
use crate::math::{intersect_aabb, Ray, AABB};

/// Maximum primitives per leaf node before splitting
const MAX_LEAF_SIZE: usize = 4;

/// Number of SAH buckets for binned building
const SAH_BUCKETS: usize = 12;

#[derive(Clone, Debug)]
pub enum BvhNode {
    Leaf {
        bounds: AABB,
        primitive_indices: Vec<u32>,
    },
    Internal {
        bounds: AABB,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

/// Primitive trait for objects that can be inserted into the BVH
pub trait BvhPrimitive {
    fn bounds(&self) -> AABB;
    fn centroid(&self) -> Vec3 {
        self.bounds().center()
    }
}

impl BvhPrimitive for Triangle {
    fn bounds(&self) -> AABB {
        Triangle::bounds(self)
    }
}

impl BvhNode {
    /// Build using the Surface Area Heuristic. `primitives` must be non-empty.
    pub fn build<P: BvhPrimitive>(primitives: &[P]) -> Self {
        assert!(!primitives.is_empty(), "cannot build BVH over zero primitives");
        let indices: Vec<u32> = (0..primitives.len() as u32).collect();
        Self::build_recursive(primitives, indices)
    }

    fn build_recursive<P: BvhPrimitive>(primitives: &[P], mut indices: Vec<u32>) -> Self {
        let bounds = indices.iter().fold(
            primitives[indices[0] as usize].bounds(),
            |acc, &idx| acc.union(&primitives[idx as usize].bounds()),
        );

        if indices.len() <= MAX_LEAF_SIZE {
            return BvhNode::Leaf {
                bounds,
                primitive_indices: indices,
            };
        }

        let (split_axis, split_pos) = Self::find_best_split(primitives, &indices, &bounds);
        let mid = Self::partition_primitives(primitives, &mut indices, split_axis, split_pos);

        // Degenerate split (all centroids on one side): stop subdividing
        if mid == 0 || mid == indices.len() {
            return BvhNode::Leaf {
                bounds,
                primitive_indices: indices,
            };
        }

        let right_indices = indices.split_off(mid);
        let left = Box::new(Self::build_recursive(primitives, indices));
        let right = Box::new(Self::build_recursive(primitives, right_indices));

        BvhNode::Internal {
            bounds,
            left,
            right,
        }
    }

    fn find_best_split<P: BvhPrimitive>(
        primitives: &[P],
        indices: &[u32],
        bounds: &AABB,
    ) -> (usize, f32) {
        let mut best_cost = f32::INFINITY;
        let mut best_axis = 0;
        let mut best_pos = 0.0;

        for axis in 0..3 {
            let (cost, pos) = Self::evaluate_sah_axis(primitives, indices, bounds, axis);
            if cost < best_cost {
                best_cost = cost;
                best_axis = axis;
                best_pos = pos;
            }
        }

        (best_axis, best_pos)
    }

    /// Evaluate SAH cost for a given axis using binning
    fn evaluate_sah_axis<P: BvhPrimitive>(
        primitives: &[P],
        indices: &[u32],
        bounds: &AABB,
        axis: usize,
    ) -> (f32, f32) {
        let mut bucket_bounds: Vec<Option<AABB>> = vec![None; SAH_BUCKETS];
        let mut bucket_counts = vec![0usize; SAH_BUCKETS];

        let extent = bounds.max - bounds.min;
        let axis_extent = extent[axis];

        if axis_extent < 1e-6 {
            return (f32::INFINITY, 0.0);
        }

        for &idx in indices {
            let centroid = primitives[idx as usize].centroid();
            let offset = (centroid[axis] - bounds.min[axis]) / axis_extent;
            let bucket_idx = ((offset * SAH_BUCKETS as f32) as usize).min(SAH_BUCKETS - 1);

            bucket_counts[bucket_idx] += 1;
            let prim_bounds = primitives[idx as usize].bounds();
            bucket_bounds[bucket_idx] = Some(match bucket_bounds[bucket_idx] {
                Some(b) => b.union(&prim_bounds),
                None => prim_bounds,
            });
        }

        let mut best_cost = f32::INFINITY;
        let mut best_split = 0;

        for split in 1..SAH_BUCKETS {
            let (left_bounds, left_count) =
                Self::accumulate_buckets(&bucket_bounds, &bucket_counts, 0, split);
            let (right_bounds, right_count) =
                Self::accumulate_buckets(&bucket_bounds, &bucket_counts, split, SAH_BUCKETS);

            if let (Some(lb), Some(rb)) = (left_bounds, right_bounds) {
                let cost = Self::sah_cost(
                    lb.surface_area(),
                    left_count,
                    rb.surface_area(),
                    right_count,
                );

                if cost < best_cost {
                    best_cost = cost;
                    best_split = split;
                }
            }
        }

        let split_pos = bounds.min[axis] + (best_split as f32 / SAH_BUCKETS as f32) * axis_extent;

        (best_cost, split_pos)
    }

    fn accumulate_buckets(
        bucket_bounds: &[Option<AABB>],
        bucket_counts: &[usize],
        start: usize,
        end: usize,
    ) -> (Option<AABB>, usize) {
        let mut combined_bounds: Option<AABB> = None;
        let mut total_count = 0;

        for i in start..end {
            if let Some(bounds) = bucket_bounds[i] {
                combined_bounds = Some(match combined_bounds {
                    Some(b) => b.union(&bounds),
                    None => bounds,
                });
                total_count += bucket_counts[i];
            }
        }

        (combined_bounds, total_count)
    }

    fn sah_cost(left_area: f32, left_count: usize, right_area: f32, right_count: usize) -> f32 {
        const TRAVERSAL_COST: f32 = 0.125;
        const INTERSECTION_COST: f32 = 1.0;

        TRAVERSAL_COST
            + INTERSECTION_COST * (left_area * left_count as f32 + right_area * right_count as f32)
    }

    fn partition_primitives<P: BvhPrimitive>(
        primitives: &[P],
        indices: &mut [u32],
        axis: usize,
        split_pos: f32,
    ) -> usize {
        let mut left = 0;
        let mut right = indices.len();

        while left < right {
            let centroid = primitives[indices[left] as usize].centroid();
            if centroid[axis] < split_pos {
                left += 1;
            } else {
                right -= 1;
                indices.swap(left, right);
            }
        }

        left
    }

    pub fn bounds(&self) -> &AABB {
        match self {
            BvhNode::Leaf { bounds, .. } => bounds,
            BvhNode::Internal { bounds, .. } => bounds,
        }
    }

    /// Closest triangle hit along the ray, if any.
    pub fn closest_hit(&self, ray: &Ray, triangles: &[Triangle]) -> Option<(usize, Hit)> {
        let mut closest: Option<(usize, Hit)> = None;
        self.closest_hit_recursive(ray, triangles, &mut closest);
        closest
    }

    fn closest_hit_recursive(
        &self,
        ray: &Ray,
        triangles: &[Triangle],
        closest: &mut Option<(usize, Hit)>,
    ) {
        let bounds = self.bounds();
        let Some(t_box) = intersect_aabb(ray, bounds.min, bounds.max) else {
            return;
        };
        if let Some((_, hit)) = closest {
            if t_box > hit.t {
                return;
            }
        }

        match self {
            BvhNode::Leaf {
                primitive_indices, ..
            } => {
                for &idx in primitive_indices {
                    if let Some(hit) = triangles[idx as usize].intersect(ray) {
                        let better = match closest {
                            Some((_, best)) => hit.t < best.t,
                            None => true,
                        };
                        if better {
                            *closest = Some((idx as usize, hit));
                        }
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                left.closest_hit_recursive(ray, triangles, closest);
                right.closest_hit_recursive(ray, triangles, closest);
            }
        }
    }

    /// Occlusion test: true if any triangle blocks the ray before `max_t`.
    pub fn any_hit(&self, ray: &Ray, triangles: &[Triangle], max_t: f32) -> bool {
        let bounds = self.bounds();
        // Entry distance is a lower bound on any hit inside the box
        match intersect_aabb(ray, bounds.min, bounds.max) {
            Some(t_box) if t_box <= max_t => {}
            _ => return false,
        }

        match self {
            BvhNode::Leaf {
                primitive_indices, ..
            } => primitive_indices.iter().any(|&idx| {
                triangles[idx as usize]
                    .intersect(ray)
                    .is_some_and(|hit| hit.t < max_t)
            }),
            BvhNode::Internal { left, right, .. } => {
                left.any_hit(ray, triangles, max_t) || right.any_hit(ray, triangles, max_t)
            }
        }
    }
}
