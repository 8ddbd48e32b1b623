use glam::Vec3;

/// A named fixed camera placement: position plus Euler XYZ rotation in
/// degrees.
#[derive(Debug, Clone, Copy)]
pub struct ViewSpec {
    pub name: &'static str,
    pub position: [f32; 3],
    pub rotation_deg: [f32; 3],
}

impl ViewSpec {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation_radians(&self) -> Vec3 {
        Vec3::new(
            self.rotation_deg[0].to_radians(),
            self.rotation_deg[1].to_radians(),
            self.rotation_deg[2].to_radians(),
        )
    }
}

/// The four product-shot views, rendered in this order.
pub const VIEWS: [ViewSpec; 4] = [
    ViewSpec {
        name: "Front",
        position: [0.0, -3.0, 1.5],
        rotation_deg: [90.0, 0.0, 0.0],
    },
    ViewSpec {
        name: "Back",
        position: [0.0, 3.0, 1.5],
        rotation_deg: [90.0, 0.0, 180.0],
    },
    ViewSpec {
        name: "Left",
        position: [-3.0, 0.0, 1.5],
        rotation_deg: [90.0, 0.0, 90.0],
    },
    ViewSpec {
        name: "Right",
        position: [3.0, 0.0, 1.5],
        rotation_deg: [90.0, 0.0, -90.0],
    },
];
