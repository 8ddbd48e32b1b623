mod gltf;

pub use gltf::import_gltf;
