pub mod camera;
pub mod cli;
pub mod core;
pub mod light;
pub mod loaders;
pub mod material;
pub mod math;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod views;

pub use pipeline::render_views;
pub use scene::Scene;
