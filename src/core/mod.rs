pub mod bvh;
pub mod triangle;
