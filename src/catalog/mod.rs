pub mod course;
pub mod loader;
