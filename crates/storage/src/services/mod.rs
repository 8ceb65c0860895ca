pub mod claiming;
pub mod scoring;
