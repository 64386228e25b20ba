// VIEW: GPU setup, assets and drawing
pub mod gpu_init;
pub mod mesh;
pub mod texture;
pub mod render;

pub use gpu_init::GpuContext;
pub use render::Renderer;
pub use texture::{BlockTexture, PixelBuffer};
