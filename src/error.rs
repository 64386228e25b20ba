use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while bringing up the window, GPU and assets.
///
/// Nothing inside the frame loop produces these; grid edits and movement
/// cannot fail.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    WindowCreation(#[from] winit::error::OsError),

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to load texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid texture: {0}")]
    InvalidTexture(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
