use std::env;
use std::path::PathBuf;

/// Environment variable that overrides [`AppConfig::texture_path`].
pub const TEXTURE_ENV: &str = "BLOCKWORLD_TEXTURE";

/// Compiled-in application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub texture_path: PathBuf,
    /// World units per frame while a movement key is held.
    pub move_speed: f32,
    /// Degrees of rotation per pointer unit.
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Half-width of the startup platform, in blocks.
    pub platform_radius: i32,
    pub platform_y: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Simple Block World".to_string(),
            width: 800,
            height: 600,
            texture_path: PathBuf::from("assets/block.png"),
            move_speed: 0.05,
            mouse_sensitivity: 0.1,
            fov_y: 70.0,
            platform_radius: 5,
            platform_y: -1,
        }
    }
}

impl AppConfig {
    /// Defaults, with the texture path taken from `BLOCKWORLD_TEXTURE` when set.
    pub fn from_env() -> Self {
        Self::default().with_texture_override(env::var(TEXTURE_ENV).ok())
    }

    fn with_texture_override(mut self, path: Option<String>) -> Self {
        if let Some(path) = path.filter(|p| !p.trim().is_empty()) {
            self.texture_path = PathBuf::from(path);
        }
        self
    }
}
