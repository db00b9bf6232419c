use crate::error::ConfigError;
use crate::scene::camera::CameraMode;
use crate::scene::texture::TextureFormat;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub mesh: MeshConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub player: ObjectConfig,
    #[serde(default = "default_enemies")]
    pub enemies: Vec<ObjectConfig>,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            mesh: MeshConfig::default(),
            light: LightConfig::default(),
            player: ObjectConfig::default(),
            enemies: default_enemies(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Two mines around the starting position. An explicit `enemies = []`
/// clears them.
fn default_enemies() -> Vec<ObjectConfig> {
    vec![
        ObjectConfig {
            path: "assets/mine.obj".to_string(),
            position: [4.0, -3.0, -2.0],
            rotation: [0.0, 45.0, 0.0],
            scale: 0.5,
            ..ObjectConfig::default()
        },
        ObjectConfig {
            path: "assets/mine.obj".to_string(),
            position: [-3.0, -6.0, 4.0],
            rotation: [30.0, 0.0, 0.0],
            scale: 0.8,
            ..ObjectConfig::default()
        },
    ]
}

// --- Window ---

/// Only the aspect ratio matters here; the window itself belongs to the host.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}

// --- Camera ---

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default)]
    pub mode: CameraMode,
    #[serde(default = "default_fov")]
    pub fov: f32,
    /// Eye-to-target offset. Defaults depend on the mode.
    #[serde(default)]
    pub forward: Option<[f32; 3]>,
    #[serde(default)]
    pub up: Option<[f32; 3]>,
    /// Orthographic bounds: left, right, bottom, top.
    #[serde(default = "default_ortho_bounds")]
    pub ortho_bounds: [f32; 4],
    #[serde(default = "default_ortho_near")]
    pub ortho_near: f32,
    #[serde(default = "default_ortho_far")]
    pub ortho_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::default(),
            fov: default_fov(),
            forward: None,
            up: None,
            ortho_bounds: default_ortho_bounds(),
            ortho_near: default_ortho_near(),
            ortho_far: default_ortho_far(),
        }
    }
}

impl CameraConfig {
    pub fn forward_or_default(&self) -> [f32; 3] {
        self.forward.unwrap_or(match self.mode {
            CameraMode::TopDown => [0.0, -10.0, 0.0],
            CameraMode::ThirdPerson => [3.0, -1.0, 0.0],
            CameraMode::FirstPerson => [1.0, 0.0, 0.0],
        })
    }

    /// Looking straight down, "up" on screen is -Z.
    pub fn up_or_default(&self) -> [f32; 3] {
        self.up.unwrap_or(match self.mode {
            CameraMode::TopDown => [0.0, 0.0, -1.0],
            _ => [0.0, 1.0, 0.0],
        })
    }
}

fn default_fov() -> f32 {
    60.0
}
fn default_ortho_bounds() -> [f32; 4] {
    [-8.0, 8.0, -4.5, 4.5]
}
fn default_ortho_near() -> f32 {
    0.1
}
fn default_ortho_far() -> f32 {
    100.0
}

// --- Mesh ---

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeshConfig {
    /// Gram-Schmidt the per-face tangent frames against each corner normal.
    #[serde(default)]
    pub orthogonalize_tangents: bool,
}

// --- Light ---

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_specular_phong")]
    pub specular_phong: f32,
    #[serde(default = "default_one")]
    pub specular_strength: f32,
    #[serde(default = "default_one")]
    pub ambient_strength: f32,
    #[serde(default = "default_white")]
    pub ambient_color: [f32; 3],
    #[serde(default = "default_white")]
    pub light_color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            specular_phong: default_specular_phong(),
            specular_strength: default_one(),
            ambient_strength: default_one(),
            ambient_color: default_white(),
            light_color: default_white(),
        }
    }
}

fn default_specular_phong() -> f32 {
    10.0
}
fn default_one() -> f32 {
    1.0
}
fn default_white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

// --- Objects ---

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    pub path: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Degrees around X, Y and Z.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_one")]
    pub scale: f32,

    // --- Textures ---
    pub texture: Option<String>,
    pub normal_texture: Option<String>,
    #[serde(default)]
    pub texture_format: TextureFormat,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            path: "assets/submarine.obj".to_string(),
            position: [0.0, -1.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: 1.0,
            texture: None,
            normal_texture: None,
            texture_format: TextureFormat::default(),
        }
    }
}

// --- Input / Output ---

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Seconds between two replayed key presses.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    #[serde(default)]
    pub script: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            frame_time: default_frame_time(),
            script: String::new(),
        }
    }
}

fn default_frame_time() -> f32 {
    1.0 / 60.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_true")]
    pub export_buffers: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            export_buffers: true,
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}
fn default_true() -> bool {
    true
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("size {}x{} is empty", self.window.width, self.window.height),
            });
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov",
                reason: format!("{} is outside (0, 180) degrees", self.camera.fov),
            });
        }
        if self.camera.forward_or_default() == [0.0; 3] {
            return Err(ConfigError::Invalid {
                field: "camera.forward",
                reason: "must not be the zero vector".to_string(),
            });
        }
        let [left, right, bottom, top] = self.camera.ortho_bounds;
        if left >= right || bottom >= top || self.camera.ortho_near >= self.camera.ortho_far {
            return Err(ConfigError::Invalid {
                field: "camera.ortho_bounds",
                reason: "orthographic volume is empty".to_string(),
            });
        }
        if self.input.frame_time <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "input.frame_time",
                reason: format!("{} must be positive", self.input.frame_time),
            });
        }
        Ok(())
    }
}
