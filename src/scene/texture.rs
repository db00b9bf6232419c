use crate::error::LoadError;
use image::DynamicImage;
use log::info;
use serde::Deserialize;
use std::path::Path;

/// Pixel layout of the decoded texture, matching the upload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureFormat {
    Rgb,
    #[default]
    Rgba,
}

impl TextureFormat {
    pub fn channels(&self) -> usize {
        match self {
            TextureFormat::Rgb => 3,
            TextureFormat::Rgba => 4,
        }
    }
}

/// A decoded 2D texture, tightly packed, bottom row first so that UV (0, 0)
/// addresses the first pixel as OpenGL expects.
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub pixels: Vec<u8>,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P, format: TextureFormat) -> Result<Self, LoadError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref).map_err(|source| LoadError::Texture {
            path: path_ref.to_path_buf(),
            source,
        })?;

        let texture = Self::from_image(img, format);
        info!(
            "Loaded texture: {} ({}x{}, {:?})",
            path_ref.display(),
            texture.width,
            texture.height,
            format
        );
        Ok(texture)
    }

    /// Converts an already decoded image, flipping it vertically.
    pub fn from_image(img: DynamicImage, format: TextureFormat) -> Self {
        let img = img.flipv();
        let (width, height) = (img.width(), img.height());
        let pixels = match format {
            TextureFormat::Rgb => img.into_rgb8().into_raw(),
            TextureFormat::Rgba => img.into_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Raw channel values at texel `(x, y)`, with `y = 0` the bottom row.
    pub fn texel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.format.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.pixels.get(start..start + channels)
    }
}
