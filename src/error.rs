use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Per-vertex attribute streams referenced by a mesh corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::TexCoord => "texcoord",
        };
        f.write_str(name)
    }
}

/// Errors raised while turning raw mesh data into an interleaved buffer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("malformed mesh: {corners} corners is not a multiple of 3")]
    NotTriangulated { corners: usize },

    #[error("malformed mesh: no {0} data")]
    MissingAttribute(AttributeKind),

    #[error(
        "malformed mesh: triangle {triangle} corner {corner} has {attribute} index {index}, but only {len} are available"
    )]
    IndexOutOfBounds {
        triangle: usize,
        corner: usize,
        attribute: AttributeKind,
        index: usize,
        len: usize,
    },

    #[error("malformed mesh: {tangents} tangent frames for {corners} corners")]
    TangentStreamMismatch { corners: usize, tangents: usize },

    #[error("degenerate UV mapping on triangle {triangle}: texture-space determinant is zero")]
    DegenerateUv { triangle: usize },
}

impl MeshError {
    /// True for every structural problem with the input, false for a
    /// degenerate UV mapping.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, MeshError::DegenerateUv { .. })
    }

    /// Triangle the error points at, if it is tied to one.
    pub fn triangle(&self) -> Option<usize> {
        match self {
            MeshError::IndexOutOfBounds { triangle, .. } | MeshError::DegenerateUv { triangle } => {
                Some(*triangle)
            }
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to parse OBJ '{path}': {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("mesh '{name}': {source}")]
    Mesh {
        name: String,
        #[source]
        source: MeshError,
    },

    #[error("failed to load texture '{path}': {source}")]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A character in a key script that maps to no key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown key '{0}' (expected one of WASDQEF or '.')")]
pub struct UnknownKey(pub char);
