use crate::core::math::transform::TransformFactory;
use crate::scene::player::Player;
use crate::ui::input::Key;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Distance the top-down view pans per key press.
pub const PAN_SPEED: f32 = 0.1;

/// Which camera the scene is viewed through. Chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    TopDown,
    FirstPerson,
    ThirdPerson,
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CameraMode::TopDown => "top_down",
            CameraMode::FirstPerson => "first_person",
            CameraMode::ThirdPerson => "third_person",
        };
        f.write_str(name)
    }
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top_down" | "td" => Ok(CameraMode::TopDown),
            "first_person" | "fps" => Ok(CameraMode::FirstPerson),
            "third_person" | "tps" => Ok(CameraMode::ThirdPerson),
            _ => Err(format!(
                "unknown camera mode '{s}' (expected top_down, first_person or third_person)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    /// Near and far planes are fixed at 0.1 and 100.
    pub fn new(fov_deg: f32, aspect_ratio: f32) -> Self {
        Self {
            fov_y_rad: fov_deg.to_radians(),
            aspect_ratio,
            near: 0.1,
            far: 100.0,
        }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orthographic {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Orthographic {
    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::orthographic(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionType {
    Perspective(Perspective),
    Orthographic(Orthographic),
}

impl ProjectionType {
    pub fn matrix(&self) -> Matrix4<f32> {
        match self {
            ProjectionType::Perspective(p) => p.matrix(),
            ProjectionType::Orthographic(o) => o.matrix(),
        }
    }
}

/// Eye, target and world up of a look-at view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAt {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl LookAt {
    fn new(eye: Point3<f32>, target: Point3<f32>, up: Vector3<f32>) -> Self {
        Self { eye, target, up }
    }

    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::view(&self.eye, &self.target, &self.up)
    }
}

/// The scene camera. Each variant carries only the state its mode uses.
#[derive(Debug, Clone)]
pub enum Camera {
    /// Orthographic, hovering at a fixed height above the player. WASD pans
    /// the view until the next [`Camera::follow`].
    TopDown {
        look: LookAt,
        /// Offset from the eye to the point it looks at.
        forward: Vector3<f32>,
        pan: Vector3<f32>,
        projection: Orthographic,
    },
    /// Perspective, from the submarine's bridge along its heading.
    FirstPerson {
        look: LookAt,
        projection: Perspective,
    },
    /// Perspective, trailing the submarine at a fixed offset.
    ThirdPerson {
        look: LookAt,
        forward: Vector3<f32>,
        projection: Perspective,
    },
}

impl Camera {
    pub fn new_top_down(
        forward: Vector3<f32>,
        up: Vector3<f32>,
        bounds: [f32; 4],
        near: f32,
        far: f32,
    ) -> Self {
        let [left, right, bottom, top] = bounds;
        let target = Point3::origin();
        Camera::TopDown {
            look: LookAt::new(target - forward, target, up),
            forward,
            pan: Vector3::zeros(),
            projection: Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            },
        }
    }

    pub fn new_first_person(up: Vector3<f32>, fov_deg: f32, aspect_ratio: f32) -> Self {
        let eye = Point3::origin();
        Camera::FirstPerson {
            look: LookAt::new(eye, eye + Vector3::x(), up),
            projection: Perspective::new(fov_deg, aspect_ratio),
        }
    }

    pub fn new_third_person(
        forward: Vector3<f32>,
        up: Vector3<f32>,
        fov_deg: f32,
        aspect_ratio: f32,
    ) -> Self {
        let target = Point3::origin();
        Camera::ThirdPerson {
            look: LookAt::new(target - forward, target, up),
            forward,
            projection: Perspective::new(fov_deg, aspect_ratio),
        }
    }

    pub fn mode(&self) -> CameraMode {
        match self {
            Camera::TopDown { .. } => CameraMode::TopDown,
            Camera::FirstPerson { .. } => CameraMode::FirstPerson,
            Camera::ThirdPerson { .. } => CameraMode::ThirdPerson,
        }
    }

    /// Look-at parameters, panning excluded.
    pub fn look(&self) -> &LookAt {
        match self {
            Camera::TopDown { look, .. }
            | Camera::FirstPerson { look, .. }
            | Camera::ThirdPerson { look, .. } => look,
        }
    }

    pub fn projection(&self) -> ProjectionType {
        match self {
            Camera::TopDown { projection, .. } => ProjectionType::Orthographic(*projection),
            Camera::FirstPerson { projection, .. } | Camera::ThirdPerson { projection, .. } => {
                ProjectionType::Perspective(*projection)
            }
        }
    }

    /// Re-centers the camera on the player after it moved.
    pub fn follow(&mut self, player: &Player) {
        let center = player.position();
        match self {
            Camera::TopDown {
                look, forward, pan, ..
            } => {
                look.target = center;
                look.eye = center - *forward;
                look.eye.y = -forward.y;
                *pan = Vector3::zeros();
            }
            Camera::ThirdPerson { look, forward, .. } => {
                look.target = center;
                look.eye = center - *forward;
            }
            Camera::FirstPerson { look, .. } => {
                look.eye = center;
                look.target = center + player.heading();
            }
        }
    }

    /// Only the top-down camera reacts to keys: WASD pans the view.
    pub fn handle_key(&mut self, key: Key) {
        let Camera::TopDown {
            look, forward, pan, ..
        } = self
        else {
            return;
        };

        let right = (look.up.cross(&*forward) / forward.dot(&*forward))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        match key {
            Key::W => *pan -= look.up * PAN_SPEED,
            Key::S => *pan += look.up * PAN_SPEED,
            Key::A => *pan -= right * PAN_SPEED,
            Key::D => *pan += right * PAN_SPEED,
            _ => {}
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        match self {
            Camera::TopDown { look, pan, .. } => {
                look.matrix() * TransformFactory::translation(pan)
            }
            Camera::FirstPerson { look, .. } | Camera::ThirdPerson { look, .. } => look.matrix(),
        }
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().matrix()
    }

    /// Eye position in world space, panning included.
    pub fn eye(&self) -> Point3<f32> {
        match self {
            Camera::TopDown { look, pan, .. } => look.eye - pan,
            Camera::FirstPerson { look, .. } | Camera::ThirdPerson { look, .. } => look.eye,
        }
    }
}
