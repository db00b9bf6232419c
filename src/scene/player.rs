use crate::scene::light::{IntensityLevel, LightSettings};
use crate::scene::scene_object::SceneObject;
use crate::ui::input::Key;
use log::debug;
use nalgebra::{Point3, Vector3};

pub const MOVE_SPEED: f32 = 0.3;
pub const CLIMB_SPEED: f32 = 0.3;
/// Degrees of yaw per key press.
pub const TURN_SPEED: f32 = 2.0;
/// Seconds between two headlight intensity changes.
pub const LIGHT_TOGGLE_COOLDOWN: f32 = 0.2;
/// The headlight sits this far towards -Z from the hull center, plus one
/// unit along the heading.
pub const LIGHT_Z_OFFSET: f32 = 0.8;
/// The sub may only climb while it stays this far below the surface (y = 0).
const SURFACE_MARGIN: f32 = 0.1;

/// The player-controlled submarine and its headlight.
#[derive(Debug, Clone)]
pub struct Player {
    pub object: SceneObject,
    front: Vector3<f32>,
    level: IntensityLevel,
    last_light_toggle: Option<f32>,
    light_template: LightSettings,
}

impl Player {
    pub fn new(object: SceneObject, light_template: LightSettings) -> Self {
        let mut player = Self {
            object,
            front: Vector3::x(),
            level: IntensityLevel::default(),
            last_light_toggle: None,
            light_template,
        };
        player.update_front();
        player
    }

    /// Applies one key press. `now` is the time in seconds, used for the
    /// headlight cooldown.
    pub fn handle_key(&mut self, key: Key, now: f32) {
        let heading = self.heading();
        let t = &mut self.object.transform;
        match key {
            Key::W => t.position += heading * MOVE_SPEED,
            Key::S => t.position -= heading * MOVE_SPEED,
            Key::Q => {
                if t.position.y + SURFACE_MARGIN <= 0.0 {
                    t.position.y += CLIMB_SPEED;
                }
            }
            Key::E => t.position.y -= CLIMB_SPEED,
            Key::A => t.rotation.y += TURN_SPEED,
            Key::D => t.rotation.y -= TURN_SPEED,
            Key::F => {
                let ready = self
                    .last_light_toggle
                    .is_none_or(|last| now - last > LIGHT_TOGGLE_COOLDOWN);
                if ready {
                    self.level = self.level.next();
                    self.last_light_toggle = Some(now);
                    debug!("Headlight intensity: {:?}", self.level);
                }
            }
        }

        self.update_front();
    }

    fn update_front(&mut self) {
        let yaw = self.object.transform.rotation.y;
        // cos(90°) is not exactly zero in f32.
        self.front = if yaw == 90.0 {
            Vector3::z()
        } else {
            let rad = yaw.to_radians();
            Vector3::new(rad.cos(), 0.0, rad.sin()).normalize()
        };
    }

    /// `(cos yaw, 0, sin yaw)`. Anchors the headlight.
    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    /// Unit direction the hull's nose points and `W` moves along: `front`
    /// with Z mirrored, matching a rotation of +X by `yaw` about Y.
    pub fn heading(&self) -> Vector3<f32> {
        Vector3::new(self.front.x, 0.0, -self.front.z)
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.object.transform.position)
    }

    /// Depth below the surface is the (negative) y coordinate.
    pub fn depth(&self) -> f32 {
        self.object.transform.position.y
    }

    pub fn intensity_level(&self) -> IntensityLevel {
        self.level
    }

    pub fn light_position(&self) -> Point3<f32> {
        let mut pos = self.position() + self.front;
        pos.z -= LIGHT_Z_OFFSET;
        pos
    }

    /// Headlight for the current frame.
    pub fn light(&self) -> LightSettings {
        LightSettings {
            intensity: self.level.intensity(),
            position: self.light_position(),
            ..self.light_template
        }
    }
}
