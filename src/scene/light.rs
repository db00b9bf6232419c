use nalgebra::{Point3, Vector3};

/// Phong point light parameters as uploaded to the shader each frame.
///
/// Plain value: build it with a struct literal (or `..Default::default()`)
/// and pass it around by copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSettings {
    /// Specular exponent.
    pub specular_phong: f32,
    pub specular_strength: f32,
    pub ambient_strength: f32,
    /// Scales the diffuse and specular terms.
    pub intensity: f32,
    pub ambient_color: Vector3<f32>,
    pub light_color: Vector3<f32>,
    pub position: Point3<f32>,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            specular_phong: 10.0,
            specular_strength: 1.0,
            ambient_strength: 1.0,
            intensity: IntensityLevel::Low.intensity(),
            ambient_color: Vector3::new(1.0, 1.0, 1.0),
            light_color: Vector3::new(1.0, 1.0, 1.0),
            position: Point3::origin(),
        }
    }
}

impl LightSettings {
    /// Evaluates the Phong model at a surface point:
    /// `albedo * (ambient + intensity * (diffuse + specular))`.
    pub fn shade(
        &self,
        point: &Point3<f32>,
        normal: &Vector3<f32>,
        view_pos: &Point3<f32>,
        albedo: &Vector3<f32>,
    ) -> Vector3<f32> {
        let n = normal.normalize();
        let ambient = self.ambient_color * self.ambient_strength;

        let Some(to_light) = (self.position - point).try_normalize(1e-6) else {
            return ambient.component_mul(albedo);
        };
        let diffuse = self.light_color * n.dot(&to_light).max(0.0);

        let specular = match (view_pos - point).try_normalize(1e-6) {
            Some(to_view) => {
                let reflected = n * (2.0 * n.dot(&to_light)) - to_light;
                let spec = reflected.dot(&to_view).max(0.0).powf(self.specular_phong);
                self.light_color * (spec * self.specular_strength)
            }
            None => Vector3::zeros(),
        };

        (ambient + (diffuse + specular) * self.intensity).component_mul(albedo)
    }
}

/// Brightness steps of the submarine's headlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntensityLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl IntensityLevel {
    /// Low -> Medium -> High -> Low.
    pub fn next(self) -> Self {
        match self {
            IntensityLevel::Low => IntensityLevel::Medium,
            IntensityLevel::Medium => IntensityLevel::High,
            IntensityLevel::High => IntensityLevel::Low,
        }
    }

    pub fn intensity(self) -> f32 {
        match self {
            IntensityLevel::Low => 1.0,
            IntensityLevel::Medium => 2.0,
            IntensityLevel::High => 3.0,
        }
    }
}
