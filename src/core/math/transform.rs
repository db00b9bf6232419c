use nalgebra::{Matrix4, Point3, Vector3};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the matrices the scene hands to the renderer.
/// Right-handed, OpenGL clip space (z in [-1, 1]), column vectors.
pub struct TransformFactory;

impl TransformFactory {
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        Matrix4::from_axis_angle(&Vector3::x_axis(), angle_rad)
    }

    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        Matrix4::from_axis_angle(&Vector3::y_axis(), angle_rad)
    }

    pub fn rotation_z(angle_rad: f32) -> Matrix4<f32> {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle_rad)
    }

    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(translation)
    }

    pub fn scaling(scale: f32) -> Matrix4<f32> {
        Matrix4::new_scaling(scale)
    }

    /// Object-to-world matrix: translate, then uniform scale, then rotate
    /// about X, Y and Z (degrees), applied right to left to the vertex.
    pub fn model(
        position: &Vector3<f32>,
        rotation_deg: &Vector3<f32>,
        scale: f32,
    ) -> Matrix4<f32> {
        Self::translation(position)
            * Self::scaling(scale)
            * Self::rotation_x(rotation_deg.x.to_radians())
            * Self::rotation_y(rotation_deg.y.to_radians())
            * Self::rotation_z(rotation_deg.z.to_radians())
    }

    /// Look-at view matrix; the camera looks down its local -Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::look_at_rh(eye, target, up)
    }

    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        Matrix4::new_perspective(aspect_ratio, fov_y_rad, near, far)
    }

    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix4<f32> {
        Matrix4::new_orthographic(left, right, bottom, top, near, far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn assert_point_eq(actual: Point3<f32>, expected: Point3<f32>) {
        assert!(
            (actual - expected).norm() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn model_scales_before_translating() {
        let m = TransformFactory::model(&Vector3::new(1.0, 2.0, 3.0), &Vector3::zeros(), 2.0);
        assert_point_eq(
            m.transform_point(&Point3::new(1.0, 0.0, 0.0)),
            Point3::new(3.0, 2.0, 3.0),
        );
    }

    #[test]
    fn model_rotates_about_y_in_degrees() {
        let m = TransformFactory::model(&Vector3::zeros(), &Vector3::new(0.0, 90.0, 0.0), 1.0);
        assert_point_eq(
            m.transform_point(&Point3::new(1.0, 0.0, 0.0)),
            Point3::new(0.0, 0.0, -1.0),
        );
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(0.0, 5.0, 5.0);
        let v = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        assert_point_eq(v.transform_point(&eye), Point3::origin());
        // The target sits straight ahead, on -Z.
        let target = v.transform_point(&Point3::origin());
        assert!(target.x.abs() < 1e-5 && target.y.abs() < 1e-5 && target.z < 0.0);
    }

    #[test]
    fn orthographic_maps_box_to_ndc_cube() {
        let p = TransformFactory::orthographic(-2.0, 2.0, -1.0, 1.0, 0.1, 10.0);
        assert_point_eq(
            p.transform_point(&Point3::new(2.0, 1.0, -10.0)),
            Point3::new(1.0, 1.0, 1.0),
        );
    }
}
