use glam::{Mat3, Quat, Vec3};

/// Link to another block, by index into the owning container's block array.
/// `None` is the on-disk -1 null link.
pub type RecordLink = Option<usize>;

pub const SUPPORTED_VERSION: u32 = 0x0400_0002;
pub const VERSION_STRING_4_0_0_2: &str = "NetImmerse File Format, Version 4.0.0.2";

#[derive(Clone, Debug)]
pub struct NifHeader {
    /// The ASCII banner line, kept verbatim so serialization is byte-exact.
    pub version_string: String,
    pub file_version: u32,
}

impl Default for NifHeader {
    fn default() -> Self {
        NifHeader {
            version_string: VERSION_STRING_4_0_0_2.to_string(),
            file_version: SUPPORTED_VERSION,
        }
    }
}

/// Row-major 3x3 rotation matrix as stored in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3x3(pub [[f32; 3]; 3]);

impl Default for Matrix3x3 {
    fn default() -> Self {
        Matrix3x3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }
}

impl Matrix3x3 {
    /// Decomposes into a uniform scale factor and a unit rotation quaternion.
    ///
    /// NIF node rotations may carry a uniform scale baked into the matrix;
    /// the scale is the cube root of the determinant and the remainder is a
    /// pure rotation.
    pub fn scale_quat(&self) -> (f32, Quat) {
        // glam is column-major; the stream is row-major.
        let m = Mat3::from_cols_array_2d(&self.0).transpose();
        let scale = m.determinant().cbrt();
        if scale.abs() < f32::EPSILON {
            return (scale, Quat::IDENTITY);
        }
        let rotation = Mat3::from_cols(m.x_axis / scale, m.y_axis / scale, m.z_axis / scale);
        (scale, Quat::from_mat3(&rotation).normalize())
    }
}

/// Transform components as stored on scene objects. Composition order is
/// fixed: scale, then rotate, then translate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NiTransform {
    pub rotation: Matrix3x3,
    pub translation: Vec3,
    pub scale: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub center: Vec3,
    pub axes: Matrix3x3,
    pub extent: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundingVolume {
    Sphere(BoundingSphere),
    Box(BoundingBox),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_decomposes_to_unit_scale_and_identity_quat() {
        let (scale, quat) = Matrix3x3::default().scale_quat();
        assert!((scale - 1.0).abs() < 1e-6);
        assert!(quat.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn scaled_rotation_splits_scale_from_quat() {
        // 90 degrees about Z, uniformly scaled by 2.
        let m = Matrix3x3([[0.0, -2.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);
        let (scale, quat) = m.scale_quat();
        assert!((scale - 2.0).abs() < 1e-5);
        let expected = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        assert!(quat.abs_diff_eq(expected, 1e-5) || quat.abs_diff_eq(-expected, 1e-5));
    }
}
