use glam::{DMat4, DVec3, Mat4};

/// Camera basis published to the host after every pose change: exactly the
/// arguments of a look-at call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Eye (camera) position in world space.
    pub eye: DVec3,
    /// Look-at target position.
    pub center: DVec3,
    /// Up direction vector.
    pub up: DVec3,
}

impl CameraView {
    /// Right-handed view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.center, self.up)
    }

    /// Single-precision view matrix for GPU upload.
    #[must_use]
    pub fn view_matrix_f32(&self) -> Mat4 {
        self.view_matrix().as_mat4()
    }

    /// Unit vector from the eye toward the look-at point.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        (self.center - self.eye).normalize_or_zero()
    }

    /// The nine floats of a look-at call: eye, center, up.
    #[must_use]
    pub fn to_f32_arrays(&self) -> [[f32; 3]; 3] {
        [
            self.eye.as_vec3().to_array(),
            self.center.as_vec3().to_array(),
            self.up.as_vec3().to_array(),
        ]
    }
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            eye: DVec3::Z,
            center: DVec3::ZERO,
            up: DVec3::Y,
        }
    }
}
