//! Camera and view management.

use glam::{Mat4, Vec3};
use sculptor_core::math::Ray;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;

/// Camera for rendering.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 6.0),
            direction: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: DEFAULT_FOV_DEGREES.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Camera {
    /// Camera at `position` looking along yaw and pitch (radians).
    ///
    /// Zero yaw and pitch look down `-Z`; positive yaw turns left and positive
    /// pitch looks up.
    pub fn from_yaw_pitch(position: Vec3, yaw: f32, pitch: f32, aspect: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        let (sin_pitch, cos_pitch) = pitch.sin_cos();
        Self {
            position,
            direction: Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch),
            aspect,
            ..Self::default()
        }
    }

    /// Set the camera position.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Look at a target position.
    pub fn look_at(&mut self, target: Vec3) {
        self.direction = (target - self.position).normalize();
    }

    /// Set the aspect ratio from a viewport size in pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Ray through the center of the screen, used for picking.
    pub fn center_ray(&self) -> Ray {
        Ray::new(self.position, self.direction)
    }

    /// Get camera uniforms for GPU.
    pub fn uniforms(&self) -> CameraUniforms {
        CameraUniforms::from(self)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.direction, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    pub fn inverse_projection_matrix(&self) -> Mat4 {
        self.projection_matrix().inverse()
    }

    /// Get the view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform buffer data for GPU.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub inverse_view: [[f32; 4]; 4],
    pub inverse_projection: [[f32; 4]; 4],
    pub position: [f32; 4],
    pub direction: [f32; 4],
}

impl From<&Camera> for CameraUniforms {
    fn from(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            inverse_view: camera.inverse_view_matrix().to_cols_array_2d(),
            inverse_projection: camera.inverse_projection_matrix().to_cols_array_2d(),
            position: camera.position.extend(1.0).to_array(),
            direction: camera.direction.extend(0.0).to_array(),
        }
    }
}
