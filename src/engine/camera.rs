// Look-at camera for the path viewer.
//
// Camera model:
//   - Fixed mode: eye on +Z looking at the origin, whole path in view
//   - Follow mode: eye closer on +Z, looking at the moving mesh
//   - Perspective projection with a wgpu depth range of [0, 1]

use glam::{Mat4, Vec3};
use super::config::ViewerConfig;

pub struct ViewCamera {
    pub eye: Vec3,
    pub follow_eye: Vec3,
    /// Fixed-mode look target.
    pub center: Vec3,
    pub up: Vec3,

    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,

    /// When set, the view tracks the target passed to `view_matrix`.
    pub follow: bool,
}

impl ViewCamera {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            eye: config.eye,
            follow_eye: config.follow_eye,
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov: config.fov_deg.to_radians(),
            near: config.near,
            far: config.far,
            follow: false,
        }
    }

    pub fn toggle_follow(&mut self) -> bool {
        self.follow = !self.follow;
        self.follow
    }

    /// World-space position of the eye in the current mode.
    pub fn camera_position(&self) -> Vec3 {
        if self.follow { self.follow_eye } else { self.eye }
    }

    /// View matrix; `target` is the mesh position, used in follow mode.
    pub fn view_matrix(&self, target: Vec3) -> Mat4 {
        let look_at = if self.follow { target } else { self.center };
        Mat4::look_at_rh(self.camera_position(), look_at, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    fn to_clip(cam: &ViewCamera, aspect: f32, target: Vec3, p: Vec3) -> Vec4 {
        cam.projection_matrix(aspect) * cam.view_matrix(target) * p.extend(1.0)
    }

    #[test]
    fn fixed_mode_centres_origin() {
        let cam = ViewCamera::new(&ViewerConfig::default());
        let clip = to_clip(&cam, 1.0, Vec3::new(5.0, 5.0, 0.0), Vec3::ZERO);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn follow_mode_centres_target() {
        let mut cam = ViewCamera::new(&ViewerConfig::default());
        assert!(cam.toggle_follow());
        let target = Vec3::new(2.0, -1.0, 0.0);
        let clip = to_clip(&cam, 1.5, target, target);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
        assert_eq!(cam.camera_position(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn origin_depth_inside_clip_range() {
        let cam = ViewCamera::new(&ViewerConfig::default());
        let clip = to_clip(&cam, 1.0, Vec3::ZERO, Vec3::ZERO);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }
}
