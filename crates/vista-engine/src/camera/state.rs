use std::cell::RefCell;
use std::rc::Rc;

use glam::{DMat4, DVec3};

use crate::coords::Viewport;

/// Projection state of a renderer shared with the camera bound to it.
pub type SharedCameraState = Rc<RefCell<CameraState>>;

/// Viewpoint and projection parameters.
///
/// Defaults match a freshly created scene camera: looking down -Z from
/// `(0, 0, 1)` with a 30 degree vertical view angle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraState {
    pub position: DVec3,
    pub focal_point: DVec3,
    pub view_up: DVec3,
    /// Vertical view angle in degrees.
    pub view_angle: f64,
    /// Near and far clipping distances along the view direction.
    pub clipping_range: (f64, f64),
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: DVec3::Z,
            focal_point: DVec3::ZERO,
            view_up: DVec3::Y,
            view_angle: 30.0,
            clipping_range: (0.01, 1000.01),
        }
    }
}

impl CameraState {
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.focal_point, self.view_up)
    }

    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        let (near, far) = self.clipping_range;
        DMat4::perspective_rh_gl(self.view_angle.to_radians(), aspect, near, far)
    }

    /// World to clip space transform for the given viewport.
    pub fn composite_matrix(&self, viewport: Viewport) -> DMat4 {
        self.projection_matrix(viewport.aspect()) * self.view_matrix()
    }

    /// Normalized direction of projection.
    pub fn direction(&self) -> DVec3 {
        (self.focal_point - self.position).normalize_or_zero()
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.focal_point)
    }

    pub fn into_shared(self) -> SharedCameraState {
        Rc::new(RefCell::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_down_negative_z() {
        let state = CameraState::default();
        assert_eq!(state.direction(), DVec3::NEG_Z);
        assert_eq!(state.distance(), 1.0);
    }

    #[test]
    fn focal_point_projects_to_clip_center() {
        let state = CameraState::default();
        let clip = state.composite_matrix(Viewport::new(300, 200)) * state.focal_point.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-12);
        assert!(ndc.y.abs() < 1e-12);
    }
}
