use glam::DVec3;

use crate::engine::RendererId;

use super::{CameraState, SharedCameraState};

/// The window's camera.
///
/// A camera reads and writes the projection state of exactly one renderer at
/// a time. Before the first binding it works on a detached default state.
#[derive(Debug)]
pub struct Camera {
    state: SharedCameraState,
    renderer: Option<RendererId>,
}

impl Camera {
    pub(crate) fn new() -> Self {
        Self {
            state: CameraState::default().into_shared(),
            renderer: None,
        }
    }

    /// Binds the camera to `renderer`'s projection state.
    pub(crate) fn bind(&mut self, renderer: RendererId, state: SharedCameraState) {
        log::debug!("camera bound to renderer {renderer}");
        self.renderer = Some(renderer);
        self.state = state;
    }

    /// Renderer whose projection state this camera currently drives.
    pub fn bound_renderer(&self) -> Option<RendererId> {
        self.renderer
    }

    /// Copy of the current projection state.
    pub fn state(&self) -> CameraState {
        *self.state.borrow()
    }

    pub fn set_state(&mut self, state: CameraState) -> &mut Self {
        *self.state.borrow_mut() = state;
        self
    }

    pub fn position(&self) -> DVec3 {
        self.state.borrow().position
    }

    pub fn set_position(&mut self, position: DVec3) -> &mut Self {
        self.state.borrow_mut().position = position;
        self
    }

    pub fn focal_point(&self) -> DVec3 {
        self.state.borrow().focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: DVec3) -> &mut Self {
        self.state.borrow_mut().focal_point = focal_point;
        self
    }

    pub fn view_up(&self) -> DVec3 {
        self.state.borrow().view_up
    }

    pub fn set_view_up(&mut self, view_up: DVec3) -> &mut Self {
        self.state.borrow_mut().view_up = view_up;
        self
    }

    /// Vertical view angle in degrees.
    pub fn view_angle(&self) -> f64 {
        self.state.borrow().view_angle
    }

    pub fn set_view_angle(&mut self, degrees: f64) -> &mut Self {
        self.state.borrow_mut().view_angle = degrees;
        self
    }

    /// Moves the camera toward (`factor > 1`) or away from the focal point.
    pub fn dolly(&mut self, factor: f64) -> &mut Self {
        if factor > 0.0 {
            let mut state = self.state.borrow_mut();
            let offset = (state.position - state.focal_point) / factor;
            state.position = state.focal_point + offset;
        }
        self
    }

    #[cfg(test)]
    pub(crate) fn shares_state_with(&self, other: &SharedCameraState) -> bool {
        std::rc::Rc::ptr_eq(&self.state, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_camera_uses_detached_state() {
        let mut camera = Camera::new();
        assert_eq!(camera.bound_renderer(), None);
        camera.set_view_angle(45.0);
        assert_eq!(camera.view_angle(), 45.0);
    }

    #[test]
    fn binding_redirects_writes_to_renderer_state() {
        let mut camera = Camera::new();
        let shared = CameraState::default().into_shared();
        let id = RendererId::next();

        camera.bind(id, shared.clone());
        camera.set_position(DVec3::new(0.0, 0.0, 5.0));

        assert_eq!(camera.bound_renderer(), Some(id));
        assert!(camera.shares_state_with(&shared));
        assert_eq!(shared.borrow().position, DVec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn dolly_halves_distance() {
        let mut camera = Camera::new();
        camera.set_position(DVec3::new(0.0, 0.0, 4.0)).dolly(2.0);
        assert_eq!(camera.position(), DVec3::new(0.0, 0.0, 2.0));
    }
}
