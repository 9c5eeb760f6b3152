use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec3;

use crate::camera::{CameraState, SharedCameraState};

/// Orientation marker following the renderer camera.
///
/// The widget only holds a weak reference to the renderer's camera state, so
/// it never keeps a released renderer alive. The renderer still drops it
/// before being released so that nothing observes a half-destroyed renderer.
#[derive(Debug)]
pub struct AxisWidget {
    camera: Weak<RefCell<CameraState>>,
}

impl AxisWidget {
    pub fn new(camera: &SharedCameraState) -> Self {
        Self {
            camera: Rc::downgrade(camera),
        }
    }

    /// Current view direction, `None` once the renderer is gone.
    pub fn view_direction(&self) -> Option<DVec3> {
        self.camera.upgrade().map(|state| state.borrow().direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_camera_direction() {
        let state = CameraState::default().into_shared();
        let widget = AxisWidget::new(&state);
        assert_eq!(widget.view_direction(), Some(DVec3::NEG_Z));

        state.borrow_mut().position = DVec3::new(1.0, 0.0, 0.0);
        assert_eq!(widget.view_direction(), Some(DVec3::NEG_X));
    }

    #[test]
    fn does_not_keep_camera_alive() {
        let state = CameraState::default().into_shared();
        let widget = AxisWidget::new(&state);
        drop(state);
        assert_eq!(widget.view_direction(), None);
    }
}
