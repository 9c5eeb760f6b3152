use glam::{DVec3, DVec4};

/// Below this homogeneous coordinate a display point has no usable world position.
pub const HOMOGENEOUS_THRESHOLD: f64 = 1e-7;

/// Projection queries answered by a renderer from its camera and viewport.
pub trait Projector {
    /// Unprojects a display point to homogeneous world coordinates.
    ///
    /// The result is not divided by `w`.
    fn display_to_world(&self, display: DVec3) -> DVec4;

    /// Projects a homogeneous world point to display coordinates.
    fn world_to_display(&self, world: DVec4) -> DVec3;
}

/// Converts a display point to a world point.
///
/// Degenerate projections (`w <= 1e-7`, e.g. a point at infinity or behind the
/// camera) resolve to the origin.
pub fn world_from_display<P: Projector + ?Sized>(projector: &P, display: DVec3) -> DVec3 {
    let world = projector.display_to_world(display);
    if world.w > HOMOGENEOUS_THRESHOLD {
        world.truncate() / world.w
    } else {
        DVec3::ZERO
    }
}

/// Converts a world point to a display point.
pub fn display_from_world<P: Projector + ?Sized>(projector: &P, world: DVec3) -> DVec3 {
    projector.world_to_display(world.extend(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed homogeneous point regardless of input.
    struct Fixed(DVec4);

    impl Projector for Fixed {
        fn display_to_world(&self, _display: DVec3) -> DVec4 {
            self.0
        }

        fn world_to_display(&self, world: DVec4) -> DVec3 {
            world.truncate() * 2.0
        }
    }

    #[test]
    fn divides_by_homogeneous_coordinate() {
        let p = Fixed(DVec4::new(2.0, 4.0, 6.0, 2.0));
        assert_eq!(world_from_display(&p, DVec3::ZERO), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn collapses_to_origin_at_threshold() {
        let p = Fixed(DVec4::new(2.0, 4.0, 6.0, HOMOGENEOUS_THRESHOLD));
        assert_eq!(world_from_display(&p, DVec3::ONE), DVec3::ZERO);
    }

    #[test]
    fn collapses_to_origin_below_threshold() {
        let p = Fixed(DVec4::new(1.0, 1.0, 1.0, 1e-9));
        assert_eq!(world_from_display(&p, DVec3::ONE), DVec3::ZERO);

        let behind = Fixed(DVec4::new(1.0, 1.0, 1.0, -0.5));
        assert_eq!(world_from_display(&behind, DVec3::ONE), DVec3::ZERO);
    }

    #[test]
    fn world_to_display_uses_unit_homogeneous_coordinate() {
        struct Check;
        impl Projector for Check {
            fn display_to_world(&self, _display: DVec3) -> DVec4 {
                DVec4::ZERO
            }
            fn world_to_display(&self, world: DVec4) -> DVec3 {
                assert_eq!(world.w, 1.0);
                world.truncate()
            }
        }

        let out = display_from_world(&Check, DVec3::new(3.0, 2.0, 1.0));
        assert_eq!(out, DVec3::new(3.0, 2.0, 1.0));
    }
}
