//! Vertical-only gravity integration.

/// Height and vertical speed of something that can fall onto a floor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerticalBody {
    pub y: f32,
    pub vy: f32,
}

impl VerticalBody {
    #[inline]
    pub const fn new(y: f32, vy: f32) -> Self {
        Self { y, vy }
    }

    /// Advance one step of explicit Euler: `vy -= g·dt`, then `y += vy·dt`.
    ///
    /// Passing `gravity = 0.0` coasts at the current speed. Anything that ends
    /// below `floor` is put back on it with its speed zeroed. Returns `true`
    /// when the body touched the floor during this step.
    pub fn integrate(&mut self, dt: f32, gravity: f32, floor: f32) -> bool {
        self.vy -= gravity * dt;
        self.y += self.vy * dt;
        if self.y < floor {
            self.y = floor;
            self.vy = 0.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_step_of_free_fall() {
        let mut body = VerticalBody::new(10.0, 0.0);
        let landed = body.integrate(0.5, 9.8, 0.5);
        assert!(!landed);
        assert_relative_eq!(body.vy, -4.9);
        assert_relative_eq!(body.y, 7.55);
    }

    #[test]
    fn lands_on_floor_and_stops() {
        let mut body = VerticalBody::new(0.6, -3.0);
        assert!(body.integrate(0.1, 9.8, 0.5));
        assert_relative_eq!(body.y, 0.5);
        assert_relative_eq!(body.vy, 0.0);
    }

    #[test]
    fn coasts_without_gravity() {
        let mut body = VerticalBody::new(1.5, 2.0);
        body.integrate(0.25, 0.0, 1.5);
        assert_relative_eq!(body.y, 2.0);
        assert_relative_eq!(body.vy, 2.0);
    }

    #[test]
    fn resting_body_stays_put() {
        let mut body = VerticalBody::new(0.5, 0.0);
        for _ in 0..100 {
            body.integrate(1.0 / 60.0, 9.8, 0.5);
        }
        assert_relative_eq!(body.y, 0.5);
        assert_relative_eq!(body.vy, 0.0);
    }
}
