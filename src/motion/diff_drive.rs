//! Differential-drive kinematics

use glam::Vec2;

use crate::consts::MOTOR_STEP;
use crate::normalize_degrees;

/// Two-wheeled robot pose and wheel speeds
///
/// Headings are in radians internally; [`DiffDrive::drive`] reports degrees
/// because that is what sprites and the world document use. Screen space is
/// y-down, so a positive turn rate rotates clockwise on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffDrive {
    position: Vec2,
    heading: f32,
    /// Distance between the wheels
    size: f32,
    left: f32,
    right: f32,
    /// Seconds covered by the next `drive` step
    dt: f32,
    step: f32,
}

impl DiffDrive {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            heading: 0.0,
            size,
            left: 0.0,
            right: 0.0,
            dt: 0.0,
            step: MOTOR_STEP,
        }
    }

    /// Start with the given heading (degrees)
    pub fn with_heading(mut self, degrees: f32) -> Self {
        self.heading = degrees.to_radians();
        self
    }

    /// Override the speed change applied by one nudge
    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Heading in degrees, normalized to [-180, 180)
    pub fn heading_degrees(&self) -> f32 {
        normalize_degrees(self.heading.to_degrees())
    }

    /// Current (left, right) wheel speeds
    pub fn wheel_speeds(&self) -> (f32, f32) {
        (self.left, self.right)
    }

    pub fn accelerate_left(&mut self) {
        self.left += self.step;
    }

    pub fn accelerate_right(&mut self) {
        self.right += self.step;
    }

    pub fn slowdown_left(&mut self) {
        self.left -= self.step;
    }

    pub fn slowdown_right(&mut self) {
        self.right -= self.step;
    }

    pub fn set_time_delta(&mut self, dt: f32) {
        self.dt = dt;
    }

    /// Advance the pose by the current time delta.
    /// Returns `(heading_degrees, x, y)`.
    pub fn drive(&mut self) -> (f32, f32, f32) {
        let v = (self.left + self.right) / 2.0;
        let omega = if self.size > 0.0 {
            (self.right - self.left) / self.size
        } else {
            0.0
        };

        self.heading += omega * self.dt;
        self.position += Vec2::from_angle(self.heading) * v * self.dt;

        (self.heading_degrees(), self.position.x, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_idle_robot_stays_put() {
        let mut robot = DiffDrive::new(Vec2::new(10.0, 20.0), 50.0);
        robot.set_time_delta(0.5);
        let (angle, x, y) = robot.drive();
        assert_eq!((angle, x, y), (0.0, 10.0, 20.0));
    }

    #[test]
    fn test_equal_wheels_drive_straight() {
        let mut robot = DiffDrive::new(Vec2::ZERO, 50.0);
        robot.accelerate_left();
        robot.accelerate_right();
        robot.set_time_delta(1.0);

        let (angle, x, y) = robot.drive();
        assert!(angle.abs() < EPS);
        assert!((x - MOTOR_STEP).abs() < EPS);
        assert!(y.abs() < EPS);
    }

    #[test]
    fn test_heading_is_respected() {
        let mut robot = DiffDrive::new(Vec2::ZERO, 50.0).with_heading(90.0);
        robot.accelerate_left();
        robot.accelerate_right();
        robot.set_time_delta(2.0);

        let (angle, x, y) = robot.drive();
        assert!((angle - 90.0).abs() < EPS);
        assert!(x.abs() < EPS);
        assert!((y - 2.0 * MOTOR_STEP).abs() < EPS);
    }

    #[test]
    fn test_opposite_wheels_spin_in_place() {
        let mut robot = DiffDrive::new(Vec2::new(5.0, 5.0), 50.0).with_step(25.0);
        robot.slowdown_left();
        robot.accelerate_right();
        assert_eq!(robot.wheel_speeds(), (-25.0, 25.0));

        robot.set_time_delta(1.0);
        let (angle, x, y) = robot.drive();
        // omega = 50 / 50 = 1 rad/s
        assert!((angle - 1.0_f32.to_degrees()).abs() < EPS);
        assert!((x - 5.0).abs() < EPS);
        assert!((y - 5.0).abs() < EPS);
    }

    #[test]
    fn test_nudges_accumulate_without_bounds() {
        let mut robot = DiffDrive::new(Vec2::ZERO, 50.0);
        for _ in 0..100 {
            robot.accelerate_left();
        }
        robot.slowdown_right();
        assert_eq!(robot.wheel_speeds(), (100.0 * MOTOR_STEP, -MOTOR_STEP));
    }

    #[test]
    fn test_zero_delta_does_not_move() {
        let mut robot = DiffDrive::new(Vec2::ZERO, 50.0);
        robot.accelerate_left();
        let (_, x, y) = robot.drive();
        assert_eq!((x, y), (0.0, 0.0));
    }
}
