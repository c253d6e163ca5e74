//! Accelerometer input plumbing
//!
//! Sensor polling happens outside the crate; implementors of [`TiltSource`]
//! hand the latest reading to the game loop, and [`tilt_force`] turns it
//! into the force applied to the marble.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One accelerometer reading, in g along the device axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TiltSample {
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
}

impl TiltSample {
    pub fn new(ax: f32, ay: f32, az: f32) -> Self {
        Self { ax, ay, az }
    }

    /// In-plane tilt magnitude (ignores the gravity axis)
    pub fn planar_magnitude(&self) -> f32 {
        Vec2::new(self.ax, self.ay).length()
    }
}

/// Source of accelerometer samples
///
/// `latest` returns the most recent reading, or `None` while the sensor has
/// not delivered one yet; no sample means no force that tick.
pub trait TiltSource {
    fn latest(&mut self) -> Option<TiltSample>;
}

/// Fixed sample, handy for tests and scripted runs
#[derive(Debug, Clone, Copy)]
pub struct ConstantTilt(pub TiltSample);

impl TiltSource for ConstantTilt {
    fn latest(&mut self) -> Option<TiltSample> {
        Some(self.0)
    }
}

/// Map a tilt sample to a 2D force on the marble
///
/// The device is held portrait, so its x axis runs along screen y and vice
/// versa: fx = -gain * ay, fy = gain * ax.
#[inline]
pub fn tilt_force(sample: TiltSample, gain: f32) -> Vec2 {
    Vec2::new(-gain * sample.ay, gain * sample.ax)
}

/// [`tilt_force`] with deadzone and axis-inversion options applied
pub fn tilt_force_with(
    sample: TiltSample,
    gain: f32,
    deadzone: f32,
    invert_x: bool,
    invert_y: bool,
) -> Vec2 {
    if sample.planar_magnitude() < deadzone {
        return Vec2::ZERO;
    }
    let mut force = tilt_force(sample, gain);
    if invert_x {
        force.x = -force.x;
    }
    if invert_y {
        force.y = -force.y;
    }
    force
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_axis_mapping() {
        // Tilting along device x pushes the marble along screen y
        let force = tilt_force(TiltSample::new(0.5, 0.0, -0.9), 10.0);
        assert_eq!(force, Vec2::new(0.0, 5.0));

        // Tilting along device y pushes the marble along -screen x
        let force = tilt_force(TiltSample::new(0.0, 0.5, -0.9), 10.0);
        assert_eq!(force, Vec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_deadzone_swallows_noise() {
        let noise = TiltSample::new(0.005, -0.01, -1.0);
        assert_eq!(tilt_force_with(noise, 10.0, 0.02, false, false), Vec2::ZERO);

        // A real lean passes through
        let lean = TiltSample::new(0.3, 0.0, -0.95);
        assert!(tilt_force_with(lean, 10.0, 0.02, false, false).y > 0.0);
    }

    #[test]
    fn test_axis_inversion() {
        let sample = TiltSample::new(0.4, -0.2, -0.9);
        let base = tilt_force_with(sample, 10.0, 0.0, false, false);
        let flipped = tilt_force_with(sample, 10.0, 0.0, true, true);
        assert_eq!(flipped, -base);
    }

    #[test]
    fn test_constant_source() {
        let mut source = ConstantTilt(TiltSample::new(0.1, 0.2, -1.0));
        assert_eq!(source.latest(), Some(TiltSample::new(0.1, 0.2, -1.0)));
    }

    #[test]
    fn test_gravity_axis_ignored() {
        // A face-up device reads az ~ -1 with no in-plane tilt
        let flat = TiltSample::new(0.0, 0.0, -1.0);
        assert_eq!(tilt_force(flat, 10.0), Vec2::ZERO);
        assert_eq!(flat.planar_magnitude(), 0.0);
    }
}
