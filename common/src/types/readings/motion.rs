use nalgebra::Vector3;

use crate::constants::N_AXES;

/// Latest accelerometer sample and its vector magnitude.
///
/// The magnitude is derived from the axes on construction and cannot be set on
/// its own, so `magnitude == sqrt(x² + y² + z²)` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionReading {
    x: f32,
    y: f32,
    z: f32,
    magnitude: f64,
}

impl MotionReading {
    /// Builds a reading from a tri-axis sample. Squares are taken in f64.
    pub fn from_axes(x: f32, y: f32, z: f32) -> Self {
        let magnitude = Vector3::new(f64::from(x), f64::from(y), f64::from(z)).norm();
        Self { x, y, z, magnitude }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    pub fn axes(&self) -> [f32; N_AXES] {
        [self.x, self.y, self.z]
    }

    /// Overall movement strength.
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

impl From<[f32; N_AXES]> for MotionReading {
    fn from(value: [f32; N_AXES]) -> Self {
        Self::from_axes(value[0], value[1], value[2])
    }
}

impl From<MotionReading> for [f32; N_AXES] {
    fn from(value: MotionReading) -> Self {
        value.axes()
    }
}
