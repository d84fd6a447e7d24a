//! Camera pose
//!
//! Continuous position in tile units plus a heading angle. The camera is
//! owned by the game loop; the renderer only ever reads it.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

/// First-person camera: position in tile units, heading in radians
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    /// Heading angle, normalized to [0, 2*pi)
    pub heading: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_heading(heading),
        }
    }

    /// Place the camera at a spawn point, facing along +x
    pub fn at_spawn(spawn: (f32, f32)) -> Self {
        Self::new(spawn.0, spawn.1, 0.0)
    }

    /// Unit direction vector of the heading
    #[inline]
    pub fn direction(&self) -> (f32, f32) {
        (self.heading.cos(), self.heading.sin())
    }

    /// Turn by a signed angle, keeping the heading normalized
    pub fn turn(&mut self, delta: f32) {
        self.heading = normalize_heading(self.heading + delta);
    }

    /// Euclidean distance to a point
    #[inline]
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        (x - self.x).hypot(y - self.y)
    }
}

/// Wrap an angle into [0, 2*pi)
#[inline]
pub fn normalize_heading(angle: f32) -> f32 {
    angle.rem_euclid(TAU)
}

/// Wrap a relative angle into (-pi, pi]
#[inline]
pub fn normalize_relative(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle <= -PI {
        angle += TAU;
    }
    while angle > PI {
        angle -= TAU;
    }
    angle
}
