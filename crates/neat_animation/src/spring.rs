//! Spring-driven progress
//!
//! Spring transitions do not animate property values directly. A [`Spring`]
//! drives a unit progress from 0.0 toward 1.0 and the engine lerps between a
//! track's endpoints with it, so one simulation serves floats, colors and
//! rects alike. Underdamped configs overshoot past 1.0 before settling.

use serde::{Deserialize, Serialize};

/// Progress within this distance of 1.0 and below this speed counts as rest
const REST_DELTA: f32 = 0.001;
const REST_SPEED: f32 = 0.01;

/// Stiffness, damping and mass of a spring transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    #[serde(default = "unit_mass")]
    pub mass: f32,
}

fn unit_mass() -> f32 {
    1.0
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// Responsive with a slight overshoot; used for container resizing
    pub fn bouncy() -> Self {
        Self::new(300.0, 20.0, 1.0)
    }
}

/// Unit progress under spring physics
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    position: f32,
    velocity: f32,
}

impl Spring {
    /// Start at rest at 0.0 with the target at 1.0
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            position: 0.0,
            velocity: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.position
    }

    pub fn is_settled(&self) -> bool {
        (1.0 - self.position).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    /// Integrate `dt` seconds with one RK4 step; snaps to 1.0 once at rest
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.position = 1.0;
            self.velocity = 0.0;
            return;
        }

        let accel = |x: f32, v: f32| {
            (-self.config.stiffness * (x - 1.0) - self.config.damping * v) / self.config.mass
        };
        let (x, v) = (self.position, self.velocity);
        let half = dt * 0.5;

        let (dx1, dv1) = (v, accel(x, v));
        let (dx2, dv2) = (v + dv1 * half, accel(x + dx1 * half, v + dv1 * half));
        let (dx3, dv3) = (v + dv2 * half, accel(x + dx2 * half, v + dv2 * half));
        let (dx4, dv4) = (v + dv3 * dt, accel(x + dx3 * dt, v + dv3 * dt));

        self.position += (dx1 + 2.0 * dx2 + 2.0 * dx3 + dx4) * dt / 6.0;
        self.velocity += (dv1 + 2.0 * dv2 + 2.0 * dv3 + dv4) * dt / 6.0;
    }
}
