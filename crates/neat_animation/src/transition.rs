//! Timing curves
//!
//! A [`Transition`] tells the engine *how* to reach a target: over a fixed
//! duration along an easing curve, with spring physics, or instantly.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::spring::SpringConfig;

/// How many times a tween plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Never,
    /// Replay from the start this many extra times
    Times(u32),
    /// Loop until retargeted (spinners)
    Forever,
}

/// A duration-based transition
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub duration_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub repeat: Repeat,
}

/// How a property travels to its target
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Transition {
    /// Jump to the target on the next frame
    #[default]
    Instant,
    Tween(Tween),
    Spring {
        config: SpringConfig,
        #[serde(default)]
        delay_ms: u32,
    },
}

impl Transition {
    /// Tween over `duration_ms` along `easing`
    pub fn tween(duration_ms: u32, easing: Easing) -> Self {
        Transition::Tween(Tween {
            duration_ms,
            easing,
            delay_ms: 0,
            repeat: Repeat::Never,
        })
    }

    /// Spring with the given stiffness and damping (unit mass)
    pub fn spring(stiffness: f32, damping: f32) -> Self {
        Transition::Spring {
            config: SpringConfig::new(stiffness, damping, 1.0),
            delay_ms: 0,
        }
    }

    pub fn with_spring(config: SpringConfig) -> Self {
        Transition::Spring {
            config,
            delay_ms: 0,
        }
    }

    /// Start after `delay_ms`. Instant transitions ignore delays.
    pub fn delay(mut self, delay: u32) -> Self {
        match &mut self {
            Transition::Instant => {}
            Transition::Tween(tween) => tween.delay_ms = delay,
            Transition::Spring { delay_ms, .. } => *delay_ms = delay,
        }
        self
    }

    /// Loop a tween until retargeted
    pub fn repeat_forever(mut self) -> Self {
        if let Transition::Tween(tween) = &mut self {
            tween.repeat = Repeat::Forever;
        }
        self
    }

    pub fn delay_ms(&self) -> u32 {
        match self {
            Transition::Instant => 0,
            Transition::Tween(tween) => tween.delay_ms,
            Transition::Spring { delay_ms, .. } => *delay_ms,
        }
    }

    /// Whether this transition never settles on its own
    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            Transition::Tween(Tween {
                repeat: Repeat::Forever,
                ..
            })
        )
    }
}

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
}

/// Per-child delay offsets for lists
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stagger {
    /// Delay before the first child (ms)
    pub initial_delay_ms: u32,
    /// Delay between each child's animation start (ms)
    pub step_ms: u32,
    pub direction: StaggerDirection,
}

impl Stagger {
    pub fn new(initial_delay_ms: u32, step_ms: u32) -> Self {
        Self {
            initial_delay_ms,
            step_ms,
            direction: StaggerDirection::Forward,
        }
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Calculate delay for a specific child index
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
        };
        self.initial_delay_ms + self.step_ms * effective_index as u32
    }

    /// Apply this child's delay to a transition
    pub fn apply(&self, transition: Transition, index: usize, total: usize) -> Transition {
        transition.delay(transition.delay_ms() + self.delay_for_index(index, total))
    }
}
