//! Neat Buttons Core
//!
//! Foundational primitives shared by the animation contract and the widgets:
//!
//! - **Color & Geometry**: RGBA colors, points, sizes and rects that can be
//!   handed to an animation engine as target values
//! - **Input Events**: The raw input surface (clicks, per-slot text input,
//!   per-slot key presses, scroll) that widgets translate into their own events
//! - **Text Measurement**: The post-layout seam used to measure label widths
//! - **Phase Timers**: Cancellable scheduled tasks keyed by a transition
//!   generation, so a superseded timer can never fire a state update
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use neat_core::timer::{Generation, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let generation = Generation::default().next();
//! timers.schedule(Duration::from_millis(2000), generation, "loading-done");
//!
//! assert!(timers.advance(Duration::from_millis(1999)).is_empty());
//! let fired = timers.advance(Duration::from_millis(1));
//! assert_eq!(fired[0].payload, "loading-done");
//! ```

pub mod color;
pub mod error;
pub mod events;
pub mod geometry;
pub mod text_measure;
pub mod timer;

pub use color::Color;
pub use error::{CoreError, Result};
pub use events::{HitTarget, InputEvent, Key};
pub use geometry::{Point, Rect, Size};
pub use text_measure::{
    EstimatedTextMeasurer, TableTextMeasurer, TextLayoutOptions, TextMeasurer, TextMetrics,
};
pub use timer::{FiredTimer, Generation, TimerId, TimerQueue};
