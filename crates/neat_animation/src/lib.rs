//! Neat Buttons Animation
//!
//! The declarative contract between widgets and an animation engine, plus a
//! reference engine that interpolates it.
//!
//! # Features
//!
//! - **Easing**: Named curves and CSS-style cubic-bezier timing functions
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Animatable Values**: Floats, colors, rects and SVG path data
//! - **Transitions**: Tweens (duration, easing, delay, repeat), springs, instant
//! - **Target Sets**: Per-element target values with presence enter/exit
//! - **Continuity**: A key-to-element registry that lets one element travel
//!   between mutually exclusive render branches
//! - **AnimationEngine**: The engine seam, implemented by [`Interpolator`]
//!
//! Widgets never compute intermediate frames. They emit a [`TargetSet`] on
//! every transition and the engine interpolates toward it.

pub mod continuity;
pub mod easing;
pub mod engine;
pub mod error;
pub mod path;
pub mod spring;
pub mod target;
pub mod transition;
pub mod values;

pub use continuity::{ContinuityId, ContinuityRegistry};
pub use easing::Easing;
pub use engine::{AnimationEngine, Interpolator};
pub use error::{PathError, Result};
pub use path::{PathData, PathSegment};
pub use spring::{Spring, SpringConfig};
pub use target::{ElementKey, ElementTargets, Property, PropertyTarget, TargetSet};
pub use transition::{Repeat, Stagger, StaggerDirection, Transition, Tween};
pub use values::{AnimatableValue, Interpolate};
