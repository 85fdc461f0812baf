//! Animatable value types
//!
//! Provides the trait for values that can be interpolated, and the closed set
//! of value kinds a target set can carry.

use neat_core::{Color, Rect};
use serde::{Deserialize, Serialize};

use crate::path::PathData;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Interpolate between self and other by factor t
    ///
    /// `t` may leave 0.0..=1.0 when a spring overshoots.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Check if two values are approximately equal (for settling detection)
    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool;
}

// ============================================================================
// f32 Implementation
// ============================================================================

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self - other).abs() < epsilon
    }
}

// ============================================================================
// Color Implementation
// ============================================================================

impl Interpolate for Color {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
            && (self.a - other.a).abs() < epsilon
    }
}

// ============================================================================
// Rect Implementation
// ============================================================================

impl Interpolate for Rect {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Rect::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x() - other.x()).abs() < epsilon
            && (self.y() - other.y()).abs() < epsilon
            && (self.width() - other.width()).abs() < epsilon
            && (self.height() - other.height()).abs() < epsilon
    }
}

// ============================================================================
// Path Implementation
// ============================================================================

impl Interpolate for PathData {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        PathData::lerp(self, other, t)
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.is_compatible(other)
            && self
                .segments()
                .iter()
                .zip(other.segments())
                .all(|(a, b)| a.args.iter().zip(&b.args).all(|(x, y)| (x - y).abs() < epsilon))
    }
}

// ============================================================================
// Tagged value
// ============================================================================

/// A target value of any supported kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnimatableValue {
    Float(f32),
    Color(Color),
    Rect(Rect),
    Path(PathData),
}

impl AnimatableValue {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            AnimatableValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            AnimatableValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            AnimatableValue::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&PathData> {
        match self {
            AnimatableValue::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl Interpolate for AnimatableValue {
    /// Values of different kinds cannot blend and snap to `other`
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Self::Float(a.lerp(b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Interpolate::lerp(a, b, t)),
            (Self::Rect(a), Self::Rect(b)) => Self::Rect(Interpolate::lerp(a, b, t)),
            (Self::Path(a), Self::Path(b)) => Self::Path(Interpolate::lerp(a, b, t)),
            _ => other.clone(),
        }
    }

    fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.approx_eq(b, epsilon),
            (Self::Color(a), Self::Color(b)) => a.approx_eq(b, epsilon),
            (Self::Rect(a), Self::Rect(b)) => a.approx_eq(b, epsilon),
            (Self::Path(a), Self::Path(b)) => a.approx_eq(b, epsilon),
            _ => false,
        }
    }
}

impl From<f32> for AnimatableValue {
    fn from(v: f32) -> Self {
        AnimatableValue::Float(v)
    }
}

impl From<Color> for AnimatableValue {
    fn from(c: Color) -> Self {
        AnimatableValue::Color(c)
    }
}

impl From<Rect> for AnimatableValue {
    fn from(r: Rect) -> Self {
        AnimatableValue::Rect(r)
    }
}

impl From<PathData> for AnimatableValue {
    fn from(p: PathData) -> Self {
        AnimatableValue::Path(p)
    }
}
