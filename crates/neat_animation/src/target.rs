//! Declarative animation targets
//!
//! A [`TargetSet`] describes, for every element a widget currently renders,
//! the values it should reach and how to get there. It is the only thing a
//! widget hands to an engine.
//!
//! Presence follows the set: an element that appears plays from its
//! `initial` values, an element that disappears plays its `exit` targets
//! before the engine drops it. Elements that share a continuity id are
//! treated as one visual object across render branches.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::continuity::ContinuityId;
use crate::transition::Transition;
use crate::values::AnimatableValue;

/// Stable name of a rendered element within one widget
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementKey(pub String);

impl ElementKey {
    pub fn new(key: impl Into<String>) -> Self {
        ElementKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ElementKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementKey {
    fn from(s: &str) -> Self {
        ElementKey(s.to_string())
    }
}

impl From<String> for ElementKey {
    fn from(s: String) -> Self {
        ElementKey(s)
    }
}

/// Animatable properties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Width,
    Height,
    /// Horizontal translation
    X,
    /// Vertical translation
    Y,
    Opacity,
    Scale,
    /// Rotation in degrees
    Rotate,
    Background,
    /// SVG path data of a stroke
    Path,
    /// Drawn fraction of a stroke (0.0 to 1.0)
    PathLength,
    /// Dash length of a stroke
    StrokeDash,
    /// Laid-out rect of the element
    Bounds,
}

/// One property moving toward one value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyTarget {
    pub property: Property,
    pub value: AnimatableValue,
    pub transition: Transition,
}

/// Everything the engine needs to know about one element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementTargets {
    pub key: ElementKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuity: Option<ContinuityId>,
    /// Values the element starts from when it first appears
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub initial: SmallVec<[(Property, AnimatableValue); 4]>,
    pub animate: SmallVec<[PropertyTarget; 4]>,
    /// Targets played when the element leaves the set
    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub exit: SmallVec<[PropertyTarget; 2]>,
}

impl ElementTargets {
    pub fn new(key: impl Into<ElementKey>) -> Self {
        Self {
            key: key.into(),
            continuity: None,
            initial: SmallVec::new(),
            animate: SmallVec::new(),
            exit: SmallVec::new(),
        }
    }

    /// Link this element to others sharing `id`
    pub fn continuity(mut self, id: impl Into<ContinuityId>) -> Self {
        self.continuity = Some(id.into());
        self
    }

    /// Starting value used when the element enters
    pub fn initial(mut self, property: Property, value: impl Into<AnimatableValue>) -> Self {
        self.initial.push((property, value.into()));
        self
    }

    /// Animate `property` to `value`
    pub fn animate(
        mut self,
        property: Property,
        value: impl Into<AnimatableValue>,
        transition: Transition,
    ) -> Self {
        self.animate.push(PropertyTarget {
            property,
            value: value.into(),
            transition,
        });
        self
    }

    /// Animate `property` to `value` when the element leaves
    pub fn exit(
        mut self,
        property: Property,
        value: impl Into<AnimatableValue>,
        transition: Transition,
    ) -> Self {
        self.exit.push(PropertyTarget {
            property,
            value: value.into(),
            transition,
        });
        self
    }

    /// Target value for `property`, if any
    pub fn target(&self, property: Property) -> Option<&PropertyTarget> {
        self.animate.iter().find(|t| t.property == property)
    }
}

/// All elements of one widget frame
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetSet {
    pub elements: Vec<ElementTargets>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: ElementTargets) {
        self.elements.push(element);
    }

    pub fn with(mut self, element: ElementTargets) -> Self {
        self.elements.push(element);
        self
    }

    pub fn extend(&mut self, other: TargetSet) {
        self.elements.extend(other.elements);
    }

    pub fn get(&self, key: &str) -> Option<&ElementTargets> {
        self.elements.iter().find(|e| e.key.as_str() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Shorthand for the target value of one element property
    pub fn value(&self, key: &str, property: Property) -> Option<&AnimatableValue> {
        self.get(key)?.target(property).map(|t| &t.value)
    }

    /// Prefix every element key, keeping keys unique when widgets share an engine
    pub fn scoped(mut self, scope: &str) -> Self {
        for element in &mut self.elements {
            element.key = ElementKey(format!("{scope}/{}", element.key));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
