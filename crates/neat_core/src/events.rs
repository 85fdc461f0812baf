//! Raw input surface
//!
//! These are the events a host (window, test, script) can deliver. Each widget
//! translates the ones it understands into its own typed event and ignores the
//! rest.

use serde::{Deserialize, Serialize};

/// What a pointer click landed on inside a widget
///
/// Only `Surface` reaches a widget's outer toggle. Clicks on controls and inert
/// regions are stopped at their boundary, which is how "stop propagation" is
/// expressed without a DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum HitTarget {
    /// The button body itself
    Surface,
    /// A back control
    Back,
    /// A catalog item in a list or grid
    Item(usize),
    /// Empty space inside an expanded widget
    Inert,
}

/// Keys the widgets care about
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Backspace,
    Other,
}

/// An input event delivered to a widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum InputEvent {
    /// Pointer click
    Click { target: HitTarget },
    /// Text changed in an indexed input slot; `text` is the slot's full value
    TextInput { slot: usize, text: String },
    /// Key pressed while an indexed input slot had focus
    KeyDown { slot: usize, key: Key },
    /// An indexed input slot received focus
    Focus { slot: usize },
    /// A scroll surface moved to a new vertical offset
    Scroll { offset: f32 },
}

impl InputEvent {
    /// A click on the widget body
    pub fn click() -> Self {
        InputEvent::Click {
            target: HitTarget::Surface,
        }
    }

    pub fn click_on(target: HitTarget) -> Self {
        InputEvent::Click { target }
    }
}
