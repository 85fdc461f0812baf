//! Widget state machine contract
//!
//! A widget is a pure description of behavior. It owns no state of its own:
//! the [`WidgetHost`](crate::host::WidgetHost) keeps the state, feeds events
//! through [`Widget::reduce`], and hands the derived targets to an engine.
//!
//! ```text
//! InputEvent ──translate──▶ Event ──reduce──▶ (State, Commands)
//!                                               │
//!                         derive_view ◀─────────┘
//!                              │
//!                           targets ──▶ AnimationEngine
//! ```

use std::fmt;
use std::time::Duration;

use neat_animation::TargetSet;
use neat_core::{Generation, InputEvent};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Side effects a widget asks its host to perform on the outside world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum Effect {
    /// Move keyboard focus to an input slot
    FocusSlot { slot: usize },
    /// Write a saved offset back to the scroll surface
    RestoreScroll { offset: f32 },
}

/// Output of a reduction besides the new state
#[derive(Clone, Debug, PartialEq)]
pub enum Command<T> {
    /// Fire `timer` after `delay`, scoped to the state's generation
    Schedule { delay: Duration, timer: T },
    Effect(Effect),
}

pub type Commands<T> = SmallVec<[Command<T>; 2]>;

/// Measured label widths keyed by label text
pub type LabelWidths = FxHashMap<String, f32>;

/// An explicit state machine with a pure presentation
pub trait Widget {
    type State: Clone + fmt::Debug;
    type Event: fmt::Debug;
    type Timer: Clone + fmt::Debug;
    type View: Clone + fmt::Debug + Serialize;

    /// Short name used as the element key scope and in logs
    fn name(&self) -> &'static str;

    /// Fresh state for a newly mounted widget
    fn mount(&self) -> Self::State;

    /// Current transition counter
    fn generation(_state: &Self::State) -> Generation {
        Generation::default()
    }

    /// Map a raw input to a widget event, or drop it
    fn translate(&self, state: &Self::State, input: &InputEvent) -> Option<Self::Event>;

    /// Event delivered when a scheduled timer fires
    fn timer_event(&self, timer: Self::Timer, generation: Generation) -> Self::Event;

    fn reduce(&self, state: Self::State, event: Self::Event)
        -> (Self::State, Commands<Self::Timer>);

    fn derive_view(&self, state: &Self::State) -> Self::View;

    fn targets(&self, view: &Self::View) -> TargetSet;

    /// Labels the host should measure after committing `view`
    fn labels(&self, _view: &Self::View) -> Vec<String> {
        Vec::new()
    }

    /// Event carrying fresh label measurements
    fn measured_event(&self, _widths: &LabelWidths) -> Option<Self::Event> {
        None
    }
}

/// The three showcase widgets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Status,
    Pin,
    Artwork,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 3] = [WidgetKind::Status, WidgetKind::Pin, WidgetKind::Artwork];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Status => "status",
            WidgetKind::Pin => "pin",
            WidgetKind::Artwork => "artwork",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WidgetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(WidgetKind::Status),
            "pin" => Ok(WidgetKind::Pin),
            "artwork" => Ok(WidgetKind::Artwork),
            other => Err(format!("unknown widget '{other}'")),
        }
    }
}
