//! Neat Buttons Widgets
//!
//! Three self-contained animated buttons, each an explicit state machine
//! whose presentation is a pure function of its state:
//!
//! - **Status button**: cycles Idle → Loading → Error/Success, resizing to
//!   the measured width of its visible words and morphing its icon
//! - **PIN button**: expands into a four-slot PIN input, verifies, shows a
//!   success mark and collapses again
//! - **Artwork button**: expands a thumbnail stack into a scrollable grid and
//!   a detail view, with elements carried between layouts by continuity ids
//!
//! A [`WidgetHost`] owns one widget's state, its phase timers and the
//! animation engine it feeds. [`Showcase`] puts the three on one page.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use neat_core::{InputEvent, TableTextMeasurer};
//! use neat_widgets::{HostConfig, StatusButton, StatusConfig, StatusPhase, WidgetHost};
//!
//! let measurer = TableTextMeasurer::new()
//!     .with_width("Schedule", 70.0)
//!     .with_width("Meeting", 60.0)
//!     .with_width("Processing", 90.0);
//! let mut host = WidgetHost::mount(
//!     StatusButton::new(StatusConfig::new()),
//!     Arc::new(measurer),
//!     HostConfig::default(),
//! );
//!
//! host.dispatch(&InputEvent::click());
//! assert_eq!(host.state().map(|s| s.phase), Some(StatusPhase::Loading));
//!
//! host.advance(Duration::from_millis(2000));
//! assert_eq!(host.state().map(|s| s.phase), Some(StatusPhase::Error));
//! ```

pub mod artwork_button;
pub mod catalog;
pub mod error;
pub mod host;
pub mod pin_button;
pub mod showcase;
pub mod status_button;
pub mod theme;
pub mod widget;

pub use artwork_button::{
    ArtworkButton, ArtworkConfig, ArtworkContent, ArtworkEvent, ArtworkMode, ArtworkState,
    ArtworkView,
};
pub use catalog::{Artwork, Catalog};
pub use error::{CatalogError, Result};
pub use host::{HostConfig, WidgetHost};
pub use pin_button::{PinButton, PinConfig, PinContent, PinEvent, PinMode, PinState, PinView};
pub use showcase::{PageHeader, Showcase, ShowcaseConfig, Snapshot};
pub use status_button::{
    StatusButton, StatusConfig, StatusEvent, StatusPhase, StatusState, StatusView,
};
pub use theme::Theme;
pub use widget::{Command, Commands, Effect, LabelWidths, Widget, WidgetKind};
