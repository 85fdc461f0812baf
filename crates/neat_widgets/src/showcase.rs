//! Showcase page
//!
//! A header (logo, title, tagline) over three tiles, one per widget. The
//! page plays a single staggered entrance on mount; after that each tile is
//! driven by its own [`WidgetHost`].

use std::sync::Arc;
use std::time::Duration;

use neat_animation::engine::Frame;
use neat_animation::{AnimationEngine, ElementTargets, Interpolator, Property, Stagger, TargetSet, Transition};
use neat_core::{InputEvent, TextMeasurer};
use serde::Serialize;

use crate::artwork_button::{ArtworkButton, ArtworkConfig, ArtworkView};
use crate::catalog::Catalog;
use crate::host::{HostConfig, WidgetHost};
use crate::pin_button::{PinButton, PinConfig, PinView};
use crate::status_button::{StatusButton, StatusConfig, StatusView};
use crate::widget::{Effect, WidgetKind};

/// Static page copy
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageHeader {
    pub title: String,
    pub tagline: String,
}

impl Default for PageHeader {
    fn default() -> Self {
        Self {
            title: "Neat Buttons".to_string(),
            tagline: "Small buttons that change shape, morph icons and expand into \
                      richer surfaces."
                .to_string(),
        }
    }
}

/// Everything needed to build a showcase
#[derive(Clone, Debug, Default)]
pub struct ShowcaseConfig {
    pub header: PageHeader,
    pub status: StatusConfig,
    pub pin: PinConfig,
    pub artwork: ArtworkConfig,
    pub catalog: Catalog,
    pub host: HostConfig,
}

/// Element keys of the page entrance, in stagger order
pub fn entrance_keys() -> Vec<String> {
    let mut keys = vec![
        "page/logo".to_string(),
        "page/title".to_string(),
        "page/tagline".to_string(),
    ];
    keys.extend(WidgetKind::ALL.iter().map(|kind| format!("page/tile/{kind}")));
    keys
}

/// Rise-and-fade entrance for the header and the tiles
pub fn entrance_targets() -> TargetSet {
    let keys = entrance_keys();
    let stagger = Stagger::new(100, 200);
    let spring = Transition::spring(150.0, 14.0);

    let mut set = TargetSet::new();
    for (index, key) in keys.iter().enumerate() {
        let transition = stagger.apply(spring, index, keys.len());
        set.push(
            ElementTargets::new(key.as_str())
                .initial(Property::Y, 20.0)
                .initial(Property::Opacity, 0.0)
                .animate(Property::Y, 0.0, transition)
                .animate(Property::Opacity, 1.0, transition),
        );
    }
    set
}

/// Serializable picture of the page at one instant
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub elapsed_ms: u64,
    pub header: PageHeader,
    pub status: Option<StatusView>,
    pub pin: Option<PinView>,
    pub artwork: Option<ArtworkView>,
    /// Sampled engine values for every live element
    pub frame: Frame,
}

/// The showcase page and its three hosted widgets
pub struct Showcase {
    header: PageHeader,
    page: Interpolator,
    status: WidgetHost<StatusButton>,
    pin: WidgetHost<PinButton>,
    artwork: WidgetHost<ArtworkButton>,
    host: HostConfig,
    elapsed: Duration,
}

impl Showcase {
    pub fn new(config: ShowcaseConfig, measurer: Arc<dyn TextMeasurer>) -> Self {
        let ShowcaseConfig {
            header,
            status,
            pin,
            artwork,
            catalog,
            host,
        } = config;

        let mut page = Interpolator::new();
        page.apply(&entrance_targets());

        let showcase = Self {
            header,
            page,
            status: WidgetHost::mount(StatusButton::new(status), Arc::clone(&measurer), host),
            pin: WidgetHost::mount(PinButton::new(pin), Arc::clone(&measurer), host),
            artwork: WidgetHost::mount(ArtworkButton::new(artwork, catalog), measurer, host),
            host,
            elapsed: Duration::ZERO,
        };
        tracing::info!(
            frame_ms = host.frame_interval.as_millis() as u64,
            artworks = showcase.artwork.widget().catalog().len(),
            "showcase mounted"
        );
        showcase
    }

    /// Route an input to one widget
    pub fn dispatch(&mut self, kind: WidgetKind, input: &InputEvent) {
        tracing::debug!(widget = %kind, ?input, "dispatch");
        match kind {
            WidgetKind::Status => self.status.dispatch(input),
            WidgetKind::Pin => self.pin.dispatch(input),
            WidgetKind::Artwork => self.artwork.dispatch(input),
        }
    }

    /// Advance the page and every widget by `dt`
    pub fn advance(&mut self, dt: Duration) {
        self.status.advance(dt);
        self.pin.advance(dt);
        self.artwork.advance(dt);

        for step in self.host.frames(dt) {
            self.page.tick(step);
        }
        self.elapsed += dt;
    }

    /// Effects recorded by every widget since the last call
    pub fn take_effects(&mut self) -> Vec<(WidgetKind, Effect)> {
        let mut effects = Vec::new();
        effects.extend(self.status.take_effects().into_iter().map(|e| (WidgetKind::Status, e)));
        effects.extend(self.pin.take_effects().into_iter().map(|e| (WidgetKind::Pin, e)));
        effects.extend(self.artwork.take_effects().into_iter().map(|e| (WidgetKind::Artwork, e)));
        effects
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut frame = self.page.frame();
        frame.extend(self.status.engine().frame());
        frame.extend(self.pin.engine().frame());
        frame.extend(self.artwork.engine().frame());

        Snapshot {
            elapsed_ms: self.elapsed.as_millis() as u64,
            header: self.header.clone(),
            status: self.status.is_mounted().then(|| self.status.view().clone()),
            pin: self.pin.is_mounted().then(|| self.pin.view().clone()),
            artwork: self.artwork.is_mounted().then(|| self.artwork.view().clone()),
            frame,
        }
    }

    /// Whether any engine still has motion left
    pub fn is_animating(&self) -> bool {
        self.page.is_animating()
            || self.status.engine().is_animating()
            || self.pin.engine().is_animating()
            || self.artwork.engine().is_animating()
    }

    pub fn unmount(&mut self) {
        self.status.unmount();
        self.pin.unmount();
        self.artwork.unmount();
        self.page.clear();
        tracing::info!("showcase unmounted");
    }

    pub fn status(&self) -> &WidgetHost<StatusButton> {
        &self.status
    }

    pub fn pin(&self) -> &WidgetHost<PinButton> {
        &self.pin
    }

    pub fn artwork(&self) -> &WidgetHost<ArtworkButton> {
        &self.artwork
    }

    pub fn page(&self) -> &Interpolator {
        &self.page
    }
}
