//! Artwork-viewer button
//!
//! A card showing a small rotated stack of thumbnails. Clicking it opens a
//! two-column grid of the catalog; picking a tile shows it enlarged with its
//! title and creator. The back control walks the same path in reverse.
//!
//! The first three artworks appear in all three layouts and share a
//! continuity id (`album-{i}`), so the engine moves one element between the
//! stack, the grid and the detail view. The rest only live in the grid and
//! the detail view (`preview-album-{i}`).
//!
//! The grid scroll offset is saved when a tile is opened and written back to
//! the scroll surface on return.

use std::convert::Infallible;

use neat_animation::{
    ContinuityId, Easing, ElementTargets, Property, Stagger, TargetSet, Transition,
};
use neat_core::{Generation, HitTarget, InputEvent, Rect};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::theme::Theme;
use crate::widget::{Command, Commands, Effect, Widget};

/// Thumbnails in the collapsed stack
pub const STACK_SIZE: usize = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkMode {
    #[default]
    Collapsed,
    Grid,
    Detail,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtworkState {
    pub mode: ArtworkMode,
    pub selected: Option<usize>,
    /// Live grid scroll position
    pub scroll_offset: f32,
    /// Grid scroll position captured when a tile was opened
    pub saved_scroll_offset: f32,
    /// Stack thumbnail rotations in degrees, fixed for the life of the mount
    pub stack_rotations: [f32; STACK_SIZE],
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArtworkEvent {
    Open,
    Close,
    Select(usize),
    Back,
    Scroll(f32),
}

/// Continuity id for the artwork at `index`
pub fn continuity_id(index: usize) -> ContinuityId {
    if index < STACK_SIZE {
        ContinuityId::new(format!("album-{index}"))
    } else {
        ContinuityId::new(format!("preview-album-{index}"))
    }
}

/// One artwork placed in a layout
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tile {
    pub index: usize,
    pub continuity: ContinuityId,
    pub bounds: Rect,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Thumbnail {
    #[serde(flatten)]
    pub tile: Tile,
    pub rotation: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ArtworkContent {
    Stack {
        thumbnails: Vec<Thumbnail>,
        label: String,
    },
    Grid {
        tiles: Vec<Tile>,
        scroll_offset: f32,
    },
    Detail {
        tile: Tile,
        title: String,
        creator_name: String,
        creator_image_url: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ArtworkView {
    pub mode: ArtworkMode,
    pub width: f32,
    pub height: f32,
    pub content: ArtworkContent,
}

/// Where stack rotations come from
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StackRotations {
    /// Fresh random angles in [-10, 10) on every mount
    #[default]
    Random,
    Fixed([f32; STACK_SIZE]),
}

/// Artwork button configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ArtworkConfig {
    pub collapsed: (f32, f32),
    pub grid: (f32, f32),
    pub detail: (f32, f32),
    pub columns: usize,
    pub grid_padding: f32,
    pub grid_top: f32,
    pub grid_gap: f32,
    pub thumb_size: f32,
    /// How much adjacent stack thumbnails overlap
    pub thumb_overlap: f32,
    pub stack_left: f32,
    pub detail_image: f32,
    pub label: String,
    pub rotations: StackRotations,
    pub theme: Theme,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            collapsed: (300.0, 50.0),
            grid: (400.0, 380.0),
            detail: (400.0, 300.0),
            columns: 2,
            grid_padding: 30.0,
            grid_top: 70.0,
            grid_gap: 16.0,
            thumb_size: 24.0,
            thumb_overlap: 10.0,
            stack_left: 8.0,
            detail_image: 150.0,
            label: "View All Artworks".to_string(),
            rotations: StackRotations::Random,
            theme: Theme::default(),
        }
    }
}

impl ArtworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotations(mut self, rotations: [f32; STACK_SIZE]) -> Self {
        self.rotations = StackRotations::Fixed(rotations);
        self
    }
}

// Detail column: image, title line, creator line, 20px apart
const DETAIL_GAP: f32 = 20.0;
const TITLE_LINE: f32 = 24.0;
const CREATOR_LINE: f32 = 20.0;

fn random_rotations() -> [f32; STACK_SIZE] {
    let mut buf = [0u8; 4 * STACK_SIZE];
    if let Err(err) = getrandom::getrandom(&mut buf) {
        tracing::warn!(%err, "artwork: no entropy for stack rotations");
        return [0.0; STACK_SIZE];
    }
    let mut rotations = [0.0; STACK_SIZE];
    for (rotation, bytes) in rotations.iter_mut().zip(buf.chunks_exact(4)) {
        let bits = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        // 24 bits of mantissa keep the unit value strictly below 1.0
        let unit = (bits >> 8) as f32 / (1u32 << 24) as f32;
        *rotation = unit * 20.0 - 10.0;
    }
    rotations
}

/// The artwork-viewer button
#[derive(Clone, Debug, Default)]
pub struct ArtworkButton {
    config: ArtworkConfig,
    catalog: Catalog,
}

impl ArtworkButton {
    pub fn new(config: ArtworkConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &ArtworkConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn size(&self, mode: ArtworkMode) -> (f32, f32) {
        match mode {
            ArtworkMode::Collapsed => self.config.collapsed,
            ArtworkMode::Grid => self.config.grid,
            ArtworkMode::Detail => self.config.detail,
        }
    }

    /// Side of a square grid cell
    pub fn cell_size(&self) -> f32 {
        let columns = self.config.columns.max(1) as f32;
        let inner = self.config.grid.0 - 2.0 * self.config.grid_padding;
        (inner - self.config.grid_gap * (columns - 1.0)) / columns
    }

    /// Grid cell for `index`, shifted up by `scroll_offset`
    pub fn grid_bounds(&self, index: usize, scroll_offset: f32) -> Rect {
        let columns = self.config.columns.max(1);
        let cell = self.cell_size();
        let stride = cell + self.config.grid_gap;
        let col = (index % columns) as f32;
        let row = (index / columns) as f32;
        Rect::new(
            self.config.grid_padding + col * stride,
            self.config.grid_top + row * stride - scroll_offset,
            cell,
            cell,
        )
    }

    pub fn stack_bounds(&self, index: usize) -> Rect {
        let size = self.config.thumb_size;
        Rect::new(
            self.config.stack_left + index as f32 * (size - self.config.thumb_overlap),
            (self.config.collapsed.1 - size) / 2.0,
            size,
            size,
        )
    }

    pub fn detail_bounds(&self) -> Rect {
        let (width, height) = self.config.detail;
        let image = self.config.detail_image;
        let column = image + 2.0 * DETAIL_GAP + TITLE_LINE + CREATOR_LINE;
        Rect::new((width - image) / 2.0, (height - column) / 2.0, image, image)
    }

    fn tile(&self, index: usize, bounds: Rect) -> Tile {
        Tile {
            index,
            continuity: continuity_id(index),
            bounds,
            image_url: self
                .catalog
                .get(index)
                .map(|a| a.image_url.clone())
                .unwrap_or_default(),
        }
    }

    fn grid_content(&self, scroll_offset: f32) -> ArtworkContent {
        ArtworkContent::Grid {
            tiles: (0..self.catalog.len())
                .map(|i| self.tile(i, self.grid_bounds(i, scroll_offset)))
                .collect(),
            scroll_offset,
        }
    }

    fn back_control(key: &str) -> ElementTargets {
        let slide = Transition::tween(300, Easing::EXPO_OUT);
        ElementTargets::new(key)
            .initial(Property::Opacity, 0.0)
            .initial(Property::X, -12.0)
            .animate(Property::Opacity, 1.0, slide)
            .animate(Property::X, 0.0, slide)
            .exit(Property::Opacity, 0.0, slide)
            .exit(Property::X, -12.0, slide)
    }

    fn byline(key: &str, delay_ms: u32) -> ElementTargets {
        let rise = Transition::tween(350, Easing::EXPO_OUT);
        ElementTargets::new(key)
            .initial(Property::Opacity, 0.0)
            .initial(Property::Y, 10.0)
            .animate(Property::Opacity, 1.0, rise.delay(delay_ms))
            .animate(Property::Y, 0.0, rise.delay(delay_ms))
            .exit(Property::Opacity, 0.0, rise)
            .exit(Property::Y, 6.0, rise)
    }
}

impl Widget for ArtworkButton {
    type State = ArtworkState;
    type Event = ArtworkEvent;
    type Timer = Infallible;
    type View = ArtworkView;

    fn name(&self) -> &'static str {
        "artwork"
    }

    fn mount(&self) -> ArtworkState {
        let stack_rotations = match self.config.rotations {
            StackRotations::Random => random_rotations(),
            StackRotations::Fixed(rotations) => rotations,
        };
        ArtworkState {
            mode: ArtworkMode::Collapsed,
            selected: None,
            scroll_offset: 0.0,
            saved_scroll_offset: 0.0,
            stack_rotations,
        }
    }

    fn translate(&self, state: &ArtworkState, input: &InputEvent) -> Option<ArtworkEvent> {
        match (state.mode, input) {
            (ArtworkMode::Collapsed, InputEvent::Click { .. }) => Some(ArtworkEvent::Open),
            (ArtworkMode::Grid, InputEvent::Click { target }) => match target {
                HitTarget::Back => Some(ArtworkEvent::Close),
                HitTarget::Item(i) => Some(ArtworkEvent::Select(*i)),
                HitTarget::Surface | HitTarget::Inert => None,
            },
            (ArtworkMode::Detail, InputEvent::Click { target }) => match target {
                HitTarget::Back | HitTarget::Surface => Some(ArtworkEvent::Back),
                HitTarget::Item(_) | HitTarget::Inert => None,
            },
            (ArtworkMode::Grid, InputEvent::Scroll { offset }) => {
                Some(ArtworkEvent::Scroll(*offset))
            }
            _ => None,
        }
    }

    fn timer_event(&self, timer: Infallible, _generation: Generation) -> ArtworkEvent {
        match timer {}
    }

    fn reduce(
        &self,
        mut state: ArtworkState,
        event: ArtworkEvent,
    ) -> (ArtworkState, Commands<Infallible>) {
        let mut commands = Commands::new();

        match (state.mode, event) {
            (ArtworkMode::Collapsed, ArtworkEvent::Open) => {
                state.mode = ArtworkMode::Grid;
                state.selected = None;
                state.scroll_offset = 0.0;
                state.saved_scroll_offset = 0.0;
                tracing::debug!("artwork: collapsed -> grid");
            }
            (ArtworkMode::Grid, ArtworkEvent::Close) => {
                state.mode = ArtworkMode::Collapsed;
                state.selected = None;
                tracing::debug!("artwork: grid -> collapsed");
            }
            (ArtworkMode::Grid, ArtworkEvent::Select(index)) => {
                if index < self.catalog.len() {
                    state.saved_scroll_offset = state.scroll_offset;
                    state.selected = Some(index);
                    state.mode = ArtworkMode::Detail;
                    tracing::debug!(index, saved = state.saved_scroll_offset, "artwork: grid -> detail");
                } else {
                    tracing::warn!(index, len = self.catalog.len(), "artwork: item out of range ignored");
                }
            }
            (ArtworkMode::Detail, ArtworkEvent::Back) => {
                state.mode = ArtworkMode::Grid;
                state.selected = None;
                state.scroll_offset = state.saved_scroll_offset;
                commands.push(Command::Effect(Effect::RestoreScroll {
                    offset: state.saved_scroll_offset,
                }));
                tracing::debug!(offset = state.scroll_offset, "artwork: detail -> grid");
            }
            (ArtworkMode::Grid, ArtworkEvent::Scroll(offset)) => {
                if offset.is_finite() {
                    state.scroll_offset = offset.max(0.0);
                } else {
                    tracing::warn!(offset, "artwork: non-finite scroll ignored");
                }
            }
            (mode, event) => {
                tracing::trace!(?mode, ?event, "artwork: event ignored");
            }
        }

        (state, commands)
    }

    fn derive_view(&self, state: &ArtworkState) -> ArtworkView {
        let (width, height) = self.size(state.mode);
        let content = match state.mode {
            ArtworkMode::Collapsed => ArtworkContent::Stack {
                thumbnails: (0..STACK_SIZE.min(self.catalog.len()))
                    .map(|i| Thumbnail {
                        tile: self.tile(i, self.stack_bounds(i)),
                        rotation: state.stack_rotations[i],
                    })
                    .collect(),
                label: self.config.label.clone(),
            },
            ArtworkMode::Grid => self.grid_content(state.scroll_offset),
            ArtworkMode::Detail => {
                match state.selected.and_then(|i| self.catalog.get(i).map(|a| (i, a))) {
                    Some((index, artwork)) => ArtworkContent::Detail {
                        tile: self.tile(index, self.detail_bounds()),
                        title: artwork.title.clone(),
                        creator_name: artwork.creator_name.clone(),
                        creator_image_url: artwork.creator_image_url.clone(),
                    },
                    None => {
                        tracing::warn!(selected = ?state.selected, "artwork: detail without a valid selection");
                        self.grid_content(state.scroll_offset)
                    }
                }
            }
        };
        ArtworkView {
            mode: state.mode,
            width,
            height,
            content,
        }
    }

    fn targets(&self, view: &ArtworkView) -> TargetSet {
        let resize = Transition::tween(500, Easing::EXPO_OUT);
        let travel = Transition::tween(550, Easing::EXPO_OUT);
        let pop = Transition::tween(350, Easing::EXPO_OUT);

        let mut set = TargetSet::new().with(
            ElementTargets::new("surface")
                .animate(Property::Width, view.width, resize)
                .animate(Property::Height, view.height, resize)
                .animate(Property::Background, self.config.theme.card, Transition::Instant),
        );

        match &view.content {
            ArtworkContent::Stack { thumbnails, .. } => {
                set.push(
                    ElementTargets::new("preview")
                        .initial(Property::Opacity, 0.0)
                        .initial(Property::Y, -6.0)
                        .initial(Property::Scale, 0.95)
                        .animate(Property::Opacity, 1.0, pop)
                        .animate(Property::Y, 0.0, pop)
                        .animate(Property::Scale, 1.0, pop)
                        .exit(Property::Opacity, 0.0, pop)
                        .exit(Property::Y, 6.0, pop)
                        .exit(Property::Scale, 0.95, pop),
                );
                for thumb in thumbnails {
                    set.push(
                        ElementTargets::new(format!("preview/thumb/{}", thumb.tile.index))
                            .continuity(thumb.tile.continuity.clone())
                            .animate(Property::Bounds, thumb.tile.bounds, resize)
                            .animate(Property::Rotate, thumb.rotation, Transition::Instant),
                    );
                }
            }
            ArtworkContent::Grid { tiles, .. } => {
                set.push(Self::back_control("grid/back"));

                let total = tiles.len();
                let enter = Stagger::new(100, 25);
                let leave = Stagger::new(0, 15).reverse();
                for tile in tiles {
                    let mut item = ElementTargets::new(format!("grid/item/{}", tile.index))
                        .continuity(tile.continuity.clone())
                        .animate(Property::Bounds, tile.bounds, travel);

                    item = if tile.index >= STACK_SIZE {
                        let exit = Transition::tween(250, Easing::EXIT);
                        item.initial(Property::Scale, 0.88)
                            .initial(Property::Opacity, 0.0)
                            .animate(Property::Scale, 1.0, enter.apply(pop, tile.index, total))
                            .animate(Property::Opacity, 1.0, enter.apply(pop, tile.index, total))
                            .exit(Property::Scale, 0.9, leave.apply(exit, tile.index, total))
                            .exit(Property::Opacity, 0.0, leave.apply(exit, tile.index, total))
                    } else {
                        item.animate(Property::Opacity, 1.0, Transition::Instant)
                            .animate(Property::Scale, 1.0, Transition::Instant)
                            .exit(Property::Opacity, 0.0, travel)
                            .exit(Property::Scale, 0.94, travel)
                    };
                    set.push(item);
                }
            }
            ArtworkContent::Detail { tile, .. } => {
                set.push(Self::back_control("detail/back"));
                set.push(
                    ElementTargets::new("detail/panel")
                        .initial(Property::Opacity, 0.0)
                        .initial(Property::Scale, 0.94)
                        .animate(Property::Opacity, 1.0, pop)
                        .animate(Property::Scale, 1.0, pop)
                        .exit(Property::Opacity, 0.0, pop)
                        .exit(Property::Scale, 0.96, pop),
                );
                set.push(
                    ElementTargets::new("detail/image")
                        .continuity(tile.continuity.clone())
                        .animate(Property::Bounds, tile.bounds, travel),
                );
                set.push(Self::byline("detail/title", 80));
                set.push(Self::byline("detail/creator", 120));
            }
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Artwork;

    fn button() -> ArtworkButton {
        ArtworkButton::new(
            ArtworkConfig::new().rotations([-4.0, 2.5, 9.0]),
            Catalog::builtin(),
        )
    }

    fn click(button: &ArtworkButton, state: ArtworkState, target: HitTarget) -> ArtworkState {
        match button.translate(&state, &InputEvent::click_on(target)) {
            Some(event) => button.reduce(state, event).0,
            None => state,
        }
    }

    fn open(button: &ArtworkButton) -> ArtworkState {
        click(button, button.mount(), HitTarget::Surface)
    }

    #[test]
    fn test_open_and_close() {
        let button = button();
        let grid = open(&button);
        assert_eq!(grid.mode, ArtworkMode::Grid);

        let collapsed = click(&button, grid, HitTarget::Back);
        assert_eq!(collapsed.mode, ArtworkMode::Collapsed);
    }

    #[test]
    fn test_any_click_opens_when_collapsed() {
        let button = button();
        for target in [HitTarget::Inert, HitTarget::Item(1), HitTarget::Back] {
            assert_eq!(click(&button, button.mount(), target).mode, ArtworkMode::Grid);
        }
    }

    #[test]
    fn test_inert_clicks_never_toggle() {
        let button = button();
        let grid = open(&button);
        assert_eq!(click(&button, grid.clone(), HitTarget::Inert), grid);
        assert_eq!(click(&button, grid.clone(), HitTarget::Surface), grid);

        let detail = click(&button, grid, HitTarget::Item(1));
        assert_eq!(click(&button, detail.clone(), HitTarget::Inert), detail);
        assert_eq!(click(&button, detail.clone(), HitTarget::Item(0)), detail);
    }

    #[test]
    fn test_select_and_back() {
        let button = button();
        for index in 0..4 {
            let detail = click(&button, open(&button), HitTarget::Item(index));
            assert_eq!(detail.mode, ArtworkMode::Detail);
            assert_eq!(detail.selected, Some(index));

            for target in [HitTarget::Back, HitTarget::Surface] {
                let back = click(&button, detail.clone(), target);
                assert_eq!(back.mode, ArtworkMode::Grid);
                assert_eq!(back.selected, None);
            }
        }
    }

    #[test]
    fn test_out_of_range_item_is_ignored() {
        let button = button();
        let grid = open(&button);
        assert_eq!(click(&button, grid.clone(), HitTarget::Item(9)), grid);
    }

    #[test]
    fn test_scroll_is_restored_after_detail() {
        let button = button();
        let grid = button.reduce(open(&button), ArtworkEvent::Scroll(48.5)).0;
        let detail = click(&button, grid, HitTarget::Item(3));
        assert_eq!(detail.saved_scroll_offset, 48.5);

        let (back, commands) = button.reduce(detail, ArtworkEvent::Back);
        assert_eq!(back.scroll_offset, 48.5);
        assert_eq!(
            commands.as_slice(),
            &[Command::Effect(Effect::RestoreScroll { offset: 48.5 })]
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let button = button();
        let grid = button.reduce(open(&button), ArtworkEvent::Scroll(-30.0)).0;
        assert_eq!(grid.scroll_offset, 0.0);
        let grid = button.reduce(grid, ArtworkEvent::Scroll(f32::NAN)).0;
        assert_eq!(grid.scroll_offset, 0.0);
    }

    #[test]
    fn test_scroll_outside_grid_is_dropped() {
        let button = button();
        let state = button.mount();
        assert!(button
            .translate(&state, &InputEvent::Scroll { offset: 10.0 })
            .is_none());
    }

    #[test]
    fn test_grid_layout() {
        let button = button();
        assert_eq!(button.cell_size(), 162.0);
        assert_eq!(button.grid_bounds(0, 0.0), Rect::new(30.0, 70.0, 162.0, 162.0));
        assert_eq!(button.grid_bounds(1, 0.0), Rect::new(208.0, 70.0, 162.0, 162.0));
        assert_eq!(button.grid_bounds(2, 0.0), Rect::new(30.0, 248.0, 162.0, 162.0));
        assert_eq!(button.grid_bounds(0, 100.0).y(), -30.0);
    }

    #[test]
    fn test_stack_thumbnails_overlap() {
        let button = button();
        let view = button.derive_view(&button.mount());
        let ArtworkContent::Stack { thumbnails, label } = view.content else {
            panic!("expected the stack");
        };
        assert_eq!(label, "View All Artworks");
        assert_eq!(thumbnails.len(), 3);
        assert_eq!(thumbnails[0].tile.bounds, Rect::new(8.0, 13.0, 24.0, 24.0));
        assert_eq!(thumbnails[1].tile.bounds.x(), 22.0);
        assert_eq!(thumbnails[2].rotation, 9.0);
    }

    #[test]
    fn test_continuity_ids_match_across_layouts() {
        let button = button();
        let stack_ids: Vec<ContinuityId> = match button.derive_view(&button.mount()).content {
            ArtworkContent::Stack { thumbnails, .. } => {
                thumbnails.into_iter().map(|t| t.tile.continuity).collect()
            }
            _ => unreachable!(),
        };
        let grid_ids: Vec<ContinuityId> = match button.derive_view(&open(&button)).content {
            ArtworkContent::Grid { tiles, .. } => tiles.into_iter().map(|t| t.continuity).collect(),
            _ => unreachable!(),
        };

        assert_eq!(stack_ids, grid_ids[..3]);
        assert_eq!(grid_ids[3].as_str(), "preview-album-3");

        for index in [0, 3] {
            let detail = click(&button, open(&button), HitTarget::Item(index));
            let ArtworkContent::Detail { tile, .. } = button.derive_view(&detail).content else {
                panic!("expected detail");
            };
            assert_eq!(tile.continuity, grid_ids[index]);
            assert_eq!(tile.bounds, Rect::new(125.0, 33.0, 150.0, 150.0));
        }
    }

    #[test]
    fn test_detail_view_carries_record() {
        let button = ArtworkButton::new(
            ArtworkConfig::new().rotations([0.0; 3]),
            Catalog::new(vec![Artwork::new("Shiva", "Nandalal Bose", "")]).unwrap(),
        );
        let detail = click(&button, open(&button), HitTarget::Item(0));
        let view = button.derive_view(&detail);
        assert_eq!((view.width, view.height), (400.0, 300.0));
        let ArtworkContent::Detail { title, creator_name, .. } = view.content else {
            panic!("expected detail");
        };
        assert_eq!(title, "Shiva");
        assert_eq!(creator_name, "Nandalal Bose");
    }

    #[test]
    fn test_random_rotations_in_range() {
        let button = ArtworkButton::default();
        for _ in 0..20 {
            let state = button.mount();
            assert!(state
                .stack_rotations
                .iter()
                .all(|r| (-10.0..10.0).contains(r)));
        }
    }

    #[test]
    fn test_rotations_stable_across_transitions() {
        let button = ArtworkButton::default();
        let state = button.mount();
        let rotations = state.stack_rotations;
        let state = click(&button, state, HitTarget::Surface);
        let state = click(&button, state, HitTarget::Back);
        assert_eq!(state.stack_rotations, rotations);
    }

    #[test]
    fn test_late_grid_items_stagger() {
        let button = button();
        let set = button.targets(&button.derive_view(&open(&button)));

        let item = set.get("grid/item/3").unwrap();
        assert_eq!(item.target(Property::Opacity).unwrap().transition.delay_ms(), 175);
        assert_eq!(item.exit[0].transition.delay_ms(), 0);
        assert_eq!(set.get("grid/item/0").unwrap().exit[0].transition.delay_ms(), 0);
        assert_eq!(item.continuity.as_ref().map(|c| c.as_str()), Some("preview-album-3"));
    }
}
