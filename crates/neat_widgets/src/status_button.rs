//! Status-action button
//!
//! A pill button that walks `Idle → Loading → (Success | Error) → Idle`.
//! Its label is a horizontal track of words (`Schedule Meeting Processing
//! <Result>`) scrolled so that two of them show at a time, and the pill
//! resizes to fit exactly those two.
//!
//! Word widths come from the host's measurement hook. Until a word has been
//! measured it counts as zero wide.

use std::collections::BTreeMap;
use std::time::Duration;

use neat_animation::{Easing, ElementTargets, PathData, Property, TargetSet, Transition};
use neat_core::{Color, Generation, InputEvent};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::widget::{Command, Commands, LabelWidths, Widget};

/// Button phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Result of a finished loading phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Error,
}

impl Outcome {
    pub fn flip(self) -> Self {
        match self {
            Outcome::Success => Outcome::Error,
            Outcome::Error => Outcome::Success,
        }
    }

    fn phase(self) -> StatusPhase {
        match self {
            Outcome::Success => StatusPhase::Success,
            Outcome::Error => StatusPhase::Error,
        }
    }
}

/// Words of the label track
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Word {
    Schedule,
    Meeting,
    Processing,
    Successful,
    Failed,
}

impl Word {
    pub const ALL: [Word; 5] = [
        Word::Schedule,
        Word::Meeting,
        Word::Processing,
        Word::Successful,
        Word::Failed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Word::Schedule => "Schedule",
            Word::Meeting => "Meeting",
            Word::Processing => "Processing",
            Word::Successful => "Successful",
            Word::Failed => "Failed",
        }
    }

    pub fn from_label(label: &str) -> Option<Word> {
        Word::ALL.into_iter().find(|w| w.label() == label)
    }
}

/// Measured word widths in px
pub type WordWidths = BTreeMap<Word, f32>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusState {
    pub phase: StatusPhase,
    pub measured_word_widths: WordWidths,
    /// Outcome of the next completed loading phase
    pub next_outcome: Outcome,
    pub generation: Generation,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatusEvent {
    Click,
    LoadingElapsed { generation: Generation },
    WordsMeasured(WordWidths),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTimer {
    LoadingElapsed,
}

/// Icon glyph for a phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Plus,
    Spinner,
    Cross,
    Check,
}

// Every primary stroke is `M C C` so any two of them interpolate.
const PRIMARY_PLUS: &str = "M12 5 C12 7.33 12 9.67 12 12 C12 14.33 12 16.67 12 19";
const PRIMARY_ARC: &str = "M12 3 C14.387 3 16.676 3.948 18.364 5.636 C20.052 7.324 21 9.613 21 12";
const PRIMARY_CROSS: &str = "M9 9 C10 10 11 11 12 12 C13 13 14 14 15 15";
const PRIMARY_CHECK: &str = "M8 12.5 C9 13.5 10 14.5 11 15.5 C12.67 13.67 14.33 11.83 16 10";
const SECONDARY_BAR: &str = "M5 12 L19 12";
const SECONDARY_CROSS: &str = "M15 9 L9 15";
const RING: &str = "M12 3 A9 9 0 1 1 11.99 3";

#[derive(Clone, Debug)]
struct Glyphs {
    plus: PathData,
    arc: PathData,
    cross: PathData,
    check: PathData,
    bar: PathData,
    slash: PathData,
    ring: PathData,
}

impl Glyphs {
    fn parse() -> Self {
        let glyph = |src: &str| {
            PathData::parse(src).unwrap_or_else(|err| {
                tracing::warn!(%err, src, "invalid icon glyph");
                PathData::default()
            })
        };
        Self {
            plus: glyph(PRIMARY_PLUS),
            arc: glyph(PRIMARY_ARC),
            cross: glyph(PRIMARY_CROSS),
            check: glyph(PRIMARY_CHECK),
            bar: glyph(SECONDARY_BAR),
            slash: glyph(SECONDARY_CROSS),
            ring: glyph(RING),
        }
    }
}

/// One word in the label track
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WordSlot {
    pub word: Word,
    pub label: &'static str,
    pub visible: bool,
    pub width: f32,
}

/// Icon strokes for the current phase
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IconView {
    pub glyph: StatusIcon,
    pub primary: PathData,
    pub secondary: PathData,
    pub secondary_opacity: f32,
    pub ring_opacity: f32,
    pub spinning: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusView {
    pub phase: StatusPhase,
    pub width: f32,
    pub height: f32,
    pub track_offset: f32,
    pub words: [WordSlot; 4],
    pub icon: IconView,
    pub background: Color,
    pub foreground: Color,
}

/// Status button configuration
#[derive(Clone, Debug, PartialEq)]
pub struct StatusConfig {
    /// How long the loading phase lasts
    pub loading: Duration,
    pub icon_width: f32,
    /// Space between icon and label track
    pub icon_gap: f32,
    /// Space between adjacent words
    pub word_gap: f32,
    pub padding_x: f32,
    pub height: f32,
    pub theme: Theme,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            loading: Duration::from_millis(2000),
            icon_width: 20.0,
            icon_gap: 8.0,
            word_gap: 4.0,
            padding_x: 24.0,
            height: 48.0,
            theme: Theme::default(),
        }
    }
}

impl StatusConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(mut self, duration: Duration) -> Self {
        self.loading = duration;
        self
    }

    pub fn word_gap(mut self, gap: f32) -> Self {
        self.word_gap = gap;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// The status-action button
#[derive(Clone, Debug)]
pub struct StatusButton {
    config: StatusConfig,
    glyphs: Glyphs,
}

impl Default for StatusButton {
    fn default() -> Self {
        Self::new(StatusConfig::default())
    }
}

impl StatusButton {
    pub fn new(config: StatusConfig) -> Self {
        Self {
            config,
            glyphs: Glyphs::parse(),
        }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    /// The four track words in order for `phase`
    pub fn track(phase: StatusPhase) -> [Word; 4] {
        let result = match phase {
            StatusPhase::Success => Word::Successful,
            _ => Word::Failed,
        };
        [Word::Schedule, Word::Meeting, Word::Processing, result]
    }

    /// Index of the first visible word; two words are visible at a time
    pub fn first_visible(phase: StatusPhase) -> usize {
        match phase {
            StatusPhase::Idle => 0,
            StatusPhase::Loading => 1,
            StatusPhase::Success | StatusPhase::Error => 2,
        }
    }

    /// Pill width for `phase` given the measured word widths
    pub fn target_width(&self, phase: StatusPhase, widths: &WordWidths) -> f32 {
        let track = Self::track(phase);
        let first = Self::first_visible(phase);
        let visible = &track[first..first + 2];

        let words: f32 = visible.iter().map(|w| word_width(widths, *w)).sum();
        let gaps = self.config.word_gap * (visible.len() as f32 - 1.0);

        self.config.icon_width + self.config.icon_gap + words + gaps + 2.0 * self.config.padding_x
    }

    /// Horizontal track translation that brings the first visible word to the left edge
    pub fn track_offset(&self, phase: StatusPhase, widths: &WordWidths) -> f32 {
        let track = Self::track(phase);
        let first = Self::first_visible(phase);
        let hidden: f32 = track[..first].iter().map(|w| word_width(widths, *w)).sum();
        -(hidden + self.config.word_gap * first as f32)
    }

    fn icon(&self, phase: StatusPhase) -> IconView {
        let g = &self.glyphs;
        let (glyph, primary, secondary, secondary_opacity, ring_opacity) = match phase {
            StatusPhase::Idle => (StatusIcon::Plus, &g.plus, &g.bar, 1.0, 0.0),
            StatusPhase::Loading => (StatusIcon::Spinner, &g.arc, &g.bar, 0.0, 0.0),
            StatusPhase::Error => (StatusIcon::Cross, &g.cross, &g.slash, 1.0, 1.0),
            StatusPhase::Success => (StatusIcon::Check, &g.check, &g.bar, 0.0, 1.0),
        };
        IconView {
            glyph,
            primary: primary.clone(),
            secondary: secondary.clone(),
            secondary_opacity,
            ring_opacity,
            spinning: phase == StatusPhase::Loading,
        }
    }

    fn background(&self, phase: StatusPhase) -> Color {
        match phase {
            StatusPhase::Idle | StatusPhase::Loading => self.config.theme.primary,
            StatusPhase::Error => self.config.theme.error,
            StatusPhase::Success => self.config.theme.success,
        }
    }
}

fn word_width(widths: &WordWidths, word: Word) -> f32 {
    widths.get(&word).copied().unwrap_or(0.0)
}

impl Widget for StatusButton {
    type State = StatusState;
    type Event = StatusEvent;
    type Timer = StatusTimer;
    type View = StatusView;

    fn name(&self) -> &'static str {
        "status"
    }

    fn mount(&self) -> StatusState {
        StatusState {
            phase: StatusPhase::Idle,
            measured_word_widths: WordWidths::new(),
            next_outcome: Outcome::Error,
            generation: Generation::default(),
        }
    }

    fn generation(state: &StatusState) -> Generation {
        state.generation
    }

    fn translate(&self, _state: &StatusState, input: &InputEvent) -> Option<StatusEvent> {
        match input {
            InputEvent::Click { .. } => Some(StatusEvent::Click),
            _ => None,
        }
    }

    fn timer_event(&self, timer: StatusTimer, generation: Generation) -> StatusEvent {
        match timer {
            StatusTimer::LoadingElapsed => StatusEvent::LoadingElapsed { generation },
        }
    }

    fn reduce(
        &self,
        mut state: StatusState,
        event: StatusEvent,
    ) -> (StatusState, Commands<StatusTimer>) {
        let mut commands = Commands::new();

        match event {
            StatusEvent::Click => match state.phase {
                StatusPhase::Idle => {
                    state.phase = StatusPhase::Loading;
                    state.generation = state.generation.next();
                    commands.push(Command::Schedule {
                        delay: self.config.loading,
                        timer: StatusTimer::LoadingElapsed,
                    });
                    tracing::debug!(generation = state.generation.0, "status: idle -> loading");
                }
                StatusPhase::Loading => {
                    tracing::trace!("status: click ignored while loading");
                }
                StatusPhase::Success | StatusPhase::Error => {
                    tracing::debug!(from = ?state.phase, "status: -> idle");
                    state.phase = StatusPhase::Idle;
                    state.generation = state.generation.next();
                }
            },
            StatusEvent::LoadingElapsed { generation } => {
                if state.phase != StatusPhase::Loading || generation != state.generation {
                    tracing::trace!(
                        timer = generation.0,
                        current = state.generation.0,
                        "status: stale timer ignored"
                    );
                } else {
                    state.phase = state.next_outcome.phase();
                    state.next_outcome = state.next_outcome.flip();
                    state.generation = state.generation.next();
                    tracing::debug!(to = ?state.phase, "status: loading finished");
                }
            }
            StatusEvent::WordsMeasured(widths) => {
                state.measured_word_widths.extend(widths);
            }
        }

        (state, commands)
    }

    fn derive_view(&self, state: &StatusState) -> StatusView {
        let phase = state.phase;
        let widths = &state.measured_word_widths;
        let first = Self::first_visible(phase);
        let words = Self::track(phase);
        let slot = |i: usize| WordSlot {
            word: words[i],
            label: words[i].label(),
            visible: (first..first + 2).contains(&i),
            width: word_width(widths, words[i]),
        };

        StatusView {
            phase,
            width: self.target_width(phase, widths),
            height: self.config.height,
            track_offset: self.track_offset(phase, widths),
            words: [slot(0), slot(1), slot(2), slot(3)],
            icon: self.icon(phase),
            background: self.background(phase),
            foreground: self.config.theme.on_primary,
        }
    }

    fn targets(&self, view: &StatusView) -> TargetSet {
        let layout = Transition::tween(600, Easing::EXPO_OUT);
        let fade = Transition::tween(400, Easing::EXPO_OUT);
        let stroke = Transition::tween(300, Easing::EXPO_OUT);

        let mut set = TargetSet::new()
            .with(
                ElementTargets::new("button")
                    .animate(Property::Width, view.width, layout)
                    .animate(Property::Height, view.height, Transition::Instant)
                    .animate(
                        Property::Background,
                        view.background,
                        Transition::tween(300, Easing::EaseInOut),
                    ),
            )
            .with(ElementTargets::new("track").animate(Property::X, view.track_offset, layout));

        for (i, slot) in view.words.iter().enumerate() {
            let opacity = if slot.visible { 1.0 } else { 0.0 };
            set.push(ElementTargets::new(format!("word/{i}")).animate(
                Property::Opacity,
                opacity,
                fade,
            ));
        }

        let rotation = if view.icon.spinning {
            ElementTargets::new("icon").animate(
                Property::Rotate,
                360.0,
                Transition::tween(1000, Easing::Linear).repeat_forever(),
            )
        } else {
            ElementTargets::new("icon").animate(Property::Rotate, 0.0, Transition::Instant)
        };

        set.with(rotation)
            .with(ElementTargets::new("icon/primary").animate(
                Property::Path,
                view.icon.primary.clone(),
                fade,
            ))
            .with(
                ElementTargets::new("icon/secondary")
                    .animate(Property::Path, view.icon.secondary.clone(), fade)
                    .animate(Property::Opacity, view.icon.secondary_opacity, stroke),
            )
            .with(
                ElementTargets::new("icon/ring")
                    .animate(Property::Path, self.glyphs.ring.clone(), Transition::Instant)
                    .animate(Property::Opacity, view.icon.ring_opacity, stroke),
            )
    }

    fn labels(&self, view: &StatusView) -> Vec<String> {
        view.words.iter().map(|slot| slot.label.to_string()).collect()
    }

    fn measured_event(&self, widths: &LabelWidths) -> Option<StatusEvent> {
        let words: WordWidths = widths
            .iter()
            .filter_map(|(label, width)| Word::from_label(label).map(|w| (w, *width)))
            .collect();
        (!words.is_empty()).then_some(StatusEvent::WordsMeasured(words))
    }
}
