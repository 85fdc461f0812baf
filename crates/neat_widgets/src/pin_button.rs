//! PIN-entry button
//!
//! A card that opens into a four-slot PIN pad, verifies, shows a success
//! mark and folds back:
//!
//! ```text
//! Collapsed --click--> Entering --4th digit--> Verifying --verify--> Verified
//!     ^                                                                 |
//!     +------------------------------ reset ----------------------------+
//! ```
//!
//! Only ASCII digits are accepted. Verification is simulated by a timer.

use std::time::Duration;

use neat_animation::{
    Easing, ElementTargets, PathData, Property, SpringConfig, Stagger, TargetSet, Transition,
};
use neat_core::{Generation, InputEvent, Key};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;
use crate::widget::{Command, Commands, Effect, Widget};

/// Number of PIN slots
pub const SLOTS: usize = 4;

const CHECK_MARK: &str = "M8 12.5l3 3 5-5.5";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinMode {
    #[default]
    Collapsed,
    Entering,
    Verifying,
    Verified,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PinState {
    pub mode: PinMode,
    pub digits: [Option<char>; SLOTS],
    pub focused_slot: usize,
    pub generation: Generation,
}

impl PinState {
    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// Entered digits as a string, empty slots skipped
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PinEvent {
    Open,
    Input { slot: usize, text: String },
    Backspace { slot: usize },
    Focus { slot: usize },
    VerifyElapsed { generation: Generation },
    ResetElapsed { generation: Generation },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinTimer {
    Verify,
    Reset,
}

/// The single content branch shown inside the card
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PinContent {
    Prompt {
        label: String,
    },
    Digits {
        digits: [Option<char>; SLOTS],
        focused_slot: usize,
        ring_x: f32,
    },
    Spinner,
    Success,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PinView {
    pub mode: PinMode,
    pub width: f32,
    pub height: f32,
    pub content: PinContent,
}

/// PIN button configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PinConfig {
    /// Simulated verification time
    pub verify: Duration,
    /// How long the success mark stays before folding back
    pub reset: Duration,
    /// Horizontal distance between slot origins
    pub slot_stride: f32,
    pub prompt: String,
    pub spring: SpringConfig,
    pub theme: Theme,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            verify: Duration::from_millis(2000),
            reset: Duration::from_millis(1000),
            slot_stride: 55.0,
            prompt: "Enter Pin".to_string(),
            spring: SpringConfig::bouncy(),
            theme: Theme::default(),
        }
    }
}

impl PinConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify(mut self, duration: Duration) -> Self {
        self.verify = duration;
        self
    }

    pub fn reset(mut self, duration: Duration) -> Self {
        self.reset = duration;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

/// The PIN-entry button
#[derive(Clone, Debug, Default)]
pub struct PinButton {
    config: PinConfig,
}

impl PinButton {
    pub fn new(config: PinConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PinConfig {
        &self.config
    }

    /// Card size for a mode
    pub fn size(mode: PinMode) -> (f32, f32) {
        match mode {
            PinMode::Collapsed => (150.0, 50.0),
            PinMode::Entering => (320.0, 80.0),
            PinMode::Verifying | PinMode::Verified => (80.0, 80.0),
        }
    }

    fn input(&self, mut state: PinState, slot: usize, text: &str) -> (PinState, Commands<PinTimer>) {
        let mut commands = Commands::new();

        let digit = match text.chars().next_back() {
            None => {
                state.digits[slot] = None;
                return (state, commands);
            }
            Some(c) if c.is_ascii_digit() => c,
            Some(c) => {
                tracing::debug!(slot, ch = %c, "pin: non-digit input rejected");
                return (state, commands);
            }
        };

        state.digits[slot] = Some(digit);
        if !state.is_complete() {
            // Next empty slot after this one, wrapping to the front
            let next = (slot + 1..SLOTS)
                .chain(0..slot)
                .find(|&i| state.digits[i].is_none());
            if let Some(next) = next {
                state.focused_slot = next;
                commands.push(Command::Effect(Effect::FocusSlot { slot: next }));
            }
        } else {
            state.mode = PinMode::Verifying;
            state.generation = state.generation.next();
            commands.push(Command::Schedule {
                delay: self.config.verify,
                timer: PinTimer::Verify,
            });
            tracing::debug!(generation = state.generation.0, "pin: entering -> verifying");
        }
        (state, commands)
    }
}

fn valid_slot(slot: usize) -> bool {
    if slot < SLOTS {
        true
    } else {
        tracing::warn!(slot, "pin: slot out of range ignored");
        false
    }
}

impl Widget for PinButton {
    type State = PinState;
    type Event = PinEvent;
    type Timer = PinTimer;
    type View = PinView;

    fn name(&self) -> &'static str {
        "pin"
    }

    fn mount(&self) -> PinState {
        PinState {
            mode: PinMode::Collapsed,
            digits: [None; SLOTS],
            focused_slot: 0,
            generation: Generation::default(),
        }
    }

    fn generation(state: &PinState) -> Generation {
        state.generation
    }

    fn translate(&self, _state: &PinState, input: &InputEvent) -> Option<PinEvent> {
        match input {
            InputEvent::Click { .. } => Some(PinEvent::Open),
            InputEvent::TextInput { slot, text } => Some(PinEvent::Input {
                slot: *slot,
                text: text.clone(),
            }),
            InputEvent::KeyDown {
                slot,
                key: Key::Backspace,
            } => Some(PinEvent::Backspace { slot: *slot }),
            InputEvent::Focus { slot } => Some(PinEvent::Focus { slot: *slot }),
            _ => None,
        }
    }

    fn timer_event(&self, timer: PinTimer, generation: Generation) -> PinEvent {
        match timer {
            PinTimer::Verify => PinEvent::VerifyElapsed { generation },
            PinTimer::Reset => PinEvent::ResetElapsed { generation },
        }
    }

    fn reduce(&self, mut state: PinState, event: PinEvent) -> (PinState, Commands<PinTimer>) {
        let mut commands = Commands::new();

        match (state.mode, event) {
            (PinMode::Collapsed, PinEvent::Open) => {
                state.mode = PinMode::Entering;
                state.digits = [None; SLOTS];
                state.focused_slot = 0;
                state.generation = state.generation.next();
                commands.push(Command::Effect(Effect::FocusSlot { slot: 0 }));
                tracing::debug!(generation = state.generation.0, "pin: collapsed -> entering");
            }
            (PinMode::Entering, PinEvent::Input { slot, text }) if valid_slot(slot) => {
                return self.input(state, slot, &text);
            }
            (PinMode::Entering, PinEvent::Backspace { slot }) if valid_slot(slot) => {
                if state.digits[slot].is_none() && slot > 0 {
                    state.focused_slot = slot - 1;
                    commands.push(Command::Effect(Effect::FocusSlot { slot: slot - 1 }));
                }
            }
            (PinMode::Entering, PinEvent::Focus { slot }) if valid_slot(slot) => {
                state.focused_slot = slot;
            }
            (PinMode::Verifying, PinEvent::VerifyElapsed { generation })
                if generation == state.generation =>
            {
                state.mode = PinMode::Verified;
                state.generation = state.generation.next();
                commands.push(Command::Schedule {
                    delay: self.config.reset,
                    timer: PinTimer::Reset,
                });
                tracing::debug!("pin: verifying -> verified");
            }
            (PinMode::Verified, PinEvent::ResetElapsed { generation })
                if generation == state.generation =>
            {
                state.mode = PinMode::Collapsed;
                state.digits = [None; SLOTS];
                state.focused_slot = 0;
                state.generation = state.generation.next();
                tracing::debug!("pin: verified -> collapsed");
            }
            (mode, event) => {
                tracing::trace!(?mode, ?event, "pin: event ignored");
            }
        }

        (state, commands)
    }

    fn derive_view(&self, state: &PinState) -> PinView {
        let (width, height) = Self::size(state.mode);
        let content = match state.mode {
            PinMode::Collapsed => PinContent::Prompt {
                label: self.config.prompt.clone(),
            },
            PinMode::Entering => PinContent::Digits {
                digits: state.digits,
                focused_slot: state.focused_slot,
                ring_x: state.focused_slot as f32 * self.config.slot_stride,
            },
            PinMode::Verifying => PinContent::Spinner,
            PinMode::Verified => PinContent::Success,
        };
        PinView {
            mode: state.mode,
            width,
            height,
            content,
        }
    }

    fn targets(&self, view: &PinView) -> TargetSet {
        let spring = Transition::with_spring(self.config.spring);
        let set = TargetSet::new().with(
            ElementTargets::new("surface")
                .animate(Property::Width, view.width, spring)
                .animate(Property::Height, view.height, spring),
        );

        match &view.content {
            PinContent::Prompt { .. } => {
                let fade = Transition::tween(200, Easing::EaseOut);
                set.with(
                    ElementTargets::new("prompt")
                        .initial(Property::Opacity, 0.0)
                        .initial(Property::Scale, 0.9)
                        .animate(Property::Opacity, 1.0, fade)
                        .animate(Property::Scale, 1.0, fade)
                        .exit(Property::Opacity, 0.0, fade)
                        .exit(Property::Scale, 0.9, fade),
                )
            }
            PinContent::Digits { ring_x, .. } => {
                let stagger = Stagger::new(0, 40);
                let mut set = set
                    .with(
                        ElementTargets::new("digits")
                            .animate(Property::Opacity, 1.0, Transition::Instant)
                            .exit(
                                Property::Opacity,
                                0.0,
                                Transition::tween(150, Easing::EaseOut),
                            ),
                    )
                    .with(ElementTargets::new("digits/ring").animate(
                        Property::X,
                        *ring_x,
                        spring,
                    ));
                for i in 0..SLOTS {
                    let enter = stagger.apply(spring, i, SLOTS);
                    set.push(
                        ElementTargets::new(format!("digits/slot/{i}"))
                            .initial(Property::Scale, 0.9)
                            .initial(Property::Y, -2.0)
                            .initial(Property::Opacity, 0.0)
                            .animate(Property::Scale, 1.0, enter)
                            .animate(Property::Y, 0.0, enter)
                            .animate(Property::Opacity, 1.0, enter)
                            .exit(Property::Scale, 0.9, spring)
                            .exit(Property::Y, 2.0, spring)
                            .exit(Property::Opacity, 0.0, spring),
                    );
                }
                set
            }
            PinContent::Spinner => {
                let collapse = Transition::tween(350, Easing::STANDARD);
                set.with(
                    ElementTargets::new("spinner")
                        .initial(Property::Rotate, 0.0)
                        .animate(
                            Property::Rotate,
                            360.0,
                            Transition::tween(1000, Easing::Linear).repeat_forever(),
                        )
                        .animate(Property::Opacity, 1.0, Transition::Instant)
                        .exit(
                            Property::Opacity,
                            0.0,
                            Transition::tween(150, Easing::EaseOut),
                        ),
                )
                .with(
                    ElementTargets::new("spinner/ring")
                        .animate(Property::StrokeDash, 50.0, Transition::Instant)
                        .exit(Property::StrokeDash, 0.0, collapse)
                        .exit(Property::PathLength, 1.0, collapse),
                )
            }
            PinContent::Success => {
                let settle = Transition::tween(200, Easing::STANDARD);
                let draw = Transition::spring(200.0, 18.0).delay(120);
                let check = PathData::parse(CHECK_MARK).unwrap_or_default();
                set.with(
                    ElementTargets::new("success")
                        .animate(Property::Opacity, 1.0, Transition::Instant)
                        .animate(Property::Scale, 1.0, Transition::Instant)
                        .exit(Property::Opacity, 0.0, settle)
                        .exit(Property::Scale, 0.8, settle),
                )
                .with(
                    ElementTargets::new("success/circle")
                        .initial(Property::Scale, 0.0)
                        .initial(Property::Opacity, 0.0)
                        .animate(Property::Scale, 1.0, Transition::spring(300.0, 22.0))
                        .animate(Property::Opacity, 1.0, Transition::spring(300.0, 22.0))
                        .animate(Property::Background, self.config.theme.accent, Transition::Instant),
                )
                .with(
                    ElementTargets::new("success/check")
                        .initial(Property::PathLength, 0.0)
                        .initial(Property::Opacity, 0.0)
                        .animate(Property::Path, check, Transition::Instant)
                        .animate(Property::PathLength, 1.0, draw)
                        .animate(
                            Property::Opacity,
                            1.0,
                            Transition::tween(10, Easing::Linear).delay(120),
                        ),
                )
            }
        }
    }
}
