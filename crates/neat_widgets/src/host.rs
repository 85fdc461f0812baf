//! Widget host
//!
//! Owns one widget's state and the machinery around it: the phase timer
//! queue, the post-commit label measurement hook and the animation engine
//! the widget's targets are handed to.
//!
//! Every state change goes through the same path:
//!
//! 1. `reduce` produces the next state and commands
//! 2. if the generation moved, every older timer is cancelled
//! 3. commands are executed (timers scheduled, effects recorded)
//! 4. the view is committed, labels are measured, and a `WordsMeasured`-style
//!    event is reduced before the targets are computed
//! 5. targets are applied to the engine
//!
//! After [`WidgetHost::unmount`] all timers are gone and events are dropped.

use std::sync::Arc;
use std::time::Duration;

use neat_animation::{AnimationEngine, Interpolator, TargetSet};
use neat_core::{InputEvent, TextMeasurer, TimerQueue};

use crate::widget::{Command, Effect, LabelWidths, Widget};

/// Host settings shared by every widget on a page
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostConfig {
    /// Engine tick length; timers are checked once per frame
    pub frame_interval: Duration,
    /// Font size labels are measured at
    pub font_size: f32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::with_frame_rate(120)
    }
}

impl HostConfig {
    /// Whole-millisecond frames at roughly `frame_rate` per second
    pub fn with_frame_rate(frame_rate: u32) -> Self {
        let millis = (1000 / frame_rate.max(1)).max(1);
        Self {
            frame_interval: Duration::from_millis(u64::from(millis)),
            font_size: 16.0,
        }
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Split `dt` into frame-sized steps; the last one may be shorter
    pub fn frames(&self, dt: Duration) -> FrameSteps {
        FrameSteps {
            remaining: dt,
            frame: self.frame_interval.max(Duration::from_micros(1)),
        }
    }
}

/// Iterator over the steps of one [`HostConfig::frames`] call
#[derive(Clone, Debug)]
pub struct FrameSteps {
    remaining: Duration,
    frame: Duration,
}

impl Iterator for FrameSteps {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.remaining.is_zero() {
            return None;
        }
        let step = self.remaining.min(self.frame);
        self.remaining -= step;
        Some(step)
    }
}

/// Runs a [`Widget`] against timers, a text measurer and an engine
pub struct WidgetHost<W: Widget, E: AnimationEngine = Interpolator> {
    widget: W,
    state: Option<W::State>,
    view: W::View,
    targets: TargetSet,
    timers: TimerQueue<W::Timer>,
    measurer: Arc<dyn TextMeasurer>,
    measured: LabelWidths,
    engine: E,
    effects: Vec<Effect>,
    config: HostConfig,
}

impl<W: Widget> WidgetHost<W, Interpolator> {
    /// Mount `widget` on a fresh reference interpolator
    pub fn mount(widget: W, measurer: Arc<dyn TextMeasurer>, config: HostConfig) -> Self {
        Self::mount_with_engine(widget, measurer, config, Interpolator::new())
    }
}

impl<W: Widget, E: AnimationEngine> WidgetHost<W, E> {
    pub fn mount_with_engine(
        widget: W,
        measurer: Arc<dyn TextMeasurer>,
        config: HostConfig,
        engine: E,
    ) -> Self {
        let state = widget.mount();
        let view = widget.derive_view(&state);
        let mut host = Self {
            widget,
            state: Some(state),
            view,
            targets: TargetSet::new(),
            timers: TimerQueue::new(),
            measurer,
            measured: LabelWidths::default(),
            engine,
            effects: Vec::new(),
            config,
        };
        tracing::debug!(widget = host.widget.name(), "mounted");
        host.commit();
        host
    }

    /// Deliver a raw input event
    pub fn dispatch(&mut self, input: &InputEvent) {
        let Some(state) = self.state.as_ref() else {
            tracing::debug!(widget = self.widget.name(), ?input, "event after unmount dropped");
            return;
        };
        match self.widget.translate(state, input) {
            Some(event) => self.process(event),
            None => tracing::trace!(widget = self.widget.name(), ?input, "input ignored"),
        }
    }

    /// Advance virtual time: fire due timers and tick the engine frame by frame
    pub fn advance(&mut self, dt: Duration) {
        if self.state.is_none() {
            return;
        }
        for step in self.config.frames(dt) {
            for fired in self.timers.advance(step) {
                tracing::trace!(
                    widget = self.widget.name(),
                    timer = ?fired.payload,
                    generation = fired.generation.0,
                    "timer fired"
                );
                let event = self.widget.timer_event(fired.payload, fired.generation);
                self.process(event);
            }
            self.engine.tick(step);
        }
    }

    /// Cancel every timer and drop the engine's elements
    pub fn unmount(&mut self) {
        let cancelled = self.timers.cancel_all();
        self.engine.clear();
        self.state = None;
        tracing::debug!(widget = self.widget.name(), cancelled, "unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.state.is_some()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Current state, `None` once unmounted
    pub fn state(&self) -> Option<&W::State> {
        self.state.as_ref()
    }

    /// Last committed view
    pub fn view(&self) -> &W::View {
        &self.view
    }

    /// Targets last handed to the engine
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Take the effects recorded since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    fn process(&mut self, event: W::Event) {
        if !self.reduce(event) {
            return;
        }
        self.commit();
    }

    /// Reduce one event. Returns false when unmounted.
    fn reduce(&mut self, event: W::Event) -> bool {
        let Some(state) = self.state.take() else {
            return false;
        };
        let before = W::generation(&state);
        let (state, commands) = self.widget.reduce(state, event);
        let generation = W::generation(&state);
        self.state = Some(state);

        if generation != before {
            self.timers.cancel_stale(generation);
        }

        for command in commands {
            match command {
                Command::Schedule { delay, timer } => {
                    self.timers.schedule(delay, generation, timer);
                }
                Command::Effect(effect) => {
                    tracing::trace!(widget = self.widget.name(), ?effect, "effect");
                    self.effects.push(effect);
                }
            }
        }
        true
    }

    fn commit(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        self.view = self.widget.derive_view(state);

        if let Some(event) = self.measure_labels() {
            if self.reduce(event) {
                if let Some(state) = self.state.as_ref() {
                    self.view = self.widget.derive_view(state);
                }
            }
        }

        self.targets = self.widget.targets(&self.view).scoped(self.widget.name());
        self.engine.apply(&self.targets);
    }

    /// Post-commit hook: measure labels not seen before
    fn measure_labels(&mut self) -> Option<W::Event> {
        let mut changed = false;
        for label in self.widget.labels(&self.view) {
            if self.measured.contains_key(&label) {
                continue;
            }
            let width = self.measurer.measure(&label, self.config.font_size).width;
            tracing::trace!(widget = self.widget.name(), %label, width, "label measured");
            self.measured.insert(label, width);
            changed = true;
        }
        if changed {
            self.widget.measured_event(&self.measured)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cover_dt_exactly() {
        let config = HostConfig::with_frame_rate(120);
        let steps: Vec<Duration> = config.frames(Duration::from_millis(20)).collect();
        assert_eq!(
            steps,
            vec![
                Duration::from_millis(8),
                Duration::from_millis(8),
                Duration::from_millis(4)
            ]
        );

        let fine: Duration = config.frames(Duration::from_micros(2500)).sum();
        assert_eq!(fine, Duration::from_micros(2500));
        assert_eq!(config.frames(Duration::ZERO).count(), 0);
    }
}
