//! Animation engine
//!
//! [`AnimationEngine`] is the seam between widgets and whatever renders
//! them. [`Interpolator`] is the reference implementation: it keeps one track
//! per element property, advances tracks on a caller-driven clock, and
//! implements presence (enter and exit) and continuity handoff.
//!
//! # Track rules
//!
//! - An element seen for the first time starts each property at its
//!   `initial` value and animates to the target. Properties without an
//!   initial value snap.
//! - A target that changes restarts its track from the current value.
//! - Re-applying an identical target and transition leaves the running
//!   track alone, so a re-render mid-flight does not reset it.
//! - An element that leaves the set plays its exit targets and is dropped
//!   once they finish. Without exit targets it is dropped immediately.
//! - A new element claiming a continuity id starts its bounds where the
//!   previous owner was; an exiting previous owner is dropped at once.

use std::collections::BTreeMap;
use std::time::Duration;

use neat_core::Rect;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::continuity::{ContinuityId, ContinuityRegistry};
use crate::spring::Spring;
use crate::target::{ElementKey, ElementTargets, Property, PropertyTarget, TargetSet};
use crate::transition::{Repeat, Transition};
use crate::values::{AnimatableValue, Interpolate};

/// Largest spring integration step in seconds
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;

/// Current value of every mounted element property, ordered for output
pub type Frame = BTreeMap<ElementKey, BTreeMap<Property, AnimatableValue>>;

/// Consumer of target sets
pub trait AnimationEngine {
    /// Hand the engine the full set of elements for the current frame
    fn apply(&mut self, targets: &TargetSet);

    /// Advance all tracks by `dt`. Returns whether anything is still moving.
    fn tick(&mut self, dt: Duration) -> bool;

    /// Current value of one element property
    fn sample(&self, key: &str, property: Property) -> Option<AnimatableValue>;

    fn is_animating(&self) -> bool;

    /// Drop every element and track (widget unmounted)
    fn clear(&mut self);

    fn sample_float(&self, key: &str, property: Property) -> Option<f32> {
        self.sample(key, property).and_then(|v| v.as_float())
    }
}

#[derive(Clone, Debug)]
struct Track {
    from: AnimatableValue,
    to: AnimatableValue,
    current: AnimatableValue,
    transition: Transition,
    elapsed_ms: f32,
    spring: Option<Spring>,
    done: bool,
}

impl Track {
    fn new(from: AnimatableValue, to: AnimatableValue, transition: Transition) -> Self {
        let spring = match transition {
            Transition::Spring { config, .. } => Some(Spring::new(config)),
            _ => None,
        };
        let mut track = Self {
            current: from.clone(),
            from,
            to,
            transition,
            elapsed_ms: 0.0,
            spring,
            done: false,
        };
        if matches!(transition, Transition::Instant) {
            track.finish();
        }
        track
    }

    fn settled(value: AnimatableValue) -> Self {
        Self::new(value.clone(), value, Transition::Instant)
    }

    fn finish(&mut self) {
        self.current = self.to.clone();
        self.done = true;
    }

    fn targets(&self, to: &AnimatableValue, transition: &Transition) -> bool {
        self.to == *to && self.transition == *transition
    }

    fn retarget(&mut self, to: AnimatableValue, transition: Transition) {
        *self = Track::new(self.current.clone(), to, transition);
    }

    fn advance(&mut self, dt_ms: f32) {
        if self.done {
            return;
        }
        self.elapsed_ms += dt_ms;
        let active_ms = self.elapsed_ms - self.transition.delay_ms() as f32;
        if active_ms < 0.0 {
            return;
        }

        match self.transition {
            Transition::Instant => self.finish(),
            Transition::Tween(tween) => {
                let t = active_ms / tween.duration_ms.max(1) as f32;
                let cycles = match tween.repeat {
                    Repeat::Never => Some(1),
                    Repeat::Times(n) => Some(n.saturating_add(1)),
                    Repeat::Forever => None,
                };
                match cycles {
                    Some(n) if t >= n as f32 => self.finish(),
                    _ => {
                        let progress = tween.easing.apply(t.fract());
                        self.current = self.from.lerp(&self.to, progress);
                    }
                }
            }
            Transition::Spring { .. } => {
                let Some(spring) = self.spring.as_mut() else {
                    self.finish();
                    return;
                };
                // Only integrate the part of this frame after the delay
                let mut remaining = dt_ms.min(active_ms) / 1000.0;
                while remaining > 0.0 {
                    let step = remaining.min(MAX_SPRING_STEP);
                    spring.step(step);
                    remaining -= step;
                }
                if spring.is_settled() {
                    self.finish();
                } else {
                    self.current = self.from.lerp(&self.to, spring.value());
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Presence {
    Present,
    Exiting,
}

#[derive(Debug)]
struct ElementState {
    presence: Presence,
    continuity: Option<ContinuityId>,
    exit: SmallVec<[PropertyTarget; 2]>,
    tracks: FxHashMap<Property, Track>,
}

impl ElementState {
    fn bounds(&self) -> Option<Rect> {
        self.tracks
            .get(&Property::Bounds)
            .and_then(|t| t.current.as_rect())
    }

    fn exit_finished(&self) -> bool {
        self.exit
            .iter()
            .all(|t| self.tracks.get(&t.property).map_or(true, |track| track.done))
    }
}

/// Reference [`AnimationEngine`]
#[derive(Debug, Default)]
pub struct Interpolator {
    elements: FxHashMap<ElementKey, ElementState>,
    registry: ContinuityRegistry,
}

impl Interpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the element is mounted, including while it plays its exit
    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn is_exiting(&self, key: &str) -> bool {
        self.elements
            .get(key)
            .is_some_and(|s| s.presence == Presence::Exiting)
    }

    pub fn registry(&self) -> &ContinuityRegistry {
        &self.registry
    }

    /// Snapshot every mounted element
    pub fn frame(&self) -> Frame {
        self.elements
            .iter()
            .map(|(key, state)| {
                let values = state
                    .tracks
                    .iter()
                    .map(|(property, track)| (*property, track.current.clone()))
                    .collect();
                (key.clone(), values)
            })
            .collect()
    }

    fn begin_exit(&mut self, key: &ElementKey) {
        let Some(state) = self.elements.get_mut(key) else {
            return;
        };
        if state.exit.is_empty() {
            tracing::trace!(%key, "element removed");
            self.elements.remove(key);
            return;
        }

        tracing::trace!(%key, "element exiting");
        state.presence = Presence::Exiting;
        for target in state.exit.clone() {
            match state.tracks.get_mut(&target.property) {
                Some(track) => track.retarget(target.value, target.transition),
                // Nothing to animate from, hold the exit value for the duration
                None => {
                    state.tracks.insert(
                        target.property,
                        Track::new(target.value.clone(), target.value, target.transition),
                    );
                }
            }
        }
    }

    fn update_element(state: &mut ElementState, element: &ElementTargets) {
        if state.presence == Presence::Exiting {
            tracing::trace!(key = %element.key, "element re-entered");
            state.presence = Presence::Present;
        }
        for target in &element.animate {
            match state.tracks.get_mut(&target.property) {
                Some(track) if track.targets(&target.value, &target.transition) => {}
                Some(track) => track.retarget(target.value.clone(), target.transition),
                None => {
                    state
                        .tracks
                        .insert(target.property, Track::settled(target.value.clone()));
                }
            }
        }
        state.exit = element.exit.clone();
        state.continuity = element.continuity.clone();
    }

    fn enter_element(&mut self, element: &ElementTargets) {
        let mut tracks: FxHashMap<Property, Track> = FxHashMap::default();
        for (property, value) in &element.initial {
            tracks.insert(*property, Track::settled(value.clone()));
        }
        for target in &element.animate {
            let track = match tracks.remove(&target.property) {
                Some(initial) => Track::new(initial.current, target.value.clone(), target.transition),
                None => Track::settled(target.value.clone()),
            };
            tracks.insert(target.property, track);
        }

        let mut state = ElementState {
            presence: Presence::Present,
            continuity: element.continuity.clone(),
            exit: element.exit.clone(),
            tracks,
        };

        if let Some(id) = &element.continuity {
            let bounds = state.bounds().unwrap_or(Rect::ZERO);
            let handoff = self.registry.claim(id, &element.key, bounds);

            if let Some(previous) = &handoff.previous_owner {
                if self.is_exiting(previous.as_str()) {
                    tracing::trace!(%id, %previous, "exiting owner replaced");
                    self.elements.remove(previous);
                }
            }
            if let (Some(from), Some(target)) =
                (handoff.from_bounds, element.target(Property::Bounds))
            {
                state.tracks.insert(
                    Property::Bounds,
                    Track::new(from.into(), target.value.clone(), target.transition),
                );
            }
        }

        tracing::trace!(key = %element.key, "element entered");
        self.elements.insert(element.key.clone(), state);
    }
}

impl AnimationEngine for Interpolator {
    fn apply(&mut self, targets: &TargetSet) {
        let incoming: FxHashSet<&str> = targets.elements.iter().map(|e| e.key.as_str()).collect();

        let leaving: Vec<ElementKey> = self
            .elements
            .iter()
            .filter(|(key, state)| {
                state.presence == Presence::Present && !incoming.contains(key.as_str())
            })
            .map(|(key, _)| key.clone())
            .collect();
        for key in &leaving {
            self.begin_exit(key);
        }

        for element in &targets.elements {
            match self.elements.get_mut(element.key.as_str()) {
                Some(state) => Self::update_element(state, element),
                None => self.enter_element(element),
            }
        }
    }

    fn tick(&mut self, dt: Duration) -> bool {
        let dt_ms = dt.as_secs_f32() * 1000.0;

        for (key, state) in self.elements.iter_mut() {
            for track in state.tracks.values_mut() {
                track.advance(dt_ms);
            }
            if let (Some(id), Some(bounds)) = (&state.continuity, state.bounds()) {
                self.registry.track(id, key, bounds);
            }
        }

        self.elements.retain(|key, state| {
            let keep = state.presence == Presence::Present || !state.exit_finished();
            if !keep {
                tracing::trace!(%key, "exit finished");
            }
            keep
        });

        self.is_animating()
    }

    fn sample(&self, key: &str, property: Property) -> Option<AnimatableValue> {
        self.elements
            .get(key)?
            .tracks
            .get(&property)
            .map(|t| t.current.clone())
    }

    fn is_animating(&self) -> bool {
        self.elements.values().any(|state| {
            state.presence == Presence::Exiting || state.tracks.values().any(|t| !t.done)
        })
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::spring::SpringConfig;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn width_to(value: f32, transition: Transition) -> TargetSet {
        TargetSet::new().with(
            ElementTargets::new("button")
                .initial(Property::Width, 100.0)
                .animate(Property::Width, value, transition),
        )
    }

    #[test]
    fn test_new_element_without_initial_snaps() {
        let mut engine = Interpolator::new();
        engine.apply(&TargetSet::new().with(ElementTargets::new("icon").animate(
            Property::Opacity,
            1.0,
            Transition::tween(400, Easing::Linear),
        )));

        assert_eq!(engine.sample_float("icon", Property::Opacity), Some(1.0));
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_tween_from_initial() {
        let mut engine = Interpolator::new();
        engine.apply(&width_to(200.0, Transition::tween(100, Easing::Linear)));

        assert_eq!(engine.sample_float("button", Property::Width), Some(100.0));
        engine.tick(ms(50));
        let mid = engine.sample_float("button", Property::Width).unwrap();
        assert!((mid - 150.0).abs() < 0.01);

        assert!(!engine.tick(ms(60)));
        assert_eq!(engine.sample_float("button", Property::Width), Some(200.0));
    }

    #[test]
    fn test_identical_reapply_keeps_progress() {
        let mut engine = Interpolator::new();
        let set = width_to(200.0, Transition::tween(100, Easing::Linear));
        engine.apply(&set);
        engine.tick(ms(50));

        engine.apply(&set);
        engine.tick(ms(25));
        let value = engine.sample_float("button", Property::Width).unwrap();
        assert!((value - 175.0).abs() < 0.01);
    }

    #[test]
    fn test_retarget_restarts_from_current() {
        let mut engine = Interpolator::new();
        engine.apply(&width_to(200.0, Transition::tween(100, Easing::Linear)));
        engine.tick(ms(50));

        engine.apply(&width_to(50.0, Transition::tween(100, Easing::Linear)));
        assert!((engine.sample_float("button", Property::Width).unwrap() - 150.0).abs() < 0.01);
        engine.tick(ms(50));
        assert!((engine.sample_float("button", Property::Width).unwrap() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_delay_holds_start_value() {
        let mut engine = Interpolator::new();
        engine.apply(&width_to(200.0, Transition::tween(100, Easing::Linear).delay(40)));

        engine.tick(ms(30));
        assert_eq!(engine.sample_float("button", Property::Width), Some(100.0));
        engine.tick(ms(60));
        assert!((engine.sample_float("button", Property::Width).unwrap() - 150.0).abs() < 0.01);
    }

    #[test]
    fn test_forever_loops_until_retargeted() {
        let mut engine = Interpolator::new();
        let spin = TargetSet::new().with(
            ElementTargets::new("icon")
                .initial(Property::Rotate, 0.0)
                .animate(
                    Property::Rotate,
                    360.0,
                    Transition::tween(1000, Easing::Linear).repeat_forever(),
                ),
        );
        engine.apply(&spin);

        for _ in 0..30 {
            assert!(engine.tick(ms(100)));
        }
        let angle = engine.sample_float("icon", Property::Rotate).unwrap();
        assert!(angle.abs() < 0.5 || (angle - 360.0).abs() < 0.5);

        engine.tick(ms(250));
        let angle = engine.sample_float("icon", Property::Rotate).unwrap();
        assert!((angle - 90.0).abs() < 0.5);

        engine.apply(&TargetSet::new().with(ElementTargets::new("icon").animate(
            Property::Rotate,
            0.0,
            Transition::Instant,
        )));
        assert_eq!(engine.sample_float("icon", Property::Rotate), Some(0.0));
        assert!(!engine.is_animating());
    }

    #[test]
    fn test_spring_overshoots_and_settles() {
        let mut engine = Interpolator::new();
        engine.apply(&width_to(
            200.0,
            Transition::with_spring(SpringConfig::new(300.0, 20.0, 1.0)),
        ));

        let mut peak: f32 = 0.0;
        for _ in 0..300 {
            engine.tick(ms(8));
            peak = peak.max(engine.sample_float("button", Property::Width).unwrap());
        }
        assert!(peak > 200.0);
        assert!(!engine.is_animating());
        assert_eq!(engine.sample_float("button", Property::Width), Some(200.0));
    }

    #[test]
    fn test_exit_keeps_element_until_finished() {
        let mut engine = Interpolator::new();
        engine.apply(
            &TargetSet::new().with(
                ElementTargets::new("spinner")
                    .animate(Property::Opacity, 1.0, Transition::Instant)
                    .exit(Property::Opacity, 0.0, Transition::tween(100, Easing::Linear)),
            ),
        );

        engine.apply(&TargetSet::new());
        assert!(engine.is_exiting("spinner"));

        engine.tick(ms(50));
        assert!((engine.sample_float("spinner", Property::Opacity).unwrap() - 0.5).abs() < 0.01);

        engine.tick(ms(60));
        assert!(!engine.contains("spinner"));
    }

    #[test]
    fn test_element_without_exit_is_removed_at_once() {
        let mut engine = Interpolator::new();
        engine.apply(&TargetSet::new().with(ElementTargets::new("label").animate(
            Property::Opacity,
            1.0,
            Transition::Instant,
        )));
        engine.apply(&TargetSet::new());
        assert!(!engine.contains("label"));
    }

    #[test]
    fn test_reenter_during_exit() {
        let mut engine = Interpolator::new();
        let present = TargetSet::new().with(
            ElementTargets::new("digit")
                .animate(Property::Opacity, 1.0, Transition::tween(100, Easing::Linear))
                .exit(Property::Opacity, 0.0, Transition::tween(100, Easing::Linear)),
        );
        engine.apply(&present);
        engine.apply(&TargetSet::new());
        engine.tick(ms(50));

        engine.apply(&present);
        assert!(!engine.is_exiting("digit"));
        engine.tick(ms(100));
        assert_eq!(engine.sample_float("digit", Property::Opacity), Some(1.0));
        assert!(engine.contains("digit"));
    }

    #[test]
    fn test_continuity_handoff_starts_from_previous_bounds() {
        let mut engine = Interpolator::new();
        let small = Rect::new(8.0, 13.0, 24.0, 24.0);
        let cell = Rect::new(30.0, 70.0, 162.0, 162.0);

        engine.apply(&TargetSet::new().with(
            ElementTargets::new("stack/0")
                .continuity("album-0")
                .animate(Property::Bounds, small, Transition::Instant),
        ));
        engine.tick(ms(16));

        engine.apply(&TargetSet::new().with(
            ElementTargets::new("grid/0").continuity("album-0").animate(
                Property::Bounds,
                cell,
                Transition::tween(550, Easing::EXPO_OUT),
            ),
        ));

        assert!(!engine.contains("stack/0"));
        assert_eq!(
            engine.sample("grid/0", Property::Bounds),
            Some(AnimatableValue::Rect(small))
        );
        engine.tick(ms(600));
        assert_eq!(
            engine.sample("grid/0", Property::Bounds),
            Some(AnimatableValue::Rect(cell))
        );
        assert_eq!(
            engine.registry().owner(&"album-0".into()),
            Some(&"grid/0".into())
        );
    }

    #[test]
    fn test_continuity_claim_drops_exiting_owner() {
        let mut engine = Interpolator::new();
        engine.apply(
            &TargetSet::new().with(
                ElementTargets::new("grid/0")
                    .continuity("album-0")
                    .animate(Property::Bounds, Rect::new(30.0, 70.0, 162.0, 162.0), Transition::Instant)
                    .exit(Property::Opacity, 0.0, Transition::tween(200, Easing::Linear)),
            ),
        );
        engine.tick(ms(16));

        engine.apply(&TargetSet::new().with(
            ElementTargets::new("detail/image").continuity("album-0").animate(
                Property::Bounds,
                Rect::new(30.0, 70.0, 150.0, 150.0),
                Transition::tween(550, Easing::EXPO_OUT),
            ),
        ));

        assert!(!engine.contains("grid/0"));
        assert!(engine.contains("detail/image"));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut engine = Interpolator::new();
        engine.apply(&width_to(200.0, Transition::tween(100, Easing::Linear)));
        engine.clear();
        assert!(!engine.contains("button"));
        assert!(!engine.is_animating());
        assert!(engine.frame().is_empty());
    }
}
