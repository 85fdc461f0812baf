//! End-to-end runs of each widget through its host

use std::sync::Arc;
use std::time::Duration;

use neat_animation::{AnimationEngine, Property, TargetSet};
use neat_core::{Generation, HitTarget, InputEvent, Key, TableTextMeasurer};
use neat_widgets::widget::{Command, Commands};
use neat_widgets::{
    ArtworkButton, ArtworkConfig, ArtworkMode, Catalog, Effect, HostConfig, PinButton, PinConfig,
    PinMode, StatusButton, StatusConfig, StatusPhase, Theme, Widget, WidgetHost,
};

fn measurer() -> Arc<TableTextMeasurer> {
    Arc::new(
        TableTextMeasurer::new()
            .with_width("Schedule", 70.0)
            .with_width("Meeting", 60.0)
            .with_width("Processing", 90.0)
            .with_width("Successful", 85.0)
            .with_width("Failed", 50.0),
    )
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn status_button_full_cycle() {
    let mut host = WidgetHost::mount(
        StatusButton::new(StatusConfig::new()),
        measurer(),
        HostConfig::default(),
    );
    assert_eq!(host.view().phase, StatusPhase::Idle);
    assert_eq!(host.view().width, 210.0);

    host.dispatch(&InputEvent::click());
    assert_eq!(host.view().phase, StatusPhase::Loading);
    assert_eq!(host.view().width, 230.0);
    let widths = &host.state().unwrap().measured_word_widths;
    assert_eq!(
        host.view().width,
        host.widget().target_width(StatusPhase::Loading, widths)
    );
    assert_ne!(
        host.view().width,
        host.widget().target_width(StatusPhase::Idle, widths)
    );
    assert_eq!(host.pending_timers(), 1);

    // clicks during loading change nothing
    host.dispatch(&InputEvent::click());
    assert_eq!(host.pending_timers(), 1);

    host.advance(ms(1999));
    assert_eq!(host.view().phase, StatusPhase::Loading);

    host.advance(ms(1));
    let view = host.view();
    assert_eq!(view.phase, StatusPhase::Error);
    assert_eq!(view.width, 220.0);
    assert_eq!(view.background, Theme::default().error);
    assert_eq!(host.pending_timers(), 0);

    host.dispatch(&InputEvent::click());
    assert_eq!(host.view().phase, StatusPhase::Idle);

    // outcomes alternate
    host.dispatch(&InputEvent::click());
    host.advance(ms(2000));
    assert_eq!(host.view().phase, StatusPhase::Success);
    assert_eq!(host.view().width, 255.0);
}

#[test]
fn status_button_width_animates_toward_target() {
    let mut host = WidgetHost::mount(
        StatusButton::new(StatusConfig::new()),
        measurer(),
        HostConfig::default(),
    );
    host.dispatch(&InputEvent::click());

    host.advance(ms(100));
    let mid = host
        .engine()
        .sample_float("status/button", Property::Width)
        .unwrap();
    assert!(mid > 210.0 && mid < 230.0, "width = {mid}");

    host.advance(ms(900));
    let settled = host
        .engine()
        .sample_float("status/button", Property::Width)
        .unwrap();
    assert!((settled - 230.0).abs() < 0.5, "width = {settled}");
}

#[test]
fn pin_button_verifies_and_resets() {
    let mut host = WidgetHost::mount(
        PinButton::new(PinConfig::new()),
        measurer(),
        HostConfig::default(),
    );

    host.dispatch(&InputEvent::click());
    assert_eq!(host.view().mode, PinMode::Entering);
    assert_eq!(host.take_effects(), vec![Effect::FocusSlot { slot: 0 }]);

    for (slot, digit) in ["1", "2", "3"].into_iter().enumerate() {
        host.dispatch(&InputEvent::TextInput {
            slot,
            text: digit.to_string(),
        });
    }
    assert_eq!(
        host.take_effects(),
        vec![
            Effect::FocusSlot { slot: 1 },
            Effect::FocusSlot { slot: 2 },
            Effect::FocusSlot { slot: 3 },
        ]
    );

    // backspace on the empty last slot steps back
    host.dispatch(&InputEvent::KeyDown {
        slot: 3,
        key: Key::Backspace,
    });
    assert_eq!(host.take_effects(), vec![Effect::FocusSlot { slot: 2 }]);

    host.dispatch(&InputEvent::TextInput {
        slot: 3,
        text: "4".to_string(),
    });
    assert_eq!(host.view().mode, PinMode::Verifying);
    assert_eq!(host.state().map(|s| s.code()), Some("1234".to_string()));

    host.advance(ms(2000));
    assert_eq!(host.view().mode, PinMode::Verified);

    host.advance(ms(1000));
    let state = host.state().unwrap();
    assert_eq!(state.mode, PinMode::Collapsed);
    assert!(state.digits.iter().all(Option::is_none));
    assert_eq!(host.pending_timers(), 0);
}

fn type_digits(host: &mut WidgetHost<PinButton>, entries: &[(usize, &str)]) {
    for (slot, digit) in entries {
        host.dispatch(&InputEvent::TextInput {
            slot: *slot,
            text: digit.to_string(),
        });
    }
}

#[test]
fn pin_button_verifies_when_filled_out_of_order() {
    let mut host = WidgetHost::mount(
        PinButton::new(PinConfig::new()),
        measurer(),
        HostConfig::default(),
    );
    host.dispatch(&InputEvent::click());
    host.dispatch(&InputEvent::Focus { slot: 3 });
    host.take_effects();

    type_digits(&mut host, &[(3, "4")]);
    assert_eq!(host.view().mode, PinMode::Entering);
    assert_eq!(host.take_effects(), vec![Effect::FocusSlot { slot: 0 }]);

    type_digits(&mut host, &[(0, "1"), (1, "2"), (2, "3")]);
    assert_eq!(host.view().mode, PinMode::Verifying);
    assert_eq!(host.state().map(|s| s.code()), Some("1234".to_string()));
    assert_eq!(host.pending_timers(), 1);

    host.advance(ms(2000));
    assert_eq!(host.view().mode, PinMode::Verified);
}

#[test]
fn pin_button_verifies_under_sub_millisecond_steps() {
    let mut host = WidgetHost::mount(
        PinButton::new(PinConfig::new()),
        measurer(),
        HostConfig::default(),
    );
    host.dispatch(&InputEvent::click());
    type_digits(&mut host, &[(0, "1"), (1, "2"), (2, "3"), (3, "4")]);
    assert_eq!(host.view().mode, PinMode::Verifying);

    for _ in 0..3999 {
        host.advance(Duration::from_micros(500));
    }
    assert_eq!(host.view().mode, PinMode::Verifying);

    host.advance(Duration::from_micros(500));
    assert_eq!(host.view().mode, PinMode::Verified);

    for _ in 0..2000 {
        host.advance(Duration::from_micros(500));
    }
    assert_eq!(host.view().mode, PinMode::Collapsed);
}

#[test]
fn artwork_scroll_is_restored() {
    let mut host = WidgetHost::mount(
        ArtworkButton::new(ArtworkConfig::new().rotations([0.0; 3]), Catalog::builtin()),
        measurer(),
        HostConfig::default(),
    );

    host.dispatch(&InputEvent::click());
    host.dispatch(&InputEvent::Scroll { offset: 120.0 });
    host.dispatch(&InputEvent::click_on(HitTarget::Item(3)));
    assert_eq!(host.view().mode, ArtworkMode::Detail);

    host.dispatch(&InputEvent::click_on(HitTarget::Back));
    assert_eq!(host.view().mode, ArtworkMode::Grid);
    assert_eq!(host.state().map(|s| s.scroll_offset), Some(120.0));
    assert_eq!(host.take_effects(), vec![Effect::RestoreScroll { offset: 120.0 }]);
}

#[test]
fn artwork_element_travels_between_layouts() {
    let mut host = WidgetHost::mount(
        ArtworkButton::new(ArtworkConfig::new().rotations([0.0; 3]), Catalog::builtin()),
        measurer(),
        HostConfig::default(),
    );
    host.advance(ms(600));

    host.dispatch(&InputEvent::click());
    let registry = host.engine().registry();
    assert_eq!(
        registry.owner(&"album-0".into()).map(|k| k.as_str()),
        Some("artwork/grid/item/0")
    );
    // the stack thumbnail handed off and is gone
    assert!(!host.engine().contains("artwork/preview/thumb/0"));
    assert!(host.engine().is_exiting("artwork/preview"));

    host.advance(ms(16));
    let bounds = host
        .engine()
        .sample("artwork/grid/item/0", Property::Bounds)
        .and_then(|v| v.as_rect())
        .unwrap();
    // still near the stack, far from its 162px cell
    assert!(bounds.width() < 100.0, "bounds = {bounds:?}");
}

#[test]
fn unmounted_host_is_inert() {
    let mut host = WidgetHost::mount(
        StatusButton::new(StatusConfig::new()),
        measurer(),
        HostConfig::default(),
    );
    host.dispatch(&InputEvent::click());
    assert_eq!(host.pending_timers(), 1);

    host.unmount();
    assert!(!host.is_mounted());
    assert_eq!(host.pending_timers(), 0);

    host.dispatch(&InputEvent::click());
    host.advance(ms(5000));
    assert!(host.state().is_none());
    assert!(!host.engine().is_animating());
    assert!(host.engine().frame().is_empty());
}

/// Restartable countdown: every click restarts it under a new generation
#[derive(Clone, Debug)]
struct Countdown;

#[derive(Clone, Debug, Default)]
struct CountdownState {
    generation: Generation,
    fired: Vec<u64>,
}

#[derive(Debug)]
enum CountdownEvent {
    Restart,
    Elapsed(Generation),
}

impl Widget for Countdown {
    type State = CountdownState;
    type Event = CountdownEvent;
    type Timer = ();
    type View = u64;

    fn name(&self) -> &'static str {
        "countdown"
    }

    fn mount(&self) -> CountdownState {
        CountdownState::default()
    }

    fn generation(state: &CountdownState) -> Generation {
        state.generation
    }

    fn translate(&self, _state: &CountdownState, input: &InputEvent) -> Option<CountdownEvent> {
        matches!(input, InputEvent::Click { .. }).then_some(CountdownEvent::Restart)
    }

    fn timer_event(&self, _timer: (), generation: Generation) -> CountdownEvent {
        CountdownEvent::Elapsed(generation)
    }

    fn reduce(
        &self,
        mut state: CountdownState,
        event: CountdownEvent,
    ) -> (CountdownState, Commands<()>) {
        let mut commands = Commands::new();
        match event {
            CountdownEvent::Restart => {
                state.generation = state.generation.next();
                commands.push(Command::Schedule {
                    delay: ms(500),
                    timer: (),
                });
            }
            CountdownEvent::Elapsed(generation) => state.fired.push(generation.0),
        }
        (state, commands)
    }

    fn derive_view(&self, state: &CountdownState) -> u64 {
        state.generation.0
    }

    fn targets(&self, _view: &u64) -> TargetSet {
        TargetSet::new()
    }
}

#[test]
fn superseded_timers_never_fire() {
    let mut host = WidgetHost::mount(Countdown, measurer(), HostConfig::default());

    host.dispatch(&InputEvent::click());
    host.advance(ms(300));
    host.dispatch(&InputEvent::click());
    assert_eq!(host.pending_timers(), 1);

    host.advance(ms(400));
    assert!(host.state().unwrap().fired.is_empty());

    host.advance(ms(100));
    assert_eq!(host.state().unwrap().fired, vec![2]);
}
