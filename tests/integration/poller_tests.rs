//! ModePoller → RelayDriver → pin, driven by a scripted mode source.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorKind, PinState};
use thermostat_controllerd::app::events::AppEvent;
use thermostat_controllerd::app::mode::OperationMode;
use thermostat_controllerd::app::service::{ModePoller, PollOutcome};
use thermostat_controllerd::error::RelayError;
use thermostat_controllerd::shutdown::ShutdownSignal;

use crate::mock_hw::{MockPin, MockSource, RecordingSink};

const INTERVAL: Duration = Duration::from_secs(15);

fn setup() -> (ModePoller<MockSource, MockPin>, MockSource, MockPin, RecordingSink) {
    let source = MockSource::new();
    let pin = MockPin::new();
    let poller = ModePoller::new(source.clone(), pin.clone(), INTERVAL).unwrap();
    (poller, source, pin, RecordingSink::new())
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn pin_deasserted_before_first_read() {
    let (mut poller, _source, pin, mut sink) = setup();
    poller.start(&mut sink);

    assert_eq!(pin.writes(), vec![PinState::Low]);
    assert_eq!(poller.pin_level(), PinState::Low);
    assert!(poller.last_mode().is_none());
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            pin: PinState::Low,
            interval: INTERVAL
        }]
    );
}

#[test]
fn pin_init_failure_is_reported() {
    let pin = MockPin::new();
    pin.set_failing(true);
    let result = ModePoller::new(MockSource::new(), pin, INTERVAL);
    assert!(matches!(result, Err(RelayError::Write(ErrorKind::Other))));
}

// ── Mode mapping ──────────────────────────────────────────────

#[test]
fn auto_with_newline_deasserts() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    poller.poll_once(&mut sink);
    assert_eq!(pin.level(), PinState::High);

    source.set_contents("auto\n");
    let outcome = poller.poll_once(&mut sink);

    assert_eq!(outcome, PollOutcome::Applied(OperationMode::Auto));
    assert_eq!(pin.level(), PinState::Low);
}

#[test]
fn manual_without_newline_asserts() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");

    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::Applied(OperationMode::Manual)
    );
    assert_eq!(pin.level(), PinState::High);
    assert_eq!(poller.last_mode(), Some(&OperationMode::Manual));
}

#[test]
fn uppercase_auto_is_ignored_with_warning() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual\n");
    poller.poll_once(&mut sink);
    let writes_before = pin.write_count();

    source.set_contents("AUTO\n");
    let outcome = poller.poll_once(&mut sink);

    assert_eq!(outcome, PollOutcome::Ignored("AUTO".into()));
    assert_eq!(pin.level(), PinState::High);
    assert_eq!(pin.write_count(), writes_before);
    assert_eq!(sink.unknown_modes(), vec!["AUTO".to_string()]);
    assert_eq!(poller.stats().unknown, 1);
}

#[test]
fn garbage_variants_leave_pin_alone() {
    for raw in ["", "Manual", "auto mode", "manual!", " auto", "off"] {
        let (mut poller, source, pin, mut sink) = setup();
        source.set_contents("manual");
        poller.poll_once(&mut sink);

        source.set_contents(raw);
        poller.poll_once(&mut sink);
        assert_eq!(pin.level(), PinState::High, "content {raw:?} moved the pin");
    }
}

// ── Read failures ─────────────────────────────────────────────

#[test]
fn missing_file_keeps_state_and_recovers() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    poller.poll_once(&mut sink);

    source.set_error(io::ErrorKind::NotFound);
    assert_eq!(poller.poll_once(&mut sink), PollOutcome::ReadFailed);
    source.set_error(io::ErrorKind::PermissionDenied);
    assert_eq!(poller.poll_once(&mut sink), PollOutcome::ReadFailed);
    assert_eq!(pin.level(), PinState::High);
    assert_eq!(sink.read_failures(), 2);

    source.set_contents("auto");
    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::Applied(OperationMode::Auto)
    );
    assert_eq!(pin.level(), PinState::Low);
    assert_eq!(poller.stats().read_failures, 2);
}

#[test]
fn read_failure_names_the_file() {
    let (mut poller, _source, _pin, mut sink) = setup();
    poller.poll_once(&mut sink);

    let failure = sink.events.iter().find_map(|e| match e {
        AppEvent::ReadFailed { location, .. } => Some(location.clone()),
        _ => None,
    });
    assert_eq!(
        failure.as_deref(),
        Some(std::path::Path::new("/var/www/thermostat_operation_mode"))
    );
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn repeated_polls_are_idempotent() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual\n");

    for _ in 0..5 {
        poller.poll_once(&mut sink);
    }

    assert_eq!(pin.level(), PinState::High);
    assert!(pin.writes()[1..].iter().all(|l| *l == PinState::High));
    assert_eq!(sink.mode_changes(), 1);
    assert_eq!(poller.stats().applied, 5);
    assert_eq!(poller.stats().mode_changes, 1);
}

#[test]
fn mode_change_events_track_transitions() {
    let (mut poller, source, _pin, mut sink) = setup();
    for contents in ["auto", "manual", "manual", "auto"] {
        source.set_contents(contents);
        poller.poll_once(&mut sink);
    }

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ModeChanged { from, to } => Some((from.clone(), to.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (None, OperationMode::Auto),
            (Some(OperationMode::Auto), OperationMode::Manual),
            (Some(OperationMode::Manual), OperationMode::Auto),
        ]
    );
}

// ── Relay faults ──────────────────────────────────────────────

#[test]
fn relay_write_failure_does_not_stop_polling() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    pin.set_failing(true);

    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::RelayFailed(RelayError::Write(ErrorKind::Other))
    );
    assert_eq!(poller.pin_level(), PinState::Low);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::RelayFault(_))), 1);

    pin.set_failing(false);
    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::Applied(OperationMode::Manual)
    );
    assert_eq!(pin.level(), PinState::High);
}

// ── Shutdown ──────────────────────────────────────────────────

#[test]
fn shutdown_parks_exactly_once() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    poller.poll_once(&mut sink);

    assert!(poller.shutdown(&mut sink));
    assert!(!poller.shutdown(&mut sink));
    assert!(poller.is_stopped());
    drop(poller);

    assert_eq!(
        pin.writes(),
        vec![PinState::Low, PinState::High, PinState::Low]
    );
    assert_eq!(sink.stops(), 1);
}

#[test]
fn dropping_the_poller_parks_the_relay() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    poller.poll_once(&mut sink);
    drop(poller);

    assert_eq!(pin.level(), PinState::Low);
    assert_eq!(pin.write_count(), 3);
}

#[test]
fn polling_after_shutdown_touches_nothing() {
    let (mut poller, source, pin, mut sink) = setup();
    poller.shutdown(&mut sink);
    source.set_contents("manual");

    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::RelayFailed(RelayError::Released)
    );
    assert_eq!(pin.level(), PinState::Low);
}

#[test]
fn run_returns_when_signal_already_pending() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    let (trigger, mut signal) = ShutdownSignal::channel();
    trigger.trigger();

    poller.run(&mut signal, &mut sink);

    assert_eq!(poller.stats().polls, 1);
    assert_eq!(
        pin.writes(),
        vec![PinState::Low, PinState::High, PinState::Low]
    );
    assert_eq!(sink.stops(), 1);
}

#[test]
fn signal_interrupts_the_interval_wait() {
    let (mut poller, source, pin, mut sink) = setup();
    source.set_contents("manual");
    let (trigger, mut signal) = ShutdownSignal::channel();

    let started = Instant::now();
    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        trigger.trigger();
    });
    poller.run(&mut signal, &mut sink);
    sender.join().unwrap();

    // INTERVAL is 15 s; getting here early means the wait was cut short.
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(pin.level(), PinState::Low);
    assert_eq!(sink.stops(), 1);
}
