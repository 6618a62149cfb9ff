//! ModePoller against a real mode file on disk.

use std::fs;
use std::thread;
use std::time::Duration;

use embedded_hal::digital::PinState;
use thermostat_controllerd::adapters::mode_file::ModeFile;
use thermostat_controllerd::app::mode::OperationMode;
use thermostat_controllerd::app::service::{ModePoller, PollOutcome};
use thermostat_controllerd::shutdown::ShutdownSignal;

use crate::mock_hw::{MockPin, RecordingSink};

#[test]
fn follows_file_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thermostat_operation_mode");
    let pin = MockPin::new();
    let mut sink = RecordingSink::new();
    let mut poller =
        ModePoller::new(ModeFile::new(&path), pin.clone(), Duration::from_secs(15)).unwrap();

    fs::write(&path, "manual").unwrap();
    poller.poll_once(&mut sink);
    assert_eq!(pin.level(), PinState::High);

    fs::write(&path, "auto\n").unwrap();
    poller.poll_once(&mut sink);
    assert_eq!(pin.level(), PinState::Low);
}

#[test]
fn deleted_file_then_recreated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thermostat_operation_mode");
    let pin = MockPin::new();
    let mut sink = RecordingSink::new();
    let mut poller =
        ModePoller::new(ModeFile::new(&path), pin.clone(), Duration::from_secs(15)).unwrap();

    fs::write(&path, "manual\n").unwrap();
    poller.poll_once(&mut sink);

    fs::remove_file(&path).unwrap();
    assert_eq!(poller.poll_once(&mut sink), PollOutcome::ReadFailed);
    assert_eq!(pin.level(), PinState::High);

    fs::write(&path, "auto\n").unwrap();
    assert_eq!(
        poller.poll_once(&mut sink),
        PollOutcome::Applied(OperationMode::Auto)
    );
    assert_eq!(pin.level(), PinState::Low);
}

#[test]
fn absent_file_keeps_loop_alive_across_intervals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never_written");
    let pin = MockPin::new();
    let mut sink = RecordingSink::new();
    let mut poller =
        ModePoller::new(ModeFile::new(&path), pin.clone(), Duration::from_millis(10)).unwrap();
    let (trigger, mut signal) = ShutdownSignal::channel();

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        trigger.trigger();
    });
    poller.run(&mut signal, &mut sink);
    sender.join().unwrap();

    assert!(poller.stats().polls >= 2, "only {} polls", poller.stats().polls);
    assert_eq!(sink.read_failures() as u64, poller.stats().polls);
    assert!(pin.writes().iter().all(|l| *l == PinState::Low));
    assert_eq!(sink.stops(), 1);
}
