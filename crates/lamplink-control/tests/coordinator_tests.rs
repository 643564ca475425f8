//! Coordinator behavior tests: pairing, request handling, persistence and
//! snapshot publication, driven byte-by-byte through the real parser.

use std::cell::RefCell;
use std::rc::Rc;

use lamplink_control::{
    LampCoordinator, LampRequest, LampSnapshot, PairingIndicator, SettingsStore,
    SnapshotPublisher, StoredSettings,
};
use lamplink_protocol::{Command, Frame, LampId, OFF_LEVEL};

const LAMP_A: LampId = [0xAA, 0xBB, 0x00, 0xCC, 0xDD, 0x00, 0xEE];
const LAMP_B: LampId = [0x11, 0x22, 0x00, 0x33, 0x44, 0x00, 0x55];

// -----------------------------------------------------------------------------
// Recording port implementations
// -----------------------------------------------------------------------------

#[derive(Default)]
struct PortLog {
    stored_identities: Vec<Option<LampId>>,
    stored_levels: Vec<(u8, u8)>,
    pairing_events: Vec<&'static str>,
    snapshots: Vec<LampSnapshot>,
}

#[derive(Clone, Default)]
struct Ports(Rc<RefCell<PortLog>>);

impl SettingsStore for Ports {
    fn store_identity(&mut self, identity: Option<LampId>) -> Result<(), ()> {
        self.0.borrow_mut().stored_identities.push(identity);
        Ok(())
    }

    fn store_levels(&mut self, intensity: u8, color_balance: u8) -> Result<(), ()> {
        self.0
            .borrow_mut()
            .stored_levels
            .push((intensity, color_balance));
        Ok(())
    }
}

impl PairingIndicator for Ports {
    fn pairing_started(&mut self) {
        self.0.borrow_mut().pairing_events.push("started");
    }

    fn pairing_completed(&mut self) {
        self.0.borrow_mut().pairing_events.push("completed");
    }
}

impl SnapshotPublisher for Ports {
    fn publish(&mut self, snapshot: LampSnapshot) {
        self.0.borrow_mut().snapshots.push(snapshot);
    }
}

type TestCoordinator = LampCoordinator<Ports, Ports, Ports>;

fn coordinator_with(settings: StoredSettings) -> (TestCoordinator, Ports) {
    let ports = Ports::default();
    let coordinator = LampCoordinator::new(
        settings,
        ports.clone(),
        ports.clone(),
        ports.clone(),
    );
    (coordinator, ports)
}

fn unpaired() -> (TestCoordinator, Ports) {
    coordinator_with(StoredSettings::empty())
}

fn bound(intensity: u8, color_balance: u8) -> (TestCoordinator, Ports) {
    coordinator_with(StoredSettings {
        identity: Some(LAMP_A),
        intensity,
        color_balance,
    })
}

fn wire_frame(id: &LampId, command: Command, intensity: u8, balance: u8) -> Frame {
    let mut frame = Frame::new();
    frame.prepare();
    frame.set_identification(id);
    frame.set_command(command);
    frame.set_intensity(intensity);
    frame.set_color_balance(balance);
    frame.compute_checksum();
    frame
}

fn receive(coordinator: &mut TestCoordinator, frame: &Frame) {
    for &byte in frame.as_bytes() {
        coordinator.on_byte(byte);
    }
}

// -----------------------------------------------------------------------------
// Startup
// -----------------------------------------------------------------------------

#[test]
fn bound_startup_reports_last_known_levels() {
    let (coordinator, ports) = bound(0x12, 0x03);

    assert!(!coordinator.is_learning());
    let log = ports.0.borrow();
    assert_eq!(log.snapshots.len(), 1);
    let snapshot = &log.snapshots[0];
    assert_eq!(snapshot.identity_hex.as_str(), "aabb00ccdd00ee");
    assert!(snapshot.bound);
    assert_eq!(snapshot.intensity, 0x12);
    assert_eq!(snapshot.color_balance, 0x03);
    assert_eq!(snapshot.command, Command::Startup);
}

#[test]
fn unpaired_startup_enters_learn_mode() {
    let (coordinator, ports) = unpaired();

    assert!(coordinator.is_learning());
    let log = ports.0.borrow();
    assert_eq!(log.pairing_events, vec!["started"]);
    assert!(log.snapshots.is_empty());
}

// -----------------------------------------------------------------------------
// Pairing
// -----------------------------------------------------------------------------

#[test]
fn first_valid_frame_binds_the_identity_once() {
    let (mut coordinator, ports) = unpaired();

    receive(
        &mut coordinator,
        &wire_frame(&LAMP_A, Command::On, 0x0A, 0x01),
    );

    assert!(!coordinator.is_learning());
    assert_eq!(coordinator.state().identity, Some(LAMP_A));
    {
        let log = ports.0.borrow();
        assert_eq!(log.stored_identities, vec![Some(LAMP_A)]);
        assert_eq!(log.pairing_events, vec!["started", "completed"]);
    }

    // a frame for a different lamp must not rebind or update state
    receive(
        &mut coordinator,
        &wire_frame(&LAMP_B, Command::On, 0x17, 0x17),
    );
    assert_eq!(coordinator.state().identity, Some(LAMP_A));
    assert_eq!(coordinator.state().intensity, 0x0A);
    assert_eq!(ports.0.borrow().stored_identities, vec![Some(LAMP_A)]);
}

#[test]
fn binding_frame_also_applies_its_state() {
    let (mut coordinator, ports) = unpaired();

    receive(
        &mut coordinator,
        &wire_frame(&LAMP_A, Command::On, 0x0A, 0x01),
    );

    let state = coordinator.state();
    assert!(state.is_on);
    assert_eq!(state.intensity, 0x0A);
    assert_eq!(state.color_balance, 0x01);

    let log = ports.0.borrow();
    let snapshot = log.snapshots.last().unwrap();
    assert!(snapshot.bound);
    assert_eq!(snapshot.command, Command::On);
}

#[test]
fn learn_request_unbinds_and_clears_the_store() {
    let (mut coordinator, ports) = bound(0x10, 0x00);

    let transmitted = coordinator.on_request(LampRequest::Learn);

    assert!(transmitted.is_none());
    assert!(coordinator.is_learning());
    assert_eq!(coordinator.state().identity, None);
    let log = ports.0.borrow();
    assert_eq!(log.stored_identities, vec![None]);
    assert_eq!(log.pairing_events, vec!["started"]);
    let snapshot = log.snapshots.last().unwrap();
    assert!(!snapshot.bound);
    assert!(snapshot.identity_hex.is_empty());
}

// -----------------------------------------------------------------------------
// Inbound frames while bound
// -----------------------------------------------------------------------------

#[test]
fn matching_frame_updates_state_and_publishes() {
    let (mut coordinator, ports) = bound(0x00, 0x00);

    receive(
        &mut coordinator,
        &wire_frame(&LAMP_A, Command::On, 0x15, 0x07),
    );

    let state = coordinator.state();
    assert!(state.is_on);
    assert_eq!(state.intensity, 0x15);
    assert_eq!(state.color_balance, 0x07);
    assert_eq!(state.last_command, Command::On);

    let log = ports.0.borrow();
    let snapshot = log.snapshots.last().unwrap();
    assert_eq!(snapshot.intensity, 0x15);
    assert_eq!(snapshot.color_balance, 0x07);
    assert_eq!(snapshot.command, Command::On);
}

#[test]
fn remote_off_frame_turns_the_lamp_off() {
    let (mut coordinator, _ports) = bound(0x08, 0x04);
    receive(
        &mut coordinator,
        &wire_frame(&LAMP_A, Command::On, 0x08, 0x04),
    );
    assert!(coordinator.state().is_on);

    receive(
        &mut coordinator,
        &wire_frame(&LAMP_A, Command::Off, OFF_LEVEL, OFF_LEVEL),
    );
    assert!(!coordinator.state().is_on);
    assert_eq!(coordinator.state().last_command, Command::Off);
    // an off frame carries the off sentinel in both level fields
    assert_eq!(coordinator.state().intensity, OFF_LEVEL);
}

#[test]
fn foreign_identity_is_observed_and_discarded() {
    let (mut coordinator, ports) = bound(0x05, 0x05);
    let published_before = ports.0.borrow().snapshots.len();

    receive(
        &mut coordinator,
        &wire_frame(&LAMP_B, Command::On, 0x17, 0x00),
    );

    let state = coordinator.state();
    assert!(!state.is_on);
    assert_eq!(state.intensity, 0x05);
    assert_eq!(ports.0.borrow().snapshots.len(), published_before);
}

#[test]
fn ignorable_magic_frame_is_skipped_without_side_effects() {
    let mut magic_id = LAMP_A;
    magic_id[6] = 0xA4;

    let (mut coordinator, ports) = unpaired();
    let mut frame = wire_frame(&magic_id, Command::On, 0x10, 0x10);
    // even a wrong checksum must not make it an error
    let mut bytes = *frame.as_bytes();
    bytes[11] = bytes[11].wrapping_add(1);
    for byte in bytes {
        coordinator.on_byte(byte);
    }
    assert!(coordinator.is_learning());

    // and with a valid checksum it is still ignorable
    frame.compute_checksum();
    receive(&mut coordinator, &frame);
    assert!(coordinator.is_learning());
    assert!(ports.0.borrow().stored_identities.is_empty());
}

// -----------------------------------------------------------------------------
// Requests
// -----------------------------------------------------------------------------

#[test]
fn toggle_turns_on_with_stored_levels() {
    let (mut coordinator, _ports) = bound(0x0C, 0x09);

    let frame = coordinator.on_request(LampRequest::Toggle).unwrap();

    assert!(coordinator.state().is_on);
    assert_eq!(frame.command(), Command::On);
    assert_eq!(frame.intensity(), 0x0C);
    assert_eq!(frame.color_balance(), 0x09);
    assert_eq!(frame.identification(), LAMP_A);
    assert!(frame.validate_checksum());
    assert_eq!(frame.end(), 0x00);
}

#[test]
fn toggle_off_persists_the_current_levels() {
    let (mut coordinator, ports) = bound(0x0C, 0x09);
    coordinator.on_request(LampRequest::Toggle);

    let frame = coordinator.on_request(LampRequest::Toggle).unwrap();

    assert!(!coordinator.state().is_on);
    assert_eq!(frame.command(), Command::Off);
    assert_eq!(frame.intensity(), OFF_LEVEL);
    assert_eq!(frame.color_balance(), OFF_LEVEL);
    assert_eq!(ports.0.borrow().stored_levels, vec![(0x0C, 0x09)]);
    // the canonical levels survive the off for the next turn-on
    assert_eq!(coordinator.state().intensity, 0x0C);
}

#[test]
fn increments_apply_before_a_toggle_turns_off() {
    let (mut coordinator, ports) = bound(0x05, 0x00);

    coordinator.on_request(LampRequest::IncreaseIntensity);
    assert!(coordinator.state().is_on);
    coordinator.on_request(LampRequest::IncreaseIntensity);
    assert_eq!(coordinator.state().intensity, 0x07);

    coordinator.on_request(LampRequest::Toggle);

    assert!(!coordinator.state().is_on);
    assert_eq!(ports.0.borrow().stored_levels, vec![(0x07, 0x00)]);
}

#[test]
fn increase_is_clamped_at_the_maximum() {
    let (mut coordinator, _ports) = bound(0x17, 0x00);
    coordinator.on_request(LampRequest::On);

    let frame = coordinator
        .on_request(LampRequest::IncreaseIntensity)
        .unwrap();

    assert_eq!(coordinator.state().intensity, 0x17);
    assert_eq!(frame.intensity(), 0x17);
}

#[test]
fn decrease_is_clamped_at_the_minimum() {
    let (mut coordinator, _ports) = bound(0x00, 0x00);
    coordinator.on_request(LampRequest::On);

    coordinator.on_request(LampRequest::DecreaseIntensity);

    assert_eq!(coordinator.state().intensity, 0x00);
}

#[test]
fn increase_turns_the_lamp_on_first() {
    let (mut coordinator, _ports) = bound(0x05, 0x02);

    let frame = coordinator
        .on_request(LampRequest::IncreaseIntensity)
        .unwrap();

    assert!(coordinator.state().is_on);
    assert_eq!(coordinator.state().intensity, 0x06);
    assert_eq!(frame.command(), Command::On);
    assert_eq!(frame.intensity(), 0x06);
    assert_eq!(frame.color_balance(), 0x02);
}

#[test]
fn off_request_persists_levels() {
    let (mut coordinator, ports) = bound(0x09, 0x01);
    coordinator.on_request(LampRequest::On);

    let frame = coordinator.on_request(LampRequest::Off).unwrap();

    assert_eq!(frame.command(), Command::Off);
    assert!(!coordinator.state().is_on);
    assert_eq!(ports.0.borrow().stored_levels, vec![(0x09, 0x01)]);
}

#[test]
fn set_intensity_updates_and_turns_on_when_needed() {
    let (mut coordinator, _ports) = bound(0x05, 0x02);

    let frame = coordinator
        .on_request(LampRequest::SetIntensity(0x14))
        .unwrap();

    assert!(coordinator.state().is_on);
    assert_eq!(coordinator.state().intensity, 0x14);
    assert_eq!(frame.command(), Command::On);
    assert_eq!(frame.intensity(), 0x14);
    assert_eq!(frame.color_balance(), 0x02);
}

#[test]
fn set_hue_updates_and_turns_on_when_needed() {
    let (mut coordinator, _ports) = bound(0x05, 0x02);

    let frame = coordinator.on_request(LampRequest::SetHue(0x16)).unwrap();

    assert!(coordinator.state().is_on);
    assert_eq!(coordinator.state().color_balance, 0x16);
    assert_eq!(frame.color_balance(), 0x16);
    assert_eq!(frame.command(), Command::On);
}

#[test]
fn set_requests_do_not_rearm_an_already_on_lamp() {
    let (mut coordinator, _ports) = bound(0x05, 0x02);
    coordinator.on_request(LampRequest::On);

    let frame = coordinator.on_request(LampRequest::SetHue(0x03)).unwrap();

    // only the hue changes; the lamp stays on at its current intensity
    assert_eq!(frame.command(), Command::On);
    assert_eq!(frame.intensity(), 0x05);
    assert_eq!(frame.color_balance(), 0x03);
}

#[test]
fn nothing_is_transmitted_while_unpaired() {
    let (mut coordinator, _ports) = unpaired();

    assert!(coordinator.on_request(LampRequest::Toggle).is_none());
    assert!(coordinator.on_request(LampRequest::SetIntensity(3)).is_none());
}

#[test]
fn every_accepted_request_publishes_a_snapshot() {
    let (mut coordinator, ports) = bound(0x05, 0x02);
    let at_start = ports.0.borrow().snapshots.len();

    coordinator.on_request(LampRequest::On);
    coordinator.on_request(LampRequest::IncreaseIntensity);
    coordinator.on_request(LampRequest::Toggle);

    assert_eq!(ports.0.borrow().snapshots.len(), at_start + 3);
    let log = ports.0.borrow();
    let last = log.snapshots.last().unwrap();
    assert_eq!(last.command, Command::Off);
}
