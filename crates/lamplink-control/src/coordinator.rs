//! Lamp coordinator - the canonical-state state machine.
//!
//! The coordinator:
//! - owns the frame parser and the canonical [`LampState`]
//! - runs the pairing (learn) workflow that binds this device to one
//!   lamp identity
//! - applies requests from buttons and the web layer
//! - hands back the frames to transmit on the serial line
//!
//! It is the sole writer of the lamp state; other tasks interact with it
//! only through the request queue and the snapshots it publishes.

use lamplink_protocol::{id_to_hex, Command, Frame, FrameParser, LEVEL_MAX, LEVEL_MIN};

use crate::dto::{LampRequest, LampSnapshot, StoredSettings};
use crate::entity::LampState;
use crate::ports::{PairingIndicator, SettingsStore, SnapshotPublisher};

pub struct LampCoordinator<S, I, P> {
    parser: FrameParser,
    /// Outbound frame template addressed to the bound lamp.
    tx: Frame,
    state: LampState,
    learning: bool,
    store: S,
    indicator: I,
    publisher: P,
}

impl<S, I, P> LampCoordinator<S, I, P>
where
    S: SettingsStore,
    I: PairingIndicator,
    P: SnapshotPublisher,
{
    /// Create the coordinator from the persisted settings.
    ///
    /// With a stored identity the device starts bound, reporting the last
    /// known levels under the startup pseudo-command (the actual on/off
    /// state of the lamp is unknown until traffic is seen). Without one it
    /// starts in learn mode and signals the pairing indicator.
    pub fn new(settings: StoredSettings, store: S, indicator: I, publisher: P) -> Self {
        let mut tx = Frame::new();
        tx.prepare();

        let mut coordinator = Self {
            parser: FrameParser::new(),
            tx,
            state: LampState::new(),
            learning: settings.identity.is_none(),
            store,
            indicator,
            publisher,
        };

        match settings.identity {
            Some(identity) => {
                coordinator.state.identity = Some(identity);
                coordinator.state.intensity = settings.intensity;
                coordinator.state.color_balance = settings.color_balance;
                coordinator.state.last_command = Command::Startup;
                coordinator.tx.set_identification(&identity);
                coordinator.tx.set_intensity(settings.intensity);
                coordinator.tx.set_color_balance(settings.color_balance);
                coordinator.publish_snapshot();
            }
            None => {
                coordinator.indicator.pairing_started();
            }
        }

        coordinator
    }

    /// Whether the device is waiting to learn a lamp identity.
    pub fn is_learning(&self) -> bool {
        self.learning
    }

    /// Current canonical state.
    pub fn state(&self) -> &LampState {
        &self.state
    }

    /// Feed one byte received from the serial line.
    ///
    /// Corrupted input never surfaces here; the parser silently rescans.
    pub fn on_byte(&mut self, byte: u8) {
        if self.parser.parse_byte(byte) {
            let frame = *self.parser.frame();
            self.on_frame(&frame);
        }
    }

    /// Apply one request from the inbound queue.
    ///
    /// Returns the checksummed frame to transmit, or `None` while
    /// unpaired (there is no identity to address).
    pub fn on_request(&mut self, request: LampRequest) -> Option<Frame> {
        match request {
            LampRequest::Toggle => {
                if self.state.is_on {
                    self.turn_off();
                } else {
                    self.turn_on();
                }
                self.publish_snapshot();
            }
            LampRequest::IncreaseIntensity => {
                self.ensure_commanded_on();
                if self.state.intensity < LEVEL_MAX {
                    self.state.intensity += 1;
                }
                self.tx.set_intensity(self.state.intensity);
                self.publish_snapshot();
            }
            LampRequest::DecreaseIntensity => {
                self.ensure_commanded_on();
                if self.state.intensity > LEVEL_MIN {
                    self.state.intensity -= 1;
                }
                self.tx.set_intensity(self.state.intensity);
                self.publish_snapshot();
            }
            LampRequest::On => {
                self.turn_on();
                self.publish_snapshot();
            }
            LampRequest::Off => {
                self.turn_off();
                self.publish_snapshot();
            }
            LampRequest::Learn => {
                self.learning = true;
                self.state.identity = None;
                self.state.last_command = Command::Unknown;
                self.tx.set_identification(&[0; 7]);
                let _ = self.store.store_identity(None);
                self.indicator.pairing_started();
                self.publish_snapshot();
            }
            LampRequest::SetHue(balance) => {
                self.state.color_balance = balance;
                self.tx.set_color_balance(balance);
                self.ensure_commanded_on();
                self.publish_snapshot();
            }
            LampRequest::SetIntensity(intensity) => {
                self.state.intensity = intensity;
                self.tx.set_intensity(intensity);
                self.ensure_commanded_on();
                self.publish_snapshot();
            }
        }

        if self.learning {
            return None;
        }
        self.tx.compute_checksum();
        Some(self.tx)
    }

    fn on_frame(&mut self, frame: &Frame) {
        if !frame.validate_checksum() || frame.can_ignore_magic() {
            return;
        }

        let identity = frame.identification();

        if self.learning {
            self.state.identity = Some(identity);
            self.tx.set_identification(&identity);
            let _ = self.store.store_identity(Some(identity));
            self.learning = false;
            self.indicator.pairing_completed();
        }

        // Shared medium: frames addressed to other lamps are expected
        // traffic and carry no information for us.
        if self.state.identity != Some(identity) {
            return;
        }

        self.state.intensity = frame.intensity();
        self.state.color_balance = frame.color_balance();
        match frame.command() {
            Command::On => {
                self.state.is_on = true;
                self.tx.set_command(Command::On);
            }
            Command::Off => {
                self.state.is_on = false;
                self.tx.set_command(Command::Off);
            }
            _ => {}
        }
        self.state.last_command = frame.command();

        // keep the outbound template in sync with the remote transmitter
        self.tx.set_intensity(frame.intensity());
        self.tx.set_color_balance(frame.color_balance());

        self.publish_snapshot();
    }

    /// Re-arm the stored levels and command the lamp on.
    fn turn_on(&mut self) {
        self.tx.set_intensity(self.state.intensity);
        self.tx.set_color_balance(self.state.color_balance);
        self.tx.set_command(Command::On);
        self.state.is_on = true;
        self.state.last_command = Command::On;
    }

    /// Command the lamp off and store the levels for the next boot.
    fn turn_off(&mut self) {
        self.tx.set_command(Command::Off);
        self.state.is_on = false;
        self.state.last_command = Command::Off;
        let _ = self
            .store
            .store_levels(self.state.intensity, self.state.color_balance);
    }

    /// Switch on if the lamp is not already commanded on (a level change
    /// on an off or automatic-mode lamp implies turning it on).
    fn ensure_commanded_on(&mut self) {
        if self.state.last_command != Command::On {
            self.turn_on();
        }
    }

    fn publish_snapshot(&mut self) {
        let identity_hex = match &self.state.identity {
            Some(identity) => id_to_hex(identity),
            None => heapless::String::new(),
        };
        self.publisher.publish(LampSnapshot {
            identity_hex,
            bound: self.state.identity.is_some(),
            intensity: self.state.intensity,
            color_balance: self.state.color_balance,
            command: self.state.last_command,
        });
    }
}
