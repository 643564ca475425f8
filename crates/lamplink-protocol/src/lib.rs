#![no_std]

//! Lamp Link wire protocol.
//!
//! The remote receiver module speaks a fixed 13-byte binary frame format
//! over a half-duplex serial line:
//! - [`frame`] - the frame layout, field accessors and checksum rules
//! - [`parser`] - incremental byte-at-a-time reassembly with
//!   resynchronization on corrupted input
//!
//! The crate is hardware-free; feeding bytes in and writing frames out is
//! the firmware's job.

pub mod frame;
pub mod parser;

pub use frame::{
    Command, Frame, InvalidHex, LampId, FRAME_LEN, HEADER, ID_HEX_LEN, ID_LEN, LEVEL_MAX,
    LEVEL_MIN, OFF_LEVEL, id_from_hex, id_to_hex,
};
pub use parser::FrameParser;
