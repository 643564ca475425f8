//! Tests for stream reassembly: resynchronization, rejection and recovery
//! behavior of the frame parser.

use lamplink_protocol::{Command, Frame, FrameParser, LampId};

const LAMP_A: LampId = [0xC2, 0x1C, 0x00, 0x9D, 0x1B, 0x00, 0x0E];

fn on_frame(id: &LampId, intensity: u8, balance: u8) -> Frame {
    let mut frame = Frame::new();
    frame.prepare();
    frame.set_identification(id);
    frame.set_command(Command::On);
    frame.set_intensity(intensity);
    frame.set_color_balance(balance);
    frame.compute_checksum();
    frame
}

/// Feed a byte slice and collect every accepted frame.
fn feed(parser: &mut FrameParser, bytes: &[u8]) -> Vec<Frame> {
    let mut accepted = Vec::new();
    for &byte in bytes {
        if parser.parse_byte(byte) {
            accepted.push(*parser.frame());
        }
    }
    accepted
}

// -----------------------------------------------------------------------------
// Acceptance
// -----------------------------------------------------------------------------

#[test]
fn round_trip_through_parser() {
    let frame = on_frame(&LAMP_A, 0x17, 0x0E);
    let mut parser = FrameParser::new();

    let accepted = feed(&mut parser, frame.as_bytes());
    assert_eq!(accepted, vec![frame]);
}

#[test]
fn acceptance_is_reported_on_the_final_byte_only() {
    let frame = on_frame(&LAMP_A, 0x01, 0x02);
    let bytes = frame.as_bytes();
    let mut parser = FrameParser::new();

    for &byte in &bytes[..bytes.len() - 1] {
        assert!(!parser.parse_byte(byte));
    }
    assert!(parser.parse_byte(bytes[bytes.len() - 1]));
}

#[test]
fn empty_stream_yields_nothing() {
    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &[]), vec![]);
}

#[test]
fn back_to_back_frames_are_both_recovered() {
    let first = on_frame(&LAMP_A, 0x05, 0x00);
    let second = on_frame(&LAMP_A, 0x06, 0x00);
    let mut stream = Vec::new();
    stream.extend_from_slice(first.as_bytes());
    stream.extend_from_slice(second.as_bytes());

    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &stream), vec![first, second]);
}

// -----------------------------------------------------------------------------
// Resynchronization
// -----------------------------------------------------------------------------

#[test]
fn leading_garbage_is_skipped() {
    let frame = on_frame(&LAMP_A, 0x10, 0x10);
    let mut stream = vec![0x00, 0xFF, 0x12, 0xA4, 0x99];
    stream.extend_from_slice(frame.as_bytes());

    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &stream), vec![frame]);
}

#[test]
fn header_byte_inside_identity_does_not_restart_the_frame() {
    // identity deliberately contains the header marker 0x53
    let id: LampId = [0x53, 0x53, 0x00, 0x9D, 0x1B, 0x00, 0x0E];
    let frame = on_frame(&id, 0x09, 0x01);

    let mut parser = FrameParser::new();
    let accepted = feed(&mut parser, frame.as_bytes());
    assert_eq!(accepted, vec![frame]);
    assert_eq!(accepted[0].identification(), id);
}

#[test]
fn corrupt_checksum_discards_the_frame() {
    let frame = on_frame(&LAMP_A, 0x11, 0x04);
    let mut bytes = *frame.as_bytes();
    bytes[11] = bytes[11].wrapping_add(1);

    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &bytes), vec![]);
}

#[test]
fn valid_checksum_with_bad_terminator_is_rejected() {
    let frame = on_frame(&LAMP_A, 0x11, 0x04);
    let mut bytes = *frame.as_bytes();
    bytes[12] = 0x01;

    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &bytes), vec![]);
}

#[test]
fn parser_recovers_without_external_reset_after_a_bad_frame() {
    let good = on_frame(&LAMP_A, 0x13, 0x02);
    let mut corrupt = *good.as_bytes();
    corrupt[11] ^= 0xFF;

    let mut stream = Vec::new();
    stream.extend_from_slice(&corrupt);
    stream.extend_from_slice(good.as_bytes());

    let mut parser = FrameParser::new();
    assert_eq!(feed(&mut parser, &stream), vec![good]);
}

#[test]
fn ignorable_magic_frames_are_still_parsed() {
    // ignoring 0xA4 frames is the coordinator's decision, not the parser's
    let id: LampId = [0xC2, 0x1C, 0x00, 0x9D, 0x1B, 0x00, 0xA4];
    let frame = on_frame(&id, 0x02, 0x02);

    let mut parser = FrameParser::new();
    let accepted = feed(&mut parser, frame.as_bytes());
    assert_eq!(accepted, vec![frame]);
    assert!(accepted[0].can_ignore_magic());
}
