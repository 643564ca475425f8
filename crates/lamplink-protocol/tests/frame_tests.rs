//! Tests for the frame value type: field coupling, checksum rules and the
//! identity hex codec.

use lamplink_protocol::{
    Command, Frame, InvalidHex, LEVEL_MAX, OFF_LEVEL, id_from_hex, id_to_hex,
};

// -----------------------------------------------------------------------------
// Field access and command coupling
// -----------------------------------------------------------------------------

#[test]
fn prepare_sets_header_and_terminator_only() {
    let mut frame = Frame::new();
    frame.set_intensity(0x12);
    frame.prepare();

    assert_eq!(frame.as_bytes()[0], 0x53);
    assert_eq!(frame.end(), 0x00);
    assert_eq!(frame.intensity(), 0x00);
    assert_eq!(frame.identification(), [0u8; 7]);
}

#[test]
fn set_command_off_forces_off_levels() {
    let mut frame = Frame::new();
    frame.set_intensity(LEVEL_MAX);
    frame.set_color_balance(0x03);

    frame.set_command(Command::Off);

    assert_eq!(frame.intensity(), OFF_LEVEL);
    assert_eq!(frame.color_balance(), OFF_LEVEL);
}

#[test]
fn set_command_automatic_forces_off_levels() {
    let mut frame = Frame::new();
    frame.set_intensity(0x05);

    frame.set_command(Command::Automatic);

    assert_eq!(frame.intensity(), OFF_LEVEL);
    assert_eq!(frame.color_balance(), OFF_LEVEL);
}

#[test]
fn set_command_on_keeps_levels() {
    let mut frame = Frame::new();
    frame.set_intensity(0x07);
    frame.set_color_balance(0x11);

    frame.set_command(Command::On);

    assert_eq!(frame.intensity(), 0x07);
    assert_eq!(frame.color_balance(), 0x11);
}

#[test]
fn unknown_command_bytes_map_to_unknown() {
    let mut frame = Frame::new();
    frame.set_command(Command::On);
    assert_eq!(frame.command(), Command::On);

    frame.set_command(Command::Unknown);
    assert_eq!(frame.command(), Command::Unknown);
}

#[test]
fn magic_byte_is_last_identity_byte() {
    let mut frame = Frame::new();
    frame.set_identification(&[0xC2, 0x1C, 0x00, 0x9D, 0x1B, 0x00, 0xA4]);

    assert_eq!(frame.magic(), 0xA4);
    assert!(frame.can_ignore_magic());

    frame.set_identification(&[0xC2, 0x1C, 0x00, 0x9D, 0x1B, 0x00, 0x0E]);
    assert!(!frame.can_ignore_magic());
}

// -----------------------------------------------------------------------------
// Checksum
// -----------------------------------------------------------------------------

#[test]
fn checksum_is_wrapping_sum_of_data_bytes() {
    let mut frame = Frame::new();
    frame.set_command(Command::On);
    frame.set_intensity(0x17);
    frame.set_color_balance(0x0E);
    frame.compute_checksum();

    assert_eq!(frame.checksum(), 0x01 + 0x17 + 0x0E);
    assert!(frame.validate_checksum());
}

#[test]
fn checksum_wraps_at_256() {
    let mut frame = Frame::new();
    frame.set_command(Command::Unknown); // 0xFF
    frame.set_intensity(0xFF);
    frame.set_color_balance(0x03);
    frame.compute_checksum();

    assert_eq!(frame.checksum(), 0xFFu8.wrapping_add(0xFF).wrapping_add(0x03));
    assert!(frame.validate_checksum());
}

#[test]
fn validate_checksum_holds_exactly_when_sum_matches() {
    for command in [0x01u8, 0x10, 0x02, 0x77] {
        for intensity in [0x00u8, 0x10, 0x17, 0xFE] {
            for balance in [0x00u8, 0x0B, 0x17] {
                let mut frame = Frame::new();
                match command {
                    0x01 => frame.set_command(Command::On),
                    0x10 => frame.set_command(Command::Off),
                    0x02 => frame.set_command(Command::Automatic),
                    _ => frame.set_command(Command::Unknown),
                }
                frame.set_intensity(intensity);
                frame.set_color_balance(balance);
                frame.compute_checksum();
                assert!(frame.validate_checksum());

                let mut broken = frame;
                broken.set_intensity(intensity.wrapping_add(1));
                assert!(!broken.validate_checksum());
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Identity hex codec
// -----------------------------------------------------------------------------

#[test]
fn identity_hex_round_trip() {
    let id = [0xAA, 0xBB, 0x00, 0xCC, 0xDD, 0x00, 0xEE];
    let hex = id_to_hex(&id);

    assert_eq!(hex.as_str(), "aabb00ccdd00ee");
    assert_eq!(id_from_hex(hex.as_str()), Ok(id));
}

#[test]
fn identity_hex_is_lowercase_and_zero_padded() {
    let hex = id_to_hex(&[0x00, 0x01, 0x0A, 0xF0, 0x00, 0x00, 0x0F]);
    assert_eq!(hex.as_str(), "00010af000000f");
}

#[test]
fn hex_decode_accepts_uppercase() {
    assert_eq!(
        id_from_hex("AABB00CCDD00EE"),
        Ok([0xAA, 0xBB, 0x00, 0xCC, 0xDD, 0x00, 0xEE])
    );
}

#[test]
fn short_hex_string_leaves_tail_zeroed() {
    assert_eq!(
        id_from_hex("c21c"),
        Ok([0xC2, 0x1C, 0x00, 0x00, 0x00, 0x00, 0x00])
    );
}

#[test]
fn overlong_hex_string_is_truncated() {
    assert_eq!(
        id_from_hex("0102030405060708090a"),
        Ok([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07])
    );
}

#[test]
fn malformed_hex_digit_is_rejected() {
    assert_eq!(id_from_hex("zz"), Err(InvalidHex));
    assert_eq!(id_from_hex("c21c0g"), Err(InvalidHex));

    let mut frame = Frame::new();
    frame.set_identification(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(frame.set_identification_hex("no-hex"), Err(InvalidHex));
    // the frame is untouched on error
    assert_eq!(frame.identification(), [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn set_identification_hex_writes_decoded_bytes() {
    let mut frame = Frame::new();
    frame.set_identification_hex("c21c009d1b000e").unwrap();
    assert_eq!(
        frame.identification(),
        [0xC2, 0x1C, 0x00, 0x9D, 0x1B, 0x00, 0x0E]
    );
    assert_eq!(frame.identification_hex().as_str(), "c21c009d1b000e");
}
