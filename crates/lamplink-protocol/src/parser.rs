//! Incremental frame reassembly.

use crate::frame::{Frame, HEADER, ID_LEN, POS_CHECKSUM, POS_END};

/// Progress through one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    WaitingForHeader,
    CollectingIdentity,
    CollectingData,
    CollectingChecksum,
    CollectingEnd,
}

/// Byte-at-a-time Lamp Link frame parser.
///
/// The serial line is shared between several transmitters, so the stream
/// may contain truncated frames, collision garbage and overrun losses.
/// The parser scans for a header byte, collects one frame worth of bytes
/// and accepts the frame only if the checksum and terminator check out;
/// anything else silently restarts the header scan. A header byte inside
/// an already-started frame is payload, not a new start.
///
/// Single-reader; one frame in flight at a time.
#[derive(Debug)]
pub struct FrameParser {
    state: ParserState,
    frame: Frame,
    received: usize,
}

impl FrameParser {
    pub const fn new() -> Self {
        Self {
            state: ParserState::WaitingForHeader,
            frame: Frame::new(),
            received: 0,
        }
    }

    /// Consume one byte from the line.
    ///
    /// Returns `true` exactly on the byte that completes a valid frame;
    /// the frame is then available through [`FrameParser::frame`] until
    /// the next byte is consumed.
    pub fn parse_byte(&mut self, byte: u8) -> bool {
        match self.state {
            ParserState::WaitingForHeader => {
                if byte == HEADER {
                    self.frame.raw_mut()[0] = byte;
                    self.received = 1;
                    self.state = ParserState::CollectingIdentity;
                }
            }
            ParserState::CollectingIdentity => {
                self.frame.raw_mut()[self.received] = byte;
                self.received += 1;
                if self.received == 1 + ID_LEN {
                    self.state = ParserState::CollectingData;
                }
            }
            ParserState::CollectingData => {
                self.frame.raw_mut()[self.received] = byte;
                self.received += 1;
                if self.received == POS_CHECKSUM {
                    self.state = ParserState::CollectingChecksum;
                }
            }
            ParserState::CollectingChecksum => {
                self.frame.raw_mut()[POS_CHECKSUM] = byte;
                self.received += 1;
                self.state = ParserState::CollectingEnd;
            }
            ParserState::CollectingEnd => {
                self.frame.raw_mut()[POS_END] = byte;
                if self.frame.validate_checksum() && byte == 0x00 {
                    self.state = ParserState::WaitingForHeader;
                    self.received = 0;
                    return true;
                }
                // Collision noise or a short buffer upstream; drop the
                // frame and rescan.
                self.reset();
            }
        }
        false
    }

    /// The most recently completed frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Drop any partial frame and restart the header scan.
    pub fn reset(&mut self) {
        self.state = ParserState::WaitingForHeader;
        self.received = 0;
        self.frame.clear();
    }
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}
