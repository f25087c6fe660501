//! Streaming hex record decoder
//!
//! A restartable, push-based scanner: feed it one byte at a time and it
//! emits completed raw records. The stream is ASCII - a `:` start sentinel,
//! hex digit pairs, and any non-hex byte as a per-record terminator.
//!
//! Short fragments (fewer than 5 accumulated bytes at the terminator) are
//! silently discarded rather than faulted; serial noise between records is
//! normal and the permissive behavior is deliberate. Overflow past the
//! record buffer is fatal, and ESC aborts the whole transfer so an operator
//! can cancel a file send midway.

use super::RecordBuf;
use crate::error::{Error, Result};

/// Escape byte that aborts decoding immediately
pub const ABORT_BYTE: u8 = 0x1B;

/// Start-of-record sentinel
const START: u8 = b':';

/// Minimum bytes (length, address, type, checksum) for an emittable record
const MIN_RECORD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Scanning for the start sentinel
    Idle,
    /// Expecting the first hex digit of a byte (or a terminator)
    HighNibble,
    /// Expecting the second hex digit of a byte
    LowNibble,
}

/// Push-based hex record scanner
#[derive(Debug)]
pub struct HexDecoder {
    state: State,
    buf: RecordBuf,
    pending: u8,
}

impl Default for HexDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HexDecoder {
    /// Create a decoder in the idle (hunting) state
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            buf: RecordBuf::new(),
            pending: 0,
        }
    }

    /// Feed one byte; returns a completed raw record if this byte ended one
    ///
    /// Errors are terminal for the stream: [`Error::Aborted`] on the escape
    /// byte, [`Error::DecodeOverflow`] past the buffer capacity.
    pub fn push(&mut self, ch: u8) -> Result<Option<RecordBuf>> {
        if ch == ABORT_BYTE {
            return Err(Error::Aborted);
        }
        match self.state {
            State::Idle => {
                if ch == START {
                    self.buf.clear();
                    self.state = State::HighNibble;
                }
                Ok(None)
            }
            State::HighNibble => {
                if let Some(d) = hexdig(ch) {
                    self.pending = d;
                    self.state = State::LowNibble;
                    Ok(None)
                } else {
                    self.state = State::Idle;
                    if self.buf.len() >= MIN_RECORD {
                        Ok(Some(core::mem::take(&mut self.buf)))
                    } else {
                        // Short fragment: drop it without complaint
                        Ok(None)
                    }
                }
            }
            State::LowNibble => {
                if let Some(d) = hexdig(ch) {
                    let byte = (self.pending << 4) | d;
                    if self.buf.push(byte).is_err() {
                        return Err(Error::DecodeOverflow);
                    }
                    self.state = State::HighNibble;
                    Ok(None)
                } else {
                    log::debug!("odd digit count, dropping record");
                    self.state = State::Idle;
                    Ok(None)
                }
            }
        }
    }
}

fn hexdig(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RECORD_CAPACITY;

    fn feed(dec: &mut HexDecoder, s: &[u8]) -> Result<Option<RecordBuf>> {
        let mut out = None;
        for &b in s {
            if let Some(rec) = dec.push(b)? {
                assert!(out.is_none(), "more than one record emitted");
                out = Some(rec);
            }
        }
        Ok(out)
    }

    #[test]
    fn decodes_framed_record() {
        let mut dec = HexDecoder::new();
        let rec = feed(&mut dec, b":1080720000025000 00FFFFFA06FA04FA0296010055\n")
            .unwrap()
            .expect("record");
        // The space terminates the first record; it has >= 5 bytes so it
        // emits, and the tail after it re-arms only at the next ':'
        assert_eq!(rec[0], 0x10);
        assert_eq!(rec[1], 0x80);
        assert_eq!(rec[2], 0x72);
    }

    #[test]
    fn whole_record_then_newline() {
        let mut dec = HexDecoder::new();
        let rec = feed(&mut dec, b":0100000001FE\n").unwrap().expect("record");
        assert_eq!(&rec[..], &[0x01, 0x00, 0x00, 0x00, 0x01, 0xFE]);
    }

    #[test]
    fn short_fragment_silently_dropped() {
        let mut dec = HexDecoder::new();
        assert_eq!(feed(&mut dec, b":1080\n").unwrap(), None);
        // Decoder is re-armed and still usable
        let rec = feed(&mut dec, b":0100000001FE\n").unwrap();
        assert!(rec.is_some());
    }

    #[test]
    fn noise_between_records_ignored() {
        let mut dec = HexDecoder::new();
        let rec = feed(&mut dec, b"xyz 123 \r\n:0100000001FE;").unwrap();
        assert!(rec.is_some());
    }

    #[test]
    fn odd_digit_count_drops_record() {
        let mut dec = HexDecoder::new();
        // 'g' arrives as the low nibble of a byte - record dropped
        assert_eq!(feed(&mut dec, b":010g2000").unwrap(), None);
    }

    #[test]
    fn escape_aborts() {
        let mut dec = HexDecoder::new();
        assert_eq!(dec.push(b':'), Ok(None));
        assert_eq!(dec.push(ABORT_BYTE), Err(Error::Aborted));
    }

    #[test]
    fn overflow_is_fatal() {
        let mut dec = HexDecoder::new();
        dec.push(b':').unwrap();
        for _ in 0..RECORD_CAPACITY {
            dec.push(b'0').unwrap();
            dec.push(b'0').unwrap();
        }
        assert_eq!(dec.push(b'0'), Ok(None));
        assert_eq!(dec.push(b'0'), Err(Error::DecodeOverflow));
    }
}
