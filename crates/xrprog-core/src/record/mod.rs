//! Hex record handling
//!
//! Records follow the Intel-HEX layout without the start code: length,
//! 16-bit big-endian address, record type, payload, and a two's-complement
//! checksum over everything before it. Type 0 is the only payload type;
//! any other type is a clean end of stream.

pub mod decoder;
pub mod dispatch;

use crate::error::{Error, Result};

/// Record buffer capacity, a protocol limit inherited from the serial path
///
/// A maximal runtime record is 16 payload bytes plus 5 bytes of framing;
/// 70 leaves generous headroom while bounding a hostile stream.
pub const RECORD_CAPACITY: usize = 70;

/// An owned raw record as accumulated by the decoder
pub type RecordBuf = heapless::Vec<u8, RECORD_CAPACITY>;

/// Record type for payload data; anything else ends the stream
pub const TYPE_DATA: u8 = 0;

/// Borrowed view over a raw record
///
/// Constructed by [`Record::parse`], which checks the framing and checksum
/// before any field is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    raw: &'a [u8],
}

impl<'a> Record<'a> {
    /// Validate framing and checksum, returning a field view
    ///
    /// The checksum must validate before the address or payload are used,
    /// so this is the only way to obtain them. A non-data record type is
    /// reported through [`record_type`](Self::record_type) without a
    /// checksum requirement - terminator records carry no usable payload.
    pub fn parse(raw: &'a [u8]) -> Result<Record<'a>> {
        if raw.len() < 5 {
            return Err(Error::RecordTruncated);
        }
        let rec = Record { raw };
        if rec.record_type() != TYPE_DATA {
            return Ok(rec);
        }
        let total = rec.length() as usize + 5;
        if raw.len() < total {
            return Err(Error::RecordTruncated);
        }
        let sum = raw[..total]
            .iter()
            .fold(0u8, |acc, &b| acc.wrapping_add(b));
        if sum != 0 {
            return Err(Error::RecordChecksum { sum });
        }
        Ok(rec)
    }

    /// Payload byte count
    pub fn length(&self) -> u8 {
        self.raw[0]
    }

    /// 16-bit target address
    pub fn address(&self) -> u16 {
        ((self.raw[1] as u16) << 8) | self.raw[2] as u16
    }

    /// Record type byte; only [`TYPE_DATA`] carries a payload
    pub fn record_type(&self) -> u8 {
        self.raw[3]
    }

    /// Payload bytes; empty for non-data record types
    ///
    /// Only data records have a checksum-validated length byte, so the
    /// length of a terminator is not trusted to index the buffer.
    pub fn payload(&self) -> &'a [u8] {
        if self.record_type() != TYPE_DATA {
            return &[];
        }
        &self.raw[4..4 + self.length() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // First record of the factory runtime image
    const GOOD: &[u8] = &[
        0x10, 0x80, 0x72, 0x00, 0x00, 0x02, 0x50, 0x00, 0x00, 0xFF, 0xFF, 0xFA, 0x06, 0xFA, 0x04,
        0xFA, 0x02, 0x96, 0x01, 0x00, 0x1D,
    ];

    #[test]
    fn parse_good_record() {
        let rec = Record::parse(GOOD).unwrap();
        assert_eq!(rec.length(), 0x10);
        assert_eq!(rec.address(), 0x8072);
        assert_eq!(rec.record_type(), TYPE_DATA);
        assert_eq!(rec.payload().len(), 16);
        assert_eq!(rec.payload()[0], 0x00);
        assert_eq!(rec.payload()[15], 0x00);
    }

    #[test]
    fn bad_checksum_rejected() {
        let mut bad = [0u8; 21];
        bad.copy_from_slice(GOOD);
        bad[20] ^= 1;
        match Record::parse(&bad) {
            Err(Error::RecordChecksum { sum: 0x01 }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truncated_record_rejected() {
        assert_eq!(Record::parse(&GOOD[..10]), Err(Error::RecordTruncated));
        assert_eq!(Record::parse(&[0x10, 0x80]), Err(Error::RecordTruncated));
    }

    #[test]
    fn terminator_skips_checksum() {
        // Type 1 EOF record; checksum is not consulted for non-data types
        let rec = Record::parse(&[0x00, 0x00, 0x00, 0x01, 0xFF]).unwrap();
        assert_eq!(rec.record_type(), 1);
    }

    #[test]
    fn terminator_payload_is_empty() {
        // The length byte of a non-data record is never checksummed, so a
        // nonzero value must not be used to slice past the buffer.
        let rec = Record::parse(&[0x05, 0x00, 0x00, 0x01, 0xFF]).unwrap();
        assert!(rec.payload().is_empty());
    }
}
