use core::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::scan::Marker;
use crate::RECORD_SIZE;

/// Size of the fingerprint at the head of every pack record (in bytes)
pub const FINGERPRINT_SIZE: usize = 10;

/// First ten bytes of a pack record. Identifies the record's name in the
/// pose section.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; FINGERPRINT_SIZE]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Uppercase hex pairs separated by spaces, e.g. `AA BB CC`.
    pub fn to_hex(&self) -> String {
        self.0
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Marker matched against the pose section.
    pub fn search_key(&self) -> Marker {
        Marker::from_bytes(self.as_bytes())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpriteRecord {
    /// Name lookup key
    pub fingerprint: Fingerprint,
    /// Left edge in the atlas
    pub x: u32,
    /// Top edge in the atlas
    pub y: u32,
    /// Width (in pixels)
    pub width: u32,
    /// Height (in pixels)
    pub height: u32,
}

/// Decode one pack record.
pub fn decode(record: &[u8; RECORD_SIZE]) -> SpriteRecord {
    let mut fingerprint = [0u8; FINGERPRINT_SIZE];
    fingerprint.copy_from_slice(&record[0..FINGERPRINT_SIZE]);

    SpriteRecord {
        fingerprint: Fingerprint(fingerprint),
        x: BigEndian::read_u24(&record[12..15]),
        y: BigEndian::read_u24(&record[16..19]),
        width: BigEndian::read_u24(&record[20..23]),
        height: BigEndian::read_u24(&record[24..27]),
    }
}
