use crate::error::{MarkerError, RecordIssue};
use crate::scan::{self, EndSearch, Marker, MissingEnd, SectionSpec};
use crate::{NAME_END, NAME_SKIP};

/// Finds sprite names inside a pose section.
#[derive(Copy, Clone, Debug)]
pub struct NameResolver<'a> {
    pose: &'a [u8],
}

impl<'a> NameResolver<'a> {
    pub fn new(pose: &'a [u8]) -> Self {
        Self { pose }
    }

    /// Name bytes following the first occurrence of `key`, up to the name
    /// terminator or the end of the section. An empty name counts as absent.
    pub fn resolve(&self, key: &Marker) -> Option<&'a [u8]> {
        let spec = SectionSpec {
            start: key.as_bytes(),
            end: Some(NAME_END),
            skip: NAME_SKIP,
            end_search: EndSearch::FromSectionStart,
            missing_end: MissingEnd::ToBufferEnd,
        };

        let range = scan::find_section(self.pose, &spec)?;
        let name = self.pose.get(range)?;
        (!name.is_empty()).then_some(name)
    }

    /// Same as [`NameResolver::resolve`] with the key given as hex pairs.
    pub fn resolve_hex(&self, key: &str) -> Result<Option<&'a [u8]>, MarkerError> {
        let key = Marker::from_hex(key)?;
        Ok(self.resolve(&key))
    }
}

/// Interpret resolved name bytes as printable 7-bit text.
pub fn decode_name(bytes: &[u8]) -> Result<String, RecordIssue> {
    if !bytes.iter().all(|byte| byte.is_ascii_graphic() || *byte == b' ') {
        return Err(RecordIssue::InvalidName {
            bytes: bytes.to_vec(),
        });
    }

    Ok(bytes.iter().map(|byte| char::from(*byte)).collect())
}
