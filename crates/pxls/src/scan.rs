use core::ops::Range;

use crate::error::MarkerError;

/// Byte pattern searched for inside a descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Marker(Vec<u8>);

impl Marker {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse pairs of hex digits. ASCII whitespace between digits is ignored,
    /// so both `"2710"` and `"27 10"` give the same marker.
    pub fn from_hex(hex: &str) -> Result<Self, MarkerError> {
        let mut bytes = Vec::with_capacity(hex.len() / 2);
        let mut high: Option<u8> = None;
        let mut digits = 0usize;

        for (position, found) in hex.char_indices() {
            if found.is_ascii_whitespace() {
                continue;
            }

            let value = match found.to_digit(16) {
                Some(value) => value as u8,
                None => return Err(MarkerError::InvalidDigit { found, position }),
            };
            digits += 1;

            match high.take() {
                None => high = Some(value),
                Some(high) => bytes.push((high << 4) | value),
            }
        }

        if high.is_some() {
            return Err(MarkerError::OddLength { digits });
        }

        Ok(Self::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Where the end marker search begins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndSearch {
    FromBufferStart,
    /// From the index of the start marker itself (not past it).
    FromSectionStart,
}

/// What happens when the end marker never occurs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MissingEnd {
    /// Strict: the section is reported as absent.
    Fail,
    /// Lenient: the section runs to the end of the buffer.
    ToBufferEnd,
}

/// How to carve one section out of a descriptor.
#[derive(Copy, Clone, Debug)]
pub struct SectionSpec<'a> {
    pub start: &'a [u8],
    pub end: Option<&'a [u8]>,
    /// Bytes skipped after the start marker.
    pub skip: usize,
    pub end_search: EndSearch,
    pub missing_end: MissingEnd,
}

/// Index of the first occurrence of `needle` in `haystack` at or after `from`.
pub fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    if needle.is_empty() {
        return Some(from);
    }

    tail.windows(needle.len())
        .position(|window| window == needle)
        .map(|position| from + position)
}

/// Locate a section and return its range inside `buffer`.
///
/// The range starts right after the start marker plus `skip` bytes. Begin is
/// clamped to the buffer length and an end marker found before begin gives an
/// empty range, so the result can always be used to index `buffer`.
pub fn find_section(buffer: &[u8], spec: &SectionSpec<'_>) -> Option<Range<usize>> {
    let start = find(buffer, spec.start, 0)?;
    let begin = start
        .saturating_add(spec.start.len())
        .saturating_add(spec.skip)
        .min(buffer.len());

    let end = match spec.end {
        None => buffer.len(),
        Some(marker) => {
            let from = match spec.end_search {
                EndSearch::FromBufferStart => 0,
                EndSearch::FromSectionStart => start,
            };

            match (find(buffer, marker, from), spec.missing_end) {
                (Some(end), _) => end,
                (None, MissingEnd::ToBufferEnd) => buffer.len(),
                (None, MissingEnd::Fail) => return None,
            }
        }
    };

    Some(begin..end.max(begin))
}

/// Fixed-size windows over a range, see [`segment`].
#[derive(Clone, Debug)]
pub struct Segments {
    next: usize,
    end: usize,
    size: usize,
}

impl Iterator for Segments {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }

        let to = self.next.checked_add(self.size)?;
        if to > self.end {
            return None;
        }

        let window = self.next..to;
        self.next = to;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.size {
            0 => 0,
            size => self.end.saturating_sub(self.next) / size,
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Segments {}

/// Split `range` into `record_size` windows starting `leading_offset` bytes
/// in. A trailing window shorter than `record_size` is never yielded.
pub fn segment(range: Range<usize>, leading_offset: usize, record_size: usize) -> Segments {
    Segments {
        next: range.start.saturating_add(leading_offset),
        end: range.end,
        size: record_size,
    }
}
