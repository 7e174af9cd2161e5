pub mod error;
pub mod name;
pub mod record;
pub mod report;
pub mod scan;

use crate::error::{CatalogError, RecordIssue};
use crate::name::NameResolver;
use crate::record::Fingerprint;
use crate::scan::{EndSearch, MissingEnd, SectionSpec};

pub use crate::report::{report_catalog, Report, ReportSink, Severity};

pub type Result<T> = core::result::Result<T, CatalogError>;

/// Start of the pack section ("%PACK_SECTION%")
pub const PACK_START: &[u8] = b"%PACK_SECTION%";
/// End of the pack section
pub const PACK_END: &[u8] = &[0x00, 0x00, 0x00, 0x02, 0x00];
/// Bytes skipped after the pack start marker
pub const PACK_SKIP: usize = 14;
/// Start of the pose section ("%POSE_SECTION%")
pub const POSE_START: &[u8] = b"%POSE_SECTION%";
/// End of the pose section ("%PTCL_SECTION%")
pub const POSE_END: &[u8] = b"%PTCL_SECTION%";
/// Terminator of a name in the pose section
pub const NAME_END: &[u8] = &[0x27, 0x10];
/// Bytes between a fingerprint occurrence and the name
pub const NAME_SKIP: usize = 4;
/// Size of a pack record (in bytes)
pub const RECORD_SIZE: usize = 28;
/// Bytes skipped at the start of the pack section before the first record
pub const RECORD_SKIP: usize = 2;
/// Extension appended to every resolved name
pub const SPRITE_EXTENSION: &str = ".png";

pub const PACK_SECTION: SectionSpec<'static> = SectionSpec {
    start: PACK_START,
    end: Some(PACK_END),
    skip: PACK_SKIP,
    end_search: EndSearch::FromSectionStart,
    missing_end: MissingEnd::Fail,
};

pub const POSE_SECTION: SectionSpec<'static> = SectionSpec {
    start: POSE_START,
    end: Some(POSE_END),
    skip: 0,
    end_search: EndSearch::FromBufferStart,
    missing_end: MissingEnd::ToBufferEnd,
};

/// Sprite ready to be cut out of the atlas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteEntry {
    /// File name, including the ".png" extension
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Record that was skipped while building a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordDiagnostic {
    /// Position of the record in the pack section
    pub index: usize,
    pub fingerprint: Fingerprint,
    pub issue: RecordIssue,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Entries in pack record order
    pub entries: Vec<SpriteEntry>,
    pub diagnostics: Vec<RecordDiagnostic>,
}

/// Build the sprite catalog of one descriptor.
pub fn build_catalog(bytes: &[u8]) -> Result<Catalog> {
    let pack = scan::find_section(bytes, &PACK_SECTION).ok_or(CatalogError::MissingPackSection)?;
    let pose = scan::find_section(bytes, &POSE_SECTION).ok_or(CatalogError::MissingPoseSection)?;

    log::debug!(
        "pack section {}..{}, pose section {}..{}",
        pack.start,
        pack.end,
        pose.start,
        pose.end
    );

    let resolver = NameResolver::new(&bytes[pose]);
    let mut catalog = Catalog::default();

    for (index, window) in scan::segment(pack, RECORD_SKIP, RECORD_SIZE).enumerate() {
        let Some(raw) = bytes
            .get(window)
            .and_then(|chunk| <&[u8; RECORD_SIZE]>::try_from(chunk).ok())
        else {
            continue;
        };

        let record = record::decode(raw);
        let resolved = resolver
            .resolve(&record.fingerprint.search_key())
            .ok_or(RecordIssue::NameNotFound)
            .and_then(name::decode_name);

        match resolved {
            Ok(name) => catalog.entries.push(SpriteEntry {
                name: name + SPRITE_EXTENSION,
                x: record.x,
                y: record.y,
                width: record.width,
                height: record.height,
            }),
            Err(issue) => catalog.diagnostics.push(RecordDiagnostic {
                index,
                fingerprint: record.fingerprint,
                issue,
            }),
        }
    }

    log::debug!(
        "catalog built: {} entries, {} skipped records",
        catalog.entries.len(),
        catalog.diagnostics.len()
    );

    Ok(catalog)
}
