use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pxls::SpriteEntry;
use serde::{Deserialize, Serialize};

pub const MANIFEST_NAME: &str = "index.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Name resolved from the descriptor
    pub name: String,
    /// File actually written, may carry a "(N)" suffix
    pub file: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ManifestEntry {
    pub fn new(entry: &SpriteEntry, saved: &Path) -> Self {
        let file = saved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.name.clone());

        Self {
            name: entry.name.clone(),
            file,
            x: entry.x,
            y: entry.y,
            width: entry.width,
            height: entry.height,
        }
    }
}

pub fn write_manifest(dir: &Path, entries: &[ManifestEntry]) -> Result<(), crate::error::ToolError> {
    let file = File::create(dir.join(MANIFEST_NAME))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}
