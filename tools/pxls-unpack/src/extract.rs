use std::path::{Component, Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use miette::Diagnostic;
use pxls::SpriteEntry;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ExtractError {
    #[error(
        "crop region exceeds the atlas bounds (x: {x}, y: {y}, width: {width}, height: {height}, atlas: {atlas_width}x{atlas_height})"
    )]
    #[diagnostic(code(pxls_unpack::crop_out_of_bounds))]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        atlas_width: u32,
        atlas_height: u32,
    },

    #[error("sprite name {name:?} is not a plain file name")]
    #[diagnostic(code(pxls_unpack::invalid_file_name))]
    InvalidFileName { name: String },

    #[error("atlas image error: {0}")]
    #[diagnostic(code(pxls_unpack::image_error))]
    Image(#[from] image::ImageError),

    #[error("output file error: {0}")]
    #[diagnostic(code(pxls_unpack::io_error))]
    Io(#[from] std::io::Error),
}

/// Cuts sprites out of one atlas texture into an output directory.
pub struct Extractor {
    atlas: DynamicImage,
    out_dir: PathBuf,
}

impl Extractor {
    pub fn open(texture: impl AsRef<Path>, out_dir: impl Into<PathBuf>) -> Result<Self, ExtractError> {
        let atlas = image::open(texture)?;
        Ok(Self::new(atlas, out_dir))
    }

    pub fn new(atlas: DynamicImage, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            atlas,
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Crop `entry` and save it as PNG. Returns the path written.
    ///
    /// The output directory is created on first use. An existing file is
    /// never overwritten, see [`unique_path`].
    pub fn extract(&self, entry: &SpriteEntry) -> Result<PathBuf, ExtractError> {
        if !is_plain_file_name(&entry.name) {
            return Err(ExtractError::InvalidFileName {
                name: entry.name.clone(),
            });
        }

        let (atlas_width, atlas_height) = self.atlas.dimensions();
        let right = u64::from(entry.x) + u64::from(entry.width);
        let bottom = u64::from(entry.y) + u64::from(entry.height);

        if right > u64::from(atlas_width) || bottom > u64::from(atlas_height) {
            return Err(ExtractError::CropOutOfBounds {
                x: entry.x,
                y: entry.y,
                width: entry.width,
                height: entry.height,
                atlas_width,
                atlas_height,
            });
        }

        let sprite = self
            .atlas
            .crop_imm(entry.x, entry.y, entry.width, entry.height);

        std::fs::create_dir_all(&self.out_dir)?;
        let path = unique_path(&self.out_dir, &entry.name);
        sprite.save_with_format(&path, image::ImageFormat::Png)?;

        Ok(path)
    }
}

/// Exactly one normal path component, so joining it stays inside the
/// output directory.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// `dir/file_name` if free, otherwise the first free `stem(N).ext`
/// counting from zero.
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    if !path.exists() {
        return path;
    }

    let name = Path::new(file_name);
    let stem = name
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = name
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    (0u64..)
        .map(|count| dir.join(format!("{stem}({count}){extension}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}
