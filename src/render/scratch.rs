//! Per-call scratch space for encoded page images.

use std::io::{BufWriter, Read, Seek, SeekFrom, Write};

use image::RgbImage;
use log::{debug, warn};
use tempfile::TempDir;

use crate::document::PageNumber;
use crate::error::{Result, TermscopeError};
use crate::render::annotator::Scratch;
use crate::render::raster;

/// Scratch space acquired for one annotation call.
///
/// Dropping it removes the directory silently; [`ScratchSpace::release`]
/// removes it and logs a cleanup warning on failure.
pub(crate) enum ScratchSpace {
    Memory,
    Disk(TempDir),
}

impl ScratchSpace {
    pub(crate) fn acquire(scratch: &Scratch) -> Result<Self> {
        match scratch {
            Scratch::Memory => Ok(ScratchSpace::Memory),
            Scratch::TempDir { parent } => {
                let mut builder = tempfile::Builder::new();
                builder.prefix("termscope-");
                let dir = match parent {
                    Some(parent) => builder.tempdir_in(parent)?,
                    None => builder.tempdir()?,
                };
                debug!("Created scratch directory {}", dir.path().display());
                Ok(ScratchSpace::Disk(dir))
            }
        }
    }

    /// Encode `image` as PNG, through a temporary file when on disk.
    pub(crate) fn encode(&self, page: PageNumber, image: &RgbImage) -> Result<Vec<u8>> {
        let dir = match self {
            ScratchSpace::Memory => return raster::encode_png(image),
            ScratchSpace::Disk(dir) => dir,
        };

        let prefix = format!("page-{page}-");
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".png")
            .tempfile_in(dir.path())?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            raster::write_png(image, &mut writer)?;
            writer.flush()?;
        }

        let mut bytes = Vec::new();
        let handle = file.as_file_mut();
        handle.seek(SeekFrom::Start(0))?;
        handle.read_to_end(&mut bytes)?;

        if let Err(e) = file.close() {
            warn!(
                "{}",
                TermscopeError::cleanup(format!(
                    "could not remove scratch image for page {page}: {e}"
                ))
            );
        }
        Ok(bytes)
    }

    pub(crate) fn release(self) {
        if let ScratchSpace::Disk(dir) = self {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => debug!("Removed scratch directory {}", path.display()),
                Err(e) => warn!(
                    "{}",
                    TermscopeError::cleanup(format!(
                        "could not remove scratch directory {}: {e}",
                        path.display()
                    ))
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_scratch_is_removed() {
        let parent = tempfile::tempdir().unwrap();
        let scratch = ScratchSpace::acquire(&Scratch::TempDir {
            parent: Some(parent.path().to_path_buf()),
        })
        .unwrap();
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 1);

        let image = RgbImage::from_pixel(4, 4, raster::INK);
        let bytes = scratch.encode(1, &image).unwrap();
        assert_eq!(bytes, raster::encode_png(&image).unwrap());

        scratch.release();
        assert_eq!(std::fs::read_dir(parent.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_parent_fails_to_acquire() {
        let parent = tempfile::tempdir().unwrap();
        let missing = parent.path().join("absent");
        let result = ScratchSpace::acquire(&Scratch::TempDir {
            parent: Some(missing),
        });
        assert!(matches!(result, Err(TermscopeError::Io(_))));
    }
}
