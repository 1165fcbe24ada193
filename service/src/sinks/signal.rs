//! Presentation handoff through a pointer file.
//!
//! The overlay surface watches one well-known file; its content is the
//! path of the asset to show, and an empty file means show nothing.

use std::path::{Path, PathBuf};

use super::PresentationSignal;

#[derive(Debug, Clone)]
pub struct FileSignal {
    pointer: PathBuf,
}

impl FileSignal {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            pointer: data_dir.join("current_notification"),
        }
    }

    pub fn pointer_path(&self) -> &Path {
        &self.pointer
    }
}

impl PresentationSignal for FileSignal {
    fn present(&self, asset: &Path) -> Result<(), anyhow::Error> {
        std::fs::write(&self.pointer, asset.display().to_string())?;
        Ok(())
    }

    fn reset(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.pointer, "")?;
        Ok(())
    }
}
