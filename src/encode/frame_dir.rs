use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::compile::CompiledFrames;
use crate::encode::ffmpeg::flatten_canvas;
use crate::foundation::error::{FrameloomError, FrameloomResult};

/// Caller-supplied directory holding intermediate frame PNGs.
///
/// Files written here are removed on [`FrameDir::cleanup`] or when the value is
/// dropped, unless [`FrameDir::persist`] was called. The directory itself is removed
/// too if this value created it.
#[derive(Debug)]
pub struct FrameDir {
    root: PathBuf,
    created_root: bool,
    written: Vec<PathBuf>,
    keep: bool,
}

impl FrameDir {
    /// Use `root`, creating it if missing.
    pub fn new(root: impl Into<PathBuf>) -> FrameloomResult<Self> {
        let root = root.into();
        let created_root = !root.exists();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create frame directory '{}'", root.display()))?;
        Ok(Self {
            root,
            created_root,
            written: Vec::new(),
            keep: false,
        })
    }

    /// Directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `ffmpeg` input pattern matching [`FrameDir::frame_path`].
    pub fn pattern(&self) -> PathBuf {
        self.root.join("frame_%06d.png")
    }

    /// File used for frame `index`.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.root.join(format!("frame_{index:06}.png"))
    }

    /// Write every frame as an opaque PNG, flattened over the frames' background.
    #[tracing::instrument(skip_all, fields(root = %self.root.display(), frames = frames.len()))]
    pub fn write_frames(&mut self, frames: &CompiledFrames) -> FrameloomResult<()> {
        let bg: [u8; 4] = frames.background().into();
        for frame in frames {
            let rgba = flatten_canvas(&frame.canvas, bg)?;
            let img = image::RgbaImage::from_raw(frame.canvas.width(), frame.canvas.height(), rgba)
                .ok_or_else(|| FrameloomError::validation("frame buffer does not match its size"))?;
            let path = self.frame_path(frame.index);
            img.save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("write frame '{}'", path.display()))?;
            self.written.push(path);
        }
        Ok(())
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Remove every written file (and the directory, if this value created it).
    pub fn cleanup(&mut self) -> FrameloomResult<()> {
        for path in self.written.drain(..) {
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("remove frame '{}'", path.display()))
                        .into());
                }
            }
        }
        if self.created_root {
            // Fails harmlessly if the caller put other files here.
            let _ = std::fs::remove_dir(&self.root);
        }
        Ok(())
    }

    /// Keep the written files after this value is dropped; returns the directory.
    pub fn persist(mut self) -> PathBuf {
        self.keep = true;
        self.root.clone()
    }
}

impl Drop for FrameDir {
    fn drop(&mut self) {
        if !self.keep {
            let _ = self.cleanup();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frame_dir.rs"]
mod tests;
