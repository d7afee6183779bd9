use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;

use crate::assets::bitmap::Bitmap;
use crate::foundation::error::{FrameloomError, FrameloomResult};

/// Turns a formula string into a transparent-background bitmap.
///
/// The alpha channel of the returned bitmap is used as coverage; color is applied later.
pub trait FormulaRenderer: Send + Sync {
    /// Render one formula.
    fn render(&self, formula: &str) -> FrameloomResult<Bitmap>;
}

static NEXT_OUTPUT_ID: AtomicU64 = AtomicU64::new(0);

/// [`FormulaRenderer`] that shells out to the `tex2im` script.
#[derive(Clone, Debug)]
pub struct Tex2Im {
    program: PathBuf,
    work_dir: PathBuf,
    resolution_dpi: Option<u32>,
}

impl Tex2Im {
    /// Render inside `work_dir` using `tex2im` from `PATH`.
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("tex2im"),
            work_dir: work_dir.into(),
            resolution_dpi: None,
        }
    }

    /// Use a specific `tex2im` executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Render at `dpi` instead of the tool default.
    pub fn with_resolution(mut self, dpi: u32) -> Self {
        self.resolution_dpi = Some(dpi);
        self
    }

    /// Command-line arguments for rendering `formula` into `out_file`.
    pub fn args(&self, formula: &str, out_file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-b".into(), "transparent".into()];
        if let Some(dpi) = self.resolution_dpi {
            args.push("-r".into());
            args.push(format!("{dpi}x{dpi}").into());
        }
        args.push("-o".into());
        args.push(out_file.as_os_str().to_owned());
        args.push(formula.into());
        args
    }
}

impl FormulaRenderer for Tex2Im {
    #[tracing::instrument(skip(self))]
    fn render(&self, formula: &str) -> FrameloomResult<Bitmap> {
        std::fs::create_dir_all(&self.work_dir).with_context(|| {
            format!("create formula work dir '{}'", self.work_dir.display())
        })?;

        let id = NEXT_OUTPUT_ID.fetch_add(1, Ordering::Relaxed);
        let out_file = self
            .work_dir
            .join(format!("formula_{}_{id}.png", std::process::id()));
        let args = self.args(formula, &out_file);
        tracing::debug!(program = %self.program.display(), ?args, "running formula renderer");

        let out = Command::new(&self.program)
            .current_dir(&self.work_dir)
            .args(&args)
            .output()
            .map_err(|e| {
                FrameloomError::external(format!(
                    "failed to spawn '{}': {e}",
                    self.program.display()
                ))
            })?;
        if !out.status.success() {
            let _ = std::fs::remove_file(&out_file);
            return Err(FrameloomError::external(format!(
                "'{}' exited with status {}: {}",
                self.program.display(),
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let bytes = std::fs::read(&out_file).map_err(|e| {
            FrameloomError::external(format!(
                "'{}' produced no output at '{}': {e}",
                self.program.display(),
                out_file.display()
            ))
        })?;
        let _ = std::fs::remove_file(&out_file);
        Bitmap::decode(&bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/formula.rs"]
mod tests;
