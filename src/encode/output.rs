use std::path::{Path, PathBuf};

use crate::foundation::error::{FrameloomError, FrameloomResult};

/// Container extensions stripped before `.mp4` is appended.
const CONTAINER_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "avi", "webm", "gif", "m4v"];

/// Normalize a requested output path to `<stem>.mp4`.
///
/// Trailing dots and any run of trailing container extensions are removed first, so
/// `movie.mp4.mp4`, `movie.MOV` and `movie` all resolve to `movie.mp4`. Other
/// extensions are part of the stem: `take.2` becomes `take.2.mp4`.
pub fn resolve_output_path(requested: &Path) -> FrameloomResult<PathBuf> {
    let name = requested
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            FrameloomError::precondition(format!(
                "output path '{}' has no usable file name",
                requested.display()
            ))
        })?;

    let mut stem = name;
    loop {
        let trimmed = stem.trim_end_matches('.');
        let stripped = match trimmed.rsplit_once('.') {
            Some((head, ext)) if is_container(ext) => head,
            _ => trimmed,
        };
        if stripped == stem {
            break;
        }
        stem = stripped;
    }

    if stem.is_empty() {
        return Err(FrameloomError::precondition(format!(
            "output path '{}' has an empty file name",
            requested.display()
        )));
    }
    Ok(requested.with_file_name(format!("{stem}.mp4")))
}

fn is_container(ext: &str) -> bool {
    CONTAINER_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
