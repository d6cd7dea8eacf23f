//! UTF-8 path helpers.
//!
//! TeX engines and the generated sources only deal in UTF-8 file names, so the
//! crates carry `camino` paths and convert at the `std` boundary here.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;

/// Convert a `PathBuf` into a `Utf8PathBuf`, failing on non-UTF-8 names.
pub fn to_utf8(path: PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow!("Path is not valid UTF-8: {}", p.display()))
}

/// The process working directory as a `Utf8PathBuf`.
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    to_utf8(cwd)
}

/// Resolve `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve_against(base: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// mkdir -p; treat `AlreadyExists` as success
pub fn ensure_dir_all<P: AsRef<std::path::Path>>(p: P) -> std::io::Result<()> {
    match std::fs::create_dir_all(&p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e),
    }
}

/// File stem of a `.tex` path: `paper/main.tex` gives `main`.
#[must_use]
pub fn tex_stem(path: &Utf8Path) -> Option<&str> {
    path.file_stem()
}
