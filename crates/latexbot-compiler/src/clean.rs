//! Removal of the auxiliary files a compile leaves behind.

use camino::{Utf8Path, Utf8PathBuf};
use std::io;

/// Suffixes appended to a document stem by TeX engines, bibliography tools
/// and makeindex.
pub const AUX_EXTENSIONS: &[&str] = &[
    ".aux",
    ".log",
    ".out",
    ".toc",
    ".bbl",
    ".blg",
    ".bcf",
    ".run.xml",
    ".synctex.gz",
    ".fls",
    ".fdb_latexmk",
    ".nav",
    ".snm",
    ".lof",
    ".lot",
    ".idx",
    ".ind",
    ".ilg",
    ".glo",
    ".gls",
    ".glg",
    ".ist.aux",
    ".xdv",
];

/// Stems of every `.tex` file directly inside `dir`, sorted.
fn tex_stems(dir: &Utf8Path) -> io::Result<Vec<String>> {
    let mut stems = Vec::new();
    for entry in dir.read_dir_utf8()? {
        let path = entry?.into_path();
        if path.extension() == Some("tex")
            && path.is_file()
            && let Some(stem) = path.file_stem()
        {
            stems.push(stem.to_string());
        }
    }
    stems.sort();
    Ok(stems)
}

/// Remove auxiliary files for `stem`, or for every `.tex` document in `dir`
/// when no stem is given. Returns the removed paths in removal order.
///
/// Only `<stem><ext>` names from [`AUX_EXTENSIONS`] are touched, so sources
/// and PDFs survive.
pub fn clean(dir: &Utf8Path, stem: Option<&str>) -> io::Result<Vec<Utf8PathBuf>> {
    let stems = match stem {
        Some(stem) => vec![stem.to_string()],
        None => tex_stems(dir)?,
    };

    let mut removed = Vec::new();
    for stem in &stems {
        for ext in AUX_EXTENSIONS {
            let path = dir.join(format!("{stem}{ext}"));
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(path = %path, "removed auxiliary file");
                    removed.push(path);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
    }
    tracing::info!(dir = %dir, removed = removed.len(), "cleaned auxiliary files");
    Ok(removed)
}
