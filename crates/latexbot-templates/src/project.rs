use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use std::{fs, io};

use latexbot_tex::{Author, TexFile};
use latexbot_utils::atomic_write::write_file_atomic;
use latexbot_utils::error::TemplateError;
use latexbot_utils::paths::ensure_dir_all;

use crate::render::TemplateVars;

const CREATED_ON_FORMAT: &str = "%b %d, %Y";

/// Inputs shared by every template.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Target directory; `<cwd>/<default_dir>` when unset
    pub dir: Option<Utf8PathBuf>,
    pub title: Option<String>,
    pub author: Author,
    /// TeX date text, `\today` when unset
    pub date: Option<String>,
    /// Beamer only
    pub subtitle: Option<String>,
    /// Beamer only, shown under the date on the title frame
    pub purpose: Option<String>,
    /// Beamer only, the short institute name in the footline
    pub institute_code: Option<String>,
    /// Date stamped into generated file headers
    pub created_on: NaiveDate,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self::new(Author::default())
    }
}

impl ProjectOptions {
    #[must_use]
    pub fn new(author: Author) -> Self {
        Self {
            dir: None,
            title: None,
            author,
            date: None,
            subtitle: None,
            purpose: None,
            institute_code: None,
            created_on: Local::now().date_naive(),
        }
    }

    #[must_use]
    pub fn date_text(&self) -> &str {
        self.date.as_deref().unwrap_or(r"\today")
    }

    pub(crate) fn title_or(&self, default: &str) -> String {
        self.title.clone().unwrap_or_else(|| default.to_string())
    }

    /// Variables every asset may use.
    pub(crate) fn base_vars(&self, template: &str, title: &str) -> TemplateVars {
        let author = &self.author;
        TemplateVars::new(template)
            .with("title", title)
            .with("author", author.name.as_str())
            .with(
                "email",
                author.email.as_ref().map_or("", |e| e.as_tex()),
            )
            .with(
                "email_url",
                author.email.as_ref().map_or("", |e| e.address()),
            )
            .with("department", author.department.as_str())
            .with("institute", author.institute.as_str())
            .with("date", self.date_text())
            .with(
                "created_on",
                self.created_on.format(CREATED_ON_FORMAT).to_string(),
            )
    }
}

/// What `create_project` wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub template: String,
    pub root: Utf8PathBuf,
    /// Every file written, in write order
    pub files: Vec<Utf8PathBuf>,
}

impl CreatedProject {
    /// The document to compile.
    #[must_use]
    pub fn main_tex(&self) -> Utf8PathBuf {
        self.root.join("main.tex")
    }
}

/// Writes a project tree into a directory that must not exist yet.
///
/// The root is removed again when the writer is dropped without
/// [`ProjectWriter::finish`], so a failed write leaves nothing behind.
pub(crate) struct ProjectWriter {
    template: String,
    root: Utf8PathBuf,
    files: Vec<Utf8PathBuf>,
    finished: bool,
}

fn write_failed(path: &Utf8Path, reason: impl std::fmt::Display) -> TemplateError {
    TemplateError::WriteFailed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}

impl ProjectWriter {
    pub(crate) fn create(template: &str, root: &Utf8Path) -> Result<Self, TemplateError> {
        if let Some(parent) = root.parent().filter(|p| !p.as_str().is_empty()) {
            ensure_dir_all(parent).map_err(|e| write_failed(parent, e))?;
        }
        match fs::create_dir(root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(TemplateError::ProjectExists {
                    path: root.to_string(),
                });
            }
            Err(e) => return Err(write_failed(root, e)),
        }
        tracing::info!(template, root = %root, "creating project");
        Ok(Self {
            template: template.to_string(),
            root: root.to_path_buf(),
            files: Vec::new(),
            finished: false,
        })
    }

    /// Create an empty subdirectory.
    pub(crate) fn dir(&mut self, rel: &str) -> Result<(), TemplateError> {
        let path = self.root.join(rel);
        ensure_dir_all(&path).map_err(|e| write_failed(&path, e))
    }

    pub(crate) fn write(&mut self, rel: &str, content: &str) -> Result<(), TemplateError> {
        let path = self.root.join(rel);
        let written =
            write_file_atomic(&path, content).map_err(|e| write_failed(&path, format!("{e:#}")))?;
        tracing::debug!(
            path = %path,
            bytes = written.bytes_written,
            retries = written.rename_retry_count,
            "wrote project file"
        );
        self.files.push(path);
        Ok(())
    }

    /// Write a [`TexFile`] under `subdir` (relative to the root).
    pub(crate) fn write_tex(&mut self, subdir: &str, file: &TexFile) -> Result<(), TemplateError> {
        let rel = if subdir.is_empty() {
            file.file_name()
        } else {
            format!("{subdir}/{}", file.file_name())
        };
        self.write(&rel, &file.render())
    }

    pub(crate) fn finish(mut self) -> CreatedProject {
        self.finished = true;
        CreatedProject {
            template: std::mem::take(&mut self.template),
            root: std::mem::take(&mut self.root),
            files: std::mem::take(&mut self.files),
        }
    }
}

impl Drop for ProjectWriter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!(root = %self.root, "project creation failed, removing partial tree");
        if let Err(e) = fs::remove_dir_all(&self.root) {
            tracing::warn!(root = %self.root, error = %e, "could not remove partial project");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().join("proj")).unwrap()
    }

    #[test]
    fn test_writer_refuses_existing_dir() {
        let temp = TempDir::new().unwrap();
        let dir = root(&temp);
        std::fs::create_dir(&dir).unwrap();

        match ProjectWriter::create("plainart", &dir) {
            Err(TemplateError::ProjectExists { path }) => assert_eq!(path, dir.to_string()),
            Err(other) => panic!("Expected ProjectExists, got {other:?}"),
            Ok(_) => panic!("Expected ProjectExists"),
        }
    }

    #[test]
    fn test_writer_creates_missing_parents() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().join("papers/2024/proj")).unwrap();
        let writer = ProjectWriter::create("plainart", &dir).unwrap();
        writer.finish();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_failed_write_removes_partial_tree() {
        let temp = TempDir::new().unwrap();
        let dir = root(&temp);
        let mut writer = ProjectWriter::create("thesis", &dir).unwrap();
        writer.write("main.tex", "x").unwrap();
        writer.dir("Chapters").unwrap();

        let err = writer.write("Chapters", "not a directory").unwrap_err();
        assert!(matches!(err, TemplateError::WriteFailed { .. }));
        drop(writer);
        assert!(!dir.exists());

        // A retry starts from a clean slate instead of hitting ProjectExists.
        let writer = ProjectWriter::create("thesis", &dir).unwrap();
        assert!(writer.finish().files.is_empty());
        assert!(dir.is_dir());
    }

    #[test]
    fn test_writer_records_files() {
        let temp = TempDir::new().unwrap();
        let dir = root(&temp);
        let mut writer = ProjectWriter::create("newart", &dir).unwrap();
        writer.write("sections/a.tex", "A").unwrap();
        writer.dir("images").unwrap();
        let created = writer.finish();

        assert_eq!(created.files, vec![dir.join("sections/a.tex")]);
        assert!(dir.join("images").is_dir());
        assert_eq!(created.main_tex(), dir.join("main.tex"));
    }

    #[test]
    fn test_base_vars() {
        let author = Author::new("Ada")
            .department("Mathematics")
            .email("ada_l@example.org");
        let mut opts = ProjectOptions::new(author);
        opts.created_on = NaiveDate::from_ymd_opt(2024, 1, 29).unwrap();
        let vars = opts.base_vars("beamer", "Talk");

        assert_eq!(vars.get("title"), Some("Talk"));
        assert_eq!(vars.get("email"), Some(r"\texttt{ada\_l@example.org}"));
        assert_eq!(vars.get("email_url"), Some("ada_l@example.org"));
        assert_eq!(vars.get("date"), Some(r"\today"));
        assert_eq!(vars.get("created_on"), Some("Jan 29, 2024"));
        assert_eq!(vars.get("institute"), Some(""));
    }
}
