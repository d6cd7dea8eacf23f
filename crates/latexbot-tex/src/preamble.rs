use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;

use crate::package::{TexPackage, render_packages};
use crate::texfile::TexFile;

/// A standalone preamble file pulled in with `\input` or `\usepackage`.
///
/// The body is the packages, then the theorem styles, then the custom
/// commands, with a blank line between non-empty parts.
#[derive(Debug, Clone)]
pub struct Preamble {
    file: TexFile,
    pub packages: Vec<TexPackage>,
    pub theorem_styles: String,
    pub custom_commands: String,
}

impl Preamble {
    /// `filename` may carry the extension (`preamble.sty`); `.tex` otherwise.
    #[must_use]
    pub fn new(filename: &str, author: &str) -> Self {
        let ext = filename
            .split_once('.')
            .map_or("tex", |(_, ext)| ext);
        Self {
            file: TexFile::classfile(author, filename, ext, String::new()),
            packages: Vec::new(),
            theorem_styles: String::new(),
            custom_commands: String::new(),
        }
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.file = self.file.with_date(date);
        self
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        self.file.filename()
    }

    pub fn add_package(&mut self, package: TexPackage) {
        self.packages.push(package);
    }

    fn body(&self) -> String {
        let packages = render_packages(&self.packages);
        [
            packages.as_str(),
            self.theorem_styles.as_str(),
            self.custom_commands.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }

    /// The backing classfile with the current body.
    #[must_use]
    pub fn to_tex_file(&self) -> TexFile {
        let mut file = self.file.clone();
        file.body_text = self.body();
        file
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.to_tex_file().render()
    }

    pub fn write(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        self.to_tex_file().write(dir)
    }
}
