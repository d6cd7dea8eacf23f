use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use latexbot_utils::atomic_write::write_file_atomic;

use crate::author::ANONYMOUS;

pub const DEFAULT_TEX_COMPILER: &str = "pdflatex";
pub const DEFAULT_OUTPUT_FORMAT: &str = ".pdf";
pub const DEFAULT_DOCUMENTCLASS: &str = r"\documentclass[12pt, twoside]{article}";
pub const DEFAULT_PREAMBLE: &str = r"
\usepackage[english]{babel}
\usepackage[top=1 in,bottom=1in, left=1 in, right=1 in]{geometry}
";
pub const DEFAULT_BODY_TEXT: &str = "\nYourTextHere\n";
pub const DEFAULT_FILE_EXTENSION: &str = ".tex";
pub const DEFAULT_FILENAME: &str = "untitled";

/// Header date format, e.g. `Oct 18, 2026`.
const HEADER_DATE_FORMAT: &str = "%b %d, %Y";

const HEADER_RULE_WIDTH: usize = 60;

/// A single TeX-family file: `.tex`, `.sty`, `.bib`, `.cls` and friends.
///
/// A *classfile* has no documentclass and no `document` environment; only the
/// file-info header, the pre-document commands and the body are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexFile {
    pub tex_compiler: String,
    pub output_format: String,
    pub documentclass: String,
    pub preamble: String,
    pub body_text: String,
    pub pre_doc_commands: String,
    pub post_doc_commands: String,
    pub author: String,
    file_extension: String,
    filename: String,
    classfile: bool,
    title: Option<String>,
    pdfsubject: Option<String>,
    pdfkeywords: Option<String>,
    pdfcreator: Option<String>,
    date: NaiveDate,
}

/// Serialisable snapshot of a [`TexFile`].
///
/// Every field is optional so a partial snapshot can be applied on top of an
/// existing file with [`TexFile::apply_metadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexFileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tex_compiler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentclass: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_doc_commands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_doc_commands: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classfile: Option<bool>,
}

fn default_pre_doc_commands(author: &str) -> String {
    format!("\\date{{\\today}} % keep \\date{{}} for no date\n\\newcommand{{\\Author}}{{{author}}}\n")
}

impl Default for TexFile {
    fn default() -> Self {
        Self::new(ANONYMOUS)
    }
}

impl TexFile {
    /// A `untitled.tex` article skeleton attributed to `author`.
    #[must_use]
    pub fn new(author: &str) -> Self {
        Self {
            tex_compiler: DEFAULT_TEX_COMPILER.to_string(),
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            documentclass: DEFAULT_DOCUMENTCLASS.to_string(),
            preamble: DEFAULT_PREAMBLE.to_string(),
            body_text: DEFAULT_BODY_TEXT.to_string(),
            pre_doc_commands: default_pre_doc_commands(author),
            post_doc_commands: String::new(),
            author: author.to_string(),
            file_extension: DEFAULT_FILE_EXTENSION.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            classfile: false,
            title: None,
            pdfsubject: None,
            pdfkeywords: None,
            pdfcreator: None,
            date: Local::now().date_naive(),
        }
    }

    /// A classfile named `filename` with extension `ext` holding `body`.
    #[must_use]
    pub fn classfile(author: &str, filename: &str, ext: &str, body: impl Into<String>) -> Self {
        let mut file = Self::new(author);
        file.set_classfile(true);
        file.set_filename(filename);
        file.set_file_extension(ext);
        file.body_text = body.into();
        file
    }

    /// Replace the header date, which otherwise is today.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    #[must_use]
    pub fn is_classfile(&self) -> bool {
        self.classfile
    }

    /// Switching to a classfile clears documentclass, preamble and both
    /// command blocks.
    pub fn set_classfile(&mut self, classfile: bool) {
        self.classfile = classfile;
        if classfile {
            self.documentclass.clear();
            self.preamble.clear();
            self.pre_doc_commands.clear();
            self.post_doc_commands.clear();
        }
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Set the base name; anything from the first `.` on is dropped.
    pub fn set_filename(&mut self, name: &str) {
        self.filename = match name.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => name.to_string(),
        };
    }

    #[must_use]
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Set the extension, adding the leading `.` when missing.
    pub fn set_file_extension(&mut self, ext: &str) {
        self.file_extension = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
    }

    /// `{filename}{ext}`
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}{}", self.filename, self.file_extension)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn pdfsubject(&self) -> Option<&str> {
        self.pdfsubject.as_deref()
    }

    #[must_use]
    pub fn pdfkeywords(&self) -> Option<&str> {
        self.pdfkeywords.as_deref()
    }

    #[must_use]
    pub fn pdfcreator(&self) -> Option<&str> {
        self.pdfcreator.as_deref()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
        self.push_macro("Title", title);
    }

    pub fn set_pdfsubject(&mut self, subject: &str) {
        self.pdfsubject = Some(subject.to_string());
        self.push_macro("PDFsubject", subject);
    }

    pub fn set_pdfcreator(&mut self, creator: &str) {
        self.pdfcreator = Some(creator.to_string());
        self.push_macro("PDFcreator", creator);
    }

    pub fn set_pdfkeywords(&mut self, keywords: &str) {
        self.pdfkeywords = Some(keywords.to_string());
        self.push_macro("PDFkeywords", keywords);
    }

    fn push_macro(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.pre_doc_commands
                .push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}\n"));
        }
    }

    /// Insert `text` before (`prepend`) or after the current preamble.
    pub fn add_to_preamble(&mut self, text: &str, prepend: bool) {
        if prepend {
            self.preamble = format!("\n{text}\n{}", self.preamble);
        } else {
            self.preamble.push_str(&format!("\n{text}\n"));
        }
    }

    /// Append `text` to the commands that follow `\begin{document}`.
    pub fn add_to_document(&mut self, text: &str) {
        self.post_doc_commands.push_str(&format!("\n{text}\n"));
    }

    fn header(&self) -> String {
        let rule = "%".repeat(HEADER_RULE_WIDTH);
        format!(
            "\n{rule}\n%\t{}\n%\tAuthor: {}\n%\tDate: {}\n{rule}\n\n",
            self.file_name(),
            self.author,
            self.date.format(HEADER_DATE_FORMAT)
        )
    }

    /// The full file text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push('\n');
        out.push_str(&self.pre_doc_commands);

        if !self.classfile {
            out.push_str("\n\n");
            out.push_str(&self.documentclass);
            out.push('\n');
            out.push_str(&self.preamble);
            out.push('\n');
            out.push_str(r"\begin{document}");
            out.push('\n');
            out.push_str(&self.post_doc_commands);
        }

        out.push('\n');
        out.push_str(&self.body_text);
        out.push('\n');

        if !self.classfile {
            out.push_str(r"\end{document}");
            out.push('\n');
        }

        out
    }

    /// Snapshot of every field.
    #[must_use]
    pub fn metadata(&self) -> TexFileMetadata {
        TexFileMetadata {
            tex_compiler: Some(self.tex_compiler.clone()),
            output_format: Some(self.output_format.clone()),
            documentclass: Some(self.documentclass.clone()),
            preamble: Some(self.preamble.clone()),
            body_text: Some(self.body_text.clone()),
            pre_doc_commands: Some(self.pre_doc_commands.clone()),
            post_doc_commands: Some(self.post_doc_commands.clone()),
            file_extension: Some(self.file_extension.clone()),
            filename: Some(self.filename.clone()),
            author: Some(self.author.clone()),
            classfile: Some(self.classfile),
        }
    }

    /// Override the fields present in `meta`, leaving the rest untouched.
    ///
    /// `classfile` is applied first so an explicit preamble in the same
    /// snapshot survives the clearing it performs.
    pub fn apply_metadata(&mut self, meta: TexFileMetadata) {
        if let Some(classfile) = meta.classfile {
            self.set_classfile(classfile);
        }
        if let Some(v) = meta.tex_compiler {
            self.tex_compiler = v;
        }
        if let Some(v) = meta.output_format {
            self.output_format = v;
        }
        if let Some(v) = meta.documentclass {
            self.documentclass = v;
        }
        if let Some(v) = meta.preamble {
            self.preamble = v;
        }
        if let Some(v) = meta.body_text {
            self.body_text = v;
        }
        if let Some(v) = meta.pre_doc_commands {
            self.pre_doc_commands = v;
        }
        if let Some(v) = meta.post_doc_commands {
            self.post_doc_commands = v;
        }
        if let Some(v) = meta.file_extension {
            self.set_file_extension(&v);
        }
        if let Some(v) = meta.filename {
            self.set_filename(&v);
        }
        if let Some(v) = meta.author {
            self.author = v;
        }
    }

    /// Write `dir/{filename}{ext}` atomically and return its path.
    pub fn write(&self, dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let path = dir.join(self.file_name());
        write_file_atomic(&path, &self.render())
            .with_context(|| format!("Failed to write {path}"))?;
        tracing::debug!(path = %path, "wrote tex file");
        Ok(path)
    }
}

impl std::fmt::Display for TexFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 7, 20).unwrap()
    }

    #[test]
    fn test_default_render_matches_layout() {
        let file = TexFile::new("Ada Lovelace").with_date(fixed_date());
        let rule = "%".repeat(60);
        let expected = format!(
            "\n{rule}\n%\tuntitled.tex\n%\tAuthor: Ada Lovelace\n%\tDate: Jul 20, 2023\n{rule}\n\n\
             \n\\date{{\\today}} % keep \\date{{}} for no date\n\\newcommand{{\\Author}}{{Ada Lovelace}}\n\
             \n\n\\documentclass[12pt, twoside]{{article}}\n{DEFAULT_PREAMBLE}\n\\begin{{document}}\
             \n\n\nYourTextHere\n\n\
             \\end{{document}}\n"
        );
        assert_eq!(file.render(), expected);
    }

    #[test]
    fn test_default_author_is_anonymous() {
        let file = TexFile::default();
        assert_eq!(file.author, "Anonymous");
        assert!(file.pre_doc_commands.contains(r"\newcommand{\Author}{Anonymous}"));
    }

    #[test]
    fn test_classfile_skips_document_parts() {
        let file = TexFile::classfile("A", "preamble", "sty", "\\RequirePackage{amsmath}\n")
            .with_date(fixed_date());
        let out = file.render();

        assert_eq!(file.file_name(), "preamble.sty");
        assert!(file.documentclass.is_empty());
        assert!(!out.contains(r"\begin{document}"));
        assert!(!out.contains(r"\end{document}"));
        assert!(out.ends_with("\n\\RequirePackage{amsmath}\n\n"));
    }

    #[test]
    fn test_filename_and_extension_normalisation() {
        let mut file = TexFile::default();
        file.set_filename("thesis.final.tex");
        file.set_file_extension("bib");
        assert_eq!(file.filename(), "thesis");
        assert_eq!(file.file_extension(), ".bib");

        file.set_file_extension(".cls");
        assert_eq!(file.file_name(), "thesis.cls");
    }

    #[test]
    fn test_preamble_prepend_and_append() {
        let mut file = TexFile::default();
        file.preamble = "BASE".to_string();
        file.add_to_preamble("FIRST", true);
        file.add_to_preamble("LAST", false);
        assert_eq!(file.preamble, "\nFIRST\nBASE\nLAST\n");
    }

    #[test]
    fn test_add_to_document_appends_post_doc_commands() {
        let mut file = TexFile::default();
        file.add_to_document(r"\maketitle");
        assert_eq!(file.post_doc_commands, "\n\\maketitle\n");

        let out = file.render();
        let begin = out.find(r"\begin{document}").unwrap();
        let maketitle = out.find(r"\maketitle").unwrap();
        let body = out.find("YourTextHere").unwrap();
        assert!(begin < maketitle && maketitle < body);
    }

    #[test]
    fn test_title_and_pdf_setters_define_macros() {
        let mut file = TexFile::new("A");
        file.set_title("On Operators");
        file.set_pdfsubject("Mathematics");
        file.set_pdfcreator("latexbot");
        file.set_pdfkeywords("");

        assert_eq!(file.title(), Some("On Operators"));
        assert_eq!(file.pdfkeywords(), Some(""));
        assert!(file.pre_doc_commands.ends_with(
            "\\newcommand{\\Title}{On Operators}\n\
             \\newcommand{\\PDFsubject}{Mathematics}\n\
             \\newcommand{\\PDFcreator}{latexbot}\n"
        ));
        assert!(!file.pre_doc_commands.contains("PDFkeywords"));
    }

    #[test]
    fn test_metadata_round_trip_and_partial_apply() {
        let mut source = TexFile::new("A");
        source.set_filename("main");
        source.body_text = "Hello".to_string();
        let meta = source.metadata();

        let json = serde_json::to_string(&meta).unwrap();
        let parsed: TexFileMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meta);

        let mut target = TexFile::new("B");
        target.apply_metadata(TexFileMetadata {
            body_text: Some("Replaced".to_string()),
            file_extension: Some("sty".to_string()),
            ..Default::default()
        });
        assert_eq!(target.body_text, "Replaced");
        assert_eq!(target.file_extension(), ".sty");
        assert_eq!(target.author, "B");
        assert_eq!(target.filename(), "untitled");
    }

    #[test]
    fn test_apply_metadata_classfile_then_fields() {
        let mut file = TexFile::default();
        file.apply_metadata(TexFileMetadata {
            classfile: Some(true),
            pre_doc_commands: Some("% kept\n".to_string()),
            ..Default::default()
        });
        assert!(file.is_classfile());
        assert!(file.documentclass.is_empty());
        assert_eq!(file.pre_doc_commands, "% kept\n");
    }

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap().join("nested");
        let mut file = TexFile::new("A").with_date(fixed_date());
        file.set_filename("main");

        let path = file.write(&dir).unwrap();
        assert_eq!(path, dir.join("main.tex"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), file.render());
    }
}
