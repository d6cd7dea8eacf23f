//! `amsart` paper: `main.tex`, a shared `preamble.tex` and one file per section.

use camino::Utf8Path;
use chrono::NaiveDate;

use latexbot_tex::{Author, Preamble, TexFile, TexPackage, join_names};
use latexbot_utils::error::TemplateError;

use crate::assets;
use crate::plain::PdfOptions;
use crate::project::{CreatedProject, ProjectOptions, ProjectWriter};
use crate::registry::TEMPLATE_AMSART;

pub const DEFAULT_TITLE: &str = r"\AmS-art \TeX\ Template";

/// Authors get numbered macro blocks, `\AuthorOne` .. `\AuthorNine`.
pub const MAX_AUTHORS: usize = 9;

const AUTHOR_NUMBERS: [&str; MAX_AUTHORS] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const BANNER_RULE: &str = "%--------------------------------------------------------------";
const SECTION_ABSTRACT: &str = "abstract";

/// Packages loaded from `preamble.tex`.
#[must_use]
pub fn default_packages() -> Vec<TexPackage> {
    vec![
        TexPackage::new("inputenc").option("utf8"),
        TexPackage::new("fontenc").option("T1"),
        TexPackage::new("lmodern"),
        TexPackage::new("geometry").options(["top=0.9in", "bottom=1in", "left=1in", "right=1in"]),
        TexPackage::many(["amsmath", "amssymb", "amsthm", "amscd"])
            .comment("amssymb internally loads amsfonts"),
        TexPackage::new("bbm").comment(r"For typing `set of natural nums`, e.g - \mathbbm{N}"),
        TexPackage::new("mathtools"),
        TexPackage::new("mathrsfs").comment(r"renders \mathscr cmd"),
        TexPackage::new("xfrac").comment(r"renders diagonal frac notation: use \sfrac{}{}"),
        TexPackage::new("hyperref").cmd(
            r"\hypersetup{
	pdftitle={\pdfTitle},
	pdfauthor={\pdfAuthor},
	pdfsubject={\pdfSubject},
	pdfcreationdate={\pdfCreationDate},
	pdfcreator={\pdfCreator},
	pdfkeywords={\pdfKeywords},
	colorlinks=\pdfColorLink,
	linkcolor={\pdfLinkColor},
	urlcolor=\pdfUrlColor,
	citecolor=\pdfCiteColor,
	pdfpagemode=UseOutlines,
}",
        ),
        TexPackage::new("array"),
        TexPackage::new("enumitem")
            .comment("Give extra customization on top of itemize and enumerate"),
        TexPackage::new("tikz-cd").comment("Online editor: https://tikzcd.yichuanshen.de/"),
        TexPackage::new("microtype")
            .comment(r"To disable `ligatures` by using `\DisableLigatures`.")
            .cmd(r"\DisableLigatures{encoding = *, family = *}"),
        TexPackage::new("graphicx"),
        TexPackage::new("xcolor"),
        TexPackage::new("lipsum"),
        TexPackage::new("dsfont").comment("Renders '1' for characteristic function..."),
    ]
}

/// Python-style title case: a letter after a non-letter is upper-cased, every
/// other letter lower-cased.
fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct AmsArticle {
    pub title: String,
    /// Running-head title; falls back to `title`
    pub short_title: Option<String>,
    pub subject_class: Option<String>,
    pub dedicatory: Option<String>,
    pub keywords: Option<String>,
    pub date: String,
    pub pdf: PdfOptions,
    pub preamble: Preamble,
    authors: Vec<Author>,
    sections: Vec<TexFile>,
    references: Vec<String>,
    created_on: NaiveDate,
}

impl AmsArticle {
    #[must_use]
    pub fn new(opts: &ProjectOptions) -> Self {
        let author = opts.author.clone();
        let mut preamble =
            Preamble::new("preamble", &author.name).with_date(opts.created_on);
        preamble.packages = default_packages();
        preamble.theorem_styles = assets::AMS_THEOREM_STYLES.to_string();
        preamble.custom_commands = assets::AMS_MACROS.to_string();

        let mut art = Self {
            title: opts.title_or(DEFAULT_TITLE),
            short_title: None,
            subject_class: None,
            dedicatory: None,
            keywords: None,
            date: opts.date_text().to_string(),
            pdf: PdfOptions::default(),
            preamble,
            authors: vec![author],
            sections: Vec::new(),
            references: assets::default_references(),
            created_on: opts.created_on,
        };
        for (name, content) in [
            ("introduction", assets::AMS_SECTION_INTRODUCTION),
            (SECTION_ABSTRACT, assets::AMS_SECTION_ABSTRACT),
            ("section1", assets::AMS_SECTION_1),
            ("section2", assets::AMS_SECTION_2),
        ] {
            art.add_section(name, content);
        }
        art
    }

    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Append a co-author.
    ///
    /// # Errors
    ///
    /// [`TemplateError::TooManyAuthors`] past [`MAX_AUTHORS`].
    pub fn add_author(&mut self, author: Author) -> Result<(), TemplateError> {
        if self.authors.len() >= MAX_AUTHORS {
            return Err(TemplateError::TooManyAuthors {
                count: self.authors.len() + 1,
                max: MAX_AUTHORS,
            });
        }
        self.authors.push(author);
        Ok(())
    }

    /// Add `sections/<name>.tex`. A section named `abstract` fills the
    /// abstract environment instead of a `\section`.
    pub fn add_section(&mut self, name: &str, content: &str) {
        let author = self.authors.first().map_or("", |a| a.name.as_str());
        self.sections.push(
            TexFile::classfile(author, name, ".tex", content).with_date(self.created_on),
        );
    }

    pub fn clear_sections(&mut self) {
        self.sections.clear();
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(TexFile::filename).collect()
    }

    pub fn add_reference(&mut self, entry: &str) {
        self.references.push(entry.to_string());
    }

    fn author_names(&self) -> String {
        let names: Vec<&str> = self.authors.iter().map(|a| a.name.as_str()).collect();
        join_names(&names)
    }

    /// Macro definitions placed before `\documentclass`.
    fn authors_outside(&self) -> String {
        let mut out = String::new();
        for (author, num) in self.authors.iter().zip(AUTHOR_NUMBERS) {
            out.push_str(&format!("\n\\newcommand{{\\Author{num}}}{{{}}}%\n", author.name));
            for (suffix, value) in author_fields(author) {
                out.push_str(&format!(
                    "\\newcommand{{\\Author{num}{suffix}}}{{%\n{value}\n}}%\n"
                ));
            }
        }
        out
    }

    /// `\author`, `\address`, .. inside the document.
    fn authors_inside(&self) -> String {
        let mut out = String::new();
        for (author, num) in self.authors.iter().zip(AUTHOR_NUMBERS) {
            out.push_str(&format!(
                "\n% Author {num} information\n\\author{{\\Author{num}}}%\n"
            ));
            for (suffix, _) in author_fields(author) {
                let (label, cmd) = match suffix {
                    "Addr" => ("address", "address"),
                    "CurrAddr" => ("current address", "curraddr"),
                    "Email" => ("email", "email"),
                    _ => ("support", "thanks"),
                };
                out.push_str(&format!(
                    "% Author {num} {label}\n\\{cmd}{{\\Author{num}{suffix}}}%\n"
                ));
            }
        }
        out
    }

    fn pre_doc_commands(&self) -> String {
        let short_title = self.short_title.as_deref().unwrap_or(&self.title);
        let mut out = format!(
            "\\newcommand{{\\Title}}{{{}}}%\n\\newcommand{{\\ShortTitle}}{{{short_title}}}%\n\n",
            self.title
        );
        out.push_str(&format!(
            "{BANNER_RULE}\n%%%\t       Author(s) Information\n{BANNER_RULE}\n"
        ));
        out.push_str(&self.authors_outside());
        out.push_str(&format!("\n%{}\n\n", "-".repeat(80)));

        for (name, value) in [
            ("SubjectClassText", &self.subject_class),
            ("Dedicatory", &self.dedicatory),
            ("Keywords", &self.keywords),
        ] {
            if let Some(value) = value {
                out.push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}%\n"));
            }
        }
        out.push_str(&format!("\\newcommand{{\\Date}}{{{}}}%\n", self.date));
        out.push_str(&self.pdf.constants_block(BANNER_RULE, &self.title, &self.author_names()));
        out.push_str(&format!("%{}\n\n", "-".repeat(80)));
        out
    }

    fn post_doc_commands(&self) -> String {
        let mut out = String::from("\\title[\\ShortTitle]{\\Title}%\n");
        out.push_str(&self.authors_inside());
        out.push_str("\n\\date{\\Date}%\n");
        if self.dedicatory.is_some() {
            out.push_str("\\dedicatory{\\Dedicatory}%\n");
        }
        if self.subject_class.is_some() {
            out.push_str("\\subjclass[2020]{\\SubjectClassText}%\n");
        }
        if self.keywords.is_some() {
            out.push_str("\\keywords{\\Keywords}%\n");
        }
        out
    }

    fn body(&self) -> String {
        let mut body = String::from("\\maketitle%\n%\\tableofcontents\n\n");
        if self.sections.iter().any(|s| s.filename() == SECTION_ABSTRACT) {
            body.push_str(
                "\n\\begin{abstract}\n    \\label{sec:abstract}\n    \\input{sections/abstract}\n\\end{abstract}\n\n",
            );
        }
        for section in self.sections.iter().filter(|s| s.filename() != SECTION_ABSTRACT) {
            let name = section.filename();
            body.push_str(&format!(
                "\\section{{{}}}%\n\\label{{sec:{}}}%\n\\input{{sections/{name}}}%\n\n",
                title_case(name),
                name.replace(' ', "")
            ));
        }
        if self.sections.is_empty() {
            body.push_str("\\lipsum[1-2]\n");
        }
        body.push_str(
            "\n\\medskip\n\\nocite{*}\n\n\\bibliographystyle{amsalpha} % Also use `amsplain`\n\\bibliography{references}%\n",
        );
        body
    }

    #[must_use]
    pub fn main_tex(&self) -> TexFile {
        let mut file = TexFile::new(&self.author_names()).with_date(self.created_on);
        file.set_filename("main");
        file.documentclass = format!(
            "\\documentclass[{},{}]{{amsart}}%",
            self.pdf.fontsize, self.pdf.papersize
        );
        file.preamble = format!("\\input{{{}}}\n", self.preamble.filename());
        file.pre_doc_commands = self.pre_doc_commands();
        file.post_doc_commands = self.post_doc_commands();
        file.body_text = self.body();
        file
    }

    #[must_use]
    pub fn render_main(&self) -> String {
        self.main_tex().render()
    }

    pub fn create(&self, dir: &Utf8Path) -> Result<CreatedProject, TemplateError> {
        let mut writer = ProjectWriter::create(TEMPLATE_AMSART, dir)?;
        writer.write_tex("", &self.preamble.to_tex_file())?;
        writer.write_tex("", &self.main_tex())?;
        let bib = TexFile::classfile(&self.author_names(), "references", ".bib", self.references.concat())
            .with_date(self.created_on);
        writer.write_tex("", &bib)?;
        for section in &self.sections {
            writer.write_tex("sections", section)?;
        }
        Ok(writer.finish())
    }
}

/// Present per-author macros as `(suffix, TeX value)`, in document order.
fn author_fields(author: &Author) -> Vec<(&'static str, String)> {
    let mut address = author.address_tex();
    if address.is_empty() {
        address = [author.department.as_str(), author.institute.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\\\\\n");
    }

    let mut fields = Vec::new();
    if !address.is_empty() {
        fields.push(("Addr", address));
    }
    let current = author.current_address_tex();
    if !current.is_empty() {
        fields.push(("CurrAddr", current));
    }
    if let Some(email) = &author.email {
        fields.push(("Email", email.as_tex().to_string()));
    }
    if let Some(support) = &author.support {
        fields.push(("Thanks", support.clone()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn article() -> AmsArticle {
        let author = Author::new("Emmy Noether")
            .address(["Mathematisches Institut", "Göttingen"])
            .email("noether@example.org");
        let mut opts = ProjectOptions::new(author);
        opts.created_on = NaiveDate::from_ymd_opt(2021, 3, 23).unwrap();
        AmsArticle::new(&opts)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("introduction"), "Introduction");
        assert_eq!(title_case("section1"), "Section1");
        assert_eq!(title_case("main results"), "Main Results");
        assert_eq!(title_case("ABSTRACT"), "Abstract");
    }

    #[test]
    fn test_defaults() {
        let art = article();
        assert_eq!(art.title, DEFAULT_TITLE);
        assert_eq!(
            art.section_names(),
            vec!["introduction", "abstract", "section1", "section2"]
        );
        assert_eq!(art.references.len(), 3);
    }

    #[test]
    fn test_documentclass_and_preamble_input() {
        let out = article().render_main();
        assert!(out.contains("\\documentclass[11pt,a4paper]{amsart}%\n"));
        assert!(out.contains("\\input{preamble}\n"));
        assert!(out.contains(r"\newcommand{\ShortTitle}{\AmS-art \TeX\ Template}%"));
    }

    #[test]
    fn test_author_blocks() {
        let mut art = article();
        art.add_author(Author::new("Hermann Weyl").support("Supported by a grant."))
            .unwrap();
        let out = art.render_main();

        assert!(out.contains("\\newcommand{\\AuthorOne}{Emmy Noether}%\n"));
        assert!(out.contains(
            "\\newcommand{\\AuthorOneAddr}{%\nMathematisches Institut\\\\\nGöttingen\n}%\n"
        ));
        assert!(out.contains("% Author One email\n\\email{\\AuthorOneEmail}%\n"));
        assert!(out.contains("% Author Two support\n\\thanks{\\AuthorTwoThanks}%\n"));
        assert!(!out.contains(r"\AuthorTwoAddr"));
        assert!(out.contains(r"\newcommand{\pdfAuthor}{Emmy Noether and Hermann Weyl}%"));
    }

    #[test]
    fn test_tenth_author_rejected() {
        let mut art = article();
        for i in 2..=MAX_AUTHORS {
            art.add_author(Author::new(format!("Author {i}"))).unwrap();
        }
        let err = art.add_author(Author::new("One Too Many")).unwrap_err();
        assert!(matches!(err, TemplateError::TooManyAuthors { count: 10, max: 9 }));
        assert_eq!(art.authors().len(), MAX_AUTHORS);
        assert!(art.render_main().contains(r"\author{\AuthorNine}"));
    }

    #[test]
    fn test_body_order() {
        let body = article().main_tex().body_text;
        let maketitle = body.find(r"\maketitle").unwrap();
        let abstract_env = body.find(r"\begin{abstract}").unwrap();
        let intro = body.find("\\section{Introduction}%\n\\label{sec:introduction}%\n\\input{sections/introduction}%").unwrap();
        let sec2 = body.find(r"\section{Section2}").unwrap();
        let bib = body.find(r"\bibliographystyle{amsalpha}").unwrap();
        assert!(maketitle < abstract_env && abstract_env < intro && intro < sec2 && sec2 < bib);
        assert!(!body.contains(r"\section{Abstract}"));
        assert!(!body.contains(r"\lipsum[1-2]"));
    }

    #[test]
    fn test_body_without_sections() {
        let mut art = article();
        art.clear_sections();
        let body = art.main_tex().body_text;
        assert!(body.contains(r"\lipsum[1-2]"));
        assert!(!body.contains(r"\begin{abstract}"));
        assert!(body.contains(r"\nocite{*}"));
    }

    #[test]
    fn test_optional_front_matter() {
        let mut art = article();
        art.subject_class = Some("46L10".to_string());
        art.keywords = Some("von Neumann algebras".to_string());
        let out = art.render_main();
        assert!(out.contains(r"\newcommand{\SubjectClassText}{46L10}%"));
        assert!(out.contains(r"\subjclass[2020]{\SubjectClassText}%"));
        assert!(out.contains(r"\keywords{\Keywords}%"));
        assert!(!out.contains(r"\dedicatory"));
    }

    #[test]
    fn test_create_writes_tree() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().join("ams")).unwrap();
        let created = article().create(&dir).unwrap();

        for rel in [
            "preamble.tex",
            "main.tex",
            "references.bib",
            "sections/introduction.tex",
            "sections/abstract.tex",
            "sections/section1.tex",
            "sections/section2.tex",
        ] {
            assert!(created.files.contains(&dir.join(rel)), "missing {rel}");
        }
        let preamble = std::fs::read_to_string(dir.join("preamble.tex")).unwrap();
        assert!(preamble.contains(r"\usepackage{tikz-cd}"));
        assert!(preamble.contains(r"\DisableLigatures{encoding = *, family = *}"));
        assert!(!preamble.contains(r"\begin{document}"));
    }
}
