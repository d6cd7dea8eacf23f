//! Single-file article built from the TeX object model.

use camino::Utf8Path;
use chrono::NaiveDate;

use latexbot_tex::{Author, TexEnvironment, TexFile, TexPackage, TexSection, TexTable, render_packages};
use latexbot_utils::error::TemplateError;

use crate::assets;
use crate::project::{CreatedProject, ProjectOptions, ProjectWriter};
use crate::registry::TEMPLATE_PLAINART;

pub const DEFAULT_TITLE: &str = r"Plain Article \TeX\ Template";
pub const DEFAULT_BODY: &str = r"\lipsum % Write something here!";

/// Rule under the `PDF Constants` banner of the plain article.
const PLAIN_RULE: &str = "%%-------------------------------------------------";

/// PDF metadata and link colouring written into `\pdf*` macros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfOptions {
    pub subject: String,
    pub keywords: String,
    pub creator: String,
    pub creation_date: String,
    pub colorlinks: bool,
    pub link_color: String,
    pub url_color: String,
    pub cite_color: String,
    pub papersize: String,
    pub fontsize: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            subject: "Mathematics".to_string(),
            keywords: "Operator Algebras, von-Neumann Algebras".to_string(),
            creator: "latexbot".to_string(),
            creation_date: r"\today".to_string(),
            colorlinks: true,
            link_color: "cyan".to_string(),
            url_color: "blue".to_string(),
            cite_color: "magenta".to_string(),
            papersize: "a4paper".to_string(),
            fontsize: "11pt".to_string(),
        }
    }
}

impl PdfOptions {
    /// The `PDF Constants` block: colours, then one `\pdf*` macro per field.
    pub(crate) fn constants_block(&self, rule: &str, title: &str, author: &str) -> String {
        let mut out = format!(
            "\n{rule}\n%%%\t       PDF Constants\n{rule}\n\
             \\newcommand{{\\pdfLinkColor}}{{{}}}\n\
             \\newcommand{{\\pdfUrlColor}}{{{}}}\n\
             \\newcommand{{\\pdfCiteColor}}{{{}}}\n",
            self.link_color, self.url_color, self.cite_color
        );
        let colorlink = if self.colorlinks { "true" } else { "false" };
        for (name, value) in [
            ("pdfTitle", title),
            ("pdfAuthor", author),
            ("pdfSubject", self.subject.as_str()),
            ("pdfKeywords", self.keywords.as_str()),
            ("pdfCreator", self.creator.as_str()),
            ("pdfCreationDate", self.creation_date.as_str()),
            ("pdfColorLink", colorlink),
        ] {
            out.push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}%\n"));
        }
        out
    }
}

/// One piece of the article body, rendered in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleElement {
    Text { text: String, noindent: bool },
    Section(TexSection),
    Table(TexTable),
    Paragraph(String),
    Environment(TexEnvironment),
}

impl ArticleElement {
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text { text, noindent } => {
                let prefix = if *noindent { r"\noindent " } else { "" };
                format!("\n{prefix}{text}\n")
            }
            Self::Section(section) => section.render(),
            Self::Table(table) => table.render(),
            Self::Paragraph(para) => format!("\n{para}\n"),
            Self::Environment(env) => env.render(),
        }
    }
}

/// Packages loaded by a fresh plain article.
#[must_use]
pub fn default_packages() -> Vec<TexPackage> {
    vec![
        TexPackage::new("inputenc").option("utf8"),
        TexPackage::new("fontenc").option("T1"),
        TexPackage::new("lmodern").comment("To get high quality fonts"),
        TexPackage::new("geometry").options(["top=1in", "bottom=1in", "left=1in", "right=1in"]),
        TexPackage::new("authblk").comment("For Author Titling and affiliating Purpose"),
        TexPackage::new("lipsum"),
        TexPackage::new("titling")
            .comment("Customizing the title section")
            .cmd(r"\setlength{\droptitle}{-4\baselineskip} % Move the title up")
            .cmd(r"\pretitle{\begin{center}\LARGE\bfseries} % Article title formatting")
            .cmd("\t\\posttitle{\\end{center}} % Article title closing formatting"),
        TexPackage::new("hyperref").cmd(
            r"\hypersetup{
	pdftitle={\Title},
	pdfauthor={\Author},
	pdfsubject={\pdfSubject},
	pdfcreationdate={\today},
	pdfcreator={\pdfCreator},
	pdfkeywords={\pdfKeywords},
	colorlinks=\pdfColorLink,
	linkcolor={\pdfLinkColor},
	%    filecolor=magenta,
	urlcolor=\pdfUrlColor,
	citecolor=\pdfCiteColor,
	pdfpagemode=UseOutlines,
}",
        ),
    ]
}

/// A plain `article` in a single `main.tex`, plus `references.bib` when
/// references were added.
#[derive(Debug, Clone)]
pub struct PlainArticle {
    pub title: String,
    pub author: Author,
    pub date: String,
    pub packages: Vec<TexPackage>,
    pub body_text: String,
    pub pdf: PdfOptions,
    elements: Vec<ArticleElement>,
    extra_preamble: String,
    references: Vec<String>,
    created_on: NaiveDate,
}

impl PlainArticle {
    #[must_use]
    pub fn new(opts: &ProjectOptions) -> Self {
        Self {
            title: opts.title_or(DEFAULT_TITLE),
            author: opts.author.clone(),
            date: opts.date_text().to_string(),
            packages: default_packages(),
            body_text: DEFAULT_BODY.to_string(),
            pdf: PdfOptions::default(),
            elements: Vec::new(),
            extra_preamble: String::new(),
            references: Vec::new(),
            created_on: opts.created_on,
        }
    }

    pub fn add_text(&mut self, text: &str, noindent: bool) {
        self.elements.push(ArticleElement::Text {
            text: text.to_string(),
            noindent,
        });
    }

    pub fn add_section(&mut self, section: TexSection) {
        self.elements.push(ArticleElement::Section(section));
    }

    pub fn add_table(&mut self, table: TexTable) {
        self.elements.push(ArticleElement::Table(table));
    }

    pub fn add_paragraph(&mut self, para: &str) {
        self.elements.push(ArticleElement::Paragraph(para.to_string()));
    }

    pub fn add_environment(&mut self, env: TexEnvironment) {
        self.elements.push(ArticleElement::Environment(env));
    }

    pub fn add_package(&mut self, package: TexPackage) {
        self.packages.push(package);
    }

    /// Raw preamble text appended after the packages.
    pub fn add_to_preamble(&mut self, text: &str) {
        self.extra_preamble.push_str(&format!("\n{text}\n"));
    }

    /// A BibTeX entry for `references.bib`.
    pub fn add_reference(&mut self, entry: &str) {
        self.references.push(entry.to_string());
    }

    /// Add the sample bibliography entries.
    pub fn add_default_references(&mut self) {
        self.references.extend(assets::default_references());
    }

    #[must_use]
    pub fn elements(&self) -> &[ArticleElement] {
        &self.elements
    }

    fn pre_doc_commands(&self) -> String {
        let a = &self.author;
        let mut out = String::from("\n\n");
        for (name, value) in [
            ("Title", self.title.as_str()),
            ("Author", a.name.as_str()),
            ("Department", a.department.as_str()),
            ("Institute", a.institute.as_str()),
            ("Date", self.date.as_str()),
        ] {
            out.push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}%\n"));
        }
        out.push_str(&self.pdf.constants_block(PLAIN_RULE, &self.title, &a.name));
        out
    }

    fn body(&self) -> String {
        let mut body = self.body_text.clone();
        for element in &self.elements {
            body.push_str(&element.render());
        }
        if !self.references.is_empty() {
            body.push_str("\n\\medskip\n\\nocite{*}\n\\bibliographystyle{plain}\n\\bibliography{references}%\n");
        }
        body
    }

    /// `main.tex` as a [`TexFile`].
    #[must_use]
    pub fn main_tex(&self) -> TexFile {
        let mut file = TexFile::new(&self.author.name).with_date(self.created_on);
        file.set_filename("main");
        file.documentclass = r"\documentclass[12pt, twoside]{article}".to_string();
        file.preamble = render_packages(&self.packages) + &self.extra_preamble;
        file.pre_doc_commands = self.pre_doc_commands();
        file.post_doc_commands = [
            r"\title{\Title}%",
            r"\author{\textsc{\Author}}%",
            r"\affil{\normalsize \Department\\ \normalsize \Institute}%",
            r"\date{\Date}%",
            r"\maketitle%",
            r"\thispagestyle{empty}%",
        ]
        .iter()
        .map(|line| format!("{line}\n"))
        .collect();
        file.body_text = self.body();
        file
    }

    #[must_use]
    pub fn render_main(&self) -> String {
        self.main_tex().render()
    }

    fn references_bib(&self) -> TexFile {
        TexFile::classfile(&self.author.name, "references", ".bib", self.references.concat())
            .with_date(self.created_on)
    }

    pub fn create(&self, dir: &Utf8Path) -> Result<CreatedProject, TemplateError> {
        let mut writer = ProjectWriter::create(TEMPLATE_PLAINART, dir)?;
        writer.write_tex("", &self.main_tex())?;
        if !self.references.is_empty() {
            writer.write_tex("", &self.references_bib())?;
        }
        Ok(writer.finish())
    }
}
