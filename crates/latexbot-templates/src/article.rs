//! Article project with its own style package and biblatex bibliography.

use camino::Utf8Path;

use latexbot_utils::error::TemplateError;

use crate::assets;
use crate::project::{CreatedProject, ProjectOptions, ProjectWriter};
use crate::registry::TEMPLATE_NEWART;
use crate::render::{TemplateVars, render_template};

pub const DEFAULT_TITLE: &str = r"Article \TeX\ Template";
pub const DEFAULT_STYLE_NAME: &str = "latexbotstyle";

#[derive(Debug, Clone)]
pub struct NewArticle {
    vars: TemplateVars,
    style_name: String,
    references: Vec<String>,
}

impl NewArticle {
    #[must_use]
    pub fn new(opts: &ProjectOptions) -> Self {
        let title = opts.title_or(DEFAULT_TITLE);
        let vars = opts
            .base_vars(TEMPLATE_NEWART, &title)
            .with("short_title", title.as_str())
            .with("style_name", DEFAULT_STYLE_NAME)
            .with("template_name", "Article")
            .with("pdfsubject", "Mathematics")
            .with("pdfcreator", "latexbot")
            .with("pdfkeywords", "Operator Algebras, von-Neumann Algebras");
        Self {
            vars,
            style_name: DEFAULT_STYLE_NAME.to_string(),
            references: assets::default_references(),
        }
    }

    /// Name of the generated `.sty`, loaded with `\usepackage`.
    #[must_use]
    pub fn style_name(mut self, name: &str) -> Self {
        self.style_name = name.to_string();
        self.vars.set("style_name", name);
        self
    }

    #[must_use]
    pub fn short_title(mut self, short: &str) -> Self {
        self.vars.set("short_title", short);
        self
    }

    #[must_use]
    pub fn vars(&self) -> &TemplateVars {
        &self.vars
    }

    pub fn create(&self, dir: &Utf8Path) -> Result<CreatedProject, TemplateError> {
        // Render everything first so a bad placeholder leaves no directory behind.
        let main = render_template(assets::NEWART_MAIN, &self.vars)?;
        let mut style = render_template(assets::NEWART_STRUCTURE, &self.vars)?;
        style.push('\n');
        style.push_str(assets::MATH_CONSTANTS);

        let mut writer = ProjectWriter::create(TEMPLATE_NEWART, dir)?;
        writer.write("main.tex", &main)?;
        writer.write(&format!("{}.sty", self.style_name), &style)?;
        writer.write("sections/section1.tex", assets::NEWART_SECTION_1)?;
        writer.write("sections/section2.tex", assets::NEWART_SECTION_2)?;
        writer.write("bibliography.bib", &self.references.concat())?;
        writer.dir("images")?;
        Ok(writer.finish())
    }
}
