//! Book-class thesis split into chapter files.

use camino::Utf8Path;

use latexbot_utils::error::TemplateError;

use crate::assets;
use crate::project::{CreatedProject, ProjectOptions, ProjectWriter};
use crate::registry::TEMPLATE_THESIS;
use crate::render::{TemplateVars, render_template};

pub const DEFAULT_TITLE: &str = "Thesis Title";

#[derive(Debug, Clone)]
pub struct Thesis {
    vars: TemplateVars,
    references: Vec<String>,
}

impl Thesis {
    #[must_use]
    pub fn new(opts: &ProjectOptions) -> Self {
        let title = opts.title_or(DEFAULT_TITLE);
        Self {
            vars: opts.base_vars(TEMPLATE_THESIS, &title),
            references: assets::default_references(),
        }
    }

    /// Chapter file names under `Chapters/`, in reading order.
    #[must_use]
    pub fn chapters() -> Vec<&'static str> {
        assets::THESIS_CHAPTERS.iter().map(|(name, _)| *name).collect()
    }

    pub fn create(&self, dir: &Utf8Path) -> Result<CreatedProject, TemplateError> {
        let main = render_template(assets::THESIS_MAIN, &self.vars)?;
        let structure = render_template(assets::THESIS_STRUCTURE, &self.vars)?;
        let chapters = assets::THESIS_CHAPTERS
            .iter()
            .map(|(name, text)| Ok((*name, render_template(text, &self.vars)?)))
            .collect::<Result<Vec<_>, TemplateError>>()?;

        let mut writer = ProjectWriter::create(TEMPLATE_THESIS, dir)?;
        writer.write("main.tex", &main)?;
        writer.write("thesis_structure.tex", &structure)?;
        writer.write("math_constants.tex", assets::MATH_CONSTANTS)?;
        for (name, text) in &chapters {
            writer.write(&format!("Chapters/{name}.tex"), text)?;
        }
        writer.write("bibliography.bib", &self.references.concat())?;
        writer.write("style.ist", assets::THESIS_STYLE_IST)?;
        writer.dir("Images")?;
        Ok(writer.finish())
    }
}
