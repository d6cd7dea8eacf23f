//! Beamer presentation with a bundled theme.

use camino::Utf8Path;

use latexbot_utils::error::TemplateError;

use crate::assets;
use crate::project::{CreatedProject, ProjectOptions, ProjectWriter};
use crate::registry::TEMPLATE_BEAMER;
use crate::render::{TemplateVars, render_template};

pub const DEFAULT_TITLE: &str = "Presentation Title";
pub const DEFAULT_PURPOSE: &str = "Seminar Talk";
pub const DEFAULT_PDFSUBJECT: &str = "Mathematics Presentation";

/// File name `\usetheme{latexbot}` resolves to.
pub const THEME_FILE: &str = "beamerthemelatexbot.sty";

/// Upper-case initials of the capitalised words, `Indian Statistical
/// Institute` -> `ISI`.
fn initials(institute: &str) -> String {
    institute
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_uppercase())
        .collect()
}

#[derive(Debug, Clone)]
pub struct Beamer {
    vars: TemplateVars,
    references: Vec<String>,
}

impl Beamer {
    #[must_use]
    pub fn new(opts: &ProjectOptions) -> Self {
        let title = opts.title_or(DEFAULT_TITLE);
        let institute_code = opts
            .institute_code
            .clone()
            .unwrap_or_else(|| initials(&opts.author.institute));
        let vars = opts
            .base_vars(TEMPLATE_BEAMER, &title)
            .with("short_title", title.as_str())
            .with("subtitle", opts.subtitle.clone().unwrap_or_default())
            .with("institute_code", institute_code)
            .with(
                "purpose",
                opts.purpose.clone().unwrap_or_else(|| DEFAULT_PURPOSE.to_string()),
            )
            .with("pdfsubject", DEFAULT_PDFSUBJECT);
        Self {
            vars,
            references: assets::default_references(),
        }
    }

    #[must_use]
    pub fn short_title(mut self, short: &str) -> Self {
        self.vars.set("short_title", short);
        self
    }

    #[must_use]
    pub fn pdfsubject(mut self, subject: &str) -> Self {
        self.vars.set("pdfsubject", subject);
        self
    }

    #[must_use]
    pub fn vars(&self) -> &TemplateVars {
        &self.vars
    }

    pub fn create(&self, dir: &Utf8Path) -> Result<CreatedProject, TemplateError> {
        let main = render_template(assets::BEAMER_MAIN, &self.vars)?;

        let mut writer = ProjectWriter::create(TEMPLATE_BEAMER, dir)?;
        writer.write("main.tex", &main)?;
        writer.write(THEME_FILE, assets::BEAMER_THEME)?;
        writer.write("references.bib", &self.references.concat())?;
        Ok(writer.finish())
    }
}
