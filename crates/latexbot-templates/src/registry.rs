//! Built-in project templates and the entry point that writes them.

use camino::Utf8PathBuf;
use serde::Serialize;

use latexbot_utils::error::TemplateError;
use latexbot_utils::paths::current_dir;

use crate::ams::AmsArticle;
use crate::article::NewArticle;
use crate::beamer::Beamer;
use crate::plain::PlainArticle;
use crate::project::{CreatedProject, ProjectOptions};
use crate::thesis::Thesis;

/// Built-in template identifiers
pub const TEMPLATE_PLAINART: &str = "plainart";
pub const TEMPLATE_NEWART: &str = "newart";
pub const TEMPLATE_AMSART: &str = "amsart";
pub const TEMPLATE_THESIS: &str = "thesis";
pub const TEMPLATE_BEAMER: &str = "beamer";

/// All available built-in templates
pub const BUILT_IN_TEMPLATES: &[&str] = &[
    TEMPLATE_PLAINART,
    TEMPLATE_NEWART,
    TEMPLATE_AMSART,
    TEMPLATE_THESIS,
    TEMPLATE_BEAMER,
];

/// Template metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    /// Template identifier
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Short description
    pub description: &'static str,
    /// Intended use case
    pub use_case: &'static str,
    /// TeX packages or tools the project needs beyond a base distribution
    pub prerequisites: &'static [&'static str],
    /// Directory created under the working directory when none is given
    pub default_dir: &'static str,
}

/// Get metadata for all built-in templates
#[must_use]
pub fn list_templates() -> Vec<TemplateInfo> {
    vec![
        TemplateInfo {
            id: TEMPLATE_PLAINART,
            name: "Plain Article",
            description: "Single-file article with title block and PDF metadata",
            use_case: "Short notes and reports that fit in one main.tex",
            prerequisites: &["pdflatex", "authblk", "titling", "lipsum"],
            default_dir: "new_plain_art",
        },
        TemplateInfo {
            id: TEMPLATE_NEWART,
            name: "Article",
            description: "Article with a custom style package, section files and biblatex",
            use_case: "Papers split across section files with a shared style",
            prerequisites: &["pdflatex", "biblatex", "bibtex", "authblk"],
            default_dir: "new_article",
        },
        TemplateInfo {
            id: TEMPLATE_AMSART,
            name: "AMS Article",
            description: "amsart paper with theorem styles, math macros and numbered authors",
            use_case: "Mathematics papers for AMS-style journals",
            prerequisites: &["pdflatex", "bibtex", "amsart", "tikz-cd"],
            default_dir: "new_ams_art",
        },
        TemplateInfo {
            id: TEMPLATE_THESIS,
            name: "PhD Thesis",
            description: "Book-class thesis with front matter, chapters and an index style",
            use_case: "Dissertations and other long documents organised by chapter",
            prerequisites: &["pdflatex", "biblatex", "bibtex", "makeindex"],
            default_dir: "new_thesis",
        },
        TemplateInfo {
            id: TEMPLATE_BEAMER,
            name: "Beamer Presentation",
            description: "Beamer talk using a Madrid-based theme with a progress bar",
            use_case: "Seminar and conference slides",
            prerequisites: &["pdflatex", "beamer", "natbib", "tikz-cd"],
            default_dir: "new_beamer",
        },
    ]
}

/// Get template info by ID
#[must_use]
pub fn get_template(id: &str) -> Option<TemplateInfo> {
    list_templates().into_iter().find(|t| t.id == id)
}

/// Check if a template ID is valid
#[must_use]
pub fn is_valid_template(id: &str) -> bool {
    BUILT_IN_TEMPLATES.contains(&id)
}

/// Create a new project from a template.
///
/// The project lands in `opts.dir`, or in `<cwd>/<default_dir>` when no
/// directory is given. The target must not exist yet.
///
/// # Errors
///
/// * [`TemplateError::UnknownTemplate`] for an id outside [`BUILT_IN_TEMPLATES`]
/// * [`TemplateError::ProjectExists`] when the target directory exists
/// * [`TemplateError::WriteFailed`] when a file cannot be written
pub fn create_project(id: &str, opts: &ProjectOptions) -> Result<CreatedProject, TemplateError> {
    let template = get_template(id).ok_or_else(|| TemplateError::UnknownTemplate {
        id: id.to_string(),
    })?;

    let dir = match &opts.dir {
        Some(dir) => dir.clone(),
        None => default_root(template.default_dir)?,
    };

    match template.id {
        TEMPLATE_PLAINART => {
            let mut art = PlainArticle::new(opts);
            art.add_default_references();
            art.create(&dir)
        }
        TEMPLATE_NEWART => NewArticle::new(opts).create(&dir),
        TEMPLATE_AMSART => AmsArticle::new(opts).create(&dir),
        TEMPLATE_THESIS => Thesis::new(opts).create(&dir),
        TEMPLATE_BEAMER => Beamer::new(opts).create(&dir),
        other => Err(TemplateError::UnknownTemplate {
            id: other.to_string(),
        }),
    }
}

fn default_root(default_dir: &str) -> Result<Utf8PathBuf, TemplateError> {
    let cwd = current_dir().map_err(|e| TemplateError::WriteFailed {
        path: default_dir.to_string(),
        reason: format!("{e:#}"),
    })?;
    Ok(cwd.join(default_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use latexbot_tex::Author;
    use tempfile::TempDir;

    fn opts_in(temp: &TempDir, name: &str) -> ProjectOptions {
        let mut opts = ProjectOptions::new(Author::new("Ada Lovelace").email("ada@example.org"));
        opts.dir = Some(Utf8PathBuf::from_path_buf(temp.path().join(name)).unwrap());
        opts
    }

    #[test]
    fn test_list_templates() {
        let templates = list_templates();
        assert_eq!(templates.len(), BUILT_IN_TEMPLATES.len());
        for (info, id) in templates.iter().zip(BUILT_IN_TEMPLATES) {
            assert_eq!(info.id, *id);
            assert!(!info.prerequisites.is_empty());
            assert!(info.default_dir.starts_with("new_"));
        }
    }

    #[test]
    fn test_get_template() {
        let info = get_template("amsart").unwrap();
        assert_eq!(info.name, "AMS Article");
        assert_eq!(info.default_dir, "new_ams_art");
        assert!(get_template("memoir").is_none());
    }

    #[test]
    fn test_is_valid_template() {
        assert!(is_valid_template("beamer"));
        assert!(is_valid_template("thesis"));
        assert!(!is_valid_template("Beamer"));
        assert!(!is_valid_template(""));
    }

    #[test]
    fn test_unknown_template() {
        let temp = TempDir::new().unwrap();
        let err = create_project("letter", &opts_in(&temp, "x")).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownTemplate { id } if id == "letter"));
        assert!(!temp.path().join("x").exists());
    }

    #[test]
    fn test_every_template_creates_main_tex() {
        let temp = TempDir::new().unwrap();
        for id in BUILT_IN_TEMPLATES {
            let created = create_project(id, &opts_in(&temp, id)).unwrap();
            assert_eq!(created.template, *id);
            assert!(created.main_tex().is_file(), "{id} has no main.tex");
            assert!(created.files.iter().all(|f| f.starts_with(&created.root)));

            let main = std::fs::read_to_string(created.main_tex()).unwrap();
            assert!(!main.contains("<<author>>"));
            assert!(main.contains("Ada Lovelace"), "{id} lost the author");
        }
    }

    #[test]
    fn test_existing_directory_is_left_alone() {
        let temp = TempDir::new().unwrap();
        let opts = opts_in(&temp, "paper");
        let dir = opts.dir.clone().unwrap();
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("notes.txt"), "keep me").unwrap();

        let err = create_project(TEMPLATE_NEWART, &opts).unwrap_err();
        assert!(matches!(err, TemplateError::ProjectExists { .. }));
        assert_eq!(std::fs::read_to_string(dir.join("notes.txt")).unwrap(), "keep me");
        assert!(!dir.join("main.tex").exists());
    }
}
