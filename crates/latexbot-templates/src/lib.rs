//! Project templates.
//!
//! `latexbot new <template>` lands in [`create_project`]. Each template writes
//! a fresh directory tree: plain and AMS articles are assembled from the
//! [`latexbot_tex`] object model, the article, thesis and Beamer projects from
//! embedded assets with `<<name>>` placeholders (see [`render_template`]).

mod assets;
mod project;
mod registry;
mod render;

pub mod ams;
pub mod article;
pub mod beamer;
pub mod plain;
pub mod thesis;

pub use project::{CreatedProject, ProjectOptions};
pub use registry::{
    BUILT_IN_TEMPLATES, TEMPLATE_AMSART, TEMPLATE_BEAMER, TEMPLATE_NEWART, TEMPLATE_PLAINART,
    TEMPLATE_THESIS, TemplateInfo, create_project, get_template, is_valid_template,
    list_templates,
};
pub use render::{TemplateVars, render_template};
