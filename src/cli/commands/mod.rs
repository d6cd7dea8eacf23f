//! CLI command implementations (facade).
//!
//! This module re-exports the command surface used by `run.rs` and the CLI
//! tests. Implementations live in `commands/*`.

mod clean;
mod common;
mod compile;
mod config;
mod doctor;
mod fonts;
mod new;
mod template;

pub use clean::execute_clean_command;
pub use compile::execute_compile_command;
pub use config::execute_config_command;
pub use doctor::execute_doctor_command;
pub use fonts::execute_fonts_command;
pub use new::execute_new_command;
pub use template::execute_template_command;

#[cfg(test)]
pub(crate) use common::{author_from_config, compile_options};
#[cfg(test)]
pub(crate) use config::effective_config_json;
#[cfg(test)]
pub(crate) use fonts::{FONTS_DEMO_FILE, FONTS_FILE};
