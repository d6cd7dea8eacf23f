//! Configuration management for latexbot
//!
//! Hierarchical configuration with discovery and precedence:
//! CLI > environment > file > defaults. The TOML file has optional
//! `[defaults]` and `[author]` sections.
//!
//! ```toml
//! [defaults]
//! compiler = "xelatex"
//! timeout_secs = 300
//! open_viewer = true
//!
//! [author]
//! name = "Ada Lovelace"
//! email = "ada@example.org"
//! institute = "Analytical Engine Society"
//! ```

mod cli_args;
mod discovery;
mod model;
mod validation;

pub use cli_args::CliArgs;
pub use model::*;
pub use latexbot_utils::types::ConfigSource;
