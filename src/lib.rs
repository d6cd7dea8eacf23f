//! latexbot - LaTeX project scaffolding and a TeX compile driver
//!
//! latexbot writes ready-to-compile LaTeX projects from built-in templates and
//! then drives the TeX toolchain (`pdflatex`/`xelatex`/`lualatex` with
//! `bibtex`/`biber`) through the usual multi-pass sequence to a PDF.
//!
//! # Quick Start (CLI)
//!
//! ```bash
//! # Scaffold an AMS article and compile it
//! latexbot new amsart --title "On Knots" --author "Ada Lovelace" --compile
//!
//! # Compile main.tex in the current directory and open the PDF
//! latexbot compile --open
//!
//! # Check the TeX installation
//! latexbot doctor
//! ```
//!
//! # Quick Start (Library)
//!
//! The member crates are usable on their own:
//!
//! ```rust,no_run
//! use latexbot::compiler::{CompileOptions, Compiler};
//! use latexbot::runner::NativeRunner;
//! use camino::Utf8Path;
//!
//! let compiler = Compiler::new(NativeRunner::new(), CompileOptions::default());
//! let report = compiler.compile(Utf8Path::new("paper/main.tex")).unwrap();
//! println!("wrote {}", report.pdf_path);
//! ```
//!
//! # Stable Public API
//!
//! - [`Config`] and [`CliArgs`] - configuration discovery
//! - [`LatexBotError`] - library error type
//! - [`ExitCode`] - CLI exit codes
//! - [`cli::run`] - the CLI entry point

pub mod cli;
mod error_reporter;

/// Configuration with discovery and precedence: CLI > env > config file > defaults.
pub use latexbot_config::{CliArgs, Config};

/// Library-level error type with user-facing context and suggestions.
pub use latexbot_utils::error::{LatexBotError, UserFriendlyError};

/// CLI exit codes.
pub use latexbot_utils::exit_codes::ExitCode;

pub use latexbot_compiler as compiler;
pub use latexbot_doctor as doctor;
pub use latexbot_runner as runner;
pub use latexbot_templates as templates;
pub use latexbot_tex as tex;
