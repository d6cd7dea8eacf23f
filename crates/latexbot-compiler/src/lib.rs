//! TeX compile driver for latexbot.
//!
//! [`Compiler`] runs the classic sequence, engine, bibliography tool, engine,
//! engine, in the document's directory and checks each pass before moving on.
//! Engine and bibliography tool are detected from the source unless
//! [`CompileOptions`] pins them.
//!
//! ```rust
//! use latexbot_compiler::{BibTool, Engine, plan_passes};
//!
//! let tools: Vec<_> = plan_passes(Engine::PdfLatex, BibTool::BibTex, 0)
//!     .iter()
//!     .map(|p| p.tool)
//!     .collect();
//! assert_eq!(tools, ["pdflatex", "bibtex", "pdflatex", "pdflatex"]);
//! ```

pub mod clean;
mod driver;
mod engine;
mod input;
pub mod log;
mod viewer;

pub use clean::{AUX_EXTENSIONS, clean};
pub use driver::{
    CompileOptions, CompileReport, Compiler, DEFAULT_TIMEOUT, ENGINE_FLAGS, PassKind, PassRecord,
    PlannedPass, plan_passes,
};
pub use engine::{BibTool, Engine, detect_bib_tool, detect_engine};
pub use input::{DEFAULT_MAIN, resolve_tex_path};
pub use log::{LogError, LogScan, scan_log};
pub use viewer::{DEFAULT_VIEWER, open_pdf, viewer_command};
