//! A small object model for TeX sources.
//!
//! Nothing here parses TeX. Each type owns a handful of strings and knows how
//! to concatenate them into valid LaTeX: [`TexFile`] is a whole file,
//! [`TexPackage`] a `\usepackage` line with its setup commands, and the
//! remaining types render fragments that end up in a document body.
//!
//! ```rust
//! use latexbot_tex::{TexFile, TexPackage};
//!
//! let mut file = TexFile::new("Ada Lovelace");
//! file.set_filename("notes.tex");
//! file.add_to_preamble(&TexPackage::new("amsmath").render(), false);
//! assert!(file.render().contains("\\usepackage{amsmath}"));
//! ```

pub mod author;
pub mod fonts;
pub mod package;
pub mod preamble;
pub mod section;
pub mod table;
pub mod texfile;

pub use author::{Author, Email, join_names};
pub use fonts::{FontEntry, LATEX_FONTS};
pub use package::{TexPackage, render_packages};
pub use preamble::Preamble;
pub use section::{TexEnvironment, TexSection};
pub use table::TexTable;
pub use texfile::{TexFile, TexFileMetadata};
