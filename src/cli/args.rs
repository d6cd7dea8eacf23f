//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and all subcommand enums.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// latexbot - LaTeX project scaffolding and compile driver
#[derive(Parser)]
#[command(name = "latexbot")]
#[command(about = "Scaffold LaTeX projects from templates and compile them to PDF")]
#[command(long_about = r#"
latexbot writes ready-to-compile LaTeX projects from built-in templates and
drives the TeX toolchain (engine, bibliography tool, engine, engine) to a PDF.

EXAMPLES:
  # Create an AMS article in ./new_ams_art
  latexbot new amsart --title "On Knots" --author "Ada Lovelace"

  # Create a Beamer talk in a chosen directory and compile it right away
  latexbot new beamer --dir talks/seminar --compile

  # Compile main.tex in the current directory and open the PDF
  latexbot compile --open

  # Compile with XeLaTeX and Biber, then remove auxiliary files
  latexbot compile paper.tex --engine xelatex --bib biber --clean

  # Write fonts.tex with one environment per font family
  latexbot fonts generate

  # Check the TeX installation
  latexbot doctor

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > environment > config file > defaults
  Config file is discovered by searching upward from CWD for .latexbot/config.toml,
  then the user config directory (latexbot/config.toml)
  Use --config to specify an explicit config file path
  Environment: LATEXBOT_COMPILER, LATEXBOT_TIMEOUT

TEMPLATES:
  plainart, newart, amsart, thesis, beamer
  Use `latexbot template list` for descriptions
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Default TeX engine: pdflatex, xelatex, lualatex or auto (default: auto)
    #[arg(long, global = true)]
    pub compiler: Option<String>,

    /// Timeout per compile pass in seconds (default: 120, max: 3600)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new LaTeX project from a template
    ///
    /// Writes the template's files into a fresh directory. The directory must
    /// not exist yet. Author details fall back to the [author] config section.
    ///
    /// EXAMPLES:
    ///   latexbot new plainart
    ///   latexbot new amsart --title "On Knots" --author "Ada Lovelace"
    ///   latexbot new thesis --dir my-thesis --institute "Example University"
    New {
        /// Template id (plainart, newart, amsart, thesis, beamer)
        template: String,

        /// Target directory (default: the template's directory under CWD)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Author name
        #[arg(long)]
        author: Option<String>,

        /// Author email
        #[arg(long)]
        email: Option<String>,

        /// Author institute
        #[arg(long)]
        institute: Option<String>,

        /// Author department
        #[arg(long)]
        department: Option<String>,

        /// Compile the new project after writing it
        #[arg(long)]
        compile: bool,
    },

    /// Inspect the built-in templates
    #[command(subcommand)]
    Template(TemplateCommands),

    /// Compile a TeX document to PDF
    ///
    /// Runs engine, bibliography tool, engine, engine in the document's
    /// directory and stops at the first failed pass. Engine and bibliography
    /// tool are detected from the source unless given.
    ///
    /// EXAMPLES:
    ///   latexbot compile
    ///   latexbot compile thesis/main.tex --engine lualatex
    ///   latexbot compile slides --open --clean
    Compile {
        /// TeX file to compile (default: main.tex in CWD)
        file: Option<PathBuf>,

        /// TeX engine
        #[arg(long, value_parser = ["pdflatex", "xelatex", "lualatex"])]
        engine: Option<String>,

        /// Bibliography tool
        #[arg(long, value_parser = ["bibtex", "biber", "none"])]
        bib: Option<String>,

        /// Open the PDF in a viewer after a successful compile
        #[arg(long)]
        open: bool,

        /// Remove auxiliary files after a successful compile
        #[arg(long)]
        clean: bool,
    },

    /// Remove auxiliary files left by TeX runs
    ///
    /// Only `<stem>.<aux extension>` files are removed; sources and PDFs stay.
    ///
    /// EXAMPLES:
    ///   latexbot clean
    ///   latexbot clean paper --stem main
    Clean {
        /// Directory to clean (default: CWD)
        dir: Option<PathBuf>,

        /// Only clean files of this document stem
        #[arg(long)]
        stem: Option<String>,
    },

    /// Font catalog and font environment files
    #[command(subcommand)]
    Fonts(FontsCommands),

    /// Show the effective configuration and where each value came from
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run environment health checks
    ///
    /// Checks TeX engines, bibliography tools, the PDF viewer, write access and
    /// configuration. Exits non-zero when a check fails.
    Doctor {
        /// Output doctor results as JSON
        #[arg(long)]
        json: bool,

        /// Treat warnings as failures (exit non-zero on any warn or fail)
        #[arg(long)]
        strict_exit: bool,
    },
}

/// Template subcommands
#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List available built-in templates
    ///
    /// EXAMPLES:
    ///   latexbot template list
    ///   latexbot template list --json
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for one template
    ///
    /// EXAMPLES:
    ///   latexbot template show thesis
    Show {
        /// Template id
        template: String,
    },
}

/// Font subcommands
#[derive(Subcommand)]
pub enum FontsCommands {
    /// List the font families in the catalog
    List,

    /// Write fonts.tex with one environment per font family
    Generate {
        /// Output directory (default: CWD)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Write fonts_demo.tex, a document showing every font family
    Demo {
        /// Output directory (default: CWD)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Compile the demo after writing it
        #[arg(long)]
        compile: bool,
    },

    /// List font families installed on this system (fc-list)
    System,
}

/// Build the clap command for help rendering and flag introspection.
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
