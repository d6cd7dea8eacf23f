//! TeX engines, bibliography tools and their detection from source text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A TeX engine. Parses from the short keys (`pdf`, `xe`, `lua`) and from the
/// binary names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    #[strum(to_string = "pdflatex", serialize = "pdf")]
    PdfLatex,
    #[strum(to_string = "xelatex", serialize = "xe")]
    XeLatex,
    #[strum(to_string = "lualatex", serialize = "lua")]
    LuaLatex,
}

impl Engine {
    /// The executable name.
    #[must_use]
    pub fn binary(self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::PdfLatex => "pdf",
            Self::XeLatex => "xe",
            Self::LuaLatex => "lua",
        }
    }
}

/// The bibliography processor run between engine passes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum BibTool {
    #[strum(to_string = "bibtex")]
    BibTex,
    #[strum(to_string = "biber")]
    Biber,
    #[strum(to_string = "none")]
    None,
}

impl BibTool {
    /// The executable name, `None` for [`BibTool::None`].
    #[must_use]
    pub fn binary(self) -> Option<&'static str> {
        match self {
            Self::None => Option::None,
            tool => Some(tool.into()),
        }
    }
}

/// Drop TeX comments: everything from the first unescaped `%` on each line.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for line in source.lines() {
        let mut prev_backslash = false;
        let mut end = line.len();
        for (i, ch) in line.char_indices() {
            if ch == '%' && !prev_backslash {
                end = i;
                break;
            }
            prev_backslash = ch == '\\' && !prev_backslash;
        }
        out.push_str(&line[..end]);
        out.push('\n');
    }
    out
}

/// XeLaTeX for metropolis Beamer themes (unless the theme line is commented
/// out) and for fontspec documents, pdfLaTeX otherwise.
#[must_use]
pub fn detect_engine(source: &str) -> Engine {
    if source.contains("metropolis") && !source.contains(r"%\usetheme{metropolis}") {
        return Engine::XeLatex;
    }
    let code = strip_comments(source);
    if code.contains("{fontspec}") || code.contains(r"\setmainfont") {
        return Engine::XeLatex;
    }
    Engine::PdfLatex
}

fn bib_tool_in(source: &str) -> BibTool {
    let code = strip_comments(source);
    if code.contains(r"\addbibresource") {
        if code.contains("backend=bibtex") {
            BibTool::BibTex
        } else {
            BibTool::Biber
        }
    } else if code.contains(r"\bibliography{") {
        BibTool::BibTex
    } else {
        BibTool::None
    }
}

/// `\usepackage[opts]{a,b}` and `\RequirePackage{..}`
static PACKAGE_LOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:usepackage|RequirePackage)\s*(?:\[[^\]]*\])?\s*\{(?P<names>[^}]*)\}")
        .expect("package load pattern")
});

/// `\input{x}` and `\include{x}`
static FILE_LOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\(?:input|include)\s*\{(?P<name>[^}]*)\}").expect("file load pattern")
});

/// Local files a source pulls in: `.sty` for packages, `.tex` for inputs.
/// Names that already carry an extension are kept as written.
fn loaded_files(code: &str) -> Vec<String> {
    let with_ext = |name: &str, ext: &str| {
        if name.ends_with(".sty") || name.ends_with(".tex") {
            name.to_string()
        } else {
            format!("{name}.{ext}")
        }
    };
    let packages = PACKAGE_LOAD.captures_iter(code).flat_map(|caps| {
        caps["names"]
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| with_ext(n, "sty"))
            .collect::<Vec<_>>()
    });
    let inputs = FILE_LOAD
        .captures_iter(code)
        .map(|caps| caps["name"].trim().to_string())
        .filter(|n| !n.is_empty())
        .map(|n| with_ext(&n, "tex"));
    packages.chain(inputs).collect()
}

/// Pick the bibliography tool for a document.
///
/// The document source is checked first. When it declares no bibliography,
/// the local files it loads through `\usepackage`, `\input` or `\include`
/// are followed inside `dir`, since projects often keep the biblatex setup in
/// a style file. Files the document never loads are ignored, as is the
/// document itself (`<stem>.tex`).
#[must_use]
pub fn detect_bib_tool(source: &str, stem: &str, dir: Option<&Path>) -> BibTool {
    let tool = bib_tool_in(source);
    if tool != BibTool::None {
        return tool;
    }
    let Some(dir) = dir else {
        return BibTool::None;
    };

    let mut seen = HashSet::from([format!("{stem}.tex")]);
    let mut pending = loaded_files(&strip_comments(source));
    while let Some(name) = pending.pop() {
        if !seen.insert(name.clone()) {
            continue;
        }
        let path = dir.join(&name);
        let Ok(text) = std::fs::read_to_string(&path) else {
            continue;
        };
        let tool = bib_tool_in(&text);
        if tool != BibTool::None {
            tracing::debug!(file = %path.display(), tool = %tool, "bibliography setup found in loaded file");
            return tool;
        }
        pending.extend(loaded_files(&strip_comments(&text)));
    }
    BibTool::None
}
