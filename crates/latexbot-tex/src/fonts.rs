//! Catalog of font families shipped with common TeX distributions.
//!
//! Each entry becomes an environment `<id>_font` that switches to the family
//! for its contents. `fonts.tex` collects the environments for `\input`;
//! `fonts_demo.tex` typesets a sample of every family.

use chrono::NaiveDate;
use std::time::Duration;

use latexbot_runner::{CommandSpec, ProcessRunner, RunnerError};

const RULE: &str = "%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%";
const DATE_FORMAT: &str = "%b %d, %Y";
const FC_LIST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontEntry {
    pub id: &'static str,
    /// NFSS family name passed to `\fontfamily`
    pub family: &'static str,
    pub name: &'static str,
}

impl FontEntry {
    /// Environment name, `<id>_font`.
    #[must_use]
    pub fn env_name(&self) -> String {
        format!("{}_font", self.id)
    }
}

const fn font(id: &'static str, family: &'static str, name: &'static str) -> FontEntry {
    FontEntry { id, family, name }
}

pub const LATEX_FONTS: &[FontEntry] = &[
    font("default", "cmr", "Computer Modern"),
    font("code", r"\ttfamily", "TeX Default Typewriter"),
    font("courier", "pcr", "Courier"),
    font("artemisia", "artemisia", "Artemisia"),
    font("charter", "bch", "Charter"),
    font("bodoni", "bodoni", "Bodoni"),
    font("concrete", "ccr", "Computer Concrete"),
    font("complutum", "complutum", "Complutum"),
    font("inconsolata", "fi4", "Inconsolata"),
    font("verasans", "fvs", "Bitstream Vera Sans"),
    font("baskerville", "gfsbaskerville", "Baskerville"),
    font("lx", "llcmss", "LX"),
    font("latinmodern", "lmr", "Latin Modern"),
    font("latinmodernsans", "lmss", "Latin Modern Sans"),
    font("latintypewriter", "lmtt", "Latin Modern Typewriter"),
    font("kerkis", "mak", "Kerkis"),
    font("garamond", "ugm", "Garamond"),
    font("neohellenic", "neohellenic", "Neohellenic"),
    font("avantgarde", "pag", "Avant Garde"),
    font("bookman", "pbk", "Bookman"),
    font("helvetica", "phv", "Helvetica"),
    font("schoolbook", "pnc", "New Century Schoolbook"),
    font("porson", "porson", "Porson"),
    font("palatino", "ppl", "Palatino"),
    font("times", "ptm", "Times"),
    font("utopia", "put", "Utopia"),
    font("chancery", "pzc", "Zapf Chancery"),
    font("adventor", "qag", "TeX Gyre Adventor"),
    font("bonum", "qbk", "TeX Gyre Bonum"),
    font("cursor", "qcr", "TeX Gyre Cursor"),
    font("schola", "qcs", "TeX Gyre Schola"),
    font("heros", "qhv", "TeX Gyre Heros"),
    font("pagella", "qpl", "TeX Gyre Pagella"),
    font("termes", "qtm", "TeX Gyre Termes"),
    font("chorus", "qzc", "TeX Gyre Chorus"),
    font("solomos", "solomos", "Solomos"),
    font("greektimes", "txr", "Greek Times"),
    font("didot", "udidot", "Didot"),
    font("uncial", "uncl", "Uncial"),
    font("linuxbio", "LinuxBiolinumT-OsF", "Linux Biolinum"),
    font("linuxliber", "LinuxLibertineT-OsF", "Linux Libertine"),
];

/// Look up a catalog entry by id.
#[must_use]
pub fn find_font(id: &str) -> Option<&'static FontEntry> {
    LATEX_FONTS.iter().find(|f| f.id == id)
}

/// `\newenvironment{env}{\fontfamily{family}\selectfont}{\par}`
#[must_use]
pub fn font_env(env: &str, family: &str) -> String {
    format!("\\newenvironment{{{env}}}{{\\fontfamily{{{family}}}\\selectfont}}{{\\par}}")
}

/// Contents of `fonts.tex`: usage notes and one environment per font.
#[must_use]
pub fn fonts_tex(author: &str, date: NaiveDate) -> String {
    let mut out = format!(
        "\n{RULE}\n% Environments for various fonts in LaTeX\n% Author: {author}\n% Created On: {}\n",
        date.format(DATE_FORMAT)
    );
    out.push_str(
        r"

% Usage:
%    1. First add this file in your preamble by `\input{fonts}`
%    2. Use any of the following font family as shown below
%            \begin{verasans_font}
%                 Here is some text written in `verasans_font`
%            \end{verasans_font}

% NOTE: The following command will change the whole document's font
% to the font with FONT_FAMILY.
%    \renewcommand{\rmdefault}{<FONT_FAMILY>}

",
    );
    out.push_str(RULE);
    out.push_str("\n\n\n");

    for entry in LATEX_FONTS {
        let env = entry.env_name();
        out.push_str(&format!(
            "% Font name: {}; Env name: {env}\n{}\n\n",
            entry.name,
            font_env(&env, entry.family)
        ));
    }
    out
}

/// Contents of `fonts_demo.tex`: an article with a sample of every font.
#[must_use]
pub fn fonts_demo_tex(author: &str, date: NaiveDate) -> String {
    let mut out = format!(
        "\n{RULE}\n% Various LaTeX fonts\n% Author: {author}\n% Created On: {}\n{RULE}\n",
        date.format(DATE_FORMAT)
    );
    out.push_str(&format!(
        "\n\\documentclass[12pt, twoside]{{article}}\n\
         \\usepackage[top=1 in,bottom=1in, left=1 in, right=1 in]{{geometry}}\n\n\
         \\title{{Fonts in \\LaTeX}}\n\
         \\author{{{author}}}\n\
         \\date{{\\today}}\n\n\
         %Main Article\n\
         \\begin{{document}}\n\
         \\maketitle\n"
    ));

    for entry in LATEX_FONTS {
        let env = entry.env_name();
        out.push_str(&format!(
            "\n{}\n\\begin{{{env}}}\nThis text is written in the font: `{}'\n\\end{{{env}}}\n\n",
            font_env(&env, entry.family),
            entry.name
        ));
    }

    out.push_str(r"\end{document}");
    out
}

/// Font families known to fontconfig, sorted and de-duplicated.
pub fn system_fonts<R: ProcessRunner>(runner: &R) -> Result<Vec<String>, RunnerError> {
    let cmd = CommandSpec::new("fc-list").arg(":").arg("family");
    let output = runner.run(&cmd, FC_LIST_TIMEOUT)?;
    if !output.success() {
        return Err(RunnerError::ExecutionFailed {
            reason: format!(
                "fc-list exited with {}: {}",
                output
                    .exit_code
                    .map_or_else(|| "a signal".to_string(), |c| format!("code {c}")),
                output.stderr_string().trim()
            ),
        });
    }

    let mut families: Vec<String> = output
        .stdout_string()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    families.sort();
    families.dedup();
    Ok(families)
}
