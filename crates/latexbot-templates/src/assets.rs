//! Template text embedded at build time.

pub(crate) const MATH_CONSTANTS: &str = include_str!("../assets/shared/math_constants.tex");

pub(crate) const BIB_KONRAD_UNBDD: &str = include_str!("../assets/bib/konrad_unbdd.bib");
pub(crate) const BIB_KAUFMAN: &str = include_str!("../assets/bib/kaufman.bib");
pub(crate) const BIB_LENNON: &str = include_str!("../assets/bib/lennon.bib");

pub(crate) const AMS_THEOREM_STYLES: &str = include_str!("../assets/ams/theorem_styles.tex");
pub(crate) const AMS_MACROS: &str = concat!(
    include_str!("../assets/ams/line_spacing.tex"),
    "\n",
    include_str!("../assets/shared/math_constants.tex"),
);
pub(crate) const AMS_SECTION_INTRODUCTION: &str =
    include_str!("../assets/ams/sections/introduction.tex");
pub(crate) const AMS_SECTION_ABSTRACT: &str = include_str!("../assets/ams/sections/abstract.tex");
pub(crate) const AMS_SECTION_1: &str = include_str!("../assets/ams/sections/section1.tex");
pub(crate) const AMS_SECTION_2: &str = include_str!("../assets/ams/sections/section2.tex");

pub(crate) const NEWART_MAIN: &str = include_str!("../assets/newart/main.tex");
pub(crate) const NEWART_STRUCTURE: &str = include_str!("../assets/newart/structure.sty");
pub(crate) const NEWART_SECTION_1: &str = include_str!("../assets/newart/section1.tex");
pub(crate) const NEWART_SECTION_2: &str = include_str!("../assets/newart/section2.tex");

pub(crate) const THESIS_MAIN: &str = include_str!("../assets/thesis/main.tex");
pub(crate) const THESIS_STRUCTURE: &str = include_str!("../assets/thesis/structure.tex");
pub(crate) const THESIS_STYLE_IST: &str = include_str!("../assets/thesis/style.ist");

/// `Chapters/<name>.tex` contents, in the order `main.tex` includes them.
pub(crate) const THESIS_CHAPTERS: &[(&str, &str)] = &[
    ("titlepage", include_str!("../assets/thesis/chapters/titlepage.tex")),
    ("abstract", include_str!("../assets/thesis/chapters/abstract.tex")),
    ("dedication", include_str!("../assets/thesis/chapters/dedication.tex")),
    ("declaration", include_str!("../assets/thesis/chapters/declaration.tex")),
    (
        "acknowledgements",
        include_str!("../assets/thesis/chapters/acknowledgements.tex"),
    ),
    ("introduction", include_str!("../assets/thesis/chapters/introduction.tex")),
    ("chapter01", include_str!("../assets/thesis/chapters/chapter01.tex")),
    ("chapter02", include_str!("../assets/thesis/chapters/chapter02.tex")),
    ("chapter03", include_str!("../assets/thesis/chapters/chapter03.tex")),
    ("conclusion", include_str!("../assets/thesis/chapters/conclusion.tex")),
    ("appendix", include_str!("../assets/thesis/chapters/appendix.tex")),
];

pub(crate) const BEAMER_MAIN: &str = include_str!("../assets/beamer/main.tex");
pub(crate) const BEAMER_THEME: &str = include_str!("../assets/beamer/theme.sty");

/// The three sample bibliography entries shipped with every project.
pub(crate) fn default_references() -> Vec<String> {
    [BIB_KONRAD_UNBDD, BIB_KAUFMAN, BIB_LENNON]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}
