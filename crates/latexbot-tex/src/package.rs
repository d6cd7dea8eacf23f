use std::fmt;

/// A `\usepackage` line plus the commands that configure it.
///
/// ```rust
/// use latexbot_tex::TexPackage;
///
/// let pkg = TexPackage::new("geometry")
///     .options(["top=1in", "bottom=1in"])
///     .comment("Page margins");
/// assert_eq!(pkg.render(), "\\usepackage[top=1in,bottom=1in]{geometry} % Page margins\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexPackage {
    pub names: Vec<String>,
    pub options: Vec<String>,
    pub comment: Option<String>,
    pub associated_cmds: Vec<String>,
}

impl TexPackage {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            options: Vec::new(),
            comment: None,
            associated_cmds: Vec::new(),
        }
    }

    /// Several packages loaded by one `\usepackage{a,b}`.
    #[must_use]
    pub fn many<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            options: Vec::new(),
            comment: None,
            associated_cmds: Vec::new(),
        }
    }

    #[must_use]
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.extend(options.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// A command emitted on its own line after the `\usepackage`.
    #[must_use]
    pub fn cmd(mut self, cmd: impl Into<String>) -> Self {
        self.associated_cmds.push(cmd.into());
        self
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from(r"\usepackage");
        if !self.options.is_empty() {
            out.push('[');
            out.push_str(&self.options.join(","));
            out.push(']');
        }
        out.push('{');
        out.push_str(&self.names.join(","));
        out.push('}');
        if let Some(comment) = &self.comment {
            out.push_str(" % ");
            out.push_str(comment);
        }
        out.push('\n');
        for cmd in &self.associated_cmds {
            out.push_str(cmd);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for TexPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Concatenation of every package in order.
#[must_use]
pub fn render_packages(packages: &[TexPackage]) -> String {
    packages.iter().map(TexPackage::render).collect()
}
