use std::fmt;

/// `\section{heading}` followed by its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexSection {
    pub heading: String,
    pub content: String,
}

impl TexSection {
    #[must_use]
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!("\\section{{{}}}\n{}\n", self.heading, self.content)
    }
}

impl fmt::Display for TexSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A named environment: `\begin{name} .. \end{name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexEnvironment {
    pub name: String,
    pub content: String,
}

impl TexEnvironment {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "\\begin{{{name}}}\n{}\n\\end{{{name}}}\n",
            self.content,
            name = self.name
        )
    }
}

impl fmt::Display for TexEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
