use std::fmt;

/// Name used when no author is configured.
pub const ANONYMOUS: &str = "Anonymous";

/// An email address made safe for TeX.
///
/// `_` becomes `\_`; with `texttt` the result is wrapped in `\texttt{..}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    address: String,
    tex: String,
}

impl Email {
    #[must_use]
    pub fn new(address: &str, texttt: bool) -> Self {
        let escaped = address.replace('_', r"\_");
        let tex = if texttt {
            format!("\\texttt{{{escaped}}}")
        } else {
            escaped
        };
        Self {
            address: address.to_string(),
            tex,
        }
    }

    /// The address as given.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The escaped TeX form.
    #[must_use]
    pub fn as_tex(&self) -> &str {
        &self.tex
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tex)
    }
}

/// A document author with the affiliation data the AMS classes understand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub department: String,
    pub institute: String,
    pub address: Vec<String>,
    pub current_address: Vec<String>,
    pub email: Option<Email>,
    /// Funding or thanks text, rendered through `\thanks`
    pub support: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Self::new(ANONYMOUS)
    }
}

impl Author {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            department: String::new(),
            institute: String::new(),
            address: Vec::new(),
            current_address: Vec::new(),
            email: None,
            support: None,
        }
    }

    #[must_use]
    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    #[must_use]
    pub fn institute(mut self, institute: impl Into<String>) -> Self {
        self.institute = institute.into();
        self
    }

    #[must_use]
    pub fn address<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.address = lines.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn current_address<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.current_address = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the email, rendered inside `\texttt`.
    #[must_use]
    pub fn email(mut self, address: &str) -> Self {
        self.email = Some(Email::new(address, true));
        self
    }

    #[must_use]
    pub fn support(mut self, text: impl Into<String>) -> Self {
        self.support = Some(text.into());
        self
    }

    /// Address lines joined with `\\`, one per line.
    #[must_use]
    pub fn address_tex(&self) -> String {
        lines_tex(&self.address)
    }

    /// Current address lines joined with `\\`, one per line.
    #[must_use]
    pub fn current_address_tex(&self) -> String {
        lines_tex(&self.current_address)
    }
}

fn lines_tex(lines: &[String]) -> String {
    lines.join("\\\\\n")
}

/// English list of names: `A`, `A and B`, `A, B and C`.
#[must_use]
pub fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_escapes_underscores() {
        let email = Email::new("first_last@uni.edu", false);
        assert_eq!(email.as_tex(), r"first\_last@uni.edu");
        assert_eq!(email.address(), "first_last@uni.edu");
    }

    #[test]
    fn test_email_texttt() {
        let email = Email::new("a_b_c@x.org", true);
        assert_eq!(email.to_string(), r"\texttt{a\_b\_c@x.org}");
    }

    #[test]
    fn test_join_names() {
        let none: [&str; 0] = [];
        assert_eq!(join_names(&none), "");
        assert_eq!(join_names(&["Noether"]), "Noether");
        assert_eq!(join_names(&["Hilbert", "Noether"]), "Hilbert and Noether");
        assert_eq!(
            join_names(&["Hilbert", "Noether", "Weyl", "Klein"]),
            "Hilbert, Noether, Weyl and Klein"
        );
    }

    #[test]
    fn test_address_tex() {
        let author = Author::new("Emmy Noether")
            .address(["Mathematisches Institut", "Göttingen"])
            .current_address(["Bryn Mawr College"]);
        assert_eq!(author.address_tex(), "Mathematisches Institut\\\\\nGöttingen");
        assert_eq!(author.current_address_tex(), "Bryn Mawr College");
    }

    #[test]
    fn test_default_author() {
        let author = Author::default();
        assert_eq!(author.name, "Anonymous");
        assert!(author.email.is_none());
        assert!(author.address_tex().is_empty());
    }
}
