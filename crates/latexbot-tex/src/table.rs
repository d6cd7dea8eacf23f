/// A `tabular` or `longtable` with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TexTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Extra space after each row, e.g. `2pt`
    pub row_gap: Option<String>,
    pub longtable: bool,
}

impl TexTable {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn row_gap(mut self, gap: impl Into<String>) -> Self {
        self.row_gap = Some(gap.into());
        self
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn enable_longtable(&mut self) {
        self.longtable = true;
    }

    fn env(&self) -> &'static str {
        if self.longtable { "longtable" } else { "tabular" }
    }

    fn column_spec(&self) -> String {
        let inner = vec!["c"; self.columns.len()].join("|");
        if self.longtable {
            inner
        } else {
            format!("|{inner}|")
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let env = self.env();
        let mut out = format!("\\begin{{{env}}}{{{}}}\\hline\n", self.column_spec());
        out.push_str(&self.columns.join(" & "));
        out.push_str(" \\\\\\hline\\hline\n");

        let terminator = match &self.row_gap {
            Some(gap) => format!(" \\\\[{gap}]\n"),
            None => " \\\\\n".to_string(),
        };
        for row in &self.rows {
            out.push_str(&row.join(" & "));
            out.push_str(&terminator);
        }

        out.push_str(&format!("\\end{{{env}}}\n"));
        out
    }
}
