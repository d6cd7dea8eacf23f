//! Scraping errors and warnings out of a TeX `.log` file.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// `./main.tex:12: Undefined control sequence.` from `-file-line-error`
static FILE_LINE_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<file>[^:\s][^:]*\.(?:tex|sty|cls|bbl|aux)):(?P<line>\d+): (?P<msg>.*)$")
        .expect("file-line-error pattern")
});

/// `l.12 \foo` context line following a `!` error
static CONTEXT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^l\.(?P<line>\d+)").expect("context line pattern"));

/// How far past an error the `l.<n>` context line may appear.
const CONTEXT_WINDOW: usize = 8;

/// One error reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogError {
    pub message: String,
    pub line: Option<u32>,
    pub file: Option<String>,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}: {}", self.message),
            (None, Some(line)) => write!(f, "l.{line}: {}", self.message),
            _ => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogScan {
    pub errors: Vec<LogError>,
    pub warnings: Vec<String>,
}

fn context_line(lines: &[&str], from: usize) -> Option<u32> {
    lines
        .iter()
        .skip(from + 1)
        .take(CONTEXT_WINDOW)
        .find_map(|l| CONTEXT_LINE.captures(l))
        .and_then(|c| c["line"].parse().ok())
}

/// Collect `!` errors, `file:line:` errors and `LaTeX Warning:` lines.
#[must_use]
pub fn scan_log(log: &str) -> LogScan {
    let lines: Vec<&str> = log.lines().collect();
    let mut scan = LogScan::default();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim_end();
        if let Some(rest) = line.strip_prefix('!') {
            scan.errors.push(LogError {
                message: rest.trim().to_string(),
                line: context_line(&lines, i),
                file: None,
            });
        } else if let Some(caps) = FILE_LINE_ERROR.captures(line) {
            scan.errors.push(LogError {
                message: caps["msg"].trim().to_string(),
                line: caps["line"].parse().ok(),
                file: Some(caps["file"].to_string()),
            });
        } else if let Some(pos) = line.find("LaTeX Warning:") {
            scan.warnings.push(line[pos..].to_string());
        }
    }
    scan
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const UNDEFINED_CS: &str = "\
(./main.tex
LaTeX2e <2023-11-01>
! Undefined control sequence.
l.14 \\foo

?
! Emergency stop.
l.14 \\foo
";

    #[test]
    fn test_bang_errors_with_context_line() {
        let scan = scan_log(UNDEFINED_CS);
        assert_eq!(scan.errors.len(), 2);
        assert_eq!(scan.errors[0].message, "Undefined control sequence.");
        assert_eq!(scan.errors[0].line, Some(14));
        assert_eq!(scan.errors[0].to_string(), "l.14: Undefined control sequence.");
        assert!(scan.warnings.is_empty());
    }

    #[test]
    fn test_file_line_errors() {
        let log = "./main.tex:7: LaTeX Error: File `missing.sty' not found.\n\nType X to quit.\n";
        let scan = scan_log(log);
        assert_eq!(
            scan.errors,
            vec![LogError {
                message: "LaTeX Error: File `missing.sty' not found.".to_string(),
                line: Some(7),
                file: Some("./main.tex".to_string()),
            }]
        );
        assert_eq!(
            scan.errors[0].to_string(),
            "./main.tex:7: LaTeX Error: File `missing.sty' not found."
        );
    }

    #[test]
    fn test_warnings() {
        let log = "\
LaTeX Warning: Citation `knuth' on page 1 undefined on input line 9.
Package hyperref Warning: Token not allowed in a PDF string.
LaTeX Warning: There were undefined references.
";
        let scan = scan_log(log);
        assert!(scan.errors.is_empty());
        assert_eq!(scan.warnings.len(), 2);
        assert!(scan.warnings[1].starts_with("LaTeX Warning: There were undefined"));
    }

    #[test]
    fn test_error_without_context() {
        let scan = scan_log("! I can't find file `main'.\n*** (job aborted, no legal \\end found)\n");
        assert_eq!(scan.errors.len(), 1);
        assert_eq!(scan.errors[0].line, None);
        assert_eq!(scan.errors[0].to_string(), "I can't find file `main'.");
    }

    #[test]
    fn test_clean_log() {
        let log = "This is pdfTeX, Version 3.141592653\nOutput written on main.pdf (1 page).\n";
        assert_eq!(scan_log(log), LogScan::default());
    }

    proptest! {
        #[test]
        fn prop_lines_without_markers_are_ignored(lines in prop::collection::vec("[a-zA-Z ()./]{0,40}", 0..20)) {
            let log = lines.join("\n");
            let scan = scan_log(&log);
            prop_assert!(scan.errors.is_empty());
            prop_assert!(scan.warnings.is_empty());
        }
    }
}
