//! End-to-end scaffold-then-compile tests with a scripted process runner
//!
//! Projects come from the real templates; the TeX tools are replaced by a
//! runner that records each pass and writes the files a real engine would.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::time::Duration;
use tempfile::TempDir;

use latexbot::compiler::{BibTool, CompileOptions, Compiler, Engine, clean};
use latexbot::runner::{CommandSpec, ProcessOutput, ProcessRunner, RunnerError};
use latexbot::templates::{ProjectOptions, create_project};
use latexbot::tex::Author;
use latexbot_utils::error::CompileError;

/// Pretends to be the TeX toolchain: engines write `<stem>.log`, `<stem>.aux`
/// and `<stem>.pdf` into the pass's working directory.
struct FakeTex {
    calls: RefCell<Vec<String>>,
    log: &'static str,
    missing: Option<&'static str>,
}

impl FakeTex {
    fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            log: "This is pdfTeX\nOutput written on main.pdf (1 page).\n",
            missing: None,
        }
    }
}

impl ProcessRunner for FakeTex {
    fn run(&self, cmd: &CommandSpec, _timeout: Duration) -> Result<ProcessOutput, RunnerError> {
        let program = cmd.program_name();
        self.calls.borrow_mut().push(cmd.to_string());
        if self.missing == Some(program.as_str()) {
            return Err(RunnerError::ToolNotFound { program });
        }

        let cwd = cmd.cwd.clone().expect("passes run in the document directory");
        if program.ends_with("latex") {
            let file = cmd.args.last().unwrap().to_string_lossy().to_string();
            let stem = file.trim_end_matches(".tex");
            std::fs::write(cwd.join(format!("{stem}.log")), self.log).unwrap();
            std::fs::write(cwd.join(format!("{stem}.aux")), "\\relax\n").unwrap();
            std::fs::write(cwd.join(format!("{stem}.pdf")), "%PDF-1.5\n").unwrap();
        }
        Ok(ProcessOutput::new(Vec::new(), Vec::new(), Some(0), false))
    }
}

fn scaffold(temp: &TempDir, template: &str) -> Utf8PathBuf {
    let mut opts = ProjectOptions::new(Author::new("Ada Lovelace").email("ada@example.org"));
    opts.dir = Some(Utf8PathBuf::from_path_buf(temp.path().join(template)).unwrap());
    create_project(template, &opts).unwrap().main_tex()
}

fn tools(runner: &FakeTex) -> Vec<String> {
    runner
        .calls
        .borrow()
        .iter()
        .map(|c| c.split_whitespace().next().unwrap().to_string())
        .collect()
}

#[test]
fn plain_article_runs_full_bibtex_sequence() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "plainart");

    let runner = FakeTex::new();
    let report = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap();

    assert_eq!(report.engine, Engine::PdfLatex);
    assert_eq!(report.bib_tool, BibTool::BibTex);
    assert_eq!(tools(&runner), ["pdflatex", "bibtex", "pdflatex", "pdflatex"]);
    assert_eq!(runner.calls.borrow()[1], "bibtex main.aux");
    assert!(report.pdf_path.exists());
    assert_eq!(report.pdf_path, main.with_extension("pdf"));
}

#[test]
fn beamer_theme_stays_on_pdflatex() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "beamer");

    let runner = FakeTex::new();
    let report = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap();

    assert_eq!(report.engine, Engine::PdfLatex);
    assert_eq!(report.bib_tool, BibTool::BibTex);
}

#[test]
fn article_bib_backend_found_in_style_file() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "newart");

    let runner = FakeTex::new();
    let report = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap();

    assert_eq!(report.bib_tool, BibTool::BibTex);
    assert_eq!(tools(&runner), ["pdflatex", "bibtex", "pdflatex", "pdflatex"]);
}

#[test]
fn pinned_engine_overrides_detection() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "amsart");

    let runner = FakeTex::new();
    let options = CompileOptions {
        engine: Some(Engine::LuaLatex),
        bib_tool: Some(BibTool::None),
        ..CompileOptions::default()
    };
    let report = Compiler::new(&runner, options).compile(&main).unwrap();

    assert_eq!(tools(&runner), ["lualatex", "lualatex"]);
    assert_eq!(report.passes.len(), 2);
}

#[test]
fn every_template_compiles_to_a_pdf() {
    for template in latexbot::templates::BUILT_IN_TEMPLATES {
        let temp = TempDir::new().unwrap();
        let main = scaffold(&temp, template);
        let runner = FakeTex::new();
        let report = Compiler::new(&runner, CompileOptions::default())
            .compile(&main)
            .unwrap_or_else(|e| panic!("{template}: {e}"));
        assert_eq!(report.passes.len(), 4, "{template}");
        assert!(report.pdf_path.exists(), "{template}");
    }
}

#[test]
fn log_errors_stop_the_first_pass() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "plainart");

    let mut runner = FakeTex::new();
    runner.log = "./main.tex:12: Undefined control sequence.\nl.12 \\foo\n";
    let err = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap_err();

    match err {
        CompileError::PassFailed { pass, errors, .. } => {
            assert_eq!(pass, 1);
            assert!(errors[0].contains("Undefined control sequence"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(runner.calls.borrow().len(), 1);
}

#[test]
fn missing_bib_tool_is_reported() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "plainart");

    let mut runner = FakeTex::new();
    runner.missing = Some("bibtex");
    let err = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap_err();
    assert!(matches!(err, CompileError::ToolMissing { ref tool } if tool == "bibtex"));
}

#[test]
fn clean_after_compile_keeps_sources_and_pdf() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "plainart");
    let runner = FakeTex::new();
    let report = Compiler::new(&runner, CompileOptions::default())
        .compile(&main)
        .unwrap();

    let dir: &Utf8Path = main.parent().unwrap();
    let removed = clean(dir, Some("main")).unwrap();
    assert_eq!(removed, vec![dir.join("main.aux"), dir.join("main.log")]);
    assert!(main.exists());
    assert!(report.pdf_path.exists());
    assert!(dir.join("references.bib").exists());
}

#[test]
fn fonts_demo_inside_project_skips_bibliography() {
    let temp = TempDir::new().unwrap();
    let main = scaffold(&temp, "plainart");
    let dir = main.parent().unwrap();
    let demo = dir.join("fonts_demo.tex");
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    std::fs::write(&demo, latexbot::tex::fonts::fonts_demo_tex("Ada Lovelace", date)).unwrap();

    let runner = FakeTex::new();
    let report = Compiler::new(&runner, CompileOptions::default())
        .compile(&demo)
        .unwrap();

    assert_eq!(report.bib_tool, BibTool::None);
    assert_eq!(tools(&runner), ["pdflatex", "pdflatex"]);
}
