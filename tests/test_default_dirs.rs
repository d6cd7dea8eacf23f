//! Default project and font file locations relative to the working directory.
//!
//! These tests change the process cwd and are `#[serial]`.

use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

use latexbot::compiler::resolve_tex_path;
use latexbot::templates::{ProjectOptions, create_project, list_templates};
use latexbot::tex::Author;
use latexbot_utils::paths::current_dir;

/// Switches into a temp dir and restores the previous cwd on drop.
struct CwdGuard {
    original: PathBuf,
    temp: TempDir,
}

impl CwdGuard {
    fn enter() -> Self {
        let original = env::current_dir().unwrap();
        let temp = TempDir::new().unwrap();
        env::set_current_dir(temp.path()).unwrap();
        Self { original, temp }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

#[test]
#[serial]
fn projects_land_in_template_default_dir() {
    let guard = CwdGuard::enter();
    let opts = ProjectOptions::new(Author::new("Ada Lovelace"));

    for info in list_templates() {
        let project = create_project(info.id, &opts).unwrap();
        assert_eq!(
            project.root.file_name(),
            Some(info.default_dir),
            "{}",
            info.id
        );
        assert!(guard.temp.path().join(info.default_dir).join("main.tex").is_file());
    }
}

#[test]
#[serial]
fn second_project_in_same_default_dir_is_rejected() {
    let _guard = CwdGuard::enter();
    let opts = ProjectOptions::default();
    create_project("thesis", &opts).unwrap();
    let err = create_project("thesis", &opts).unwrap_err();
    assert!(err.to_string().contains("already exists"));
}

#[test]
#[serial]
fn compile_input_defaults_to_main_tex_in_cwd() {
    let _guard = CwdGuard::enter();
    let cwd = current_dir().unwrap();
    assert!(resolve_tex_path(None, &cwd).is_err());

    std::fs::write(cwd.join("main.tex"), "\\documentclass{article}\n").unwrap();
    assert_eq!(resolve_tex_path(None, &cwd).unwrap(), cwd.join("main.tex"));
}
