use camino::{Utf8Path, Utf8PathBuf};

use latexbot_utils::error::CompileError;
use latexbot_utils::paths::resolve_against;

pub const DEFAULT_MAIN: &str = "main.tex";

/// Resolve the document to compile.
///
/// With no argument this is `cwd/main.tex`. A relative argument is taken
/// against `cwd`; a name without extension also matches `<name>.tex`.
pub fn resolve_tex_path(arg: Option<&Utf8Path>, cwd: &Utf8Path) -> Result<Utf8PathBuf, CompileError> {
    let Some(arg) = arg else {
        let main = cwd.join(DEFAULT_MAIN);
        if main.is_file() {
            return Ok(main);
        }
        return Err(CompileError::NoInput {
            dir: cwd.to_string(),
        });
    };

    let path = resolve_against(cwd, arg);
    if path.is_file() {
        return Ok(path);
    }
    if path.extension().is_none() {
        let with_ext = path.with_extension("tex");
        if with_ext.is_file() {
            return Ok(with_ext);
        }
    }
    Err(CompileError::InputNotFound {
        path: path.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_defaults_to_main_tex() {
        let temp = TempDir::new().unwrap();
        let cwd = dir(&temp);
        std::fs::write(cwd.join("main.tex"), "").unwrap();
        assert_eq!(resolve_tex_path(None, &cwd).unwrap(), cwd.join("main.tex"));
    }

    #[test]
    fn test_no_input_mentions_usage() {
        let temp = TempDir::new().unwrap();
        let err = resolve_tex_path(None, &dir(&temp)).unwrap_err();
        assert!(matches!(err, CompileError::NoInput { .. }));
        assert!(err.to_string().contains("Usage: latexbot compile"));
    }

    #[test]
    fn test_relative_and_extensionless() {
        let temp = TempDir::new().unwrap();
        let cwd = dir(&temp);
        std::fs::create_dir(cwd.join("paper")).unwrap();
        std::fs::write(cwd.join("paper/notes.tex"), "").unwrap();

        let expected = cwd.join("paper/notes.tex");
        assert_eq!(
            resolve_tex_path(Some(Utf8Path::new("paper/notes.tex")), &cwd).unwrap(),
            expected
        );
        assert_eq!(
            resolve_tex_path(Some(Utf8Path::new("paper/notes")), &cwd).unwrap(),
            expected
        );
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = resolve_tex_path(Some(Utf8Path::new("ghost.tex")), &dir(&temp)).unwrap_err();
        assert!(matches!(err, CompileError::InputNotFound { ref path } if path.ends_with("ghost.tex")));
    }
}
