use camino::Utf8PathBuf;

/// CLI values that take part in configuration precedence.
///
/// `None` means "not given on the command line".
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config_path: Option<Utf8PathBuf>,
    pub compiler: Option<String>,
    pub bib_tool: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: Option<bool>,
    pub open_viewer: Option<bool>,
    pub clean_after: Option<bool>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub author_department: Option<String>,
    pub author_institute: Option<String>,
}
