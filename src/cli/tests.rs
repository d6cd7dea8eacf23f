//! CLI tests module
//!
//! Tests for argument parsing, flag wiring into configuration and the
//! command helpers.

use super::run::build_cli_args;
use super::*;
use crate::Config;
use crate::cli::commands;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn test_parse_new_with_author_flags() {
    let cli = parse(&[
        "latexbot",
        "new",
        "amsart",
        "--title",
        "On Knots",
        "--author",
        "Ada Lovelace",
        "--email",
        "ada@example.org",
        "--compile",
    ]);
    match &cli.command {
        Commands::New {
            template,
            title,
            compile,
            dir,
            ..
        } => {
            assert_eq!(template, "amsart");
            assert_eq!(title.as_deref(), Some("On Knots"));
            assert!(*compile);
            assert!(dir.is_none());
        }
        _ => panic!("expected new"),
    }

    let args = build_cli_args(&cli).unwrap();
    assert_eq!(args.author_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(args.author_email.as_deref(), Some("ada@example.org"));
    assert!(args.author_institute.is_none());
    assert!(args.compiler.is_none());
}

#[test]
fn test_compile_flags_feed_configuration() {
    let cli = parse(&[
        "latexbot",
        "--compiler",
        "lualatex",
        "compile",
        "paper.tex",
        "--engine",
        "xelatex",
        "--bib",
        "biber",
        "--open",
    ]);
    let args = build_cli_args(&cli).unwrap();
    assert_eq!(args.compiler.as_deref(), Some("xelatex"));
    assert_eq!(args.bib_tool.as_deref(), Some("biber"));
    assert_eq!(args.open_viewer, Some(true));
    assert_eq!(args.clean_after, None);
}

#[test]
fn test_global_compiler_kept_without_engine() {
    let cli = parse(&["latexbot", "--compiler", "lualatex", "--timeout", "30", "compile"]);
    let args = build_cli_args(&cli).unwrap();
    assert_eq!(args.compiler.as_deref(), Some("lualatex"));
    assert_eq!(args.timeout_secs, Some(30));
    assert_eq!(args.verbose, None);
}

#[test]
fn test_verbose_only_overrides_when_given() {
    let quiet = build_cli_args(&parse(&["latexbot", "doctor"])).unwrap();
    assert_eq!(quiet.verbose, None);
    let loud = build_cli_args(&parse(&["latexbot", "-v", "doctor"])).unwrap();
    assert_eq!(loud.verbose, Some(true));
}

#[test]
fn test_invalid_engine_rejected() {
    assert!(Cli::try_parse_from(["latexbot", "compile", "--engine", "tex"]).is_err());
    assert!(Cli::try_parse_from(["latexbot", "compile", "--bib", "makeindex"]).is_err());
}

#[test]
fn test_subcommands_parse() {
    assert!(matches!(
        parse(&["latexbot", "template", "list", "--json"]).command,
        Commands::Template(TemplateCommands::List { json: true })
    ));
    assert!(matches!(
        parse(&["latexbot", "fonts", "demo", "--compile"]).command,
        Commands::Fonts(FontsCommands::Demo { compile: true, .. })
    ));
    assert!(matches!(
        parse(&["latexbot", "doctor", "--strict-exit"]).command,
        Commands::Doctor {
            json: false,
            strict_exit: true
        }
    ));
    match parse(&["latexbot", "clean", "build", "--stem", "main"]).command {
        Commands::Clean { dir, stem } => {
            assert_eq!(dir.unwrap().to_str(), Some("build"));
            assert_eq!(stem.as_deref(), Some("main"));
        }
        _ => panic!("expected clean"),
    }
}

#[test]
fn test_help_lists_commands() {
    let help = build_cli().render_long_help().to_string();
    for command in ["new", "template", "compile", "clean", "fonts", "config", "doctor"] {
        assert!(help.contains(command), "help is missing {command}");
    }
    assert!(help.contains(".latexbot/config.toml"));
}

#[test]
fn test_compile_options_follow_config() {
    let mut config = Config::default();
    config.defaults.compiler = Some("lualatex".to_string());
    config.defaults.open_viewer = Some(true);
    let options = commands::compile_options(&config);
    assert_eq!(options.engine, Some(crate::compiler::Engine::LuaLatex));
    assert!(options.open_viewer);
}

#[test]
fn test_effective_config_json_shape() {
    let config = Config::default();
    let output = commands::effective_config_json(&config);
    let json = serde_json::to_value(&output).unwrap();
    assert!(json["config_path"].is_null());
    assert_eq!(json["values"]["compiler"]["value"], "auto");
    assert_eq!(json["values"]["timeout_secs"]["value"], "120");
}

#[test]
fn test_author_from_config_uses_cli_name() {
    let mut config = Config::default();
    config.author.name = Some("Grace Hopper".to_string());
    assert_eq!(commands::author_from_config(&config).name, "Grace Hopper");
    assert_ne!(commands::FONTS_FILE, commands::FONTS_DEMO_FILE);
}
