// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod catalog;
mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use ludex_app::{AppState, StorefrontLayout, Viewport};
use runtime::LocalRuntime;
use std::env;
use std::path::PathBuf;

/// Terminal width assumed before the first resize event arrives.
const STARTUP_COLUMNS: u16 = 80;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `ludex --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    let settings = config.app_settings().with_context(|| {
        format!(
            "invalid [ui] config in {}; fix the duration values",
            options.config_path.display()
        )
    })?;

    let catalog_path = if options.demo {
        None
    } else {
        options.catalog_path.clone().or_else(|| config.catalog_path())
    };
    let cards = match &catalog_path {
        Some(path) => catalog::load_catalog(path).with_context(|| {
            format!(
                "catalog {} could not be used -- fix it, set [catalog].path, or run with --demo",
                path.display()
            )
        })?,
        None => catalog::demo_catalog(),
    };

    logging::init(config.log_level(), &config.log_path()?)?;
    tracing::info!(
        cards = cards.len(),
        catalog = %catalog_path
            .as_ref()
            .map_or_else(|| "demo".to_owned(), |path| path.display().to_string()),
        "catalog loaded"
    );

    if options.check_only {
        return Ok(());
    }

    let viewport = Viewport::from_columns(STARTUP_COLUMNS, config.column_px());
    let mut state = AppState::new(StorefrontLayout::standard(cards), settings, viewport);

    if options.dump_state {
        let snapshot = serde_json::to_string_pretty(&state.debug_snapshot())
            .context("serialize state snapshot")?;
        println!("{snapshot}");
        return Ok(());
    }

    let mut runtime = LocalRuntime::new();
    ludex_tui::run_app(&mut state, &mut runtime, config.column_px())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    catalog_path: Option<PathBuf>,
    demo: bool,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    dump_state: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        catalog_path: None,
        demo: false,
        print_config_path: false,
        print_example: false,
        check_only: false,
        dump_state: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--catalog" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--catalog requires a file path"))?;
                options.catalog_path = Some(PathBuf::from(value.as_ref()));
            }
            "--demo" => {
                options.demo = true;
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--dump-state" => {
                options.dump_state = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if options.demo && options.catalog_path.is_some() {
        return Err(anyhow::anyhow!(
            "--demo and --catalog cannot be combined; pick one catalog source"
        ));
    }

    Ok(options)
}

fn print_help() {
    println!("ludex");
    println!("  --config <path>          Use a specific config path");
    println!("  --catalog <path>         Load cards from a catalog file");
    println!("  --demo                   Launch with the built-in demo catalog");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config, catalog and logging, then exit");
    println!("  --dump-state             Print the initial storefront state as JSON");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/ludex-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                catalog_path: None,
                demo: false,
                print_config_path: false,
                print_example: false,
                check_only: false,
                dump_state: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_and_catalog_paths() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--config",
                "/custom/config.toml",
                "--catalog",
                "/custom/catalog.toml",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        assert_eq!(
            options.catalog_path,
            Some(PathBuf::from("/custom/catalog.toml"))
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--catalog"], default_options_path())
            .expect_err("missing catalog value should fail");
        assert!(error.to_string().contains("--catalog requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_rejects_demo_with_catalog() {
        let error = parse_cli_args(
            vec!["--demo", "--catalog", "/custom/catalog.toml"],
            default_options_path(),
        )
        .expect_err("conflicting catalog sources should fail");
        assert!(error.to_string().contains("cannot be combined"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--check",
                "--dump-state",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.dump_state);
        assert!(!options.demo);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_accepts_short_help() -> Result<()> {
        let options = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(options.show_help);
        Ok(())
    }
}
