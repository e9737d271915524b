//! reimage — transformation config builder and deep merge toolkit.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use reimage::config;
use reimage::constants;
use reimage::env;
use reimage::merge;
use reimage::models;
use reimage::placeholder;

use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use strum::IntoEnumIterator;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, MergeArgs, PlaceholderArgs, TransformArgs};
use config::Config;
use env::Env;
use models::{TransformationForm, TransformationKind, TransformationRequest};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(constants::ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(Some(cli.path.as_path()), &Env::real())
        .context("failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Merge(args) => run_merge(args, &config),
        Command::Transform(args) => run_transform(*args, &config),
        Command::Kinds => run_kinds(),
        Command::Schema => run_schema(),
        Command::Placeholder(args) => run_placeholder(args),
        Command::Config => run_config(&config),
        Command::Version => run_version(),
    }
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Deep-merge two files and print the result.
fn run_merge(args: MergeArgs, config: &Config) -> Result<()> {
    if args.reads_stdin_twice() {
        bail!("only one of the merge inputs can be read from stdin (`-`)");
    }
    let base = cli::read_input(&args.base, args.format)?;
    let overlay = args
        .overlay
        .as_deref()
        .map(|path| cli::read_input(path, args.format))
        .transpose()?;

    let max_depth = args.max_depth.unwrap_or(config.merge.max_depth);
    let merged = merge::merge_bounded(&base, overlay.as_ref(), max_depth)
        .context("failed to merge inputs")?;

    let pretty = config.output.pretty && !args.compact;
    println!("{}", cli::render_json(merged.as_ref(), pretty)?);
    Ok(())
}

/// Build a transformation plan from a form file and/or flags.
fn run_transform(args: TransformArgs, config: &Config) -> Result<()> {
    let mut form = match args.form {
        Some(ref path) => {
            let value = cli::read_input(path, None)?;
            serde_json::from_value::<TransformationForm>(value.into())
                .with_context(|| format!("invalid form values in {}", path.display()))?
        }
        None => TransformationForm::defaults(),
    };
    args.apply_to(&mut form);

    let Some(kind) = args.kind.or(config.transform.default_kind) else {
        bail!("--kind is required (or set [transform] default_kind)");
    };

    if kind.uses_aspect_ratio() && form.aspect_ratio().ok().flatten().is_none() {
        if let Some(ratio) = config.transform.default_aspect_ratio {
            debug!(%ratio, "using configured default aspect ratio");
            form.aspect_ratio = Some(ratio.to_string());
        }
    }

    let request = TransformationRequest::new(kind, form).context("invalid transformation form")?;

    let pretty = config.output.pretty && !args.compact;
    println!("{}", cli::render_json(&request.plan(), pretty)?);
    Ok(())
}

/// List transformation kinds.
fn run_kinds() -> Result<()> {
    for kind in TransformationKind::iter() {
        println!("  {}  {}", kind.to_string().bold(), kind.title().dimmed());
        println!("         {}  {}", "about:".cyan(), kind.subtitle());
        if let Some(label) = kind.prompt_label() {
            println!("         {}  {}", "prompt:".cyan(), label);
        }
        if kind.uses_aspect_ratio() {
            let ratios: Vec<_> = models::AspectRatio::iter()
                .map(|r| format!("{r} ({})", r.label()))
                .collect();
            println!("         {}  {}", "ratios:".cyan(), ratios.join(", "));
        }
        println!("         {}  {} credit(s)", "fee:".cyan(), kind.fee());
    }
    Ok(())
}

/// Print the form JSON schema.
fn run_schema() -> Result<()> {
    let schema = models::form::form_schema();
    println!("{}", cli::render_json(&schema, true)?);
    Ok(())
}

/// Print the placeholder data URL.
fn run_placeholder(args: PlaceholderArgs) -> Result<()> {
    if (args.width, args.height)
        == (constants::DEFAULT_IMAGE_DIMENSION, constants::DEFAULT_IMAGE_DIMENSION)
    {
        println!("{}", placeholder::default_data_url());
    } else {
        println!("{}", placeholder::data_url(args.width, args.height));
    }
    Ok(())
}

/// Print the effective configuration with secrets masked.
fn run_config(config: &Config) -> Result<()> {
    let shown = toml::to_string_pretty(&config.redacted()).context("failed to render configuration")?;
    print!("{shown}");

    if config.database.connection_url().is_err() {
        eprintln!(
            "  {} no database connection string configured",
            "!".yellow().bold()
        );
    }
    Ok(())
}
