//! pcp CLI - copy a Go package and its dependencies into a new workspace

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pcp::core::Workspace;
use pcp::ops::{copy_roots, CopyContext, CopyOptions};
use pcp::sources::{GoGetFetcher, GoListResolver};
use pcp::util::config::Config;
use pcp::util::diagnostic::Reporter;
use pcp::util::shell::{format_duration, ColorChoice, Shell, Status};

mod cli;

use cli::Cli;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("pcp=debug")
        } else {
            EnvFilter::new("pcp=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.quiet, cli.verbose, color);
    let mut reporter = Reporter::new(&shell, cli::usage());

    let config = Config::discover(cli.config.as_deref())?;
    let start = Instant::now();

    let workspace = match Workspace::create(&cli.workspace, config.copy.dir_mode) {
        Ok(ws) => ws,
        Err(e) => return Ok(reporter.fatal(&e)),
    };
    shell.verbose(Status::Created, format!("workspace at {}", workspace.root().display()));
    if cli.abs {
        println!("{}", workspace.root().display());
    }

    let resolver = GoListResolver::new(&config.resolve);
    let fetcher = GoGetFetcher::new(&config.fetch);
    if !resolver.is_available() {
        shell.warn(format!(
            "`{}` was not found; only fetching will be attempted",
            config.resolve.program
        ));
    }

    let options = CopyOptions {
        recursive: cli.recursive,
        include_hidden: cli.hidden,
        hidden_marker: config.copy.hidden_marker.clone(),
        dir_mode: config.copy.dir_mode,
    };
    let mut ctx = CopyContext::new(&resolver, &fetcher, &workspace, &shell, options);

    copy_roots(&mut ctx, &cli.packages, &mut reporter);

    let stats = ctx.stats();
    shell.status(
        Status::Finished,
        format!(
            "{} copied, {} fetched, {} error(s) in {}",
            stats.copied,
            stats.fetched,
            reporter.error_count(),
            format_duration(start.elapsed())
        ),
    );

    Ok(reporter.exit_code())
}
