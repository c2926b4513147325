/*!
 * Command-line interface for overview
 */

use std::env;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use chrono::Local;
use clap::{CommandFactory, Parser};
use tracing::{error, info, warn};

use overview::config::{Args, Config};
use overview::content::{ContentReporter, CONTENT_STEM};
use overview::describe::OpenAiDescriber;
use overview::error::{OverviewError, Result};
use overview::report::{Reporter, RunReport};
use overview::tree::{TreeReporter, TREE_STEM};
use overview::writer::{format_timestamp, ArtifactPaths, OutputPair};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "overview", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    setup_logging(args.verbose, args.quiet);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (quiet, verbose) {
            (true, _) => "error",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args, |key| env::var(key).ok())?;
    config.validate()?;

    info!("Root directory to scan: {}", config.root_dir.display());

    if !config.python && !config.tree {
        warn!("Nothing to do: pass --python and/or --tree");
        return Ok(());
    }

    // Both artifact pairs share one timestamp
    let timestamp = format_timestamp(&Local::now());
    let start_time = Instant::now();

    let mut report = RunReport {
        descriptions: config.api_key.is_some(),
        ..RunReport::default()
    };

    if config.python {
        let describer = match &config.api_key {
            Some(key) => Some(
                OpenAiDescriber::new(key.clone(), config.model.clone(), config.prompt.as_deref())
                    .map_err(|e| OverviewError::Config(e.to_string()))?,
            ),
            None => None,
        };

        let output = OutputPair::create(ArtifactPaths::new(
            &config.output_dir,
            CONTENT_STEM,
            &timestamp,
        ))?;

        let mut reporter = ContentReporter::new(&config.root_dir, &config.patterns);
        if let Some(describer) = &describer {
            reporter = reporter.with_describer(describer);
        }
        report.content = Some(reporter.run(output)?);
    }

    if config.tree {
        let output = OutputPair::create(ArtifactPaths::new(
            &config.output_dir,
            TREE_STEM,
            &timestamp,
        ))?;

        report.tree = Some(TreeReporter::new(&config.root_dir, &config.patterns).run(output)?);
    }

    report.duration = start_time.elapsed();

    if !config.quiet {
        Reporter::print_report(&report);
    }

    Ok(())
}
