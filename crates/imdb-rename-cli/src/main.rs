mod commands;
mod logging;
mod progress;
mod prompt;

use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use imdb_rename_core::config::{load_configuration, AppConfig};
use imdb_rename_core::{DuckDuckGoSearch, Error, RenameEngine, RenameOutcome, RenameRequest};
use progress::CliReporter;
use prompt::TerminalPrompter;
use tracing::error;

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let config = match load_configuration(&args.config) {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            eprintln!("{}", format!("Error loading configuration: {}", err).red());
            process::exit(1);
        }
    };

    if let Err(err) = run(&args, &config) {
        error!("Error: {:#}", err);
        report_error(&err, &args);
        process::exit(1);
    }
}

fn run(args: &Cli, config: &AppConfig) -> anyhow::Result<()> {
    let search = DuckDuckGoSearch::new(&config.search);
    let prompter = TerminalPrompter;
    let reporter = CliReporter::new();
    let engine = RenameEngine::new(config, &search, &prompter);

    let request = RenameRequest {
        file: args.file.clone(),
        search_title: args.search_title.clone(),
        imdb_key: args.imdb_key.clone(),
        edition: args.edition.clone(),
        rename: args.rename,
    };

    let outcome = engine
        .run(&request, &reporter)
        .with_context(|| format!("Could not rename {}", args.file.display()))?;

    match outcome {
        RenameOutcome::Renamed(_) => println!("{}", "Renamed".green()),
        RenameOutcome::Declined(_) => {}
        RenameOutcome::Planned(plan) => {
            println!(
                "Would rename:\n  {}\nto:\n  {}",
                plan.source_path.display().to_string().cyan(),
                plan.relative_destination().display().to_string().cyan()
            );
            println!(
                "{}",
                format!("Run again with {} to move the file", "--rename".cyan()).yellow()
            );
        }
    }

    Ok(())
}

fn report_error(err: &anyhow::Error, args: &Cli) {
    let Some(core_error) = err.downcast_ref::<Error>() else {
        eprintln!("{}", format!("{:#}", err).red());
        return;
    };

    eprintln!("{}", core_error.to_string().red());

    let search_hint = format!(
        "Specify a search title using {} or {}",
        "--search \"<title>\"".cyan(),
        "-s\"<title>\"".cyan()
    );
    match core_error {
        Error::InvalidFilenamePattern { .. } | Error::AmbiguousFilename { .. } => {
            eprintln!("{}", search_hint.yellow());
        }
        Error::NoResultsFound { .. } if args.search_title.is_some() => {
            eprintln!("{}", "Try specifying a different search title".yellow());
        }
        Error::NoResultsFound { .. } => {
            eprintln!("{}", search_hint.yellow());
        }
        Error::AmbiguousResult { candidates, .. } => {
            let example = candidates
                .first()
                .map(|c| format!(" e.g. {}", format!("-t{}", c.key).cyan()))
                .unwrap_or_default();
            eprintln!(
                "{}",
                format!(
                    "Run again with {} or just {} for your chosen title.{}",
                    "--imdb-key <key prefix>".cyan(),
                    "-t<key prefix>".cyan(),
                    example
                )
                .yellow()
            );
        }
        Error::Transport(_) => {
            eprintln!("{}", "Check the network connection and try again".yellow());
        }
        _ => {}
    }
}
