use std::io::IsTerminal as _;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context as _;
use clap::Parser as _;

use content_checker::cli::{Cli, Command};
use content_checker::config::Settings;
use content_checker::crawl;
use content_checker::report::{self, StatsReport};

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<ExitCode> {
    content_checker::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let mut settings = Settings::load().context("load settings")?;
    cli.apply(&mut settings);

    let t0 = Instant::now();
    let progress = std::io::stderr().is_terminal();
    let mut crawl = crawl::run(&cli.root, &settings, progress).context("crawl content")?;

    let code = match cli.command {
        Command::Print(args) => {
            println!("Processed {} markdown files", crawl.processed);
            print!("{}", report::render(&mut crawl.courses, &args.filter()));
            ExitCode::SUCCESS
        }
        Command::Errors => {
            println!("Processed {} markdown files", crawl.processed);
            let errors = crawl.courses.errors();
            for error in &errors {
                println!("{error}");
            }
            if errors.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Command::Stats(args) => {
            let stats = StatsReport::new(&mut crawl.courses);
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&stats).context("serialize stats")?
                );
            } else {
                print!("{}", stats.table());
            }
            ExitCode::SUCCESS
        }
    };

    tracing::debug!(elapsed = ?t0.elapsed(), "done");
    Ok(code)
}
