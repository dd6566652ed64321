use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use gradefile::{CategoryStatus, GradeFile, GradeFileError, GradeSummary, Outcome};

/// Compute a course grade from a grade file.
#[derive(Debug, Parser)]
#[command(name = "gradefile", version, about)]
struct Cli {
    /// The grade file to evaluate
    input: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli.input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", format!("error: {err}").red());
            if let Some(line) = err.offending_line() {
                eprintln!("{}", format!("at line: \"{line}\"").red());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path) -> Result<(), GradeFileError> {
    let file = GradeFile::from_file(path)?;
    let summary = file.summary()?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &GradeSummary) {
    println!("===== GRADE SUMMARY =====");

    let passing = summary.passing_grade();
    let left: Vec<String> = summary
        .rows()
        .iter()
        .map(|row| {
            format!(
                "{} ({}%)",
                row.name.as_str().cyan(),
                (row.weight_share * 100.0).round()
            )
        })
        .collect();

    let width = left.iter().map(String::len).max().unwrap_or(0) + 1;
    for (label, row) in left.iter().zip(summary.rows()) {
        let status = match row.status {
            CategoryStatus::Unspecified => "(unspecified)".red().to_string(),
            CategoryStatus::Unknown => "unknown".yellow().to_string(),
            CategoryStatus::Scored(value) => {
                let text = format!("{:.2}%", value * 100.0);
                if value >= passing {
                    text.green().to_string()
                } else {
                    text.red().to_string()
                }
            }
        };
        println!("{label}:{}{status}", " ".repeat(width - label.len()));
    }

    let threshold = format!("{}%", passing * 100.0).green();
    match summary.outcome() {
        Outcome::Score { value, passed } => {
            println!();
            println!("===== OVERALL SCORE =====");
            let line = format!("          {:.2}%         ", value * 100.0);
            println!("{}", if *passed { line.green() } else { line.red() });
        }
        Outcome::MinimumNeeded { unknowns, minimum } => {
            let names = unknowns
                .iter()
                .map(|name| name.as_str().cyan().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            match minimum {
                Some(percent) => println!(
                    "To pass the course with a {threshold}, you would need, at minimum, a {} in {}.",
                    format!("{percent}%").cyan(),
                    names
                ),
                None => println!(
                    "You would not be able to pass the course with a {threshold}, even with a perfect score (100) in {}.",
                    names
                ),
            }
        }
    }
}
