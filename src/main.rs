//! CLI entry point for the SGPA calculator.
//!
//! Provides a one-shot `calc` subcommand, a `scale` listing of both grade
//! tables, and an `interactive` session that mirrors the grading form.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sgpa_calc::config::Settings;
use sgpa_calc::engine::GradeEngine;
use sgpa_calc::grading::types::{AverageChoice, CollegeField};
use sgpa_calc::output::{
    print_json, print_pretty, render_breakdown, render_progress, render_results, render_scale,
    render_subjects, to_json, write_breakdown_csv,
};
use sgpa_calc::report::Report;
use sgpa_calc::session::{Outcome, Session, parse_subject_spec};
use std::io::{BufRead, Write};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sgpa_calc")]
#[command(about = "Compute marks statistics and SGPA for a semester", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute results for the given subjects in one go
    Calc {
        /// Subject as NAME:MARK:CREDIT (repeatable)
        #[arg(short, long = "subject", value_name = "NAME:MARK:CREDIT", required = true)]
        subjects: Vec<String>,

        /// Student roll number
        #[arg(long)]
        roll: Option<String>,

        /// Student name
        #[arg(long)]
        student: Option<String>,

        /// College name
        #[arg(long)]
        college: Option<String>,

        /// College address
        #[arg(long)]
        college_address: Option<String>,

        /// College phone number
        #[arg(long)]
        college_phone: Option<String>,

        /// College email
        #[arg(long)]
        college_email: Option<String>,

        /// Name of whoever prepared the report
        #[arg(long)]
        prepared_by: Option<String>,

        /// Also compute the average
        #[arg(short, long, default_value_t = false)]
        average: bool,

        /// Also compute the SGPA and its breakdown
        #[arg(short = 'g', long, default_value_t = false)]
        sgpa: bool,

        /// Also show minimum, maximum and median marks
        #[arg(long, default_value_t = false)]
        stats: bool,

        /// Print the full report as JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write the SGPA breakdown to this CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<String>,
    },
    /// Show the mark-based and SGPA-based grade scales
    Scale,
    /// Fill in the form line by line on stdin
    Interactive,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let settings = Settings::from_env();
    let _file_guard = init_tracing(&settings);

    let cli = Cli::parse();

    match cli.command {
        Commands::Calc {
            subjects,
            roll,
            student,
            college,
            college_address,
            college_phone,
            college_email,
            prepared_by,
            average,
            sgpa,
            stats,
            json,
            csv,
        } => {
            let records = subjects
                .iter()
                .map(String::as_str)
                .map(parse_subject_spec)
                .collect::<Result<Vec<_>>>()?;
            let mut engine = GradeEngine::with_subjects(records);

            if let Some(roll) = roll {
                engine.set_roll_number(&roll);
            }
            if let Some(student) = student {
                engine.set_student_name(&student);
            }
            for (field, value) in [
                (CollegeField::Name, college),
                (CollegeField::Address, college_address),
                (CollegeField::Phone, college_phone),
                (CollegeField::Email, college_email),
            ] {
                if let Some(value) = value {
                    engine.set_college(field, &value);
                }
            }
            if let Some(prepared_by) = prepared_by {
                engine.set_prepared_by(&prepared_by);
            }

            engine.compute_total();
            engine.decide_average(if average {
                AverageChoice::Compute
            } else {
                AverageChoice::Skip
            });
            if stats {
                engine.compute_min();
                engine.compute_max();
                engine.compute_median();
            }

            let mut sgpa_error = None;
            if (sgpa || csv.is_some())
                && let Err(e) = engine.compute_sgpa()
            {
                warn!(error = %e, "SGPA not computed");
                sgpa_error = Some(e);
            }

            let report = Report::from_engine(&engine);
            print_pretty(&report);
            if json {
                println!("{}", to_json(&report)?);
            } else {
                println!("{}", render_subjects(&engine));
                println!("{}", render_results(&engine));
                if let Some(result) = engine.sgpa() {
                    println!("{}", render_breakdown(result));
                }
                println!("{}", render_progress(&engine));
            }

            if let Some(path) = csv
                && let Some(result) = engine.sgpa()
            {
                write_breakdown_csv(&path, result)?;
                info!(path = %path, "Breakdown written");
            }

            if let Some(e) = sgpa_error {
                return Err(e.into());
            }
        }
        Commands::Scale => {
            println!("{}", render_scale());
        }
        Commands::Interactive => run_interactive()?,
    }

    Ok(())
}

/// Reads commands from stdin until `quit` or end of input.
fn run_interactive() -> Result<()> {
    let mut session = Session::default();
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("SGPA calculator. Type 'help' for commands.");
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match session.execute_line(&line) {
                Ok(Outcome::Message(text)) => println!("{}", text),
                Ok(Outcome::Notice(text)) => println!("! {}", text),
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    error!(error = %e, line = %line, "Command failed");
                    println!("error: {}", e);
                }
            }
        }
        print!("> ");
        stdout.flush()?;
    }

    print_json(&Report::from_engine(session.engine()))?;
    Ok(())
}

/// Logging setup: colored stderr + optional JSON rolling log file.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_tracing(settings: &Settings) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "warn"));

    if !settings.file_log {
        tracing_subscriber::registry().with(stderr_layer).init();
        return None;
    }

    let file_appender =
        tracing_appender::rolling::daily(settings.log_dir(), settings.log_file_name());
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Some(file_guard)
}

fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
