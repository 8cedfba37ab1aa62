//! Line-driven front end over [`GradeEngine`].
//!
//! Each input line is parsed into a [`Command`] and executed against the
//! session's engine. Subjects are numbered from 1 here, the way the form
//! labels them, and converted to 0-based positions before reaching the engine.

use anyhow::{Result, anyhow, bail};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::engine::GradeEngine;
use crate::grading::types::{AverageChoice, AverageState, CollegeField, SubjectField, SubjectRecord};
use crate::grading::utility::{fmt2, parse_lenient};
use crate::output;
use crate::report::Report;

pub const HELP: &str = "\
Commands:
  add                              add a blank subject
  remove <n>                       remove subject n (the last subject cannot be removed)
  set <n> <name|mark|credit> <v>   edit subject n
  roll <v> | student <v>           set roll number / student name
  college <name|address|phone|email> <v>
  preparer <v>                     set the 'prepared by' name
  calc                             compute the total marks
  average <yes|no>                 compute or skip the average
  sgpa                             compute the SGPA and its breakdown
  min | max | median               show a mark statistic
  scale                            show the grade scales
  progress                         show form completion
  show                             show subjects and results
  json                             print the full report as JSON
  export <path>                    write the SGPA breakdown as CSV
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add,
    Remove(usize),
    Set {
        index: usize,
        field: SubjectField,
        value: String,
    },
    Roll(String),
    Student(String),
    College(CollegeField, String),
    Preparer(String),
    Calculate,
    Average(AverageChoice),
    Sgpa,
    Min,
    Max,
    Median,
    Scale,
    Progress,
    Show,
    Json,
    Export(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let command = match word.to_ascii_lowercase().as_str() {
            "add" => Command::Add,
            "remove" | "rm" => Command::Remove(parse_position(rest)?),
            "set" => {
                let mut parts = rest.splitn(3, char::is_whitespace);
                let index = parse_position(parts.next().unwrap_or(""))?;
                let field = parts
                    .next()
                    .ok_or_else(|| anyhow!("usage: set <n> <name|mark|credit> <value>"))?
                    .parse()?;
                let value = parts.next().unwrap_or("").trim().to_string();
                Command::Set {
                    index,
                    field,
                    value,
                }
            }
            "roll" => Command::Roll(rest.to_string()),
            "student" => Command::Student(rest.to_string()),
            "college" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(f, v)| (f, v.trim()))
                    .unwrap_or((rest, ""));
                Command::College(field.parse()?, value.to_string())
            }
            "preparer" => Command::Preparer(rest.to_string()),
            "calc" | "calculate" | "total" => Command::Calculate,
            "average" | "avg" => Command::Average(rest.parse()?),
            "sgpa" => Command::Sgpa,
            "min" => Command::Min,
            "max" => Command::Max,
            "median" => Command::Median,
            "scale" => Command::Scale,
            "progress" => Command::Progress,
            "show" => Command::Show,
            "json" => Command::Json,
            "export" => {
                if rest.is_empty() {
                    bail!("usage: export <path>");
                }
                Command::Export(rest.to_string())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{}' (type 'help')", other),
        };
        Ok(command)
    }
}

/// Parses a 1-based subject number into a 0-based position.
fn parse_position(input: &str) -> Result<usize> {
    let n: usize = input
        .trim()
        .parse()
        .map_err(|_| anyhow!("expected a subject number, got '{}'", input.trim()))?;
    n.checked_sub(1)
        .ok_or_else(|| anyhow!("subjects are numbered from 1"))
}

/// Parses a `NAME:MARK:CREDIT` subject argument.
///
/// The name may itself contain colons; mark and credit are read leniently
/// like any other form input.
pub fn parse_subject_spec(arg: &str) -> Result<SubjectRecord> {
    let mut parts = arg.rsplitn(3, ':');
    let credit = parts.next();
    let mark = parts.next();
    let name = parts.next();
    match (name, mark, credit) {
        (Some(name), Some(mark), Some(credit)) => Ok(SubjectRecord::new(
            name.trim(),
            parse_lenient(mark),
            parse_lenient(credit),
        )),
        _ => bail!("expected NAME:MARK:CREDIT, got '{}'", arg),
    }
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Text to show the user.
    Message(String),
    /// A blocking notice; the session carries on unchanged.
    Notice(String),
    Quit,
}

#[derive(Debug, Default)]
pub struct Session {
    engine: GradeEngine,
}

impl Session {
    pub fn new(engine: GradeEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &GradeEngine {
        &self.engine
    }

    /// Parses and executes one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let command: Command = line.parse()?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "Executing");
        let outcome = match command {
            Command::Add => {
                self.engine.add_subject();
                message(format!("Added subject {}", self.engine.subjects().len()))
            }
            Command::Remove(index) => {
                self.check_position(index)?;
                if self.engine.remove_subject(index) {
                    message(format!("Removed subject {}", index + 1))
                } else {
                    Outcome::Notice("At least one subject is required".to_string())
                }
            }
            Command::Set {
                index,
                field,
                value,
            } => {
                self.check_position(index)?;
                self.engine.update_subject(index, field, &value);
                let subject = &self.engine.subjects()[index];
                message(format!(
                    "Subject {}: {} | mark {} | credit {}",
                    index + 1,
                    subject.name,
                    subject.mark,
                    subject.credit
                ))
            }
            Command::Roll(value) => {
                self.engine.set_roll_number(&value);
                message(format!("Roll number: {}", value))
            }
            Command::Student(value) => {
                self.engine.set_student_name(&value);
                message(format!("Student name: {}", value))
            }
            Command::College(field, value) => {
                self.engine.set_college(field, &value);
                message("College details updated")
            }
            Command::Preparer(value) => {
                self.engine.set_prepared_by(&value);
                message(format!("Prepared by: {}", value))
            }
            Command::Calculate => {
                let total = self.engine.compute_total();
                message(format!(
                    "Total Marks: {} of {}\nCalculate average? (average yes|no)",
                    total,
                    self.engine.max_possible_marks()
                ))
            }
            Command::Average(choice) => {
                if self.engine.total().is_none() {
                    return Ok(Outcome::Notice(
                        "Calculate the total first (calc)".to_string(),
                    ));
                }
                match self.engine.decide_average(choice) {
                    AverageState::Computed(avg) => message(format!(
                        "Average: {}% (Grade {})",
                        fmt2(avg),
                        self.engine
                            .average_grade()
                            .map(|g| g.to_string())
                            .unwrap_or_default()
                    )),
                    _ => message("Average skipped"),
                }
            }
            Command::Sgpa => match self.engine.compute_sgpa() {
                Ok(result) => message(format!(
                    "SGPA: {} (Grade {}, {})\n{}",
                    result.display(),
                    result.grade(),
                    result.rating(),
                    output::render_breakdown(result)
                )),
                Err(e) => {
                    warn!(error = %e, "SGPA validation failed");
                    Outcome::Notice(e.to_string())
                }
            },
            Command::Min => message(format!("Minimum Mark: {}", self.engine.compute_min())),
            Command::Max => message(format!("Maximum Mark: {}", self.engine.compute_max())),
            Command::Median => message(format!("Median Mark: {}", self.engine.compute_median())),
            Command::Scale => message(output::render_scale().to_string()),
            Command::Progress => message(output::render_progress(&self.engine).to_string()),
            Command::Show => message(format!(
                "{}\n{}",
                output::render_subjects(&self.engine),
                output::render_results(&self.engine)
            )),
            Command::Json => message(output::to_json(&Report::from_engine(&self.engine))?),
            Command::Export(path) => match self.engine.sgpa() {
                Some(result) => {
                    output::write_breakdown_csv(&path, result)?;
                    message(format!("Breakdown written to {}", path))
                }
                None => Outcome::Notice("Compute the SGPA before exporting".to_string()),
            },
            Command::Help => message(HELP),
            Command::Quit => Outcome::Quit,
        };
        Ok(outcome)
    }

    fn check_position(&self, index: usize) -> Result<()> {
        if index >= self.engine.subjects().len() {
            bail!(
                "no such subject {} (there are {})",
                index + 1,
                self.engine.subjects().len()
            );
        }
        Ok(())
    }
}

fn message(text: impl Into<String>) -> Outcome {
    Outcome::Message(text.into())
}
