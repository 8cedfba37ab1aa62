//! Output formatting and export for grading results.
//!
//! Supports pretty-printing, JSON serialization, terminal tables and a CSV
//! export of the SGPA breakdown.

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL};
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::engine::GradeEngine;
use crate::grading::scale::{MARK_SCALE, SGPA_SCALE};
use crate::grading::sgpa::SgpaResult;
use crate::grading::types::AverageState;
use crate::grading::utility::fmt2;
use crate::report::Report;

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}

/// Logs a report as pretty-printed JSON.
pub fn print_json(report: &Report) -> Result<()> {
    info!("{}", to_json(report)?);
    Ok(())
}

pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the per-subject SGPA breakdown to a CSV file, replacing any
/// existing file, followed by a totals row.
pub fn write_breakdown_csv(path: &str, result: &SgpaResult) -> Result<()> {
    debug!(path, rows = result.details.len(), "Writing breakdown CSV");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;
    for detail in &result.details {
        writer.serialize(detail)?;
    }
    writer.write_record([
        "TOTAL".to_string(),
        String::new(),
        fmt_num(result.total_credits),
        format!("SGPA {}", result.display()),
        result.grade().to_string(),
        fmt_num(result.total_credit_points),
    ])?;
    writer.flush()?;

    Ok(())
}

/// Subjects with their current marks and credits.
pub fn render_subjects(engine: &GradeEngine) -> Table {
    let mut table = new_table(vec!["#", "Subject", "Mark", "Credit"]);
    for (i, subject) in engine.subjects().iter().enumerate() {
        let name = if subject.is_named() {
            subject.name.clone()
        } else {
            "(unnamed)".to_string()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(name),
            Cell::new(fmt_num(subject.mark)),
            Cell::new(fmt_num(subject.credit)),
        ]);
    }
    table
}

/// Total, average, SGPA and mark statistics that have been computed so far.
pub fn render_results(engine: &GradeEngine) -> Table {
    let mut table = new_table(vec!["Result", "Value"]);

    if let Some(total) = engine.total() {
        table.add_row(vec![
            Cell::new("Total Marks"),
            Cell::new(format!(
                "{} of {}",
                fmt_num(total),
                fmt_num(engine.max_possible_marks())
            )),
        ]);
        let average = match engine.average() {
            AverageState::NotAsked => "not asked".to_string(),
            AverageState::Skipped => "skipped".to_string(),
            AverageState::Computed(avg) => format!(
                "{}% (Grade {})",
                fmt2(avg),
                engine.average_grade().map(|g| g.to_string()).unwrap_or_default()
            ),
        };
        table.add_row(vec![Cell::new("Average"), Cell::new(average)]);
    }

    if let Some(result) = engine.sgpa() {
        table.add_row(vec![
            Cell::new("SGPA"),
            Cell::new(format!(
                "{} (Grade {}, {})",
                result.display(),
                result.grade(),
                result.rating()
            )),
        ]);
    }

    let stats = engine.stats();
    for (label, value) in [
        ("Minimum Mark", stats.min),
        ("Maximum Mark", stats.max),
        ("Median Mark", stats.median),
    ] {
        if let Some(value) = value {
            table.add_row(vec![Cell::new(label), Cell::new(fmt_num(value))]);
        }
    }

    table
}

/// Per-subject SGPA breakdown with the credit and credit-point sums.
pub fn render_breakdown(result: &SgpaResult) -> Table {
    let mut table = new_table(vec![
        "Subject",
        "Mark",
        "Credit",
        "Grade",
        "Grade Point",
        "Credit Points",
    ]);
    for detail in &result.details {
        table.add_row(vec![
            Cell::new(&detail.subject),
            Cell::new(fmt_num(detail.mark)),
            Cell::new(fmt_num(detail.credit)),
            Cell::new(detail.grade),
            Cell::new(fmt_num(detail.grade_point)),
            Cell::new(fmt_num(detail.credit_points)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(""),
        Cell::new(fmt_num(result.total_credits)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(fmt_num(result.total_credit_points)),
    ]);
    table
}

/// The mark-based and SGPA-based grade tables, side by side.
pub fn render_scale() -> Table {
    let mut table = new_table(vec!["Grade", "Points", "Rating", "Min Marks", "Min SGPA"]);
    for entry in MARK_SCALE {
        let min_sgpa = SGPA_SCALE
            .iter()
            .find(|t| t.grade == entry.grade)
            .map(|t| fmt_num(t.min_sgpa))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(entry.grade),
            Cell::new(fmt_num(entry.points)),
            Cell::new(entry.rating),
            Cell::new(fmt_num(entry.min_marks)),
            Cell::new(min_sgpa),
        ]);
    }
    table
}

/// Form completion: student identity, named subjects and credits entered.
pub fn render_progress(engine: &GradeEngine) -> Table {
    let progress = engine.progress();
    let mut table = new_table(vec!["Progress", "Status"]);
    table.add_row(vec![
        Cell::new("Student Info"),
        Cell::new(if progress.has_student_info {
            "Complete"
        } else {
            "Incomplete"
        }),
    ]);
    table.add_row(vec![
        Cell::new("Subjects"),
        Cell::new(format!(
            "{}/{} named ({:.0}%)",
            progress.filled_subjects, progress.total_subjects, progress.subjects_progress
        )),
    ]);
    table.add_row(vec![
        Cell::new("Total Credits"),
        Cell::new(fmt_num(progress.total_credits)),
    ]);
    table
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Formats a number without a trailing `.0` for whole values.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::sgpa::compute_sgpa;
    use crate::grading::types::{AverageChoice, SubjectRecord};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_engine() -> GradeEngine {
        GradeEngine::with_subjects(vec![
            SubjectRecord::new("Maths", 90.0, 4.0),
            SubjectRecord::new("Physics", 60.0, 3.0),
        ])
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        let report = Report::from_engine(&GradeEngine::new());
        print_pretty(&report);
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let report = Report::from_engine(&sample_engine());
        print_json(&report).unwrap();
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(90.0), "90");
        assert_eq!(fmt_num(3.5), "3.5");
    }

    #[test]
    fn test_render_results_lists_computed_values() {
        let mut engine = sample_engine();
        engine.compute_total();
        engine.decide_average(AverageChoice::Compute);
        engine.compute_sgpa().unwrap();
        engine.compute_median();

        let text = render_results(&engine).to_string();
        assert!(text.contains("150 of 200"));
        assert!(text.contains("75.00%"));
        assert!(text.contains("8.29"));
        assert!(text.contains("Median Mark"));
        assert!(!text.contains("Minimum Mark"));
    }

    #[test]
    fn test_render_results_rounds_half_cent_ties_up() {
        let mut engine = GradeEngine::with_subjects(vec![
            SubjectRecord::new("Maths", 90.0, 5.0),
            SubjectRecord::new("Arts", 50.0, 3.0),
        ]);
        engine.compute_sgpa().unwrap();
        assert!(render_results(&engine).to_string().contains("8.13 (Grade B+, Good)"));

        let mut engine = GradeEngine::with_subjects(vec![
            SubjectRecord::new("Maths", 80.25, 4.0),
            SubjectRecord::new("Arts", 80.0, 3.0),
        ]);
        engine.compute_total();
        engine.decide_average(AverageChoice::Compute);
        assert!(render_results(&engine).to_string().contains("80.13%"));
    }

    #[test]
    fn test_render_progress_shows_credits_before_sgpa() {
        let engine = sample_engine();
        assert!(engine.sgpa().is_none());
        let text = render_progress(&engine).to_string();
        assert!(text.contains("Total Credits"));
        assert!(text.contains("2/2 named (100%)"));
    }

    #[test]
    fn test_render_scale_has_every_grade() {
        let text = render_scale().to_string();
        for rating in ["Outstanding", "Excellent", "Very Good", "Pass", "Fail"] {
            assert!(text.contains(rating));
        }
    }

    #[test]
    fn test_render_breakdown_totals() {
        let result = compute_sgpa(sample_engine().subjects()).unwrap();
        let text = render_breakdown(&result).to_string();
        assert!(text.contains("Physics"));
        assert!(text.contains("58"));
    }

    #[test]
    fn test_write_breakdown_csv() {
        let path = temp_path("sgpa_calc_test_breakdown.csv");
        let _ = fs::remove_file(&path);

        let result = compute_sgpa(sample_engine().subjects()).unwrap();
        write_breakdown_csv(&path, &result).unwrap();
        // Second write replaces rather than appends
        write_breakdown_csv(&path, &result).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "subject,mark,credit,grade,grade_point,credit_points"
        );
        assert!(lines[1].starts_with("Maths,90"));
        assert!(lines[3].starts_with("TOTAL,,7,SGPA 8.29,B+,58"));

        fs::remove_file(&path).unwrap();
    }
}
