//! The grading session: subject list, identity fields and derived results.
//!
//! Derived values form a chain rooted at the total. Editing the subject list
//! clears every derived value; recomputing the total clears the average and
//! the SGPA.

use serde::Serialize;
use tracing::{debug, info};

use crate::grading::scale::{Grade, classify};
use crate::grading::sgpa::{SgpaResult, compute_sgpa};
use crate::grading::types::{
    AverageChoice, AverageState, CollegeField, CollegeInfo, MarkStats, Progress, SgpaDetail,
    StudentInfo, SubjectField, SubjectRecord,
};
use crate::grading::ValidationError;
use crate::grading::utility::{self, parse_lenient, pct};

/// Snapshot of every derived value, in the shape the report serializes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationResult {
    pub total_marks: Option<f64>,
    pub max_possible_marks: f64,
    pub average: AverageState,
    pub average_grade: Option<Grade>,
    pub min_mark: Option<f64>,
    pub max_mark: Option<f64>,
    pub median_mark: Option<f64>,
    pub sgpa: Option<f64>,
    pub sgpa_grade: Option<Grade>,
    pub sgpa_rating: Option<&'static str>,
    pub sgpa_details: Vec<SgpaDetail>,
    pub total_credits: Option<f64>,
    pub total_credit_points: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct GradeEngine {
    subjects: Vec<SubjectRecord>,
    student: StudentInfo,
    college: CollegeInfo,
    prepared_by: String,
    total: Option<f64>,
    average: AverageState,
    sgpa: Option<SgpaResult>,
    stats: MarkStats,
}

impl Default for GradeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GradeEngine {
    /// A fresh session with one blank subject.
    pub fn new() -> Self {
        Self {
            subjects: vec![SubjectRecord::default()],
            student: StudentInfo::default(),
            college: CollegeInfo::default(),
            prepared_by: String::new(),
            total: None,
            average: AverageState::NotAsked,
            sgpa: None,
            stats: MarkStats::default(),
        }
    }

    /// A session pre-filled with `subjects`. An empty list becomes one blank subject.
    pub fn with_subjects(subjects: Vec<SubjectRecord>) -> Self {
        let mut engine = Self::new();
        if !subjects.is_empty() {
            engine.subjects = subjects;
        }
        engine
    }

    pub fn subjects(&self) -> &[SubjectRecord] {
        &self.subjects
    }

    pub fn student(&self) -> &StudentInfo {
        &self.student
    }

    pub fn college(&self) -> &CollegeInfo {
        &self.college
    }

    pub fn prepared_by(&self) -> &str {
        &self.prepared_by
    }

    pub fn total(&self) -> Option<f64> {
        self.total
    }

    pub fn average(&self) -> AverageState {
        self.average
    }

    pub fn sgpa(&self) -> Option<&SgpaResult> {
        self.sgpa.as_ref()
    }

    pub fn stats(&self) -> MarkStats {
        self.stats
    }

    /// Appends a blank subject.
    pub fn add_subject(&mut self) {
        self.subjects.push(SubjectRecord::default());
        self.invalidate();
        debug!(count = self.subjects.len(), "Subject added");
    }

    /// Removes the subject at `index`.
    ///
    /// Returns `false` without changing anything when it is the only subject
    /// left or the index is out of range.
    pub fn remove_subject(&mut self, index: usize) -> bool {
        if self.subjects.len() <= 1 || index >= self.subjects.len() {
            debug!(index, count = self.subjects.len(), "Subject removal ignored");
            return false;
        }
        self.subjects.remove(index);
        self.invalidate();
        debug!(index, count = self.subjects.len(), "Subject removed");
        true
    }

    /// Sets one field of the subject at `index`.
    ///
    /// Names are stored verbatim. Marks and credits are read leniently: input
    /// that is not a number becomes 0. Returns `false` for an out-of-range index.
    pub fn update_subject(&mut self, index: usize, field: SubjectField, value: &str) -> bool {
        let Some(subject) = self.subjects.get_mut(index) else {
            debug!(index, "Subject update ignored");
            return false;
        };
        match field {
            SubjectField::Name => subject.name = value.to_string(),
            SubjectField::Mark => subject.mark = parse_lenient(value),
            SubjectField::Credit => subject.credit = parse_lenient(value),
        }
        self.invalidate();
        debug!(index, ?field, "Subject updated");
        true
    }

    pub fn set_roll_number(&mut self, roll_number: &str) {
        self.student.roll_number = roll_number.to_string();
    }

    pub fn set_student_name(&mut self, student_name: &str) {
        self.student.student_name = student_name.to_string();
    }

    pub fn set_college(&mut self, field: CollegeField, value: &str) {
        let slot = match field {
            CollegeField::Name => &mut self.college.name,
            CollegeField::Address => &mut self.college.address,
            CollegeField::Phone => &mut self.college.phone,
            CollegeField::Email => &mut self.college.email,
        };
        *slot = value.to_string();
    }

    pub fn set_prepared_by(&mut self, name: &str) {
        self.prepared_by = name.to_string();
    }

    /// Sums every mark. Clears the average decision and any SGPA.
    pub fn compute_total(&mut self) -> f64 {
        let total = utility::sum(&self.marks());
        self.total = Some(total);
        self.average = AverageState::NotAsked;
        self.sgpa = None;
        info!(total, subjects = self.subjects.len(), "Total computed");
        total
    }

    /// Answers "calculate average?". Does nothing until a total exists.
    pub fn decide_average(&mut self, choice: AverageChoice) -> AverageState {
        let Some(total) = self.total else {
            debug!("Average requested before total");
            return self.average;
        };
        self.average = match choice {
            AverageChoice::Compute => AverageState::Computed(total / self.subjects.len() as f64),
            AverageChoice::Skip => AverageState::Skipped,
        };
        debug!(average = ?self.average, "Average decided");
        self.average
    }

    /// Grade of the computed average on the mark scale.
    pub fn average_grade(&self) -> Option<Grade> {
        self.average.value().map(classify)
    }

    pub fn compute_min(&mut self) -> f64 {
        let min = utility::min(&self.marks()).unwrap_or_default();
        self.stats.min = Some(min);
        min
    }

    pub fn compute_max(&mut self) -> f64 {
        let max = utility::max(&self.marks()).unwrap_or_default();
        self.stats.max = Some(max);
        max
    }

    pub fn compute_median(&mut self) -> f64 {
        let median = utility::median(&self.marks()).unwrap_or_default();
        self.stats.median = Some(median);
        median
    }

    /// Computes the SGPA. On failure the previous SGPA, if any, is kept.
    pub fn compute_sgpa(&mut self) -> Result<&SgpaResult, ValidationError> {
        let result = compute_sgpa(&self.subjects)?;
        info!(sgpa = %result.display(), grade = %result.grade(), "SGPA computed");
        Ok(&*self.sgpa.insert(result))
    }

    /// Highest total the current subjects allow, at 100 marks each.
    pub fn max_possible_marks(&self) -> f64 {
        self.subjects.len() as f64 * 100.0
    }

    /// How much of the form is filled in, computed from the current state.
    pub fn progress(&self) -> Progress {
        let filled_subjects = self.subjects.iter().filter(|s| s.is_named()).count();
        let total_subjects = self.subjects.len();
        Progress {
            subjects_progress: pct(filled_subjects, total_subjects),
            has_student_info: self.student.is_complete(),
            filled_subjects,
            total_subjects,
            total_credits: self.subjects.iter().map(|s| s.credit).sum(),
        }
    }

    pub fn results(&self) -> ComputationResult {
        ComputationResult {
            total_marks: self.total,
            max_possible_marks: self.max_possible_marks(),
            average: self.average,
            average_grade: self.average_grade(),
            min_mark: self.stats.min,
            max_mark: self.stats.max,
            median_mark: self.stats.median,
            sgpa: self.sgpa.as_ref().map(SgpaResult::rounded),
            sgpa_grade: self.sgpa.as_ref().map(SgpaResult::grade),
            sgpa_rating: self.sgpa.as_ref().map(SgpaResult::rating),
            sgpa_details: self
                .sgpa
                .as_ref()
                .map(|r| r.details.clone())
                .unwrap_or_default(),
            total_credits: self.sgpa.as_ref().map(|r| r.total_credits),
            total_credit_points: self.sgpa.as_ref().map(|r| r.total_credit_points),
        }
    }

    fn marks(&self) -> Vec<f64> {
        self.subjects.iter().map(|s| s.mark).collect()
    }

    fn invalidate(&mut self) {
        self.total = None;
        self.average = AverageState::NotAsked;
        self.sgpa = None;
        self.stats = MarkStats::default();
    }
}
