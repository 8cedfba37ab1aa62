//! Data types shared by the engine, the SGPA calculation and the report.

use serde::Serialize;
use std::str::FromStr;

use crate::grading::scale::Grade;

/// A single subject row. Identity is its position in the subject list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubjectRecord {
    pub name: String,
    pub mark: f64,
    pub credit: f64,
}

impl SubjectRecord {
    pub fn new(name: impl Into<String>, mark: f64, credit: f64) -> Self {
        Self {
            name: name.into(),
            mark,
            credit,
        }
    }

    /// True when the subject has a non-blank name.
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// True when the subject can take part in an SGPA calculation.
    pub fn is_sgpa_ready(&self) -> bool {
        self.credit > 0.0 && self.is_named()
    }
}

/// Editable field of a [`SubjectRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectField {
    Name,
    Mark,
    Credit,
}

impl FromStr for SubjectField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SubjectField::Name),
            "mark" | "marks" => Ok(SubjectField::Mark),
            "credit" | "credits" => Ok(SubjectField::Credit),
            other => Err(anyhow::anyhow!(
                "unknown subject field '{}' (expected name, mark or credit)",
                other
            )),
        }
    }
}

/// Per-subject line of the SGPA breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SgpaDetail {
    pub subject: String,
    pub mark: f64,
    pub credit: f64,
    pub grade: Grade,
    pub grade_point: f64,
    pub credit_points: f64,
}

/// Where the "calculate average?" step stands after a total was computed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum AverageState {
    #[default]
    NotAsked,
    Skipped,
    Computed(f64),
}

impl AverageState {
    pub fn value(&self) -> Option<f64> {
        match self {
            AverageState::Computed(avg) => Some(*avg),
            _ => None,
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, AverageState::NotAsked)
    }
}

/// The user's answer to "calculate average?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageChoice {
    Compute,
    Skip,
}

impl FromStr for AverageChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "compute" => Ok(AverageChoice::Compute),
            "no" | "n" | "skip" => Ok(AverageChoice::Skip),
            other => Err(anyhow::anyhow!("expected yes or no, got '{}'", other)),
        }
    }
}

/// Min, max and median marks, each shown only once requested.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MarkStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
}

impl MarkStats {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.median.is_none()
    }
}

/// Identity of the student the marks belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentInfo {
    pub roll_number: String,
    pub student_name: String,
}

impl StudentInfo {
    pub fn is_complete(&self) -> bool {
        !self.roll_number.trim().is_empty() && !self.student_name.trim().is_empty()
    }
}

/// College letterhead details. Only displayed and exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollegeInfo {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// Field of [`CollegeInfo`] editable from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollegeField {
    Name,
    Address,
    Phone,
    Email,
}

impl FromStr for CollegeField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(CollegeField::Name),
            "address" => Ok(CollegeField::Address),
            "phone" => Ok(CollegeField::Phone),
            "email" => Ok(CollegeField::Email),
            other => Err(anyhow::anyhow!(
                "unknown college field '{}' (expected name, address, phone or email)",
                other
            )),
        }
    }
}

/// How far the form has been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub subjects_progress: f64,
    pub has_student_info: bool,
    pub filled_subjects: usize,
    pub total_subjects: usize,
    /// Credits summed over every subject, available before any SGPA.
    pub total_credits: f64,
}
