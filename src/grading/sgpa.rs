use serde::Serialize;
use tracing::debug;

use crate::grading::error::ValidationError;
use crate::grading::scale::{Grade, classify, classify_sgpa};
use crate::grading::types::{SgpaDetail, SubjectRecord};
use crate::grading::utility::{fmt2, round2};

/// Result of a successful SGPA calculation.
///
/// `sgpa` keeps full precision; [`SgpaResult::display`] and
/// [`SgpaResult::rounded`] give the two-decimal presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SgpaResult {
    pub sgpa: f64,
    pub details: Vec<SgpaDetail>,
    pub total_credits: f64,
    pub total_credit_points: f64,
}

impl SgpaResult {
    /// Grade on the SGPA scale, derived from the unrounded value.
    pub fn grade(&self) -> Grade {
        classify_sgpa(self.sgpa)
    }

    pub fn rating(&self) -> &'static str {
        self.grade().rating()
    }

    pub fn rounded(&self) -> f64 {
        round2(self.sgpa)
    }

    pub fn display(&self) -> String {
        fmt2(self.sgpa)
    }
}

/// Computes the credit-weighted SGPA and its per-subject breakdown.
///
/// Every subject needs a non-blank name and a positive credit; otherwise a
/// [`ValidationError`] listing the offending positions is returned.
#[tracing::instrument(skip(subjects), fields(subjects = subjects.len()))]
pub fn compute_sgpa(subjects: &[SubjectRecord]) -> Result<SgpaResult, ValidationError> {
    let incomplete: Vec<usize> = subjects
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_sgpa_ready())
        .map(|(i, _)| i)
        .collect();

    if !incomplete.is_empty() {
        debug!(?incomplete, "SGPA rejected");
        return Err(ValidationError::IncompleteSubjectData {
            indices: incomplete,
        });
    }

    let mut total_credit_points = 0.0;
    let mut total_credits = 0.0;
    let mut details = Vec::with_capacity(subjects.len());

    for subject in subjects {
        let grade = classify(subject.mark);
        let grade_point = grade.points();
        let credit_points = subject.credit * grade_point;

        total_credit_points += credit_points;
        total_credits += subject.credit;

        details.push(SgpaDetail {
            subject: subject.name.clone(),
            mark: subject.mark,
            credit: subject.credit,
            grade,
            grade_point,
            credit_points,
        });
    }

    let sgpa = if total_credits > 0.0 {
        total_credit_points / total_credits
    } else {
        0.0
    };

    debug!(sgpa, total_credits, total_credit_points, "SGPA computed");

    Ok(SgpaResult {
        sgpa,
        details,
        total_credits,
        total_credit_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sgpa() {
        let subjects = vec![
            SubjectRecord::new("Maths", 90.0, 4.0),
            SubjectRecord::new("Physics", 60.0, 3.0),
        ];
        let result = compute_sgpa(&subjects).unwrap();

        assert_eq!(result.details[0].grade, Grade::O);
        assert_eq!(result.details[0].grade_point, 10.0);
        assert_eq!(result.details[1].grade, Grade::C);
        assert_eq!(result.details[1].credit_points, 18.0);
        assert_eq!(result.total_credits, 7.0);
        assert_eq!(result.total_credit_points, 58.0);
        assert_eq!(result.display(), "8.29");
        assert_eq!(result.rounded(), 8.29);
        assert_eq!(result.grade(), Grade::BPlus);
        assert_eq!(result.rating(), "Good");
    }

    #[test]
    fn test_half_cent_sgpa_rounds_up() {
        // (5 * 10 + 3 * 5) / 8 = 8.125
        let subjects = vec![
            SubjectRecord::new("Maths", 90.0, 5.0),
            SubjectRecord::new("Arts", 50.0, 3.0),
        ];
        let result = compute_sgpa(&subjects).unwrap();
        assert_eq!(result.sgpa, 8.125);
        assert_eq!(result.display(), "8.13");
        assert_eq!(result.rounded(), 8.13);
    }

    #[test]
    fn test_details_follow_input_order() {
        let subjects = vec![
            SubjectRecord::new("Zoology", 55.0, 2.0),
            SubjectRecord::new("Art", 88.0, 1.5),
            SubjectRecord::new("Botany", 72.0, 3.0),
        ];
        let result = compute_sgpa(&subjects).unwrap();
        let names: Vec<&str> = result.details.iter().map(|d| d.subject.as_str()).collect();
        assert_eq!(names, vec!["Zoology", "Art", "Botany"]);
        assert_eq!(result.details[1].credit_points, 1.5 * 9.5);
    }

    #[test]
    fn test_zero_credit_rejected() {
        let subjects = vec![SubjectRecord::new("Math", 80.0, 0.0)];
        let err = compute_sgpa(&subjects).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteSubjectData { indices: vec![0] }
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let subjects = vec![
            SubjectRecord::new("Math", 80.0, 4.0),
            SubjectRecord::new("  ", 70.0, 3.0),
            SubjectRecord::new("", 70.0, 0.0),
        ];
        let err = compute_sgpa(&subjects).unwrap_err();
        assert_eq!(
            err,
            ValidationError::IncompleteSubjectData {
                indices: vec![1, 2]
            }
        );
        assert!(err.to_string().contains("incomplete subject data"));
    }

    #[test]
    fn test_empty_list_is_zero() {
        let result = compute_sgpa(&[]).unwrap();
        assert_eq!(result.sgpa, 0.0);
        assert!(result.details.is_empty());
        assert_eq!(result.grade(), Grade::F);
    }

    #[test]
    fn test_grade_uses_full_precision() {
        let result = SgpaResult {
            sgpa: 9.496,
            details: vec![],
            total_credits: 0.0,
            total_credit_points: 0.0,
        };
        assert_eq!(result.display(), "9.50");
        assert_eq!(result.grade(), Grade::APlus);
    }
}
