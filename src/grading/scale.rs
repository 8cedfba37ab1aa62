use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Letter grade shared by the mark scale and the SGPA scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    O,
    APlus,
    A,
    BPlus,
    B,
    C,
    P,
    F,
}

/// One row of the mark-based grade table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradeScaleEntry {
    pub grade: Grade,
    pub points: f64,
    pub rating: &'static str,
    pub min_marks: f64,
}

/// One row of the SGPA-based grade table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SgpaThreshold {
    pub grade: Grade,
    pub min_sgpa: f64,
}

/// Mark-based grade table, ordered by `min_marks` descending.
///
/// | Marks  | Grade | Points | Rating        |
/// |--------|-------|--------|---------------|
/// | >= 90  | O     | 10     | Outstanding   |
/// | >= 85  | A+    | 9.5    | Excellent     |
/// | >= 80  | A     | 9      | Very Good     |
/// | >= 75  | B+    | 8      | Good          |
/// | >= 70  | B     | 7      | Above Average |
/// | >= 60  | C     | 6      | Average       |
/// | >= 50  | P     | 5      | Pass          |
/// | < 50   | F     | 0      | Fail          |
pub static MARK_SCALE: &[GradeScaleEntry] = &[
    GradeScaleEntry { grade: Grade::O, points: 10.0, rating: "Outstanding", min_marks: 90.0 },
    GradeScaleEntry { grade: Grade::APlus, points: 9.5, rating: "Excellent", min_marks: 85.0 },
    GradeScaleEntry { grade: Grade::A, points: 9.0, rating: "Very Good", min_marks: 80.0 },
    GradeScaleEntry { grade: Grade::BPlus, points: 8.0, rating: "Good", min_marks: 75.0 },
    GradeScaleEntry { grade: Grade::B, points: 7.0, rating: "Above Average", min_marks: 70.0 },
    GradeScaleEntry { grade: Grade::C, points: 6.0, rating: "Average", min_marks: 60.0 },
    GradeScaleEntry { grade: Grade::P, points: 5.0, rating: "Pass", min_marks: 50.0 },
    GradeScaleEntry { grade: Grade::F, points: 0.0, rating: "Fail", min_marks: 0.0 },
];

/// SGPA-based grade table. Not derived from [`MARK_SCALE`]; the cut-offs differ.
///
/// | SGPA   | Grade |
/// |--------|-------|
/// | >= 9.5 | O     |
/// | >= 9.0 | A+    |
/// | >= 8.5 | A     |
/// | >= 7.5 | B+    |
/// | >= 6.5 | B     |
/// | >= 5.5 | C     |
/// | >= 5.0 | P     |
/// | < 5.0  | F     |
pub static SGPA_SCALE: &[SgpaThreshold] = &[
    SgpaThreshold { grade: Grade::O, min_sgpa: 9.5 },
    SgpaThreshold { grade: Grade::APlus, min_sgpa: 9.0 },
    SgpaThreshold { grade: Grade::A, min_sgpa: 8.5 },
    SgpaThreshold { grade: Grade::BPlus, min_sgpa: 7.5 },
    SgpaThreshold { grade: Grade::B, min_sgpa: 6.5 },
    SgpaThreshold { grade: Grade::C, min_sgpa: 5.5 },
    SgpaThreshold { grade: Grade::P, min_sgpa: 5.0 },
];

/// Converts a subject mark into a letter grade using [`MARK_SCALE`].
///
/// Total over every `f64`: anything below 50 (including negatives and NaN)
/// is an `F`.
pub fn classify(mark: f64) -> Grade {
    MARK_SCALE
        .iter()
        .find(|entry| mark >= entry.min_marks)
        .map_or(Grade::F, |entry| entry.grade)
}

/// Converts an SGPA value into a letter grade using [`SGPA_SCALE`].
pub fn classify_sgpa(sgpa: f64) -> Grade {
    SGPA_SCALE
        .iter()
        .find(|threshold| sgpa >= threshold.min_sgpa)
        .map_or(Grade::F, |threshold| threshold.grade)
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::O => "O",
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::C => "C",
            Grade::P => "P",
            Grade::F => "F",
        }
    }

    /// The [`MARK_SCALE`] row for this grade.
    pub fn entry(&self) -> &'static GradeScaleEntry {
        MARK_SCALE
            .iter()
            .find(|entry| entry.grade == *self)
            .unwrap_or(&MARK_SCALE[MARK_SCALE.len() - 1])
    }

    pub fn points(&self) -> f64 {
        self.entry().points
    }

    pub fn rating(&self) -> &'static str {
        self.entry().rating
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MARK_SCALE
            .iter()
            .map(|entry| entry.grade)
            .find(|grade| grade.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown grade '{}'", s))
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(100.0), Grade::O);
        assert_eq!(classify(90.0), Grade::O);
        assert_eq!(classify(89.9), Grade::APlus);
        assert_eq!(classify(85.0), Grade::APlus);
        assert_eq!(classify(84.99), Grade::A);
        assert_eq!(classify(80.0), Grade::A);
        assert_eq!(classify(75.0), Grade::BPlus);
        assert_eq!(classify(70.0), Grade::B);
        assert_eq!(classify(69.5), Grade::C);
        assert_eq!(classify(60.0), Grade::C);
        assert_eq!(classify(50.0), Grade::P);
        assert_eq!(classify(49.0), Grade::F);
        assert_eq!(classify(0.0), Grade::F);
    }

    #[test]
    fn test_classify_out_of_range_marks() {
        assert_eq!(classify(150.0), Grade::O);
        assert_eq!(classify(-5.0), Grade::F);
        assert_eq!(classify(f64::NAN), Grade::F);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let marks: Vec<f64> = (0..=220).map(|i| i as f64 * 0.5).collect();
        for pair in marks.windows(2) {
            let lower = classify(pair[0]).points();
            let higher = classify(pair[1]).points();
            assert!(
                higher >= lower,
                "points dropped between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_classify_sgpa_boundaries() {
        assert_eq!(classify_sgpa(10.0), Grade::O);
        assert_eq!(classify_sgpa(9.5), Grade::O);
        assert_eq!(classify_sgpa(9.49), Grade::APlus);
        assert_eq!(classify_sgpa(9.0), Grade::APlus);
        assert_eq!(classify_sgpa(8.5), Grade::A);
        assert_eq!(classify_sgpa(8.29), Grade::BPlus);
        assert_eq!(classify_sgpa(6.5), Grade::B);
        assert_eq!(classify_sgpa(5.5), Grade::C);
        assert_eq!(classify_sgpa(5.0), Grade::P);
        assert_eq!(classify_sgpa(4.99), Grade::F);
        assert_eq!(classify_sgpa(0.0), Grade::F);
    }

    #[test]
    fn test_scales_are_not_the_same_table() {
        // 9.0 is an A+ SGPA but 9 marks is a fail
        assert_eq!(classify_sgpa(9.0), Grade::APlus);
        assert_eq!(classify(9.0), Grade::F);
    }

    #[test]
    fn test_mark_scale_strictly_descending() {
        for pair in MARK_SCALE.windows(2) {
            assert!(pair[0].min_marks > pair[1].min_marks);
        }
        for pair in SGPA_SCALE.windows(2) {
            assert!(pair[0].min_sgpa > pair[1].min_sgpa);
        }
    }

    #[test]
    fn test_grade_lookup_and_display() {
        assert_eq!(Grade::APlus.points(), 9.5);
        assert_eq!(Grade::C.rating(), "Average");
        assert_eq!(Grade::BPlus.to_string(), "B+");
        assert_eq!("a+".parse::<Grade>().unwrap(), Grade::APlus);
        assert!("Z".parse::<Grade>().is_err());
        assert_eq!(serde_json::to_string(&Grade::O).unwrap(), "\"O\"");
    }
}
