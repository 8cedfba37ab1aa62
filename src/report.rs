use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::{ComputationResult, GradeEngine};
use crate::grading::types::{CollegeInfo, Progress, StudentInfo, SubjectRecord};

/// Everything the session knows, in one serializable record.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub college: CollegeInfo,
    pub student: StudentInfo,
    pub prepared_by: Option<String>,
    pub subjects: Vec<SubjectRecord>,
    pub progress: Progress,
    pub results: ComputationResult,
}

impl Report {
    pub fn from_engine(engine: &GradeEngine) -> Self {
        let prepared_by = engine.prepared_by().trim();
        Report {
            generated_at: Utc::now(),
            college: engine.college().clone(),
            student: engine.student().clone(),
            prepared_by: (!prepared_by.is_empty()).then(|| prepared_by.to_string()),
            subjects: engine.subjects().to_vec(),
            progress: engine.progress(),
            results: engine.results(),
        }
    }
}
