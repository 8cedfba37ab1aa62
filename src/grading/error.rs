/// Raised when subject data is not complete enough to compute an SGPA.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// At least one subject has no name or a credit that is not positive.
    #[error("incomplete subject data: enter a name and credits for every subject before calculating SGPA")]
    IncompleteSubjectData {
        /// 0-based positions of the offending subjects.
        indices: Vec<usize>,
    },
}
