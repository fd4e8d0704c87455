use thiserror::Error;

/// Why a form submission or a strict-mode record was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    #[error("leadCount must be a number, got '{0}'")]
    InvalidLeadCount(String),

    #[error("leadCount must not be negative")]
    NegativeLeadCount,

    #[error("the date range contains no working days")]
    NoBusinessDays,

    #[error("DRR could not be calculated; check the lead count")]
    DrrUnavailable,
}
