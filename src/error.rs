use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("At least {needed} spots must be selected, have {have}")]
    InsufficientSelection { needed: usize, have: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("History persistence error: {0}")]
    HistoryPersistence(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
