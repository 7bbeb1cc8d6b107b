use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid criterion '{0}': expected one of latest, eq, gte, lte")]
    InvalidCriterion(String),

    #[error("Criterion '{criterion}' requires a version key")]
    MissingKey { criterion: String },

    #[error("Malformed version key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid repository '{0}': expected OWNER/REPO")]
    InvalidRepository(String),
}
