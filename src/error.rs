use thiserror::Error;

#[derive(Error, Debug)]
pub enum NBackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error(
        "Sequence Unsatisfiable: placed {placed} of {required} match slots over {candidates} candidate timesteps after {draws} draws"
    )]
    Unsatisfiable {
        placed: usize,
        required: usize,
        candidates: usize,
        draws: usize,
    },

    #[error("Renderer Error: {0}")]
    Renderer(String),

    #[error("Session Error: {0}")]
    Session(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),
}

pub type NbResult<T> = Result<T, NBackError>;
