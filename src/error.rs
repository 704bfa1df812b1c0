// src/error.rs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatError>;

#[derive(Error, Debug)]
pub enum HeatError {
    /// A size or step count that must be a positive integer was not.
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: i64 },

    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialise run output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render plot: {0}")]
    Plot(String),

    #[error("--plot needs an output directory (pass --out DIR)")]
    MissingOutputDir,
}
