use thiserror::Error;
use tubely_core::AppError;

/// Media toolkit failures
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("Failed to parse ffprobe output: {0}")]
    InvalidProbeOutput(String),

    #[error("no streams found")]
    NoStreams,
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::NoStreams => AppError::Processing(err.to_string()),
            ProcessingError::InvalidPath(_) => AppError::Internal(err.to_string()),
            ProcessingError::Spawn { tool, .. } => {
                tracing::error!(error = %err, "media tool could not be started");
                AppError::Processing(format!("Couldn't run {}", tool))
            }
            ProcessingError::ToolFailed { tool, .. } => {
                tracing::debug!(error = %err, "media tool failure");
                AppError::Processing(format!("Couldn't process video with {}", tool))
            }
            ProcessingError::InvalidProbeOutput(_) => {
                AppError::Processing("Couldn't read video stream information".to_string())
            }
        }
    }
}
