//! Error types for pipeline runs.
//!
//! Every stage failure is fatal to the run: no retry, no partial output,
//! no resumption across pages. Errors are surfaced as typed values to the
//! entry point, which alone decides on process termination.

use std::fmt;

use api2ics_core::DateFormatError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type RunResult<T> = Result<T, RunError>;

/// The pipeline stage a run failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Issuing the HTTP request.
    Fetch,
    /// Parsing the response body as JSON.
    Decode,
    /// Selecting raw records from the decoded body.
    Filter,
    /// Mapping raw records into calendar events.
    Transform,
    /// Rendering the ICS document.
    Convert,
    /// Writing the output file.
    Write,
}

impl Stage {
    /// Returns a human-readable name for this stage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Filter => "filter",
            Self::Transform => "transform",
            Self::Convert => "convert",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that aborted a pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The request could not be sent or no response was received.
    #[error("unable to fetch data from API: {message} ({url})")]
    Network {
        /// What went wrong.
        message: String,
        /// The page URL the request targeted.
        url: String,
    },

    /// The response body was absent or not valid JSON.
    #[error("unable to parse data from API: {message}")]
    Decode {
        /// The underlying parse failure.
        message: String,
    },

    /// The filter hook failed, or the identity filter met a non-array body.
    ///
    /// Carries the decoded response so the reporter can dump it: filter
    /// failures are overwhelmingly caused by an unexpected response shape.
    #[error("unable to filter data from API: {message}")]
    Filter {
        /// What the hook reported.
        message: String,
        /// The decoded body the filter was given.
        payload: serde_json::Value,
    },

    /// The transform hook failed on a record.
    #[error("unable to transform data from API: {message}")]
    Transform {
        /// What the hook reported.
        message: String,
    },

    /// A start/end value could not be parsed during ICS rendering.
    #[error(transparent)]
    DateFormat(#[from] DateFormatError),

    /// The generated document could not be written to disk.
    #[error("unable to write to file: {0}")]
    FileWrite(#[from] std::io::Error),
}

impl RunError {
    /// Returns the stage this error occurred in.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Network { .. } => Stage::Fetch,
            Self::Decode { .. } => Stage::Decode,
            Self::Filter { .. } => Stage::Filter,
            Self::Transform { .. } => Stage::Transform,
            Self::DateFormat(_) => Stage::Convert,
            Self::FileWrite(_) => Stage::Write,
        }
    }

    /// Returns the decoded payload attached to this error, if any.
    ///
    /// Only [`RunError::Filter`] carries one.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Filter { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_mapping() {
        let err = RunError::Network {
            message: "connection refused".to_string(),
            url: "https://api.example.com".to_string(),
        };
        assert_eq!(err.stage(), Stage::Fetch);

        let err = RunError::Transform {
            message: "missing title".to_string(),
        };
        assert_eq!(err.stage(), Stage::Transform);
        assert!(err.payload().is_none());
    }

    #[test]
    fn filter_error_carries_payload() {
        let err = RunError::Filter {
            message: "no results key".to_string(),
            payload: serde_json::json!({"error": "teapot"}),
        };

        assert_eq!(err.stage(), Stage::Filter);
        assert_eq!(
            err.payload(),
            Some(&serde_json::json!({"error": "teapot"}))
        );
    }

    #[test]
    fn date_format_error_converts() {
        let err: RunError = api2ics_core::normalize_datetime("junk").unwrap_err().into();
        assert_eq!(err.stage(), Stage::Convert);
        assert!(err.to_string().contains("junk"));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Fetch.as_str(), "fetch");
        assert_eq!(Stage::Write.to_string(), "write");
    }
}
