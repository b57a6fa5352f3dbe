//! Error taxonomy for the query pipeline.
//!
//! Every fallible step between "parse the command line" and "print the
//! response" surfaces as a [`QueryError`] so callers can match on what went
//! wrong without string inspection.

use std::fmt;

use thiserror::Error;

use crate::constants::{MAX_TEMPERATURE, MIN_TEMPERATURE};
use crate::fetch::FetchError;

/// Input source category cited by size-limit failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Stdin,
    Files,
    Urls,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Stdin => "stdin",
            SourceKind::Files => "files",
            SourceKind::Urls => "urls",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// A credential or endpoint needed to construct a client is missing or
    /// implausible. Raised before any network traffic.
    #[error("{0}")]
    Configuration(String),

    /// The requested model has no registry entry.
    #[error("unrecognized model: {0}")]
    UnrecognizedModel(String),

    /// The prompt sequence was empty.
    #[error("prompts cannot be empty for text query")]
    EmptyPrompt,

    /// Temperature outside the half-open canonical range.
    #[error(
        "temperature must be in the range [{min}, {max}) but got {0}",
        min = MIN_TEMPERATURE,
        max = MAX_TEMPERATURE
    )]
    TemperatureOutOfRange(f32),

    /// Combined input crossed the aggregate byte ceiling.
    ///
    /// The field is `category`, not `source`: thiserror reserves `source`
    /// for the error cause chain, and [`SourceKind`] is not an error.
    #[error("total input size would exceed limit of {limit} bytes ({category}{})", fmt_reference(.reference))]
    InputTooLarge {
        category: SourceKind,
        /// The file or URL that pushed the total over, when one is to blame.
        reference: Option<String>,
        limit: usize,
    },

    /// A named file could not be read.
    #[error("failed to read {path}")]
    File {
        path: String,
        #[source]
        source: FetchError,
    },

    /// A named URL could not be fetched.
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The surrounding call was cancelled before a response arrived.
    #[error("request cancelled")]
    Cancelled,

    /// The HTTP exchange itself failed (connect, TLS, timeout).
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The provider answered 200 but the body did not parse.
    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),

    /// The provider answered 200 with zero content fragments.
    #[error("no content in response")]
    EmptyResponse,
}

fn fmt_reference(reference: &Option<String>) -> String {
    match reference {
        Some(r) => format!(": {r}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limit_message_names_category_and_reference() {
        let err = QueryError::InputTooLarge {
            category: SourceKind::Urls,
            reference: Some("https://example.com/big".into()),
            limit: 262144,
        };
        let msg = err.to_string();
        assert!(msg.contains("262144"));
        assert!(msg.contains("(urls: https://example.com/big)"));
    }

    #[test]
    fn size_limit_message_without_reference() {
        let err = QueryError::InputTooLarge {
            category: SourceKind::Stdin,
            reference: None,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "total input size would exceed limit of 10 bytes (stdin)"
        );
    }

    #[test]
    fn temperature_message_shows_bounds() {
        let err = QueryError::TemperatureOutOfRange(150.0);
        assert_eq!(
            err.to_string(),
            "temperature must be in the range [0, 100) but got 150"
        );
    }
}
