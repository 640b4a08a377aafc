use reqwest::StatusCode;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Failure of a single GitHub API request.
///
/// All kinds are absorbed by [`SearchView`](crate::SearchView) actions: they
/// are logged and the state from before the action is kept. `Network` and
/// `Status` are transport failures, `Parse` is a response shape mismatch.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The request could not be built or sent, or the body could not be read.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} on {url}")]
    Status { status: StatusCode, url: String },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Formats an error followed by every error in its `source()` chain.
///
/// reqwest keeps the actual cause (refused connection, DNS, TLS) in the chain
/// only, so log lines use this instead of the bare message.
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

/// A malformed interactive command or command-line selector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    UnknownCommand(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unknown sort key '{0}', expected none, stars or forks")]
    UnknownSortKey(String),

    #[error("invalid position '{0}', expected #1, #2, ...")]
    InvalidPosition(String),
}
